//! Databricks (Spark SQL) renderer.
//!
//! Databricks differences:
//! - `DATE_TRUNC('week', x)`
//! - `PERCENTILE(x, p)` / `APPROX_PERCENTILE(x, p)`; no discrete forms
//! - `DATEADD` for time deltas

use crate::model::TimeGranularity;
use crate::sql::expr::{PercentileFunctionType, SqlPercentileParams};

use super::{helpers, RenderResult, SqlExpressionRenderer};

/// Databricks renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct DatabricksSqlExpressionRenderer;

impl SqlExpressionRenderer for DatabricksSqlExpressionRenderer {
    fn name(&self) -> &'static str {
        "databricks"
    }

    fn render_date_trunc(&self, granularity: TimeGranularity, arg: &str) -> RenderResult<String> {
        Ok(helpers::date_trunc_granularity_first(granularity, arg))
    }

    fn render_time_delta(
        &self,
        arg: &str,
        granularity: TimeGranularity,
        count: u32,
    ) -> RenderResult<String> {
        Ok(helpers::dateadd_subtract(arg, count, granularity))
    }

    fn render_percentile(&self, arg: &str, params: &SqlPercentileParams) -> RenderResult<String> {
        let function = match params.function_type {
            PercentileFunctionType::Continuous => "PERCENTILE",
            PercentileFunctionType::ApproximateContinuous => "APPROX_PERCENTILE",
            function_type => return Err(self.unsupported_percentile(function_type)),
        };
        Ok(helpers::percentile_function_call(
            function,
            arg,
            params.percentile,
        ))
    }
}
