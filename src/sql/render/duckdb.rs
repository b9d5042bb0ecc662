//! DuckDB renderer.
//!
//! DuckDB differences:
//! - `DATE_TRUNC('week', x)`
//! - `GEN_RANDOM_UUID()`
//! - `APPROX_QUANTILE(x, p)` for approximate continuous percentiles

use crate::model::TimeGranularity;
use crate::sql::expr::{PercentileFunctionType, SqlPercentileParams};

use super::{helpers, RenderResult, SqlExpressionRenderer};

/// DuckDB renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct DuckDbSqlExpressionRenderer;

impl SqlExpressionRenderer for DuckDbSqlExpressionRenderer {
    fn name(&self) -> &'static str {
        "duckdb"
    }

    fn render_date_trunc(&self, granularity: TimeGranularity, arg: &str) -> RenderResult<String> {
        Ok(helpers::date_trunc_granularity_first(granularity, arg))
    }

    fn render_generate_uuid(&self) -> RenderResult<String> {
        Ok("GEN_RANDOM_UUID()".to_string())
    }

    fn render_percentile(&self, arg: &str, params: &SqlPercentileParams) -> RenderResult<String> {
        match params.function_type {
            PercentileFunctionType::Continuous => Ok(helpers::percentile_within_group(
                "PERCENTILE_CONT",
                params.percentile,
                arg,
            )),
            PercentileFunctionType::Discrete => Ok(helpers::percentile_within_group(
                "PERCENTILE_DISC",
                params.percentile,
                arg,
            )),
            PercentileFunctionType::ApproximateContinuous => Ok(
                helpers::percentile_function_call("APPROX_QUANTILE", arg, params.percentile),
            ),
            PercentileFunctionType::ApproximateDiscrete => {
                Err(self.unsupported_percentile(params.function_type))
            }
        }
    }
}
