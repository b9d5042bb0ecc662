//! BigQuery renderer.
//!
//! BigQuery differences:
//! - `FLOAT64` instead of `DOUBLE`
//! - `DATE_TRUNC(x, isoweek)`: ISO week and year boundaries
//! - Timestamps cast to `DATETIME`
//! - Percentiles are analytic functions: `PERCENTILE_CONT(x, p) OVER()`
//! - Time deltas through `DATE_SUB`

use crate::model::TimeGranularity;
use crate::sql::expr::{PercentileFunctionType, SqlPercentileParams};

use super::{helpers, RenderResult, SqlExpressionRenderer};

/// BigQuery renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct BigQuerySqlExpressionRenderer;

impl SqlExpressionRenderer for BigQuerySqlExpressionRenderer {
    fn name(&self) -> &'static str {
        "bigquery"
    }

    fn double_data_type(&self) -> &'static str {
        "FLOAT64"
    }

    fn timestamp_data_type(&self) -> &'static str {
        "DATETIME"
    }

    fn render_date_trunc(&self, granularity: TimeGranularity, arg: &str) -> RenderResult<String> {
        Ok(helpers::date_trunc_arg_first(
            arg,
            &helpers::iso_granularity(granularity),
        ))
    }

    fn render_time_delta(
        &self,
        arg: &str,
        granularity: TimeGranularity,
        count: u32,
    ) -> RenderResult<String> {
        Ok(format!(
            "DATE_SUB(CAST({} AS DATETIME), INTERVAL {} {})",
            arg,
            count,
            granularity.as_str()
        ))
    }

    fn render_grain_to_date(&self, arg: &str, granularity: TimeGranularity) -> RenderResult<String> {
        let granularity = match granularity {
            TimeGranularity::Week => "ISOWEEK",
            TimeGranularity::Year => "ISOYEAR",
            other => other.as_str(),
        };
        Ok(helpers::date_trunc_arg_first(arg, granularity))
    }

    fn render_generate_uuid(&self) -> RenderResult<String> {
        Ok("GENERATE_UUID()".to_string())
    }

    fn render_percentile(&self, arg: &str, params: &SqlPercentileParams) -> RenderResult<String> {
        let function = match params.function_type {
            PercentileFunctionType::Continuous => "PERCENTILE_CONT",
            PercentileFunctionType::Discrete => "PERCENTILE_DISC",
            function_type => return Err(self.unsupported_percentile(function_type)),
        };
        Ok(format!(
            "{} OVER()",
            helpers::percentile_function_call(function, arg, params.percentile)
        ))
    }
}
