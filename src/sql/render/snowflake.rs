//! Snowflake renderer.
//!
//! Snowflake differences:
//! - `DATE_TRUNC('week', x)`
//! - `UUID_STRING()`
//! - `APPROX_PERCENTILE(x, p)` for approximate continuous percentiles
//! - `DATEADD` for time deltas

use crate::model::TimeGranularity;
use crate::sql::expr::{PercentileFunctionType, SqlPercentileParams};

use super::{helpers, RenderResult, SqlExpressionRenderer};

/// Snowflake renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnowflakeSqlExpressionRenderer;

impl SqlExpressionRenderer for SnowflakeSqlExpressionRenderer {
    fn name(&self) -> &'static str {
        "snowflake"
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

    fn render_generate_uuid(&self) -> RenderResult<String> {
        Ok("UUID_STRING()".to_string())
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
                helpers::percentile_function_call("APPROX_PERCENTILE", arg, params.percentile),
            ),
            PercentileFunctionType::ApproximateDiscrete => {
                Err(self.unsupported_percentile(params.function_type))
            }
        }
    }
}
