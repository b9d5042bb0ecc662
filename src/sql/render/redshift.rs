//! Redshift renderer.
//!
//! Redshift differences:
//! - `DOUBLE PRECISION`
//! - `DATE_TRUNC('week', x)`
//! - No UUID function; a random string is built from two `RANDOM()` draws
//! - `APPROXIMATE PERCENTILE_DISC`, no approximate continuous percentile
//! - `DATEADD` for time deltas

use crate::model::TimeGranularity;
use crate::sql::expr::{PercentileFunctionType, SqlPercentileParams};

use super::{helpers, RenderResult, SqlExpressionRenderer};

/// Redshift renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct RedshiftSqlExpressionRenderer;

impl SqlExpressionRenderer for RedshiftSqlExpressionRenderer {
    fn name(&self) -> &'static str {
        "redshift"
    }

    fn double_data_type(&self) -> &'static str {
        "DOUBLE PRECISION"
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
        Ok(
            "CONCAT(CAST(RANDOM()*100000000 AS INT)::VARCHAR, CAST(RANDOM()*100000000 AS INT)::VARCHAR)"
                .to_string(),
        )
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
            PercentileFunctionType::ApproximateDiscrete => Ok(helpers::percentile_within_group(
                "APPROXIMATE PERCENTILE_DISC",
                params.percentile,
                arg,
            )),
            PercentileFunctionType::ApproximateContinuous => {
                Err(self.unsupported_percentile(params.function_type))
            }
        }
    }
}
