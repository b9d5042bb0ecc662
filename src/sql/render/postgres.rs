//! PostgreSQL renderer.
//!
//! PostgreSQL differences:
//! - `DOUBLE PRECISION`
//! - `DATE_TRUNC('week', x)`: granularity first, quoted
//! - `GEN_RANDOM_UUID()` (13+)
//! - Interval strings; quarters spelled as months

use crate::model::TimeGranularity;

use super::{helpers, RenderResult, SqlExpressionRenderer};

/// PostgreSQL renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresSqlExpressionRenderer;

impl SqlExpressionRenderer for PostgresSqlExpressionRenderer {
    fn name(&self) -> &'static str {
        "postgres"
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
        Ok(helpers::interval_string_subtract(arg, count, granularity))
    }

    fn render_generate_uuid(&self) -> RenderResult<String> {
        Ok("GEN_RANDOM_UUID()".to_string())
    }
}
