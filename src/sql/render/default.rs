//! Baseline renderer: every hook at its default.

use super::SqlExpressionRenderer;

/// ANSI-leaning default renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSqlExpressionRenderer;

impl SqlExpressionRenderer for DefaultSqlExpressionRenderer {
    fn name(&self) -> &'static str {
        "default"
    }
}
