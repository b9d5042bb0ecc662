//! Query-authoring surface.
//!
//! Handles exposed to filter templates. Operations the expression renderers
//! cannot express are reported as [`QuerySyntaxError`]s so they reach the
//! query author instead of failing deep inside rendering.

mod where_filter;

pub use where_filter::{WhereFilterDimension, WhereFilterDimensionFactory};

use crate::sql::render::RenderError;

/// A query the author wrote that cannot be compiled as written.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QuerySyntaxError {
    #[error("'{operation}' is not supported in a where filter")]
    Unsupported { operation: &'static str },

    #[error("{0}")]
    InvalidQuerySyntax(String),
}

pub type QueryResult<T> = Result<T, QuerySyntaxError>;

impl From<RenderError> for QuerySyntaxError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::Unsupported { operation } => QuerySyntaxError::Unsupported { operation },
            other => QuerySyntaxError::InvalidQuerySyntax(other.to_string()),
        }
    }
}
