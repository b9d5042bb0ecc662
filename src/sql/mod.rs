//! SQL generation module.
//!
//! - [`expr`] - Expression AST and constructors
//! - [`bind`] - Ordered bind parameters
//! - [`plan`] - Query plan nodes (select statements, tables, subqueries)
//! - [`render`] - Expression renderers per dialect and the plan renderer

pub mod bind;
pub mod expr;
pub mod plan;
pub mod render;
pub mod test_utils;

pub use bind::{BindParameters, BindValue};
pub use expr::{
    DatePart, PercentileFunctionType, SqlAggregateFunction, SqlBinaryOperator, SqlColumnType,
    SqlExpr, SqlLiteral, SqlPercentileParams,
};
pub use plan::{
    SqlJoinDescription, SqlJoinType, SqlOrderByDescription, SqlQueryPlanNode, SqlSelectColumn,
    SqlSelectStatementNode, SqlTable,
};
pub use render::{
    Dialect, RenderError, RenderResult, SqlExpressionRenderResult, SqlExpressionRenderer,
    SqlPlanRenderResult, SqlQueryPlanRenderer,
};
