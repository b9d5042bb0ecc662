//! # semlayer
//!
//! Join-safe query compilation core for a metrics semantic layer.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │          Data sources (identifiers, dimensions,          │
//! │          measures) handed over by a model loader         │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [validation]
//! ┌─────────────────────────────────────────────────────────┐
//! │         SemanticModel (read-only registry + graph)       │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [join legality / path resolver / provenance]
//! ┌─────────────────────────────────────────────────────────┐
//! │            Query plan (SqlQueryPlanNode tree)            │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [expression renderer per dialect]
//! ┌─────────────────────────────────────────────────────────┐
//! │              SQL text + bind parameters                  │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod model;
pub mod query;
pub mod semantic;
pub mod sql;
pub mod validation;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::model::{
        AggregationType, DataSource, DataSourceReference, Dimension, Identifier,
        IdentifierReference, IdentifierType, Measure, TimeGranularity,
    };
    pub use crate::semantic::{
        DataSourceJoinValidator, DataSourceLink, DataSourceSemantics, InstanceSet, JoinHops,
        SemanticError, SemanticModel, SemanticResult,
    };
    pub use crate::sql::{
        BindParameters, BindValue, Dialect, SqlExpr, SqlExpressionRenderer, SqlQueryPlanNode,
        SqlQueryPlanRenderer, SqlSelectStatementNode,
    };
    pub use crate::validation::{ModelValidator, ValidationIssue};
}

pub use config::Settings;
pub use semantic::{DataSourceJoinValidator, SemanticModel};
pub use sql::{Dialect, SqlQueryPlanRenderer};
