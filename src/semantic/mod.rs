//! Semantic layer: the data source registry and the join core built on it.
//!
//! The registry is read-only once built. Join questions go through
//! [`DataSourceJoinValidator`]:
//!
//! 1. **Classify** - is joining `right` onto `left` on an identifier safe?
//! 2. **Resolve** - which data sources can join to an origin, and along which path?
//! 3. **Provenance** - which data source defined an identifier in an
//!    intermediate result?
//!
//! Nothing here mutates shared state, so every query can run concurrently
//! against the same [`SemanticModel`].

pub mod error;
pub mod instance;
pub mod join;
pub mod semantic_model;
pub mod validity_window;

pub use error::{SemanticError, SemanticResult};
pub use instance::{
    IdentifierInstance, IdentifierSpec, InstanceSet, TimeDimensionInstance, TimeDimensionSpec,
};
pub use join::{
    DataSourceIdentifierJoin, DataSourceIdentifierJoinType, DataSourceJoinValidator,
    DataSourceLink, JoinHops, JoinLegality, JoinableDataSources, MAX_JOIN_HOPS,
};
pub use semantic_model::{DataSourceSemantics, SemanticModel};
pub use validity_window::{validity_window_join_description, ValidityWindowJoinDescription};
