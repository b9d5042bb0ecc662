//! Semantic graph model: data sources, their keys, dimensions and measures.
//!
//! These types arrive already structurally validated from the model loader.
//! The [`crate::validation`] rules describe the invariants the join core relies on.

pub mod data_source;
pub mod dimension;
pub mod identifier;
pub mod measure;
pub mod references;
pub mod types;

pub use data_source::DataSource;
pub use dimension::{Dimension, DimensionType, TimeDimensionParams, ValidityParams};
pub use identifier::{CompositeSubIdentifier, Identifier, IdentifierType};
pub use measure::Measure;
pub use references::{DataSourceElementReference, DataSourceReference, IdentifierReference};
pub use types::{AggregationType, TimeGranularity};
