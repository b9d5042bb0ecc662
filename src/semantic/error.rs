//! Error types for the semantic layer.
//!
//! "Join not supported" is not an error: it is `Ok(None)` from the join
//! queries. The variants here are integrity faults, meaning a caller passed
//! an unknown reference or the legality tables/instance metadata are inconsistent.

use std::fmt;

use crate::model::IdentifierType;

/// Result type for semantic operations.
pub type SemanticResult<T> = Result<T, SemanticError>;

#[derive(Debug, Clone, PartialEq)]
pub enum SemanticError {
    /// Referenced a data source that is not in the model.
    UnknownDataSource(String),

    /// Asked about a join on an identifier one of the data sources does not declare.
    IdentifierNotDeclared {
        data_source: String,
        identifier: String,
    },

    /// A key type pair is in neither the valid nor the invalid legality set.
    ///
    /// The legality table is no longer exhaustive with respect to `IdentifierType`.
    UnhandledJoinType {
        left: IdentifierType,
        right: IdentifierType,
    },

    /// Provenance lookup did not find exactly one defining instance.
    AmbiguousProvenance {
        identifier: String,
        matches: Vec<String>,
    },

    /// An instance whose `defined_from` does not hold exactly one element.
    InvalidInstance { element: String, defined_from: usize },

    /// An instance set mixes the validity windows of several data sources.
    MultipleValidityWindows { data_sources: Vec<String> },

    /// Two data sources in a model share a name.
    DuplicateDataSource(String),
}

impl fmt::Display for SemanticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemanticError::UnknownDataSource(name) => {
                write!(f, "Unknown data source: '{}'", name)
            }
            SemanticError::IdentifierNotDeclared {
                data_source,
                identifier,
            } => {
                write!(
                    f,
                    "Identifier '{}' is not declared in data source '{}'",
                    identifier, data_source
                )
            }
            SemanticError::UnhandledJoinType { left, right } => {
                write!(
                    f,
                    "Join type not handled: ({} -> {}). The join legality table must list every key type pair",
                    left, right
                )
            }
            SemanticError::AmbiguousProvenance {
                identifier,
                matches,
            } => {
                write!(
                    f,
                    "Not exactly 1 matching identifier instance found for '{}': found {} [{}]",
                    identifier,
                    matches.len(),
                    matches.join(", ")
                )
            }
            SemanticError::InvalidInstance {
                element,
                defined_from,
            } => {
                write!(
                    f,
                    "Instance '{}' must be defined from exactly one element, found {}",
                    element, defined_from
                )
            }
            SemanticError::MultipleValidityWindows { data_sources } => {
                write!(
                    f,
                    "Found more than 1 set of validity window specs in instance set: {}",
                    data_sources.join(", ")
                )
            }
            SemanticError::DuplicateDataSource(name) => {
                write!(f, "Duplicate data source name: '{}'", name)
            }
        }
    }
}

impl std::error::Error for SemanticError {}
