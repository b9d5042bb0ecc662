//! Join legality and join path resolution between data sources.
//!
//! Two data sources can be joined when they declare an identifier with the
//! same name and the pair of identifier types is in the valid legality set.
//! [`DataSourceJoinValidator`] answers pairwise questions and enumerates every
//! data source that can join to an origin within a hop budget.

mod legality;
mod resolver;
mod validator;

use std::fmt;

use serde::Serialize;

use crate::model::{DataSourceReference, IdentifierReference, IdentifierType};

pub use legality::JoinLegality;
pub use resolver::JoinableDataSources;
pub use validator::DataSourceJoinValidator;

/// Longest join path the resolver will produce.
pub const MAX_JOIN_HOPS: usize = 2;

/// How far the resolver may walk from the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum JoinHops {
    /// Only data sources that join the origin directly.
    #[default]
    Single,
    /// Paths of up to [`MAX_JOIN_HOPS`] steps.
    Multi,
}

impl JoinHops {
    pub fn budget(self) -> usize {
        match self {
            JoinHops::Single => 1,
            JoinHops::Multi => MAX_JOIN_HOPS,
        }
    }
}

/// The `(left, right)` identifier type pair a join is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DataSourceIdentifierJoinType {
    pub left_identifier_type: IdentifierType,
    pub right_identifier_type: IdentifierType,
}

impl DataSourceIdentifierJoinType {
    pub const fn new(left: IdentifierType, right: IdentifierType) -> Self {
        Self {
            left_identifier_type: left,
            right_identifier_type: right,
        }
    }
}

impl fmt::Display for DataSourceIdentifierJoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}",
            self.left_identifier_type, self.right_identifier_type
        )
    }
}

/// One step of a join path, reaching `right_data_source_reference` on
/// `identifier_reference`.
///
/// `join_type` classifies the step's data source (left) joining the previous
/// data source on the path (right).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DataSourceIdentifierJoin {
    pub right_data_source_reference: DataSourceReference,
    pub identifier_reference: IdentifierReference,
    pub join_type: DataSourceIdentifierJoinType,
}

/// A legal join path from an origin data source to a target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataSourceLink {
    pub left_data_source_reference: DataSourceReference,
    /// Non-empty, at most [`MAX_JOIN_HOPS`] steps.
    pub join_path: Vec<DataSourceIdentifierJoin>,
    /// Order in which the resolver found this link, starting at 0.
    pub discovery_rank: usize,
}

impl DataSourceLink {
    /// The data source at the end of the path.
    pub fn target(&self) -> &DataSourceReference {
        self.join_path
            .last()
            .map(|step| &step.right_data_source_reference)
            .unwrap_or(&self.left_data_source_reference)
    }

    /// Every data source on the path, origin first.
    pub fn data_sources(&self) -> Vec<&str> {
        std::iter::once(self.left_data_source_reference.name())
            .chain(
                self.join_path
                    .iter()
                    .map(|step| step.right_data_source_reference.name()),
            )
            .collect()
    }

    /// Number of hops.
    pub fn len(&self) -> usize {
        self.join_path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.join_path.is_empty()
    }
}
