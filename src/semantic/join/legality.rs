//! Static join legality table.

use crate::model::{DataSource, Identifier, IdentifierType};
use crate::semantic::error::{SemanticError, SemanticResult};

use super::DataSourceIdentifierJoinType;

use crate::model::IdentifierType::{Foreign, Natural, Primary, Unique};

// Non-fanout joins.
const VALID_IDENTIFIER_JOINS: [DataSourceIdentifierJoinType; 11] = [
    DataSourceIdentifierJoinType::new(Primary, Natural),
    DataSourceIdentifierJoinType::new(Primary, Primary),
    DataSourceIdentifierJoinType::new(Primary, Unique),
    DataSourceIdentifierJoinType::new(Unique, Natural),
    DataSourceIdentifierJoinType::new(Unique, Primary),
    DataSourceIdentifierJoinType::new(Unique, Unique),
    DataSourceIdentifierJoinType::new(Foreign, Natural),
    DataSourceIdentifierJoinType::new(Foreign, Primary),
    DataSourceIdentifierJoinType::new(Foreign, Unique),
    DataSourceIdentifierJoinType::new(Natural, Primary),
    DataSourceIdentifierJoinType::new(Natural, Unique),
];

const INVALID_IDENTIFIER_JOINS: [DataSourceIdentifierJoinType; 5] = [
    DataSourceIdentifierJoinType::new(Primary, Foreign),
    DataSourceIdentifierJoinType::new(Unique, Foreign),
    DataSourceIdentifierJoinType::new(Foreign, Foreign),
    DataSourceIdentifierJoinType::new(Natural, Foreign),
    // Hidden fanout or missing values once several validity windows are in play
    DataSourceIdentifierJoinType::new(Natural, Natural),
];

/// Two disjoint sets of identifier type pairs: joins that never fan out and
/// joins that may.
///
/// The sets together must cover every pair of [`IdentifierType`]s. A pair in
/// neither set is reported as [`SemanticError::UnhandledJoinType`] rather than
/// being treated as legal.
#[derive(Debug, Clone, Copy)]
pub struct JoinLegality {
    pub valid: &'static [DataSourceIdentifierJoinType],
    pub invalid: &'static [DataSourceIdentifierJoinType],
}

impl JoinLegality {
    pub const STANDARD: JoinLegality = JoinLegality {
        valid: &VALID_IDENTIFIER_JOINS,
        invalid: &INVALID_IDENTIFIER_JOINS,
    };

    /// Classify a key type pair against the base table only.
    pub fn classify_types(
        &self,
        left: IdentifierType,
        right: IdentifierType,
    ) -> SemanticResult<Option<DataSourceIdentifierJoinType>> {
        let join_type = DataSourceIdentifierJoinType::new(left, right);
        if self.valid.contains(&join_type) {
            Ok(Some(join_type))
        } else if self.invalid.contains(&join_type) {
            Ok(None)
        } else {
            Err(SemanticError::UnhandledJoinType { left, right })
        }
    }

    /// Classify a join between two declared identifiers, applying the
    /// validity window overrides before the base table.
    pub fn classify(
        &self,
        left_data_source: &DataSource,
        left_identifier: &Identifier,
        right_data_source: &DataSource,
        right_identifier: &Identifier,
    ) -> SemanticResult<Option<DataSourceIdentifierJoinType>> {
        // Two validity window tables can never be joined
        if left_data_source.has_validity_dimensions()
            && right_data_source.has_validity_dimensions()
        {
            return Ok(None);
        }

        // A natural key is only single-row once a well-formed window refines it
        if right_identifier.identifier_type == Natural
            && right_data_source.validity_window().is_none()
        {
            return Ok(None);
        }

        self.classify_types(
            left_identifier.identifier_type,
            right_identifier.identifier_type,
        )
    }
}

impl Default for JoinLegality {
    fn default() -> Self {
        Self::STANDARD
    }
}
