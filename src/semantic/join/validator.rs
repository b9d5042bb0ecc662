use crate::model::{DataSourceReference, IdentifierReference};
use crate::semantic::error::{SemanticError, SemanticResult};
use crate::semantic::instance::InstanceSet;
use crate::semantic::semantic_model::DataSourceSemantics;

use super::{DataSourceIdentifierJoinType, JoinLegality};

/// Decides whether a join between data sources should be allowed.
///
/// Holds only shared references, so one validator can be used from several
/// threads as long as the semantics it reads are `Sync`.
pub struct DataSourceJoinValidator<'a, S: DataSourceSemantics + ?Sized> {
    pub(super) semantics: &'a S,
    pub(super) legality: JoinLegality,
}

impl<'a, S: DataSourceSemantics + ?Sized> DataSourceJoinValidator<'a, S> {
    pub fn new(semantics: &'a S) -> Self {
        Self {
            semantics,
            legality: JoinLegality::STANDARD,
        }
    }

    /// Use a different legality table.
    pub fn with_legality(mut self, legality: JoinLegality) -> Self {
        self.legality = legality;
        self
    }

    /// The join type for joining `right` onto `left` on `identifier`, or
    /// `None` when that join is not allowed.
    ///
    /// Both data sources must declare the identifier.
    pub fn valid_join_type(
        &self,
        left: &DataSourceReference,
        right: &DataSourceReference,
        identifier: &IdentifierReference,
    ) -> SemanticResult<Option<DataSourceIdentifierJoinType>> {
        let left_data_source = self.semantics.get_by_reference(left)?;
        let right_data_source = self.semantics.get_by_reference(right)?;

        let undeclared = |data_source: &DataSourceReference| SemanticError::IdentifierNotDeclared {
            data_source: data_source.data_source_name.clone(),
            identifier: identifier.element_name.clone(),
        };
        let left_identifier = left_data_source
            .identifier(identifier)
            .ok_or_else(|| undeclared(left))?;
        let right_identifier = right_data_source
            .identifier(identifier)
            .ok_or_else(|| undeclared(right))?;

        self.legality.classify(
            left_data_source,
            left_identifier,
            right_data_source,
            right_identifier,
        )
    }

    pub fn is_valid_join(
        &self,
        left: &DataSourceReference,
        right: &DataSourceReference,
        identifier: &IdentifierReference,
    ) -> SemanticResult<bool> {
        Ok(self.valid_join_type(left, right, identifier)?.is_some())
    }

    /// Whether two intermediate result sets can be joined on `identifier`,
    /// judged by the data sources that originally defined it on each side.
    pub fn is_valid_instance_set_join(
        &self,
        left: &InstanceSet,
        right: &InstanceSet,
        identifier: &IdentifierReference,
    ) -> SemanticResult<bool> {
        let left_origin = left.data_source_of_identifier(identifier)?;
        let right_origin = right.data_source_of_identifier(identifier)?;
        self.is_valid_join(&left_origin, &right_origin, identifier)
    }
}
