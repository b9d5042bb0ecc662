use serde::{Deserialize, Serialize};

use super::dimension::Dimension;
use super::identifier::Identifier;
use super::measure::Measure;
use super::references::{DataSourceReference, IdentifierReference};

/// A named table or view annotated with keys, dimensions and measures.
///
/// Immutable once handed to [`crate::semantic::SemanticModel`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSource {
    pub name: String,
    #[serde(default)]
    pub sql_table: Option<String>,
    #[serde(default)]
    pub identifiers: Vec<Identifier>,
    #[serde(default)]
    pub dimensions: Vec<Dimension>,
    #[serde(default)]
    pub measures: Vec<Measure>,
}

impl DataSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_table: None,
            identifiers: vec![],
            dimensions: vec![],
            measures: vec![],
        }
    }

    pub fn with_sql_table(mut self, table: &str) -> Self {
        self.sql_table = Some(table.into());
        self
    }

    pub fn with_identifier(mut self, identifier: Identifier) -> Self {
        self.identifiers.push(identifier);
        self
    }

    pub fn with_dimension(mut self, dimension: Dimension) -> Self {
        self.dimensions.push(dimension);
        self
    }

    pub fn with_measure(mut self, measure: Measure) -> Self {
        self.measures.push(measure);
        self
    }

    pub fn reference(&self) -> DataSourceReference {
        DataSourceReference::new(self.name.clone())
    }

    pub fn identifier(&self, reference: &IdentifierReference) -> Option<&Identifier> {
        self.identifiers
            .iter()
            .find(|i| i.name == reference.element_name)
    }

    /// Dimensions carrying validity params, in declaration order.
    pub fn validity_dimensions(&self) -> impl Iterator<Item = &Dimension> {
        self.dimensions
            .iter()
            .filter(|d| d.validity_params().is_some())
    }

    /// True if any dimension is flagged as part of a validity window.
    ///
    /// Does not check that the window is well formed; join safety checks
    /// treat a half-declared window as a window.
    pub fn has_validity_dimensions(&self) -> bool {
        self.validity_dimensions().next().is_some()
    }

    /// The `(start, end)` pair when the data source declares a well-formed window.
    pub fn validity_window(&self) -> Option<(&Dimension, &Dimension)> {
        let dims: Vec<&Dimension> = self.validity_dimensions().collect();
        if dims.len() != 2 {
            return None;
        }
        let start = dims
            .iter()
            .find(|d| d.validity_params().is_some_and(|v| v.is_start && !v.is_end))
            .copied()?;
        let end = dims
            .iter()
            .find(|d| d.validity_params().is_some_and(|v| v.is_end && !v.is_start))
            .copied()?;
        Some((start, end))
    }
}
