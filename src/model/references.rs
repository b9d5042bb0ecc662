//! Name-based handles for cross-entity lookup.
//!
//! References carry identity only. They never own the element they point at;
//! resolve them through [`crate::semantic::DataSourceSemantics`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Handle to a data source by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DataSourceReference {
    pub data_source_name: String,
}

impl DataSourceReference {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            data_source_name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.data_source_name
    }
}

impl From<&str> for DataSourceReference {
    fn from(name: &str) -> Self {
        DataSourceReference::new(name)
    }
}

impl fmt::Display for DataSourceReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.data_source_name)
    }
}

/// Handle to an identifier by element name.
///
/// Two data sources that declare an identifier with the same name share
/// the same `IdentifierReference`, which is what makes them joinable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IdentifierReference {
    pub element_name: String,
}

impl IdentifierReference {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            element_name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.element_name
    }
}

impl From<&str> for IdentifierReference {
    fn from(name: &str) -> Self {
        IdentifierReference::new(name)
    }
}

impl fmt::Display for IdentifierReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.element_name)
    }
}

/// An element (identifier, dimension, measure) qualified by its owning data source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataSourceElementReference {
    pub data_source_name: String,
    pub element_name: String,
}

impl DataSourceElementReference {
    pub fn new(data_source: impl Into<String>, element: impl Into<String>) -> Self {
        Self {
            data_source_name: data_source.into(),
            element_name: element.into(),
        }
    }

    pub fn from_references(
        data_source: &DataSourceReference,
        identifier: &IdentifierReference,
    ) -> Self {
        Self::new(
            data_source.data_source_name.clone(),
            identifier.element_name.clone(),
        )
    }

    pub fn data_source_reference(&self) -> DataSourceReference {
        DataSourceReference::new(self.data_source_name.clone())
    }
}

impl fmt::Display for DataSourceElementReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.data_source_name, self.element_name)
    }
}
