//! Materialized column instances and their provenance.
//!
//! An instance is a column in an intermediate result set, tagged with the
//! model element it was read from. Instances carried over a join keep the
//! join path in their spec's `identifier_links`; instances read directly
//! from a data source have no links.

use serde::{Deserialize, Serialize};

use crate::model::{
    DataSourceElementReference, DataSourceReference, IdentifierReference, TimeGranularity,
};

use super::error::{SemanticError, SemanticResult};

/// Separator between link names in qualified column names.
pub const DUNDER: &str = "__";

/// Identifier column spec: element name plus the identifiers joined through to reach it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdentifierSpec {
    pub element_name: String,
    #[serde(default)]
    pub identifier_links: Vec<IdentifierReference>,
}

impl IdentifierSpec {
    pub fn new(element_name: impl Into<String>) -> Self {
        Self {
            element_name: element_name.into(),
            identifier_links: vec![],
        }
    }

    pub fn with_links(mut self, links: &[&str]) -> Self {
        self.identifier_links = links.iter().map(|l| IdentifierReference::new(*l)).collect();
        self
    }

    pub fn reference(&self) -> IdentifierReference {
        IdentifierReference::new(self.element_name.clone())
    }

    /// `link__link__name`
    pub fn qualified_name(&self) -> String {
        qualify(&self.identifier_links, &self.element_name, None)
    }
}

/// Time dimension column spec.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeDimensionSpec {
    pub element_name: String,
    #[serde(default)]
    pub identifier_links: Vec<IdentifierReference>,
    pub time_granularity: TimeGranularity,
}

impl TimeDimensionSpec {
    pub fn new(element_name: impl Into<String>, time_granularity: TimeGranularity) -> Self {
        Self {
            element_name: element_name.into(),
            identifier_links: vec![],
            time_granularity,
        }
    }

    pub fn with_links(mut self, links: &[&str]) -> Self {
        self.identifier_links = links.iter().map(|l| IdentifierReference::new(*l)).collect();
        self
    }

    /// `link__name__granularity`
    pub fn qualified_name(&self) -> String {
        qualify(
            &self.identifier_links,
            &self.element_name,
            Some(self.time_granularity),
        )
    }
}

fn qualify(
    links: &[IdentifierReference],
    element_name: &str,
    granularity: Option<TimeGranularity>,
) -> String {
    let mut parts: Vec<&str> = links.iter().map(|l| l.name()).collect();
    parts.push(element_name);
    if let Some(granularity) = granularity {
        parts.push(granularity.as_str());
    }
    parts.join(DUNDER)
}

/// Returns the single defining element, or `InvalidInstance` when the
/// instance claims zero or several origins.
fn single_origin<'a>(
    name: impl FnOnce() -> String,
    defined_from: &'a [DataSourceElementReference],
) -> SemanticResult<&'a DataSourceElementReference> {
    match defined_from {
        [origin] => Ok(origin),
        _ => Err(SemanticError::InvalidInstance {
            element: name(),
            defined_from: defined_from.len(),
        }),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierInstance {
    pub spec: IdentifierSpec,
    pub defined_from: Vec<DataSourceElementReference>,
}

impl IdentifierInstance {
    /// Instance read straight from `data_source` with no join links.
    pub fn from_data_source(data_source: &str, identifier: &str) -> Self {
        Self {
            spec: IdentifierSpec::new(identifier),
            defined_from: vec![DataSourceElementReference::new(data_source, identifier)],
        }
    }

    pub fn origin(&self) -> SemanticResult<&DataSourceElementReference> {
        single_origin(|| self.spec.qualified_name(), &self.defined_from)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeDimensionInstance {
    pub spec: TimeDimensionSpec,
    pub defined_from: Vec<DataSourceElementReference>,
}

impl TimeDimensionInstance {
    pub fn from_data_source(
        data_source: &str,
        dimension: &str,
        time_granularity: TimeGranularity,
    ) -> Self {
        Self {
            spec: TimeDimensionSpec::new(dimension, time_granularity),
            defined_from: vec![DataSourceElementReference::new(data_source, dimension)],
        }
    }

    pub fn origin(&self) -> SemanticResult<&DataSourceElementReference> {
        single_origin(|| self.spec.qualified_name(), &self.defined_from)
    }
}

/// Columns of an intermediate result set, grouped by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceSet {
    #[serde(default)]
    pub identifier_instances: Vec<IdentifierInstance>,
    #[serde(default)]
    pub time_dimension_instances: Vec<TimeDimensionInstance>,
}

impl InstanceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_identifier(mut self, instance: IdentifierInstance) -> Self {
        self.identifier_instances.push(instance);
        self
    }

    pub fn with_time_dimension(mut self, instance: TimeDimensionInstance) -> Self {
        self.time_dimension_instances.push(instance);
        self
    }

    /// Concatenate instance sets, keeping the order of each input.
    pub fn merge(sets: impl IntoIterator<Item = InstanceSet>) -> InstanceSet {
        sets.into_iter().fold(InstanceSet::new(), |mut acc, set| {
            acc.identifier_instances.extend(set.identifier_instances);
            acc.time_dimension_instances
                .extend(set.time_dimension_instances);
            acc
        })
    }

    /// The data source that originally defined `identifier` in this set.
    ///
    /// Only instances with no join links count: an identifier carried in by a
    /// join was defined elsewhere. Exactly one instance must match.
    pub fn data_source_of_identifier(
        &self,
        identifier: &IdentifierReference,
    ) -> SemanticResult<DataSourceReference> {
        let mut matches = vec![];
        for instance in &self.identifier_instances {
            let origin = instance.origin()?;
            if instance.spec.identifier_links.is_empty()
                && instance.spec.element_name == identifier.element_name
            {
                matches.push(origin);
            }
        }

        match matches.as_slice() {
            [origin] => Ok(origin.data_source_reference()),
            _ => Err(SemanticError::AmbiguousProvenance {
                identifier: identifier.element_name.clone(),
                matches: matches.iter().map(|m| m.to_string()).collect(),
            }),
        }
    }
}
