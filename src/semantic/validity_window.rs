//! Locate the validity window carried by an instance set.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::DataSourceReference;

use super::error::{SemanticError, SemanticResult};
use super::instance::{InstanceSet, TimeDimensionSpec};
use super::semantic_model::DataSourceSemantics;

/// The start and end columns a validity-window join filters on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidityWindowJoinDescription {
    pub window_start_dimension: TimeDimensionSpec,
    pub window_end_dimension: TimeDimensionSpec,
}

#[derive(Default)]
struct WindowEnds {
    start: Option<TimeDimensionSpec>,
    end: Option<TimeDimensionSpec>,
}

/// Build the join description for the single validity window in
/// `instance_set`.
///
/// Only time dimension instances with no join links and at the dimension's
/// declared granularity are considered. Returns `None` when no data source in
/// the set declares a window, and `MultipleValidityWindows` when more than one does.
pub fn validity_window_join_description<S: DataSourceSemantics + ?Sized>(
    semantics: &S,
    instance_set: &InstanceSet,
) -> SemanticResult<Option<ValidityWindowJoinDescription>> {
    // BTreeMap keeps the error message stable
    let mut windows: BTreeMap<String, WindowEnds> = BTreeMap::new();

    for instance in &instance_set.time_dimension_instances {
        if !instance.spec.identifier_links.is_empty() {
            continue;
        }
        let origin = instance.origin()?;
        let data_source =
            semantics.get_by_reference(&DataSourceReference::new(origin.data_source_name.clone()))?;
        let Some(dimension) = data_source
            .dimensions
            .iter()
            .find(|d| d.name == origin.element_name)
        else {
            continue;
        };
        let Some(validity) = dimension.validity_params() else {
            continue;
        };
        if dimension.time_granularity() != Some(instance.spec.time_granularity) {
            continue;
        }

        let ends = windows.entry(data_source.name.clone()).or_default();
        if validity.is_start {
            ends.start = Some(instance.spec.clone());
        }
        if validity.is_end {
            ends.end = Some(instance.spec.clone());
        }
    }

    let complete: Vec<(String, ValidityWindowJoinDescription)> = windows
        .into_iter()
        .filter_map(|(name, ends)| match (ends.start, ends.end) {
            (Some(start), Some(end)) => Some((
                name,
                ValidityWindowJoinDescription {
                    window_start_dimension: start,
                    window_end_dimension: end,
                },
            )),
            _ => None,
        })
        .collect();

    if complete.len() > 1 {
        return Err(SemanticError::MultipleValidityWindows {
            data_sources: complete.into_iter().map(|(name, _)| name).collect(),
        });
    }
    Ok(complete.into_iter().next().map(|(_, description)| description))
}
