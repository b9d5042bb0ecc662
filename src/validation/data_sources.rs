//! Data source level rules: time dimensions and validity windows.

use crate::model::{DataSource, IdentifierType};

use super::{format_name_list, ModelValidationRule, ValidationContext, ValidationIssue};

const VALIDITY_WINDOW_REQUIREMENTS: &str = "Data sources using dimension validity params to define a validity window must have exactly two time \
     dimensions with validity params specified - one marked `is_start` and the other marked `is_end`.";

/// Primary time dimension requirements.
///
/// A data source needs exactly one primary time dimension when any of its
/// measures relies on it (no `agg_time_dimension` override).
#[derive(Debug, Clone, Copy, Default)]
pub struct DataSourceTimeDimensionRule;

impl DataSourceTimeDimensionRule {
    fn validate_data_source(data_source: &DataSource) -> Vec<ValidationIssue> {
        let mut issues = vec![];
        let primary_time_dimensions: Vec<_> = data_source
            .dimensions
            .iter()
            .filter(|d| d.is_primary_time())
            .collect();

        let needs_primary = data_source
            .measures
            .iter()
            .any(|m| m.agg_time_dimension.is_none());
        if primary_time_dimensions.is_empty() && needs_primary {
            issues.push(ValidationIssue::error(
                ValidationContext::data_source(data_source),
                format!(
                    "No primary time dimension in data source with name ({}). Please add one",
                    data_source.name
                ),
            ));
        }

        if primary_time_dimensions.len() > 1 {
            for dimension in primary_time_dimensions {
                issues.push(ValidationIssue::error(
                    ValidationContext::data_source(data_source),
                    format!(
                        "In data source {}, Primary time dimension with name: {} is one of many defined as primary.",
                        data_source.name, dimension.name
                    ),
                ));
            }
        }

        issues
    }
}

impl ModelValidationRule for DataSourceTimeDimensionRule {
    fn name(&self) -> &'static str {
        "data_source_time_dimension"
    }

    fn validate_model(&self, model: &[DataSource]) -> Vec<ValidationIssue> {
        model.iter().flat_map(Self::validate_data_source).collect()
    }
}

/// Validity window shape and the constraints joins against it rely on.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataSourceValidityWindowRule;

impl DataSourceValidityWindowRule {
    fn validate_data_source(data_source: &DataSource) -> Vec<ValidationIssue> {
        let validity_dims: Vec<_> = data_source.validity_dimensions().collect();
        if validity_dims.is_empty() {
            return vec![];
        }

        let mut issues = vec![];
        let context = ValidationContext::data_source(data_source);
        let dim_names = format_name_list(validity_dims.iter().map(|d| d.name.as_str()));
        let start_names: Vec<&str> = validity_dims
            .iter()
            .filter(|d| d.validity_params().is_some_and(|v| v.is_start))
            .map(|d| d.name.as_str())
            .collect();
        let end_names: Vec<&str> = validity_dims
            .iter()
            .filter(|d| d.validity_params().is_some_and(|v| v.is_end))
            .map(|d| d.name.as_str())
            .collect();

        if validity_dims.len() == 1 && start_names.len() == 1 && end_names.len() == 1 {
            issues.push(ValidationIssue::error(
                context.clone(),
                format!(
                    "Data source {} has a single validity param dimension that defines its window: `{}`. \
                     This is not a currently supported configuration! {} If you have one column defining a \
                     window, as in a daily snapshot table, you can define a separate dimension and increment \
                     the time value in the `expr` field as a work-around.",
                    data_source.name, validity_dims[0].name, VALIDITY_WINDOW_REQUIREMENTS
                ),
            ));
        } else if validity_dims.len() != 2 {
            issues.push(ValidationIssue::error(
                context.clone(),
                format!(
                    "Data source {} has {} dimensions defined with validity params. They are: {}. \
                     There must be either zero or two! If you wish to define a validity window for this \
                     data source, please follow these requirements: {}",
                    data_source.name,
                    validity_dims.len(),
                    dim_names,
                    VALIDITY_WINDOW_REQUIREMENTS
                ),
            ));
        } else if start_names.len() != 1 || end_names.len() != 1 {
            issues.push(ValidationIssue::error(
                context.clone(),
                format!(
                    "Data source {} has two validity param dimensions defined, but does not have exactly one \
                     each marked with is_start and is_end! Dimensions: {}. is_start dimensions: {}. \
                     is_end dimensions: {}. {}",
                    data_source.name,
                    dim_names,
                    format_name_list(start_names.iter().copied()),
                    format_name_list(end_names.iter().copied()),
                    VALIDITY_WINDOW_REQUIREMENTS
                ),
            ));
        }

        let primary_or_unique: Vec<&str> = data_source
            .identifiers
            .iter()
            .filter(|i| i.identifier_type.is_primary_or_unique())
            .map(|i| i.name.as_str())
            .collect();

        let has_natural = data_source
            .identifiers
            .iter()
            .any(|i| i.identifier_type == IdentifierType::Natural);
        if !has_natural {
            issues.push(ValidationIssue::error(
                context.clone(),
                format!(
                    "Data source {} has validity param dimensions defined, but does not have an identifier \
                     with type `natural` set. The natural key for this data source is what we use to process \
                     a validity window join. Primary or unique identifiers, if any, might be suitable for use \
                     as natural keys: ({}).",
                    data_source.name,
                    format_name_list(primary_or_unique.iter().copied())
                ),
            ));
        }

        if !primary_or_unique.is_empty() {
            issues.push(ValidationIssue::error(
                context.clone(),
                format!(
                    "Data source {} has validity param dimensions defined and also has one or more \
                     identifiers designated as `primary` or `unique`. This is not yet supported, as we do \
                     not currently process joins against these key types for data sources with validity \
                     windows specified.",
                    data_source.name
                ),
            ));
        }

        if !data_source.measures.is_empty() {
            issues.push(ValidationIssue::error(
                context,
                format!(
                    "Data source {} has both measures and validity param dimensions defined. This is not \
                     currently supported! Please remove either the measures or the validity params. \
                     Measure names: {}. Validity param dimension names: {}.",
                    data_source.name,
                    format_name_list(data_source.measures.iter().map(|m| m.name.as_str())),
                    dim_names
                ),
            ));
        }

        issues
    }
}

impl ModelValidationRule for DataSourceValidityWindowRule {
    fn name(&self) -> &'static str {
        "data_source_validity_window"
    }

    fn validate_model(&self, model: &[DataSource]) -> Vec<ValidationIssue> {
        model.iter().flat_map(Self::validate_data_source).collect()
    }
}
