//! Identifier rules: key types per data source and composite key shape.

use std::collections::{BTreeMap, BTreeSet};

use crate::model::{CompositeSubIdentifier, DataSource, Identifier, IdentifierType};

use super::{format_name_list, ModelValidationRule, ValidationContext, ValidationIssue};

/// At most one primary identifier per data source.
#[derive(Debug, Clone, Copy, Default)]
pub struct OnePrimaryIdentifierPerDataSourceRule;

impl ModelValidationRule for OnePrimaryIdentifierPerDataSourceRule {
    fn name(&self) -> &'static str {
        "one_primary_identifier_per_data_source"
    }

    fn validate_model(&self, model: &[DataSource]) -> Vec<ValidationIssue> {
        let mut issues = vec![];
        for data_source in model {
            let primaries = names_of_type(data_source, IdentifierType::Primary);
            if primaries.len() > 1 {
                issues.push(ValidationIssue::error(
                    ValidationContext::data_source(data_source),
                    format!(
                        "Data sources can have only one primary identifier. The data source `{}` has {}: {}",
                        data_source.name,
                        primaries.len(),
                        format_name_list(primaries.iter().copied())
                    ),
                ));
            }
        }
        issues
    }
}

/// Natural keys are only meaningful on data sources with a validity window.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaturalIdentifierConfigurationRule;

impl ModelValidationRule for NaturalIdentifierConfigurationRule {
    fn name(&self) -> &'static str {
        "natural_identifier_configuration"
    }

    fn validate_model(&self, model: &[DataSource]) -> Vec<ValidationIssue> {
        let mut issues = vec![];
        for data_source in model {
            let naturals = names_of_type(data_source, IdentifierType::Natural);
            if naturals.len() > 1 {
                issues.push(ValidationIssue::error(
                    ValidationContext::data_source(data_source),
                    format!(
                        "Data sources can have at most one natural identifier, but data source `{}` has {} \
                         distinct natural identifiers set! {}.",
                        data_source.name,
                        naturals.len(),
                        format_name_list(naturals.iter().copied())
                    ),
                ));
            }
            if !naturals.is_empty() && !data_source.has_validity_dimensions() {
                issues.push(ValidationIssue::error(
                    ValidationContext::data_source(data_source),
                    format!(
                        "The use of `natural` identifiers is currently supported only in conjunction with a \
                         validity window defined in the set of time dimensions associated with the data source. \
                         Data source `{}` uses a natural identifier ({}) but does not define a validity window!",
                        data_source.name,
                        format_name_list(naturals.iter().copied())
                    ),
                ));
            }
        }
        issues
    }
}

/// Composite identifier shape within one data source.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentifierConfigRule;

impl IdentifierConfigRule {
    fn validate_identifier(
        data_source: &DataSource,
        identifier: &Identifier,
    ) -> Vec<ValidationIssue> {
        let mut issues = vec![];
        let context = || ValidationContext::identifier(data_source, &identifier.name);

        for sub in &identifier.sub_identifiers {
            if sub.reference.is_some() && (sub.name.is_some() || sub.expr.is_some()) {
                issues.push(ValidationIssue::error(
                    context(),
                    format!(
                        "Both ref and name/expr set in sub identifier of identifier ({}), please set one",
                        identifier.name
                    ),
                ));
            } else if let Some(reference) = &sub.reference {
                let exists = data_source.identifiers.iter().any(|i| &i.name == reference);
                if !exists {
                    issues.push(ValidationIssue::error(
                        context(),
                        format!(
                            "Identifier ref must reference an existing identifier by name. \
                             No identifier in this data source has name: {}",
                            reference
                        ),
                    ));
                }
            }

            if sub.name.as_deref() == Some(identifier.name.as_str()) {
                issues.push(ValidationIssue::error(
                    context(),
                    format!(
                        "If sub identifier has same name ({}) as parent identifier, it must be declared \
                         as a ref to another identifier rather than redefined inline",
                        identifier.name
                    ),
                ));
            }
        }
        issues
    }
}

impl ModelValidationRule for IdentifierConfigRule {
    fn name(&self) -> &'static str {
        "identifier_config"
    }

    fn validate_model(&self, model: &[DataSource]) -> Vec<ValidationIssue> {
        model
            .iter()
            .flat_map(|ds| {
                ds.identifiers
                    .iter()
                    .flat_map(move |i| Self::validate_identifier(ds, i))
            })
            .collect()
    }
}

/// Identifiers shared by name must be composed the same way everywhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentifierConsistencyRule;

impl ModelValidationRule for IdentifierConsistencyRule {
    fn name(&self) -> &'static str {
        "identifier_consistency"
    }

    fn validate_model(&self, model: &[DataSource]) -> Vec<ValidationIssue> {
        let mut by_name: BTreeMap<&str, Vec<(&DataSource, BTreeSet<String>)>> = BTreeMap::new();
        for data_source in model {
            for identifier in &data_source.identifiers {
                by_name
                    .entry(identifier.name.as_str())
                    .or_default()
                    .push((data_source, sub_identifier_keys(&identifier.sub_identifiers)));
            }
        }

        let mut issues = vec![];
        for (name, occurrences) in by_name {
            let Some((first_source, first_keys)) = occurrences.first() else {
                continue;
            };
            if occurrences.iter().all(|(_, keys)| keys == first_keys) {
                continue;
            }
            let described: Vec<String> = occurrences
                .iter()
                .map(|(ds, keys)| {
                    format!(
                        "{}: {}",
                        ds.name,
                        format_name_list(keys.iter().map(String::as_str))
                    )
                })
                .collect();
            issues.push(ValidationIssue::error(
                ValidationContext::identifier(first_source, name),
                format!(
                    "Identifier `{}` does not have consistent sub-identifiers throughout the model: {}",
                    name,
                    described.join("; ")
                ),
            ));
        }
        issues
    }
}

/// Warn about identifiers that no other data source can join on.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommonIdentifiersRule;

impl ModelValidationRule for CommonIdentifiersRule {
    fn name(&self) -> &'static str {
        "common_identifiers"
    }

    fn validate_model(&self, model: &[DataSource]) -> Vec<ValidationIssue> {
        let mut owners: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
        for data_source in model {
            for identifier in &data_source.identifiers {
                owners
                    .entry(identifier.name.as_str())
                    .or_default()
                    .insert(data_source.name.as_str());
            }
        }

        let mut issues = vec![];
        for data_source in model {
            for identifier in &data_source.identifiers {
                let shared = owners
                    .get(identifier.name.as_str())
                    .is_some_and(|sources| sources.len() > 1);
                if !shared {
                    issues.push(ValidationIssue::warning(
                        ValidationContext::identifier(data_source, &identifier.name),
                        format!(
                            "Identifier `{}` only found in one data source `{}` which means it will be unused in joins.",
                            identifier.name, data_source.name
                        ),
                    ));
                }
            }
        }
        issues
    }
}

fn names_of_type(data_source: &DataSource, identifier_type: IdentifierType) -> Vec<&str> {
    data_source
        .identifiers
        .iter()
        .filter(|i| i.identifier_type == identifier_type)
        .map(|i| i.name.as_str())
        .collect()
}

/// Comparable shape of a composite key: refs by target, inline parts by name.
fn sub_identifier_keys(subs: &[CompositeSubIdentifier]) -> BTreeSet<String> {
    subs.iter()
        .filter_map(|s| s.reference.clone().or_else(|| s.name.clone()))
        .collect()
}
