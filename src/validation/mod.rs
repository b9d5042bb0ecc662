//! Structural validation of data source definitions.
//!
//! Rules inspect the raw data source list before it is turned into a
//! [`crate::semantic::SemanticModel`]. Each rule returns its issues instead of
//! failing fast, so a single run reports every problem in the model.

mod data_sources;
mod identifiers;

pub use data_sources::{DataSourceTimeDimensionRule, DataSourceValidityWindowRule};
pub use identifiers::{
    CommonIdentifiersRule, IdentifierConfigRule, IdentifierConsistencyRule,
    NaturalIdentifierConfigurationRule, OnePrimaryIdentifierPerDataSourceRule,
};

use std::fmt;

use serde::Serialize;
use tracing::info;

use crate::model::{DataSource, DataSourceReference, IdentifierReference};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationSeverity {
    Warning,
    Error,
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationSeverity::Warning => f.write_str("WARNING"),
            ValidationSeverity::Error => f.write_str("ERROR"),
        }
    }
}

/// Where in the model an issue was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationContext {
    DataSource {
        data_source: DataSourceReference,
    },
    Identifier {
        data_source: DataSourceReference,
        identifier: IdentifierReference,
    },
}

impl ValidationContext {
    pub fn data_source(data_source: &DataSource) -> Self {
        ValidationContext::DataSource {
            data_source: data_source.reference(),
        }
    }

    pub fn identifier(data_source: &DataSource, identifier: &str) -> Self {
        ValidationContext::Identifier {
            data_source: data_source.reference(),
            identifier: IdentifierReference::new(identifier),
        }
    }
}

impl fmt::Display for ValidationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationContext::DataSource { data_source } => {
                write!(f, "data source `{}`", data_source.name())
            }
            ValidationContext::Identifier {
                data_source,
                identifier,
            } => write!(
                f,
                "identifier `{}` in data source `{}`",
                identifier.name(),
                data_source.name()
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub severity: ValidationSeverity,
    pub context: ValidationContext,
    pub message: String,
}

impl ValidationIssue {
    pub fn error(context: ValidationContext, message: impl Into<String>) -> Self {
        Self {
            severity: ValidationSeverity::Error,
            context,
            message: message.into(),
        }
    }

    pub fn warning(context: ValidationContext, message: impl Into<String>) -> Self {
        Self {
            severity: ValidationSeverity::Warning,
            context,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == ValidationSeverity::Error
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.context, self.message)
    }
}

/// A single structural check over the data sources of a model.
pub trait ModelValidationRule: fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;

    fn validate_model(&self, model: &[DataSource]) -> Vec<ValidationIssue>;
}

/// Issues from one validation run, split by severity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModelValidationResults {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ModelValidationResults {
    pub fn from_issues(issues: impl IntoIterator<Item = ValidationIssue>) -> Self {
        let (errors, warnings) = issues.into_iter().partition(ValidationIssue::is_error);
        Self { errors, warnings }
    }

    pub fn all_issues(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.errors.iter().chain(self.warnings.iter())
    }

    pub fn has_blocking_issues(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// Raised by [`ModelValidator::checked_validations`] when blocking issues exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Found {} blocking issue(s) in the model:\n{}", .issues.len(), format_issues(.issues))]
pub struct ModelValidationError {
    pub issues: Vec<ValidationIssue>,
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("  - {}", issue))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Runs a set of rules over a model.
#[derive(Debug)]
pub struct ModelValidator {
    rules: Vec<Box<dyn ModelValidationRule>>,
    warnings_as_errors: bool,
}

impl ModelValidator {
    pub fn new(rules: Vec<Box<dyn ModelValidationRule>>) -> Self {
        Self {
            rules,
            warnings_as_errors: false,
        }
    }

    /// Treat warnings as blocking in [`ModelValidator::checked_validations`].
    pub fn with_warnings_as_errors(mut self, warnings_as_errors: bool) -> Self {
        self.warnings_as_errors = warnings_as_errors;
        self
    }

    pub fn default_rules() -> Vec<Box<dyn ModelValidationRule>> {
        vec![
            Box::new(DataSourceTimeDimensionRule),
            Box::new(DataSourceValidityWindowRule),
            Box::new(OnePrimaryIdentifierPerDataSourceRule),
            Box::new(NaturalIdentifierConfigurationRule),
            Box::new(IdentifierConfigRule),
            Box::new(IdentifierConsistencyRule),
            Box::new(CommonIdentifiersRule),
        ]
    }

    /// Run every rule and collect all issues.
    pub fn validate_model(&self, model: &[DataSource]) -> ModelValidationResults {
        let results = ModelValidationResults::from_issues(
            self.rules.iter().flat_map(|rule| rule.validate_model(model)),
        );
        info!(
            rules = self.rules.len(),
            errors = results.errors.len(),
            warnings = results.warnings.len(),
            "validated model"
        );
        results
    }

    /// Run every rule, failing if any blocking issue was found.
    pub fn checked_validations(&self, model: &[DataSource]) -> Result<ModelValidationResults, ModelValidationError> {
        let results = self.validate_model(model);
        let mut blocking: Vec<ValidationIssue> = results.errors.clone();
        if self.warnings_as_errors {
            blocking.extend(results.warnings.iter().cloned());
        }
        if blocking.is_empty() {
            Ok(results)
        } else {
            Err(ModelValidationError { issues: blocking })
        }
    }
}

impl Default for ModelValidator {
    fn default() -> Self {
        Self::new(Self::default_rules())
    }
}

/// `['a', 'b']`
pub(crate) fn format_name_list<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    let quoted: Vec<String> = names.into_iter().map(|n| format!("'{}'", n)).collect();
    format!("[{}]", quoted.join(", "))
}
