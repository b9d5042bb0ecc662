//! Identifiers (join keys) declared on a data source.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::references::IdentifierReference;

/// Key type of an identifier.
///
/// The join legality table is keyed on pairs of these. Adding a variant
/// here requires extending `JoinLegality::STANDARD` as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierType {
    Primary,
    Unique,
    Natural,
    Foreign,
}

impl IdentifierType {
    pub const ALL: [IdentifierType; 4] = [
        IdentifierType::Primary,
        IdentifierType::Unique,
        IdentifierType::Natural,
        IdentifierType::Foreign,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IdentifierType::Primary => "primary",
            IdentifierType::Unique => "unique",
            IdentifierType::Natural => "natural",
            IdentifierType::Foreign => "foreign",
        }
    }

    /// Primary and unique keys guarantee one row per key value.
    pub fn is_primary_or_unique(&self) -> bool {
        matches!(self, IdentifierType::Primary | IdentifierType::Unique)
    }
}

impl fmt::Display for IdentifierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One component of a composite identifier.
///
/// Either points at another identifier in the same data source (`reference`)
/// or defines the column inline (`name` / `expr`), never both.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompositeSubIdentifier {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub expr: Option<String>,
    #[serde(default, rename = "ref")]
    pub reference: Option<String>,
}

impl CompositeSubIdentifier {
    pub fn by_reference(reference: impl Into<String>) -> Self {
        Self {
            reference: Some(reference.into()),
            ..Default::default()
        }
    }

    pub fn by_name(name: impl Into<String>, expr: Option<&str>) -> Self {
        Self {
            name: Some(name.into()),
            expr: expr.map(String::from),
            reference: None,
        }
    }
}

/// A named, typed key on a data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
    pub name: String,
    #[serde(rename = "type")]
    pub identifier_type: IdentifierType,
    #[serde(default)]
    pub expr: Option<String>,
    #[serde(default, rename = "identifiers")]
    pub sub_identifiers: Vec<CompositeSubIdentifier>,
}

impl Identifier {
    pub fn new(name: impl Into<String>, identifier_type: IdentifierType) -> Self {
        Self {
            name: name.into(),
            identifier_type,
            expr: None,
            sub_identifiers: vec![],
        }
    }

    pub fn primary(name: impl Into<String>) -> Self {
        Self::new(name, IdentifierType::Primary)
    }

    pub fn unique(name: impl Into<String>) -> Self {
        Self::new(name, IdentifierType::Unique)
    }

    pub fn natural(name: impl Into<String>) -> Self {
        Self::new(name, IdentifierType::Natural)
    }

    pub fn foreign(name: impl Into<String>) -> Self {
        Self::new(name, IdentifierType::Foreign)
    }

    pub fn with_expr(mut self, expr: &str) -> Self {
        self.expr = Some(expr.into());
        self
    }

    pub fn with_sub_identifier(mut self, sub: CompositeSubIdentifier) -> Self {
        self.sub_identifiers.push(sub);
        self
    }

    pub fn reference(&self) -> IdentifierReference {
        IdentifierReference::new(self.name.clone())
    }

    pub fn is_composite(&self) -> bool {
        !self.sub_identifiers.is_empty()
    }
}
