//! Bind parameters attached to rendered SQL.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A value substituted into rendered SQL at execution time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BindValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl fmt::Display for BindValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindValue::Null => write!(f, "NULL"),
            BindValue::Bool(b) => write!(f, "{}", b),
            BindValue::Int(n) => write!(f, "{}", n),
            BindValue::Float(x) => write!(f, "{}", ryu::Buffer::new().format(*x)),
            BindValue::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for BindValue {
    fn from(s: &str) -> Self {
        BindValue::Str(s.into())
    }
}

impl From<String> for BindValue {
    fn from(s: String) -> Self {
        BindValue::Str(s)
    }
}

impl From<i64> for BindValue {
    fn from(n: i64) -> Self {
        BindValue::Int(n)
    }
}

impl From<f64> for BindValue {
    fn from(x: f64) -> Self {
        BindValue::Float(x)
    }
}

impl From<bool> for BindValue {
    fn from(b: bool) -> Self {
        BindValue::Bool(b)
    }
}

/// Ordered `(key, value)` pairs.
///
/// Composing expressions concatenates child parameters in argument order;
/// keys are not deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BindParameters {
    params: Vec<(String, BindValue)>,
}

impl BindParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(key: impl Into<String>, value: impl Into<BindValue>) -> Self {
        Self {
            params: vec![(key.into(), value.into())],
        }
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<BindValue>) {
        self.params.push((key.into(), value.into()));
    }

    /// Append `other` after the current parameters.
    pub fn extend(&mut self, other: BindParameters) {
        self.params.extend(other.params);
    }

    /// Concatenate in order.
    pub fn combine(parts: impl IntoIterator<Item = BindParameters>) -> Self {
        parts.into_iter().fold(Self::new(), |mut acc, p| {
            acc.extend(p);
            acc
        })
    }

    pub fn get(&self, key: &str) -> Option<&BindValue> {
        self.params.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BindValue)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}
