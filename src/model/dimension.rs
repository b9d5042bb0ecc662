//! Dimensions, including validity-window time dimensions.

use serde::{Deserialize, Serialize};

use super::types::TimeGranularity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionType {
    Categorical,
    Time,
}

/// Marks a time dimension as one end of a validity window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidityParams {
    #[serde(default)]
    pub is_start: bool,
    #[serde(default)]
    pub is_end: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeDimensionParams {
    #[serde(default)]
    pub is_primary: bool,
    pub time_granularity: TimeGranularity,
    #[serde(default)]
    pub validity_params: Option<ValidityParams>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    pub name: String,
    #[serde(rename = "type")]
    pub dimension_type: DimensionType,
    #[serde(default)]
    pub expr: Option<String>,
    #[serde(default)]
    pub type_params: Option<TimeDimensionParams>,
}

impl Dimension {
    pub fn categorical(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dimension_type: DimensionType::Categorical,
            expr: None,
            type_params: None,
        }
    }

    pub fn time(name: impl Into<String>, granularity: TimeGranularity) -> Self {
        Self {
            name: name.into(),
            dimension_type: DimensionType::Time,
            expr: None,
            type_params: Some(TimeDimensionParams {
                is_primary: false,
                time_granularity: granularity,
                validity_params: None,
            }),
        }
    }

    /// Primary time dimension (the default aggregation time for measures).
    pub fn primary_time(name: impl Into<String>, granularity: TimeGranularity) -> Self {
        let mut dim = Self::time(name, granularity);
        if let Some(params) = dim.type_params.as_mut() {
            params.is_primary = true;
        }
        dim
    }

    /// Time dimension marking the start of a validity window.
    pub fn window_start(name: impl Into<String>, granularity: TimeGranularity) -> Self {
        Self::time(name, granularity).with_validity(ValidityParams {
            is_start: true,
            is_end: false,
        })
    }

    /// Time dimension marking the end of a validity window.
    pub fn window_end(name: impl Into<String>, granularity: TimeGranularity) -> Self {
        Self::time(name, granularity).with_validity(ValidityParams {
            is_start: false,
            is_end: true,
        })
    }

    pub fn with_validity(mut self, validity: ValidityParams) -> Self {
        if let Some(params) = self.type_params.as_mut() {
            params.validity_params = Some(validity);
        }
        self
    }

    pub fn with_expr(mut self, expr: &str) -> Self {
        self.expr = Some(expr.into());
        self
    }

    pub fn validity_params(&self) -> Option<&ValidityParams> {
        self.type_params
            .as_ref()
            .and_then(|p| p.validity_params.as_ref())
    }

    pub fn is_primary_time(&self) -> bool {
        self.dimension_type == DimensionType::Time
            && self.type_params.as_ref().is_some_and(|p| p.is_primary)
    }

    pub fn time_granularity(&self) -> Option<TimeGranularity> {
        self.type_params.as_ref().map(|p| p.time_granularity)
    }
}
