use serde::{Deserialize, Serialize};

use super::types::AggregationType;

/// A measure: an aggregation over a column of a data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measure {
    pub name: String,
    pub agg: AggregationType,
    #[serde(default)]
    pub expr: Option<String>,
    /// Overrides the data source's primary time dimension for this measure.
    #[serde(default)]
    pub agg_time_dimension: Option<String>,
}

impl Measure {
    pub fn new(name: impl Into<String>, agg: AggregationType) -> Self {
        Self {
            name: name.into(),
            agg,
            expr: None,
            agg_time_dimension: None,
        }
    }

    pub fn with_expr(mut self, expr: &str) -> Self {
        self.expr = Some(expr.into());
        self
    }

    pub fn with_agg_time_dimension(mut self, dimension: &str) -> Self {
        self.agg_time_dimension = Some(dimension.into());
        self
    }
}
