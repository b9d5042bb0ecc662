//! Dimensions referenced from a where filter, e.g.
//! `{{ Dimension('listing__created_at').grain('month') }}`.

use std::fmt;

use crate::model::{IdentifierReference, TimeGranularity};
use crate::semantic::instance::DUNDER;
use crate::semantic::TimeDimensionSpec;
use crate::sql::expr::DatePart;
use crate::sql::render::{Dialect, SqlExpressionRenderer};

use super::{QueryResult, QuerySyntaxError};

/// A dimension passed in through the where filter parameter.
#[derive(Debug, Clone)]
pub struct WhereFilterDimension {
    name: String,
    entity_path: Vec<IdentifierReference>,
    time_granularity: Option<TimeGranularity>,
    date_part: Option<DatePart>,
    alias: Option<String>,
    renderer: &'static dyn SqlExpressionRenderer,
}

impl WhereFilterDimension {
    fn new(name: &str, entity_path: &[&str], renderer: &'static dyn SqlExpressionRenderer) -> Self {
        Self {
            name: name.into(),
            entity_path: entity_path.iter().map(|e| IdentifierReference::new(*e)).collect(),
            time_granularity: None,
            date_part: None,
            alias: None,
            renderer,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entity_path(&self) -> &[IdentifierReference] {
        &self.entity_path
    }

    pub fn time_granularity(&self) -> Option<TimeGranularity> {
        self.time_granularity
    }

    /// Select the dimension at a time granularity, making it a time dimension.
    pub fn grain(&mut self, time_granularity_name: &str) -> QueryResult<&mut Self> {
        let granularity = time_granularity_name
            .parse::<TimeGranularity>()
            .map_err(QuerySyntaxError::InvalidQuerySyntax)?;
        self.time_granularity = Some(granularity);
        Ok(self)
    }

    /// Extract a date part. Only available when the renderer can express it.
    pub fn date_part(&mut self, date_part: DatePart) -> QueryResult<&mut Self> {
        self.renderer.render_date_part(date_part, &self.column_name())?;
        self.date_part = Some(date_part);
        Ok(self)
    }

    /// Rename the column. Only available when the renderer can express it.
    pub fn alias(&mut self, alias: &str) -> QueryResult<&mut Self> {
        self.renderer.render_alias(&self.column_name(), alias)?;
        self.alias = Some(alias.into());
        Ok(self)
    }

    /// Sort order has no meaning inside a filter.
    pub fn descending(&mut self, _is_descending: bool) -> QueryResult<&mut Self> {
        Err(QuerySyntaxError::InvalidQuerySyntax(
            "Can't set descending in the where clause. Try setting descending in the order_by clause instead"
                .to_string(),
        ))
    }

    /// The time dimension spec, once a granularity was chosen.
    pub fn time_dimension_spec(&self) -> Option<TimeDimensionSpec> {
        self.time_granularity.map(|granularity| TimeDimensionSpec {
            element_name: self.name.clone(),
            identifier_links: self.entity_path.clone(),
            time_granularity: granularity,
        })
    }

    /// Column name the filter expression refers to:
    /// `<entity_path>__<name>[__<granularity>]`.
    pub fn column_name(&self) -> String {
        match self.time_dimension_spec() {
            Some(spec) => spec.qualified_name(),
            None => {
                let mut parts: Vec<&str> = self.entity_path.iter().map(|e| e.name()).collect();
                parts.push(&self.name);
                parts.join(DUNDER)
            }
        }
    }
}

impl fmt::Display for WhereFilterDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.column_name())
    }
}

/// Creates [`WhereFilterDimension`]s and keeps every one it created.
#[derive(Debug, Clone)]
pub struct WhereFilterDimensionFactory {
    renderer: &'static dyn SqlExpressionRenderer,
    created: Vec<WhereFilterDimension>,
}

impl WhereFilterDimensionFactory {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            renderer: dialect.renderer(),
            created: vec![],
        }
    }

    pub fn create(&mut self, name: &str, entity_path: &[&str]) -> &mut WhereFilterDimension {
        let index = self.created.len();
        self.created
            .push(WhereFilterDimension::new(name, entity_path, self.renderer));
        &mut self.created[index]
    }

    pub fn created(&self) -> &[WhereFilterDimension] {
        &self.created
    }

    /// Time dimension specs requested by created dimensions, in creation order.
    pub fn time_dimension_specs(&self) -> Vec<TimeDimensionSpec> {
        self.created
            .iter()
            .filter_map(WhereFilterDimension::time_dimension_spec)
            .collect()
    }
}

impl Default for WhereFilterDimensionFactory {
    fn default() -> Self {
        Self::new(Dialect::Default)
    }
}
