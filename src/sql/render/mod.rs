//! Rendering of SQL expressions and query plans into dialect-specific SQL text.
//!
//! [`SqlExpressionRenderer`] is the default renderer: every method has a
//! baseline implementation and `render_expr` dispatches over the closed
//! [`SqlExpr`] set with one exhaustive match. A dialect is a unit struct that
//! overrides only the hooks where its grammar diverges:
//!
//! | hook | default | BigQuery |
//! |------|---------|----------|
//! | `double_data_type` | `DOUBLE` | `FLOAT64` |
//! | `render_date_trunc` | `DATE_TRUNC(x, week)` | `DATE_TRUNC(x, isoweek)` |
//! | `render_cast_to_timestamp` | `CAST(x AS TIMESTAMP)` | `CAST(x AS DATETIME)` |
//! | `render_generate_uuid` | `UUID()` | `GENERATE_UUID()` |
//! | `render_percentile` | `PERCENTILE_CONT(p) WITHIN GROUP (ORDER BY (x))` | `PERCENTILE_CONT(x, p) OVER()` |
//! | `render_time_delta` | `x - INTERVAL n unit` | `DATE_SUB(CAST(x AS DATETIME), INTERVAL n unit)` |
//!
//! Bind parameters are collected by `render_expr` itself, so every dialect
//! produces the same parameters in the same order for the same AST.
//!
//! # Usage
//!
//! ```ignore
//! use semlayer::sql::render::{Dialect, SqlExpressionRenderer};
//!
//! let rendered = Dialect::BigQuery.renderer().render_expr(&expr)?;
//! println!("{}", rendered.sql);
//! ```

mod bigquery;
mod databricks;
mod default;
mod duckdb;
pub mod helpers;
mod plan_renderer;
mod postgres;
mod redshift;
mod snowflake;

pub use bigquery::BigQuerySqlExpressionRenderer;
pub use databricks::DatabricksSqlExpressionRenderer;
pub use default::DefaultSqlExpressionRenderer;
pub use duckdb::DuckDbSqlExpressionRenderer;
pub use plan_renderer::{SqlPlanRenderResult, SqlQueryPlanRenderer};
pub use postgres::PostgresSqlExpressionRenderer;
pub use redshift::RedshiftSqlExpressionRenderer;
pub use snowflake::SnowflakeSqlExpressionRenderer;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::TimeGranularity;

use super::bind::BindParameters;
use super::expr::{
    DatePart, PercentileFunctionType, SqlAggregateFunction, SqlColumnType, SqlExpr, SqlLiteral,
    SqlPercentileParams,
};

/// Errors raised while rendering.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    /// The operation has no rendering in an expression context.
    #[error("'{operation}' is not supported in this expression context")]
    Unsupported { operation: &'static str },

    #[error("The {dialect} renderer does not support {} percentiles", .function_type.as_str())]
    UnsupportedPercentile {
        dialect: &'static str,
        function_type: PercentileFunctionType,
    },

    #[error("{join_type} to `{alias}` has no ON condition")]
    MissingJoinCondition {
        join_type: &'static str,
        alias: String,
    },
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Rendered SQL text plus the parameters it binds, in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SqlExpressionRenderResult {
    pub sql: String,
    pub bind_parameters: BindParameters,
}

impl SqlExpressionRenderResult {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            bind_parameters: BindParameters::new(),
        }
    }
}

/// Renders [`SqlExpr`] trees into SQL text.
///
/// The provided methods implement the default renderer. Implementations
/// override hooks, never `render_expr`.
pub trait SqlExpressionRenderer: fmt::Debug + Send + Sync {
    /// Renderer name for display/logging.
    fn name(&self) -> &'static str;

    // =========================================================================
    // Type names
    // =========================================================================

    fn double_data_type(&self) -> &'static str {
        "DOUBLE"
    }

    fn timestamp_data_type(&self) -> &'static str {
        "TIMESTAMP"
    }

    fn column_type(&self, column_type: SqlColumnType) -> &'static str {
        match column_type {
            SqlColumnType::Double => self.double_data_type(),
            SqlColumnType::Integer => "INTEGER",
            SqlColumnType::String => "VARCHAR",
            SqlColumnType::Boolean => "BOOLEAN",
            SqlColumnType::Date => "DATE",
            SqlColumnType::Timestamp => self.timestamp_data_type(),
        }
    }

    // =========================================================================
    // Literals and parameters
    // =========================================================================

    fn bind_placeholder(&self, key: &str) -> String {
        format!("%({})s", key)
    }

    fn render_literal(&self, literal: &SqlLiteral) -> String {
        match literal {
            SqlLiteral::Null => "NULL".to_string(),
            SqlLiteral::Bool(b) => helpers::format_bool_literal(*b).to_string(),
            SqlLiteral::Int(n) => n.to_string(),
            SqlLiteral::Float(x) => helpers::format_float(*x),
            SqlLiteral::String(s) => helpers::quote_string_single(s),
        }
    }

    // =========================================================================
    // Dialect hooks
    // =========================================================================

    fn render_cast_to_timestamp(&self, arg: &str) -> RenderResult<String> {
        Ok(format!("CAST({} AS {})", arg, self.timestamp_data_type()))
    }

    fn render_date_trunc(&self, granularity: TimeGranularity, arg: &str) -> RenderResult<String> {
        Ok(helpers::date_trunc_arg_first(arg, granularity.as_str()))
    }

    /// `arg` moved back by `count` periods.
    fn render_time_delta(
        &self,
        arg: &str,
        granularity: TimeGranularity,
        count: u32,
    ) -> RenderResult<String> {
        Ok(helpers::interval_subtract(arg, count, granularity))
    }

    /// Start of the `granularity` period containing `arg`.
    fn render_grain_to_date(&self, arg: &str, granularity: TimeGranularity) -> RenderResult<String> {
        self.render_date_trunc(granularity, arg)
    }

    fn render_generate_uuid(&self) -> RenderResult<String> {
        Ok("UUID()".to_string())
    }

    fn render_percentile(&self, arg: &str, params: &SqlPercentileParams) -> RenderResult<String> {
        match params.function_type {
            PercentileFunctionType::Continuous => Ok(helpers::percentile_within_group(
                "PERCENTILE_CONT",
                params.percentile,
                arg,
            )),
            PercentileFunctionType::Discrete => Ok(helpers::percentile_within_group(
                "PERCENTILE_DISC",
                params.percentile,
                arg,
            )),
            function_type => Err(self.unsupported_percentile(function_type)),
        }
    }

    fn unsupported_percentile(&self, function_type: PercentileFunctionType) -> RenderError {
        RenderError::UnsupportedPercentile {
            dialect: self.name(),
            function_type,
        }
    }

    /// Not rendered at this layer.
    fn render_date_part(&self, _date_part: DatePart, _arg: &str) -> RenderResult<String> {
        Err(RenderError::Unsupported {
            operation: "date_part",
        })
    }

    /// Result column aliases belong to the plan renderer, not to expressions.
    fn render_alias(&self, _arg: &str, _alias: &str) -> RenderResult<String> {
        Err(RenderError::Unsupported { operation: "alias" })
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Render children first, then combine their text. Parameters are
    /// concatenated in argument order.
    fn render_expr(&self, expr: &SqlExpr) -> RenderResult<SqlExpressionRenderResult> {
        let operator_context = matches!(
            expr,
            SqlExpr::BinaryOp { .. } | SqlExpr::Between { .. } | SqlExpr::Not(_) | SqlExpr::IsNull(_)
        );
        let mut child_sql: Vec<String> = vec![];
        let mut bind_parameters = BindParameters::new();
        for child in expr.children() {
            let rendered = self.render_expr(child)?;
            let sql = helpers::wrap_parens(
                &rendered.sql,
                operator_context && child.requires_parenthesis(),
            );
            child_sql.push(sql);
            bind_parameters.extend(rendered.bind_parameters);
        }
        let arg = |i: usize| child_sql.get(i).map(String::as_str).unwrap_or_default();

        let sql = match expr {
            SqlExpr::ColumnReference {
                table_alias: Some(alias),
                column_name,
            } => format!("{}.{}", alias, column_name),
            SqlExpr::ColumnReference {
                table_alias: None,
                column_name,
            } => column_name.clone(),
            SqlExpr::Literal(literal) => self.render_literal(literal),
            SqlExpr::Parameter { key, value } => {
                bind_parameters.push(key.clone(), value.clone());
                self.bind_placeholder(key)
            }
            SqlExpr::Raw {
                sql,
                bind_parameters: raw_parameters,
            } => {
                bind_parameters.extend(raw_parameters.clone());
                sql.clone()
            }
            SqlExpr::Function { name, .. } => format!("{}({})", name, child_sql.join(", ")),
            SqlExpr::Aggregate {
                function: SqlAggregateFunction::CountDistinct,
                ..
            } => format!("COUNT(DISTINCT {})", arg(0)),
            SqlExpr::Aggregate { function, .. } => format!("{}({})", function.name(), arg(0)),
            SqlExpr::BinaryOp { op, .. } => format!("{} {} {}", arg(0), op, arg(1)),
            SqlExpr::Not(_) => format!("NOT {}", arg(0)),
            SqlExpr::IsNull(_) => format!("{} IS NULL", arg(0)),
            SqlExpr::Between { .. } => {
                format!("{} BETWEEN {} AND {}", arg(0), arg(1), arg(2))
            }
            SqlExpr::Cast { to, .. } => {
                format!("CAST({} AS {})", arg(0), self.column_type(*to))
            }
            SqlExpr::CastToTimestamp(_) => self.render_cast_to_timestamp(arg(0))?,
            SqlExpr::DateTrunc { granularity, .. } => self.render_date_trunc(*granularity, arg(0))?,
            SqlExpr::TimeDelta {
                granularity,
                grain_to_date: true,
                ..
            } => self.render_grain_to_date(arg(0), *granularity)?,
            SqlExpr::TimeDelta {
                granularity,
                count,
                grain_to_date: false,
                ..
            } => self.render_time_delta(arg(0), *granularity, *count)?,
            SqlExpr::GenerateUuid => self.render_generate_uuid()?,
            SqlExpr::Percentile { params, .. } => self.render_percentile(arg(0), params)?,
            SqlExpr::DatePart { date_part, .. } => self.render_date_part(*date_part, arg(0))?,
        };

        Ok(SqlExpressionRenderResult {
            sql,
            bind_parameters,
        })
    }
}

/// Supported SQL engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Default,
    BigQuery,
    Postgres,
    Redshift,
    Snowflake,
    DuckDb,
    Databricks,
}

impl Dialect {
    pub const ALL: [Dialect; 7] = [
        Dialect::Default,
        Dialect::BigQuery,
        Dialect::Postgres,
        Dialect::Redshift,
        Dialect::Snowflake,
        Dialect::DuckDb,
        Dialect::Databricks,
    ];

    /// Get the renderer implementation.
    pub fn renderer(&self) -> &'static dyn SqlExpressionRenderer {
        match self {
            Dialect::Default => &DefaultSqlExpressionRenderer,
            Dialect::BigQuery => &BigQuerySqlExpressionRenderer,
            Dialect::Postgres => &PostgresSqlExpressionRenderer,
            Dialect::Redshift => &RedshiftSqlExpressionRenderer,
            Dialect::Snowflake => &SnowflakeSqlExpressionRenderer,
            Dialect::DuckDb => &DuckDbSqlExpressionRenderer,
            Dialect::Databricks => &DatabricksSqlExpressionRenderer,
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.renderer().name()
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dialect::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown dialect '{}'", s))
    }
}
