//! SQL expression AST.
//!
//! A closed set of immutable nodes. Nodes carry only what is needed to render
//! them; all SQL text is produced by a [`crate::sql::render::SqlExpressionRenderer`].
//!
//! # Example
//!
//! ```ignore
//! use semlayer::sql::expr::SqlExpr;
//! use semlayer::model::TimeGranularity;
//!
//! let expr = SqlExpr::date_trunc(TimeGranularity::Week, SqlExpr::column("a", "ds"));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{AggregationType, TimeGranularity};

use super::bind::{BindParameters, BindValue};

/// Column kinds the renderer knows how to name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SqlColumnType {
    Double,
    Integer,
    String,
    Boolean,
    Date,
    Timestamp,
}

/// Values rendered inline into SQL text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SqlLiteral {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SqlAggregateFunction {
    Sum,
    Min,
    Max,
    Avg,
    Count,
    CountDistinct,
}

impl SqlAggregateFunction {
    pub fn name(&self) -> &'static str {
        match self {
            SqlAggregateFunction::Sum => "SUM",
            SqlAggregateFunction::Min => "MIN",
            SqlAggregateFunction::Max => "MAX",
            SqlAggregateFunction::Avg => "AVG",
            SqlAggregateFunction::Count | SqlAggregateFunction::CountDistinct => "COUNT",
        }
    }

    /// Aggregate used for a measure. Percentile measures render through
    /// [`SqlExpr::Percentile`] instead and return `None`.
    pub fn for_measure(agg: AggregationType) -> Option<Self> {
        match agg {
            AggregationType::Sum | AggregationType::SumBoolean => Some(SqlAggregateFunction::Sum),
            AggregationType::Min => Some(SqlAggregateFunction::Min),
            AggregationType::Max => Some(SqlAggregateFunction::Max),
            AggregationType::CountDistinct => Some(SqlAggregateFunction::CountDistinct),
            AggregationType::Average => Some(SqlAggregateFunction::Avg),
            AggregationType::Percentile => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SqlBinaryOperator {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
    Plus,
    Minus,
    Times,
    Divide,
}

impl SqlBinaryOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            SqlBinaryOperator::Eq => "=",
            SqlBinaryOperator::NotEq => "!=",
            SqlBinaryOperator::Lt => "<",
            SqlBinaryOperator::LtEq => "<=",
            SqlBinaryOperator::Gt => ">",
            SqlBinaryOperator::GtEq => ">=",
            SqlBinaryOperator::And => "AND",
            SqlBinaryOperator::Or => "OR",
            SqlBinaryOperator::Plus => "+",
            SqlBinaryOperator::Minus => "-",
            SqlBinaryOperator::Times => "*",
            SqlBinaryOperator::Divide => "/",
        }
    }
}

impl fmt::Display for SqlBinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Date part extraction targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatePart {
    Year,
    Quarter,
    Month,
    Day,
    DayOfWeek,
    DayOfYear,
}

impl DatePart {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatePart::Year => "year",
            DatePart::Quarter => "quarter",
            DatePart::Month => "month",
            DatePart::Day => "day",
            DatePart::DayOfWeek => "dow",
            DatePart::DayOfYear => "doy",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PercentileFunctionType {
    Continuous,
    Discrete,
    ApproximateContinuous,
    ApproximateDiscrete,
}

impl PercentileFunctionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PercentileFunctionType::Continuous => "continuous",
            PercentileFunctionType::Discrete => "discrete",
            PercentileFunctionType::ApproximateContinuous => "approximate_continuous",
            PercentileFunctionType::ApproximateDiscrete => "approximate_discrete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SqlPercentileParams {
    /// In `[0, 1]`.
    pub percentile: f64,
    pub function_type: PercentileFunctionType,
}

/// SQL expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlExpr {
    /// `table_alias.column_name`, or a bare column when the alias is empty.
    ColumnReference {
        table_alias: Option<String>,
        column_name: String,
    },
    Literal(SqlLiteral),
    /// A bound value, rendered as a placeholder.
    Parameter { key: String, value: BindValue },
    Function { name: String, args: Vec<SqlExpr> },
    Aggregate {
        function: SqlAggregateFunction,
        arg: Box<SqlExpr>,
    },
    BinaryOp {
        left: Box<SqlExpr>,
        op: SqlBinaryOperator,
        right: Box<SqlExpr>,
    },
    Not(Box<SqlExpr>),
    IsNull(Box<SqlExpr>),
    Between {
        expr: Box<SqlExpr>,
        low: Box<SqlExpr>,
        high: Box<SqlExpr>,
    },
    Cast {
        arg: Box<SqlExpr>,
        to: SqlColumnType,
    },
    CastToTimestamp(Box<SqlExpr>),
    DateTrunc {
        granularity: TimeGranularity,
        arg: Box<SqlExpr>,
    },
    /// `arg` moved back by `count` units of `granularity`, or truncated to
    /// the start of its `granularity` period when `grain_to_date` is set.
    TimeDelta {
        arg: Box<SqlExpr>,
        granularity: TimeGranularity,
        count: u32,
        grain_to_date: bool,
    },
    GenerateUuid,
    Percentile {
        order_by_arg: Box<SqlExpr>,
        params: SqlPercentileParams,
    },
    DatePart {
        date_part: DatePart,
        arg: Box<SqlExpr>,
    },
    /// Trusted SQL text with its own bind parameters.
    Raw {
        sql: String,
        bind_parameters: BindParameters,
    },
}

impl SqlExpr {
    pub fn column(table_alias: &str, column_name: &str) -> Self {
        SqlExpr::ColumnReference {
            table_alias: Some(table_alias.into()),
            column_name: column_name.into(),
        }
    }

    pub fn bare_column(column_name: &str) -> Self {
        SqlExpr::ColumnReference {
            table_alias: None,
            column_name: column_name.into(),
        }
    }

    pub fn string(value: &str) -> Self {
        SqlExpr::Literal(SqlLiteral::String(value.into()))
    }

    pub fn int(value: i64) -> Self {
        SqlExpr::Literal(SqlLiteral::Int(value))
    }

    pub fn float(value: f64) -> Self {
        SqlExpr::Literal(SqlLiteral::Float(value))
    }

    pub fn bool(value: bool) -> Self {
        SqlExpr::Literal(SqlLiteral::Bool(value))
    }

    pub fn null() -> Self {
        SqlExpr::Literal(SqlLiteral::Null)
    }

    pub fn param(key: &str, value: impl Into<BindValue>) -> Self {
        SqlExpr::Parameter {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn func(name: &str, args: Vec<SqlExpr>) -> Self {
        SqlExpr::Function {
            name: name.into(),
            args,
        }
    }

    pub fn aggregate(function: SqlAggregateFunction, arg: SqlExpr) -> Self {
        SqlExpr::Aggregate {
            function,
            arg: Box::new(arg),
        }
    }

    pub fn binary(left: SqlExpr, op: SqlBinaryOperator, right: SqlExpr) -> Self {
        SqlExpr::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn eq(self, other: SqlExpr) -> Self {
        Self::binary(self, SqlBinaryOperator::Eq, other)
    }

    pub fn lt(self, other: SqlExpr) -> Self {
        Self::binary(self, SqlBinaryOperator::Lt, other)
    }

    pub fn gte(self, other: SqlExpr) -> Self {
        Self::binary(self, SqlBinaryOperator::GtEq, other)
    }

    pub fn and(self, other: SqlExpr) -> Self {
        Self::binary(self, SqlBinaryOperator::And, other)
    }

    pub fn or(self, other: SqlExpr) -> Self {
        Self::binary(self, SqlBinaryOperator::Or, other)
    }

    pub fn not(self) -> Self {
        SqlExpr::Not(Box::new(self))
    }

    pub fn is_null(self) -> Self {
        SqlExpr::IsNull(Box::new(self))
    }

    pub fn between(self, low: SqlExpr, high: SqlExpr) -> Self {
        SqlExpr::Between {
            expr: Box::new(self),
            low: Box::new(low),
            high: Box::new(high),
        }
    }

    pub fn cast(arg: SqlExpr, to: SqlColumnType) -> Self {
        SqlExpr::Cast {
            arg: Box::new(arg),
            to,
        }
    }

    pub fn cast_to_timestamp(arg: SqlExpr) -> Self {
        SqlExpr::CastToTimestamp(Box::new(arg))
    }

    pub fn date_trunc(granularity: TimeGranularity, arg: SqlExpr) -> Self {
        SqlExpr::DateTrunc {
            granularity,
            arg: Box::new(arg),
        }
    }

    pub fn time_delta(arg: SqlExpr, granularity: TimeGranularity, count: u32) -> Self {
        SqlExpr::TimeDelta {
            arg: Box::new(arg),
            granularity,
            count,
            grain_to_date: false,
        }
    }

    pub fn grain_to_date(arg: SqlExpr, granularity: TimeGranularity) -> Self {
        SqlExpr::TimeDelta {
            arg: Box::new(arg),
            granularity,
            count: 0,
            grain_to_date: true,
        }
    }

    pub fn generate_uuid() -> Self {
        SqlExpr::GenerateUuid
    }

    pub fn percentile(
        order_by_arg: SqlExpr,
        percentile: f64,
        function_type: PercentileFunctionType,
    ) -> Self {
        SqlExpr::Percentile {
            order_by_arg: Box::new(order_by_arg),
            params: SqlPercentileParams {
                percentile,
                function_type,
            },
        }
    }

    pub fn date_part(date_part: DatePart, arg: SqlExpr) -> Self {
        SqlExpr::DatePart {
            date_part,
            arg: Box::new(arg),
        }
    }

    pub fn raw(sql: &str, bind_parameters: BindParameters) -> Self {
        SqlExpr::Raw {
            sql: sql.into(),
            bind_parameters,
        }
    }

    /// Direct children in argument order.
    pub fn children(&self) -> Vec<&SqlExpr> {
        match self {
            SqlExpr::ColumnReference { .. }
            | SqlExpr::Literal(_)
            | SqlExpr::Parameter { .. }
            | SqlExpr::GenerateUuid
            | SqlExpr::Raw { .. } => vec![],
            SqlExpr::Function { args, .. } => args.iter().collect(),
            SqlExpr::Aggregate { arg, .. }
            | SqlExpr::Cast { arg, .. }
            | SqlExpr::DateTrunc { arg, .. }
            | SqlExpr::TimeDelta { arg, .. }
            | SqlExpr::DatePart { arg, .. } => vec![arg.as_ref()],
            SqlExpr::Percentile { order_by_arg, .. } => vec![order_by_arg.as_ref()],
            SqlExpr::BinaryOp { left, right, .. } => vec![left.as_ref(), right.as_ref()],
            SqlExpr::Not(arg) | SqlExpr::IsNull(arg) | SqlExpr::CastToTimestamp(arg) => {
                vec![arg.as_ref()]
            }
            SqlExpr::Between { expr, low, high } => {
                vec![expr.as_ref(), low.as_ref(), high.as_ref()]
            }
        }
    }

    /// Whether rendering needs wrapping parentheses when nested in a binary operation.
    pub fn requires_parenthesis(&self) -> bool {
        matches!(
            self,
            SqlExpr::BinaryOp { .. }
                | SqlExpr::Between { .. }
                | SqlExpr::IsNull(_)
                | SqlExpr::Raw { .. }
        )
    }
}
