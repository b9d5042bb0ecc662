//! Query-shape nodes: select statements, tables and raw subqueries.
//!
//! Built by an upstream planner and rendered once by
//! [`crate::sql::render::SqlQueryPlanRenderer`].

use std::fmt;

use super::expr::SqlExpr;

/// A physical table, optionally schema-qualified.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SqlTable {
    pub schema_name: Option<String>,
    pub table_name: String,
}

impl SqlTable {
    pub fn new(table_name: &str) -> Self {
        Self {
            schema_name: None,
            table_name: table_name.into(),
        }
    }

    /// Parse `schema.table` or `table`.
    pub fn from_qualified(name: &str) -> Self {
        match name.rsplit_once('.') {
            Some((schema, table)) => Self {
                schema_name: Some(schema.into()),
                table_name: table.into(),
            },
            None => Self::new(name),
        }
    }

    pub fn sql(&self) -> String {
        match &self.schema_name {
            Some(schema) => format!("{}.{}", schema, self.table_name),
            None => self.table_name.clone(),
        }
    }
}

impl fmt::Display for SqlTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SqlSelectColumn {
    pub expr: SqlExpr,
    pub column_alias: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlJoinType {
    Inner,
    LeftOuter,
    FullOuter,
    Cross,
}

impl SqlJoinType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SqlJoinType::Inner => "INNER JOIN",
            SqlJoinType::LeftOuter => "LEFT OUTER JOIN",
            SqlJoinType::FullOuter => "FULL OUTER JOIN",
            SqlJoinType::Cross => "CROSS JOIN",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SqlJoinDescription {
    pub right_source: Box<SqlQueryPlanNode>,
    pub right_source_alias: String,
    /// Ignored for cross joins, required for every other join type.
    pub on_condition: Option<SqlExpr>,
    pub join_type: SqlJoinType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SqlOrderByDescription {
    pub expr: SqlExpr,
    pub desc: bool,
}

/// `SELECT ... FROM ... [JOIN ...] [WHERE ...] [GROUP BY ...] [ORDER BY ...] [LIMIT ...]`
#[derive(Debug, Clone, PartialEq)]
pub struct SqlSelectStatementNode {
    /// Rendered as a leading `--` comment; may span several lines.
    pub description: String,
    pub select_columns: Vec<SqlSelectColumn>,
    pub from_source: Box<SqlQueryPlanNode>,
    pub from_source_alias: String,
    pub joins: Vec<SqlJoinDescription>,
    pub where_clause: Option<SqlExpr>,
    pub group_bys: Vec<SqlExpr>,
    pub order_bys: Vec<SqlOrderByDescription>,
    pub limit: Option<u64>,
    pub distinct: bool,
}

impl SqlSelectStatementNode {
    pub fn new(description: &str, from_source: SqlQueryPlanNode, from_source_alias: &str) -> Self {
        Self {
            description: description.into(),
            select_columns: vec![],
            from_source: Box::new(from_source),
            from_source_alias: from_source_alias.into(),
            joins: vec![],
            where_clause: None,
            group_bys: vec![],
            order_bys: vec![],
            limit: None,
            distinct: false,
        }
    }

    pub fn select(mut self, expr: SqlExpr, column_alias: &str) -> Self {
        self.select_columns.push(SqlSelectColumn {
            expr,
            column_alias: column_alias.into(),
        });
        self
    }

    pub fn join(
        mut self,
        join_type: SqlJoinType,
        right_source: SqlQueryPlanNode,
        right_source_alias: &str,
        on_condition: Option<SqlExpr>,
    ) -> Self {
        self.joins.push(SqlJoinDescription {
            right_source: Box::new(right_source),
            right_source_alias: right_source_alias.into(),
            on_condition,
            join_type,
        });
        self
    }

    /// Add a filter; several calls are combined with `AND`.
    pub fn filter(mut self, condition: SqlExpr) -> Self {
        self.where_clause = Some(match self.where_clause.take() {
            Some(existing) => existing.and(condition),
            None => condition,
        });
        self
    }

    pub fn group_by(mut self, expr: SqlExpr) -> Self {
        self.group_bys.push(expr);
        self
    }

    pub fn order_by(mut self, expr: SqlExpr, desc: bool) -> Self {
        self.order_bys.push(SqlOrderByDescription { expr, desc });
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }
}

/// Node of a query plan.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlQueryPlanNode {
    Select(SqlSelectStatementNode),
    Table(SqlTable),
    /// Trusted SQL text used as a subquery.
    Query(String),
}

impl SqlQueryPlanNode {
    pub fn table(name: &str) -> Self {
        SqlQueryPlanNode::Table(SqlTable::from_qualified(name))
    }

    pub fn is_table(&self) -> bool {
        matches!(self, SqlQueryPlanNode::Table(_))
    }
}

impl From<SqlSelectStatementNode> for SqlQueryPlanNode {
    fn from(node: SqlSelectStatementNode) -> Self {
        SqlQueryPlanNode::Select(node)
    }
}
