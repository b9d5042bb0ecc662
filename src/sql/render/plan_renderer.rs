//! Query plan rendering.
//!
//! Every expression in the plan goes through one injected
//! [`SqlExpressionRenderer`]; choosing a dialect is choosing that renderer.

use serde::Serialize;
use tracing::trace;

use crate::sql::bind::BindParameters;
use crate::sql::expr::SqlExpr;
use crate::sql::plan::{SqlJoinType, SqlQueryPlanNode, SqlSelectStatementNode};

use super::{Dialect, RenderError, RenderResult, SqlExpressionRenderer};

const INDENT: &str = "  ";

/// A rendered statement and its bind parameters, in textual order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SqlPlanRenderResult {
    pub sql: String,
    pub bind_parameters: BindParameters,
}

impl SqlPlanRenderResult {
    fn plain(sql: String) -> Self {
        Self {
            sql,
            bind_parameters: BindParameters::new(),
        }
    }
}

/// Renders [`SqlQueryPlanNode`] trees into SQL statements.
#[derive(Debug, Clone, Copy)]
pub struct SqlQueryPlanRenderer {
    renderer: &'static dyn SqlExpressionRenderer,
}

impl SqlQueryPlanRenderer {
    pub fn new(dialect: Dialect) -> Self {
        trace!(dialect = %dialect, "selected expression renderer");
        Self::with_renderer(dialect.renderer())
    }

    /// Use a renderer that is not one of the built-in dialects.
    pub fn with_renderer(renderer: &'static dyn SqlExpressionRenderer) -> Self {
        Self { renderer }
    }

    pub fn expr_renderer(&self) -> &'static dyn SqlExpressionRenderer {
        self.renderer
    }

    /// Render a full plan.
    ///
    /// A bare table renders as its qualified name and a raw query as its
    /// text; selects render as a statement with nested sources indented.
    pub fn render_sql_query_plan(&self, plan: &SqlQueryPlanNode) -> RenderResult<SqlPlanRenderResult> {
        match plan {
            SqlQueryPlanNode::Select(node) => self.render_select(node),
            SqlQueryPlanNode::Table(table) => Ok(SqlPlanRenderResult::plain(table.sql())),
            SqlQueryPlanNode::Query(sql) => Ok(SqlPlanRenderResult::plain(sql.clone())),
        }
    }

    fn render_select(&self, node: &SqlSelectStatementNode) -> RenderResult<SqlPlanRenderResult> {
        let mut lines: Vec<String> = vec![];
        let mut bind_parameters = BindParameters::new();

        for line in node.description.lines().map(str::trim).filter(|l| !l.is_empty()) {
            lines.push(format!("-- {}", line));
        }

        lines.push(if node.distinct { "SELECT DISTINCT" } else { "SELECT" }.to_string());
        if node.select_columns.is_empty() {
            lines.push(format!("{}*", INDENT));
        }
        for (i, column) in node.select_columns.iter().enumerate() {
            let rendered = self.renderer.render_expr(&column.expr)?;
            bind_parameters.extend(rendered.bind_parameters);
            lines.push(format!(
                "{}{}{} AS {}",
                INDENT,
                separator(i),
                rendered.sql,
                column.column_alias
            ));
        }

        let from = self.render_source(&node.from_source, &node.from_source_alias)?;
        bind_parameters.extend(from.bind_parameters);
        lines.push(format!("FROM {}", from.sql));

        for join in &node.joins {
            let right = self.render_source(&join.right_source, &join.right_source_alias)?;
            bind_parameters.extend(right.bind_parameters);
            lines.push(format!("{} {}", join.join_type.as_str(), right.sql));

            if join.join_type == SqlJoinType::Cross {
                continue;
            }
            let condition = join.on_condition.as_ref().ok_or_else(|| {
                RenderError::MissingJoinCondition {
                    join_type: join.join_type.as_str(),
                    alias: join.right_source_alias.clone(),
                }
            })?;
            let rendered = self.renderer.render_expr(condition)?;
            bind_parameters.extend(rendered.bind_parameters);
            lines.push("ON".to_string());
            lines.push(format!("{}{}", INDENT, rendered.sql));
        }

        if let Some(where_clause) = &node.where_clause {
            let rendered = self.renderer.render_expr(where_clause)?;
            bind_parameters.extend(rendered.bind_parameters);
            lines.push("WHERE".to_string());
            lines.push(format!("{}{}", INDENT, rendered.sql));
        }

        if !node.group_bys.is_empty() {
            lines.push("GROUP BY".to_string());
            for (i, expr) in node.group_bys.iter().enumerate() {
                let rendered = self.renderer.render_expr(expr)?;
                bind_parameters.extend(rendered.bind_parameters);
                lines.push(format!("{}{}{}", INDENT, separator(i), rendered.sql));
            }
        }

        if !node.order_bys.is_empty() {
            let mut parts = vec![];
            for order_by in &node.order_bys {
                let rendered = self.renderer.render_expr(&order_by.expr)?;
                bind_parameters.extend(rendered.bind_parameters);
                parts.push(if order_by.desc {
                    format!("{} DESC", rendered.sql)
                } else {
                    rendered.sql
                });
            }
            lines.push(format!("ORDER BY {}", parts.join(", ")));
        }

        if let Some(limit) = node.limit {
            lines.push(format!("LIMIT {}", limit));
        }

        Ok(SqlPlanRenderResult {
            sql: lines.join("\n"),
            bind_parameters,
        })
    }

    fn render_source(&self, node: &SqlQueryPlanNode, alias: &str) -> RenderResult<SqlPlanRenderResult> {
        match node {
            SqlQueryPlanNode::Table(table) => {
                Ok(SqlPlanRenderResult::plain(format!("{} {}", table.sql(), alias)))
            }
            SqlQueryPlanNode::Select(_) | SqlQueryPlanNode::Query(_) => {
                let inner = self.render_sql_query_plan(node)?;
                Ok(SqlPlanRenderResult {
                    sql: format!("(\n{}\n) {}", indent(&inner.sql), alias),
                    bind_parameters: inner.bind_parameters,
                })
            }
        }
    }

    /// Render a single expression with this plan renderer's dialect.
    pub fn render_expr(&self, expr: &SqlExpr) -> RenderResult<SqlPlanRenderResult> {
        let rendered = self.renderer.render_expr(expr)?;
        Ok(SqlPlanRenderResult {
            sql: rendered.sql,
            bind_parameters: rendered.bind_parameters,
        })
    }
}

impl Default for SqlQueryPlanRenderer {
    fn default() -> Self {
        Self::new(Dialect::Default)
    }
}

fn separator(i: usize) -> &'static str {
    if i == 0 {
        ""
    } else {
        ", "
    }
}

fn indent(sql: &str) -> String {
    sql.lines()
        .map(|line| format!("{}{}", INDENT, line))
        .collect::<Vec<_>>()
        .join("\n")
}
