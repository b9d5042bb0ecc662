//! Test utilities for SQL emission validation.
//!
//! Rendered plans are parsed back with sqlparser-rs to catch malformed output.
//! Bind placeholders (`%(key)s`) are not valid SQL on their own, so only
//! parameter-free statements should be validated.

use sqlparser::dialect::{
    BigQueryDialect, DuckDbDialect, GenericDialect, PostgreSqlDialect, SnowflakeDialect,
};
use sqlparser::parser::Parser;

use super::render::Dialect;

/// Validates that a SQL string is syntactically valid for the given dialect.
///
/// # Example
///
/// ```ignore
/// use semlayer::sql::test_utils::validate_sql;
/// use semlayer::sql::Dialect;
///
/// validate_sql("SELECT * FROM users", Dialect::Postgres).unwrap();
/// ```
pub fn validate_sql(sql: &str, dialect: Dialect) -> Result<(), String> {
    let parser_dialect: Box<dyn sqlparser::dialect::Dialect> = match dialect {
        Dialect::Default => Box::new(GenericDialect {}),
        Dialect::BigQuery => Box::new(BigQueryDialect {}),
        Dialect::Postgres => Box::new(PostgreSqlDialect {}),
        Dialect::Redshift => Box::new(PostgreSqlDialect {}), // Redshift is Postgres-like
        Dialect::Snowflake => Box::new(SnowflakeDialect {}),
        Dialect::DuckDb => Box::new(DuckDbDialect {}),
        Dialect::Databricks => Box::new(GenericDialect {}),
    };

    Parser::parse_sql(&*parser_dialect, sql)
        .map(|_| ())
        .map_err(|e| format!("Invalid SQL for {}: {}\nSQL: {}", dialect, e, sql))
}
