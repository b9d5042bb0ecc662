//! Shared SQL fragments for renderer implementations.
//!
//! Dialects compose these to override only the pieces where their grammar
//! diverges from the default renderer.

use crate::model::TimeGranularity;

// =============================================================================
// Literals
// =============================================================================

/// Quote string with single quotes (standard SQL).
/// Used by: all renderers
pub fn quote_string_single(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Shortest round-tripping float text, always with a fractional part.
pub fn format_float(value: f64) -> String {
    let mut buffer = ryu::Buffer::new();
    buffer.format(value).to_string()
}

/// Format boolean as literal TRUE/FALSE.
pub fn format_bool_literal(b: bool) -> &'static str {
    if b {
        "TRUE"
    } else {
        "FALSE"
    }
}

pub fn wrap_parens(sql: &str, wrap: bool) -> String {
    if wrap {
        format!("({})", sql)
    } else {
        sql.to_string()
    }
}

// =============================================================================
// Date truncation
// =============================================================================

/// `DATE_TRUNC(x, granularity)`
/// Used by: Default, BigQuery
pub fn date_trunc_arg_first(arg: &str, granularity: &str) -> String {
    format!("DATE_TRUNC({}, {})", arg, granularity)
}

/// `DATE_TRUNC('granularity', x)`
/// Used by: Postgres, Redshift, Snowflake, DuckDB, Databricks
pub fn date_trunc_granularity_first(granularity: TimeGranularity, arg: &str) -> String {
    format!("DATE_TRUNC('{}', {})", granularity.as_str(), arg)
}

/// ISO week/year names for engines that distinguish them.
/// Used by: BigQuery
pub fn iso_granularity(granularity: TimeGranularity) -> String {
    match granularity {
        TimeGranularity::Week | TimeGranularity::Year => format!("iso{}", granularity.as_str()),
        _ => granularity.as_str().to_string(),
    }
}

// =============================================================================
// Time deltas
// =============================================================================

/// `x - INTERVAL n unit`
/// Used by: Default, DuckDB
pub fn interval_subtract(arg: &str, count: u32, granularity: TimeGranularity) -> String {
    format!("{} - INTERVAL {} {}", arg, count, granularity.as_str())
}

/// `x - INTERVAL 'n unit'`, with quarters expressed in months.
/// Used by: Postgres
pub fn interval_string_subtract(arg: &str, count: u32, granularity: TimeGranularity) -> String {
    let count = u64::from(count);
    let (count, unit) = match granularity {
        TimeGranularity::Quarter => (count * 3, TimeGranularity::Month.as_str()),
        other => (count, other.as_str()),
    };
    format!("{} - INTERVAL '{} {}'", arg, count, unit)
}

/// `DATEADD(unit, -n, x)`
/// Used by: Redshift, Snowflake, Databricks
pub fn dateadd_subtract(arg: &str, count: u32, granularity: TimeGranularity) -> String {
    format!("DATEADD({}, -{}, {})", granularity.as_str(), count, arg)
}

// =============================================================================
// Percentiles
// =============================================================================

/// `FUNC(p) WITHIN GROUP (ORDER BY (x))`
/// Used by: Default, Postgres, Redshift, Snowflake, DuckDB
pub fn percentile_within_group(function: &str, percentile: f64, arg: &str) -> String {
    format!(
        "{}({}) WITHIN GROUP (ORDER BY ({}))",
        function,
        format_float(percentile),
        arg
    )
}

/// `FUNC(x, p)`
/// Used by: Snowflake, DuckDB, Databricks
pub fn percentile_function_call(function: &str, arg: &str, percentile: f64) -> String {
    format!("{}({}, {})", function, arg, format_float(percentile))
}
