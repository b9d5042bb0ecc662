//! Expression rendering across dialects.

use insta::assert_snapshot;
use semlayer::model::TimeGranularity;
use semlayer::sql::expr::{
    DatePart, PercentileFunctionType, SqlAggregateFunction, SqlColumnType, SqlExpr,
};
use semlayer::sql::render::{RenderError, SqlExpressionRenderer};
use semlayer::sql::{BindParameters, BindValue, Dialect};

fn render(dialect: Dialect, expr: &SqlExpr) -> String {
    dialect.renderer().render_expr(expr).unwrap().sql
}

fn ds() -> SqlExpr {
    SqlExpr::column("a", "ds")
}

// ----------------------------------------------------------------------------
// Date truncation
// ----------------------------------------------------------------------------

#[test]
fn date_trunc_week_default_and_bigquery() {
    let expr = SqlExpr::date_trunc(TimeGranularity::Week, ds());
    assert_snapshot!(render(Dialect::Default, &expr), @"DATE_TRUNC(a.ds, week)");
    assert_snapshot!(render(Dialect::BigQuery, &expr), @"DATE_TRUNC(a.ds, isoweek)");
}

#[test]
fn date_trunc_granularity_first_dialects() {
    let expr = SqlExpr::date_trunc(TimeGranularity::Week, ds());
    for dialect in [
        Dialect::Postgres,
        Dialect::Redshift,
        Dialect::Snowflake,
        Dialect::DuckDb,
        Dialect::Databricks,
    ] {
        assert_eq!(render(dialect, &expr), "DATE_TRUNC('week', a.ds)", "{}", dialect);
    }
}

#[test]
fn date_trunc_renders_all_granularities() {
    for granularity in TimeGranularity::ALL {
        let expr = SqlExpr::date_trunc(granularity, ds());
        for dialect in Dialect::ALL {
            let sql = render(dialect, &expr);
            assert!(sql.starts_with("DATE_TRUNC("), "{}: {}", dialect, sql);
        }
    }
}

// ----------------------------------------------------------------------------
// Time deltas
// ----------------------------------------------------------------------------

#[test]
fn time_delta_per_dialect() {
    let expr = SqlExpr::time_delta(ds(), TimeGranularity::Day, 7);
    assert_snapshot!(render(Dialect::Default, &expr), @"a.ds - INTERVAL 7 day");
    assert_snapshot!(render(Dialect::DuckDb, &expr), @"a.ds - INTERVAL 7 day");
    assert_snapshot!(render(Dialect::Postgres, &expr), @"a.ds - INTERVAL '7 day'");
    assert_snapshot!(render(Dialect::Redshift, &expr), @"DATEADD(day, -7, a.ds)");
    assert_snapshot!(render(Dialect::Snowflake, &expr), @"DATEADD(day, -7, a.ds)");
    assert_snapshot!(render(Dialect::Databricks, &expr), @"DATEADD(day, -7, a.ds)");
    assert_snapshot!(
        render(Dialect::BigQuery, &expr),
        @"DATE_SUB(CAST(a.ds AS DATETIME), INTERVAL 7 day)"
    );
}

#[test]
fn postgres_quarter_delta_in_months() {
    let expr = SqlExpr::time_delta(ds(), TimeGranularity::Quarter, 1);
    assert_eq!(render(Dialect::Postgres, &expr), "a.ds - INTERVAL '3 month'");
}

#[test]
fn largest_quarter_delta_renders_in_every_dialect() {
    let expr = SqlExpr::time_delta(ds(), TimeGranularity::Quarter, u32::MAX);
    assert_eq!(
        render(Dialect::Postgres, &expr),
        "a.ds - INTERVAL '12884901885 month'"
    );
    for dialect in Dialect::ALL {
        assert!(dialect.renderer().render_expr(&expr).is_ok(), "{}", dialect);
    }
}

#[test]
fn grain_to_date() {
    let expr = SqlExpr::grain_to_date(ds(), TimeGranularity::Week);
    assert_eq!(render(Dialect::Default, &expr), "DATE_TRUNC(a.ds, week)");
    assert_eq!(render(Dialect::BigQuery, &expr), "DATE_TRUNC(a.ds, ISOWEEK)");
    assert_eq!(render(Dialect::Postgres, &expr), "DATE_TRUNC('week', a.ds)");
}

// ----------------------------------------------------------------------------
// Types, casts and UUIDs
// ----------------------------------------------------------------------------

#[test]
fn double_type_names() {
    let expr = SqlExpr::cast(SqlExpr::column("a", "x"), SqlColumnType::Double);
    assert_eq!(render(Dialect::Default, &expr), "CAST(a.x AS DOUBLE)");
    assert_eq!(render(Dialect::BigQuery, &expr), "CAST(a.x AS FLOAT64)");
    assert_eq!(render(Dialect::Postgres, &expr), "CAST(a.x AS DOUBLE PRECISION)");
    assert_eq!(render(Dialect::Redshift, &expr), "CAST(a.x AS DOUBLE PRECISION)");
}

#[test]
fn cast_to_timestamp() {
    let expr = SqlExpr::cast_to_timestamp(SqlExpr::string("2020-01-01"));
    assert_eq!(render(Dialect::Default, &expr), "CAST('2020-01-01' AS TIMESTAMP)");
    assert_eq!(render(Dialect::BigQuery, &expr), "CAST('2020-01-01' AS DATETIME)");
}

#[test]
fn generate_uuid_per_dialect() {
    let expr = SqlExpr::generate_uuid();
    let expected = [
        (Dialect::Default, "UUID()"),
        (Dialect::BigQuery, "GENERATE_UUID()"),
        (Dialect::Postgres, "GEN_RANDOM_UUID()"),
        (Dialect::Snowflake, "UUID_STRING()"),
        (Dialect::DuckDb, "GEN_RANDOM_UUID()"),
        (Dialect::Databricks, "UUID()"),
    ];
    for (dialect, sql) in expected {
        assert_eq!(render(dialect, &expr), sql, "{}", dialect);
    }
    assert!(render(Dialect::Redshift, &expr).starts_with("CONCAT(CAST(RANDOM()"));
}

// ----------------------------------------------------------------------------
// Percentiles
// ----------------------------------------------------------------------------

#[test]
fn continuous_percentile_per_dialect() {
    let expr = SqlExpr::percentile(
        SqlExpr::column("a", "x"),
        0.5,
        PercentileFunctionType::Continuous,
    );
    assert_snapshot!(
        render(Dialect::Default, &expr),
        @"PERCENTILE_CONT(0.5) WITHIN GROUP (ORDER BY (a.x))"
    );
    assert_snapshot!(render(Dialect::BigQuery, &expr), @"PERCENTILE_CONT(a.x, 0.5) OVER()");
    assert_snapshot!(render(Dialect::Databricks, &expr), @"PERCENTILE(a.x, 0.5)");
}

#[test]
fn approximate_percentiles() {
    let x = SqlExpr::column("a", "x");
    let approx_cont = SqlExpr::percentile(x.clone(), 0.9, PercentileFunctionType::ApproximateContinuous);
    let approx_disc = SqlExpr::percentile(x, 0.9, PercentileFunctionType::ApproximateDiscrete);

    assert_eq!(render(Dialect::Snowflake, &approx_cont), "APPROX_PERCENTILE(a.x, 0.9)");
    assert_eq!(render(Dialect::Databricks, &approx_cont), "APPROX_PERCENTILE(a.x, 0.9)");
    assert_eq!(render(Dialect::DuckDb, &approx_cont), "APPROX_QUANTILE(a.x, 0.9)");
    assert_eq!(
        render(Dialect::Redshift, &approx_disc),
        "APPROXIMATE PERCENTILE_DISC(0.9) WITHIN GROUP (ORDER BY (a.x))"
    );
}

#[test]
fn unsupported_percentiles_error() {
    let expr = SqlExpr::percentile(
        SqlExpr::column("a", "x"),
        0.5,
        PercentileFunctionType::ApproximateDiscrete,
    );
    let err = Dialect::Default.renderer().render_expr(&expr).unwrap_err();
    assert_eq!(
        err,
        RenderError::UnsupportedPercentile {
            dialect: "default",
            function_type: PercentileFunctionType::ApproximateDiscrete,
        }
    );
    assert_eq!(
        err.to_string(),
        "The default renderer does not support approximate_discrete percentiles"
    );

    let discrete = SqlExpr::percentile(
        SqlExpr::column("a", "x"),
        0.5,
        PercentileFunctionType::Discrete,
    );
    assert!(matches!(
        Dialect::Databricks.renderer().render_expr(&discrete),
        Err(RenderError::UnsupportedPercentile { dialect: "databricks", .. })
    ));
}

// ----------------------------------------------------------------------------
// Composition and parameters
// ----------------------------------------------------------------------------

#[test]
fn aggregates_and_literals() {
    let count = SqlExpr::aggregate(SqlAggregateFunction::CountDistinct, SqlExpr::column("o", "user_id"));
    assert_eq!(render(Dialect::Default, &count), "COUNT(DISTINCT o.user_id)");

    let literals = SqlExpr::func(
        "COALESCE",
        vec![SqlExpr::null(), SqlExpr::bool(true), SqlExpr::float(1.0), SqlExpr::string("it's")],
    );
    assert_eq!(render(Dialect::Default, &literals), "COALESCE(NULL, TRUE, 1.0, 'it''s')");
}

#[test]
fn nested_operators_are_parenthesized() {
    let expr = SqlExpr::column("a", "x")
        .is_null()
        .or(SqlExpr::column("a", "x").between(SqlExpr::int(1), SqlExpr::int(10)))
        .not();
    assert_snapshot!(
        render(Dialect::Default, &expr),
        @"NOT ((a.x IS NULL) OR (a.x BETWEEN 1 AND 10))"
    );
}

#[test]
fn raw_fragments_keep_their_precedence() {
    let expr = SqlExpr::raw("a.x = 1 OR a.y = 2", BindParameters::new())
        .and(SqlExpr::column("a", "z").is_null());
    assert_eq!(
        render(Dialect::Default, &expr),
        "(a.x = 1 OR a.y = 2) AND (a.z IS NULL)"
    );

    let standalone = SqlExpr::raw("a.x = 1 OR a.y = 2", BindParameters::new());
    assert_eq!(render(Dialect::Default, &standalone), "a.x = 1 OR a.y = 2");
}

#[test]
fn bind_parameters_identical_across_dialects() {
    let expr = SqlExpr::column("a", "country")
        .eq(SqlExpr::param("country", "US"))
        .and(SqlExpr::time_delta(ds(), TimeGranularity::Month, 1).lt(SqlExpr::param("cutoff", "2020-01-01")))
        .and(SqlExpr::raw("a.active = %(active)s", BindParameters::single("active", true)));

    let expected: Vec<(String, BindValue)> = vec![
        ("country".into(), BindValue::Str("US".into())),
        ("cutoff".into(), BindValue::Str("2020-01-01".into())),
        ("active".into(), BindValue::Bool(true)),
    ];
    for dialect in Dialect::ALL {
        let rendered = dialect.renderer().render_expr(&expr).unwrap();
        let actual: Vec<(String, BindValue)> = rendered
            .bind_parameters
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        assert_eq!(actual, expected, "{}", dialect);
        assert!(rendered.sql.contains("%(country)s"), "{}", dialect);
    }
}

#[test]
fn date_part_rejected_by_every_dialect() {
    let expr = SqlExpr::date_part(DatePart::Month, ds());
    for dialect in Dialect::ALL {
        assert_eq!(
            dialect.renderer().render_expr(&expr),
            Err(RenderError::Unsupported { operation: "date_part" }),
            "{}",
            dialect
        );
    }
}

#[test]
fn errors_propagate_from_nested_children() {
    let expr = SqlExpr::func(
        "COALESCE",
        vec![SqlExpr::date_part(DatePart::Year, ds()), SqlExpr::int(0)],
    );
    assert!(Dialect::Postgres.renderer().render_expr(&expr).is_err());
}
