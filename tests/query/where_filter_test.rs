//! Dimension objects built while parsing where filters.

use semlayer::model::TimeGranularity;
use semlayer::query::{QuerySyntaxError, WhereFilterDimensionFactory};
use semlayer::sql::expr::DatePart;
use semlayer::sql::Dialect;

#[test]
fn descending_is_rejected() {
    let mut factory = WhereFilterDimensionFactory::default();
    let err = factory
        .create("country", &["listing"])
        .descending(true)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Can't set descending in the where clause. Try setting descending in the order_by clause instead"
    );
    assert!(matches!(err, QuerySyntaxError::InvalidQuerySyntax(_)));
}

#[test]
fn date_part_and_alias_are_unsupported_in_every_dialect() {
    for dialect in Dialect::ALL {
        let mut factory = WhereFilterDimensionFactory::new(dialect);
        let dim = factory.create("created_at", &["listing"]);

        let err = dim.date_part(DatePart::Month).unwrap_err();
        assert_eq!(err, QuerySyntaxError::Unsupported { operation: "date_part" });
        assert_eq!(err.to_string(), "'date_part' is not supported in a where filter");

        let err = dim.alias("created").unwrap_err();
        assert_eq!(err, QuerySyntaxError::Unsupported { operation: "alias" });
    }
}

#[test]
fn failed_calls_leave_dimension_untouched() {
    let mut factory = WhereFilterDimensionFactory::default();
    let dim = factory.create("created_at", &["listing"]);
    assert!(dim.alias("created").is_err());
    assert!(dim.grain("fortnight").is_err());
    assert_eq!(dim.time_granularity(), None);
    assert_eq!(dim.column_name(), "listing__created_at");
}

#[test]
fn grain_chains_into_time_dimension_spec() {
    let mut factory = WhereFilterDimensionFactory::default();
    factory
        .create("created_at", &["listing", "host"])
        .grain("week")
        .unwrap();
    factory.create("country", &["listing"]);

    let created = factory.created();
    assert_eq!(created.len(), 2);
    assert_eq!(created[0].time_granularity(), Some(TimeGranularity::Week));
    assert_eq!(created[0].column_name(), "listing__host__created_at__week");
    assert_eq!(created[1].to_string(), "listing__country");

    let specs = factory.time_dimension_specs();
    assert_eq!(specs.len(), 1);
    assert_eq!(specs[0].element_name, "created_at");
    assert_eq!(
        specs[0]
            .identifier_links
            .iter()
            .map(|link| link.name())
            .collect::<Vec<_>>(),
        vec!["listing", "host"]
    );
}

#[test]
fn unlinked_dimension_uses_bare_name() {
    let mut factory = WhereFilterDimensionFactory::default();
    let dim = factory.create("ds", &[]);
    assert!(dim.entity_path().is_empty());
    assert_eq!(dim.name(), "ds");
    assert_eq!(dim.grain("day").unwrap().column_name(), "ds__day");
}
