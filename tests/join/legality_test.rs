use semlayer::model::IdentifierType::{self, Foreign, Natural, Primary, Unique};
use semlayer::model::{DataSource, Dimension, Identifier, TimeGranularity};
use semlayer::semantic::{
    DataSourceIdentifierJoinType, DataSourceJoinValidator, JoinLegality, SemanticError,
    SemanticModel,
};

fn scd(name: &str, identifier: Identifier) -> DataSource {
    DataSource::new(name)
        .with_identifier(identifier)
        .with_dimension(Dimension::window_start("valid_from", TimeGranularity::Day))
        .with_dimension(Dimension::window_end("valid_to", TimeGranularity::Day))
}

#[test]
fn test_primary_onto_foreign_is_absent() {
    assert_eq!(
        JoinLegality::STANDARD.classify_types(Primary, Foreign),
        Ok(None)
    );
}

#[test]
fn test_legality_sets_cover_every_pair_once() {
    let legality = JoinLegality::STANDARD;
    let mut legal = 0;
    let mut illegal = 0;
    for left in IdentifierType::ALL {
        for right in IdentifierType::ALL {
            let join_type = DataSourceIdentifierJoinType::new(left, right);
            assert_ne!(
                legality.valid.contains(&join_type),
                legality.invalid.contains(&join_type),
                "{join_type}"
            );
            match legality.classify_types(left, right) {
                Ok(Some(_)) => legal += 1,
                Ok(None) => illegal += 1,
                Err(err) => panic!("{join_type} unhandled: {err}"),
            }
        }
    }
    assert_eq!((legal, illegal), (11, 5));
}

#[test]
fn test_natural_pairs() {
    let legality = JoinLegality::STANDARD;
    assert!(legality.classify_types(Natural, Primary).unwrap().is_some());
    assert!(legality.classify_types(Natural, Unique).unwrap().is_some());
    assert!(legality.classify_types(Natural, Natural).unwrap().is_none());
    assert!(legality.classify_types(Natural, Foreign).unwrap().is_none());
}

#[test]
fn test_incomplete_table_reports_unhandled_pair() {
    static VALID: [DataSourceIdentifierJoinType; 1] =
        [DataSourceIdentifierJoinType::new(Foreign, Primary)];
    let partial = JoinLegality {
        valid: &VALID,
        invalid: &[],
    };
    assert_eq!(
        partial.classify_types(Primary, Primary),
        Err(SemanticError::UnhandledJoinType {
            left: Primary,
            right: Primary
        })
    );
}

#[test]
fn test_two_validity_windows_never_join() {
    // Natural -> Primary is legal on its own; the windows rule it out.
    let model = SemanticModel::new(vec![
        scd("listings_scd", Identifier::natural("listing")),
        scd("listing_owners_scd", Identifier::primary("listing")),
    ])
    .unwrap();
    let validator = DataSourceJoinValidator::new(&model);
    assert_eq!(
        validator
            .valid_join_type(
                &"listings_scd".into(),
                &"listing_owners_scd".into(),
                &"listing".into()
            )
            .unwrap(),
        None
    );
}

#[test]
fn test_natural_right_side_requires_validity_window() {
    let model = SemanticModel::new(vec![
        DataSource::new("bookings").with_identifier(Identifier::foreign("listing")),
        DataSource::new("listings_plain").with_identifier(Identifier::natural("listing")),
        scd("listings_scd", Identifier::natural("listing")),
    ])
    .unwrap();
    let validator = DataSourceJoinValidator::new(&model);

    assert!(!validator
        .is_valid_join(&"bookings".into(), &"listings_plain".into(), &"listing".into())
        .unwrap());
    assert_eq!(
        validator
            .valid_join_type(&"bookings".into(), &"listings_scd".into(), &"listing".into())
            .unwrap(),
        Some(DataSourceIdentifierJoinType::new(Foreign, Natural))
    );
}

#[test]
fn test_natural_right_side_with_malformed_window_is_absent() {
    let model = SemanticModel::new(vec![
        DataSource::new("bookings").with_identifier(Identifier::foreign("listing")),
        DataSource::new("listings_half")
            .with_identifier(Identifier::natural("listing"))
            .with_dimension(Dimension::window_start("valid_from", TimeGranularity::Day)),
    ])
    .unwrap();
    let validator = DataSourceJoinValidator::new(&model);

    assert_eq!(
        validator
            .valid_join_type(&"bookings".into(), &"listings_half".into(), &"listing".into())
            .unwrap(),
        None
    );
}

#[test]
fn test_undeclared_identifier_is_an_error() {
    let model = SemanticModel::new(vec![
        DataSource::new("bookings").with_identifier(Identifier::foreign("listing")),
        DataSource::new("users").with_identifier(Identifier::primary("user")),
    ])
    .unwrap();
    let validator = DataSourceJoinValidator::new(&model);
    assert_eq!(
        validator.valid_join_type(&"bookings".into(), &"users".into(), &"listing".into()),
        Err(SemanticError::IdentifierNotDeclared {
            data_source: "users".to_string(),
            identifier: "listing".to_string(),
        })
    );
}

#[test]
fn test_unknown_data_source_is_an_error() {
    let model = SemanticModel::new(vec![DataSource::new("bookings")]).unwrap();
    let validator = DataSourceJoinValidator::new(&model);
    assert!(matches!(
        validator.is_valid_join(&"bookings".into(), &"nope".into(), &"listing".into()),
        Err(SemanticError::UnknownDataSource(name)) if name == "nope"
    ));
}
