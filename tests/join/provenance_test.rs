use semlayer::model::{
    DataSource, DataSourceElementReference, Dimension, Identifier, IdentifierReference,
    TimeGranularity,
};
use semlayer::semantic::{
    validity_window_join_description, DataSourceJoinValidator, IdentifierInstance, IdentifierSpec,
    InstanceSet, SemanticError, SemanticModel, TimeDimensionInstance,
};

fn model() -> SemanticModel {
    SemanticModel::new(vec![
        DataSource::new("bookings")
            .with_identifier(Identifier::primary("booking"))
            .with_identifier(Identifier::foreign("listing"))
            .with_dimension(Dimension::primary_time("ds", TimeGranularity::Day)),
        DataSource::new("listings")
            .with_identifier(Identifier::primary("listing"))
            .with_identifier(Identifier::foreign("user")),
        DataSource::new("listings_scd")
            .with_identifier(Identifier::natural("listing"))
            .with_dimension(Dimension::window_start("active_from", TimeGranularity::Day))
            .with_dimension(Dimension::window_end("active_to", TimeGranularity::Day)),
        DataSource::new("hosts_scd")
            .with_identifier(Identifier::natural("host"))
            .with_dimension(Dimension::window_start("host_from", TimeGranularity::Day))
            .with_dimension(Dimension::window_end("host_to", TimeGranularity::Day)),
    ])
    .unwrap()
}

/// An instance carried over a join from `data_source` through `links`.
fn linked(data_source: &str, identifier: &str, links: &[&str]) -> IdentifierInstance {
    IdentifierInstance {
        spec: IdentifierSpec::new(identifier).with_links(links),
        defined_from: vec![DataSourceElementReference::new(data_source, identifier)],
    }
}

#[test]
fn test_single_unlinked_instance_is_the_origin() {
    let instance_set = InstanceSet::new()
        .with_identifier(IdentifierInstance::from_data_source("bookings", "listing"))
        .with_identifier(linked("listings", "listing", &["user"]));

    let origin = instance_set
        .data_source_of_identifier(&IdentifierReference::new("listing"))
        .unwrap();
    assert_eq!(origin.name(), "bookings");
}

#[test]
fn test_two_unlinked_instances_are_ambiguous() {
    let instance_set = InstanceSet::merge([
        InstanceSet::new().with_identifier(IdentifierInstance::from_data_source("bookings", "listing")),
        InstanceSet::new().with_identifier(IdentifierInstance::from_data_source("listings", "listing")),
    ]);

    let err = instance_set
        .data_source_of_identifier(&"listing".into())
        .unwrap_err();
    assert_eq!(
        err,
        SemanticError::AmbiguousProvenance {
            identifier: "listing".into(),
            matches: vec!["bookings.listing".into(), "listings.listing".into()],
        }
    );
}

#[test]
fn test_no_unlinked_instance_is_ambiguous() {
    let instance_set = InstanceSet::new().with_identifier(linked("listings", "listing", &["booking"]));
    assert!(matches!(
        instance_set.data_source_of_identifier(&"listing".into()),
        Err(SemanticError::AmbiguousProvenance { matches, .. }) if matches.is_empty()
    ));
}

#[test]
fn test_instance_must_have_single_origin() {
    let mut instance = IdentifierInstance::from_data_source("bookings", "listing");
    instance
        .defined_from
        .push(DataSourceElementReference::new("listings", "listing"));
    let instance_set = InstanceSet::new().with_identifier(instance);

    assert_eq!(
        instance_set.data_source_of_identifier(&"listing".into()),
        Err(SemanticError::InvalidInstance {
            element: "listing".into(),
            defined_from: 2,
        })
    );
}

#[test]
fn test_instance_set_from_json() {
    let instance_set: InstanceSet = serde_json::from_str(
        r#"{
            "identifier_instances": [
                {
                    "spec": {"element_name": "listing"},
                    "defined_from": [{"data_source_name": "bookings", "element_name": "listing"}]
                },
                {
                    "spec": {"element_name": "listing", "identifier_links": [{"element_name": "user"}]},
                    "defined_from": [{"data_source_name": "listings", "element_name": "listing"}]
                }
            ]
        }"#,
    )
    .unwrap();

    assert_eq!(
        instance_set
            .data_source_of_identifier(&"listing".into())
            .unwrap()
            .name(),
        "bookings"
    );
}

#[test]
fn test_instance_set_join_uses_defining_data_sources() {
    let model = model();
    let validator = DataSourceJoinValidator::new(&model);
    let bookings = InstanceSet::new().with_identifier(IdentifierInstance::from_data_source("bookings", "listing"));
    let listings = InstanceSet::new().with_identifier(IdentifierInstance::from_data_source("listings", "listing"));

    assert!(validator
        .is_valid_instance_set_join(&bookings, &listings, &"listing".into())
        .unwrap());
    // primary -> foreign fans out
    assert!(!validator
        .is_valid_instance_set_join(&listings, &bookings, &"listing".into())
        .unwrap());
}

#[test]
fn test_validity_window_description() {
    let model = model();
    let window = |ds: &str, dim: &str| TimeDimensionInstance::from_data_source(ds, dim, TimeGranularity::Day);

    let none = InstanceSet::new().with_time_dimension(window("bookings", "ds"));
    assert_eq!(validity_window_join_description(&model, &none), Ok(None));

    let single = InstanceSet::new()
        .with_time_dimension(window("listings_scd", "active_from"))
        .with_time_dimension(window("listings_scd", "active_to"));
    let description = validity_window_join_description(&model, &single)
        .unwrap()
        .unwrap();
    assert_eq!(description.window_start_dimension.element_name, "active_from");
    assert_eq!(description.window_end_dimension.element_name, "active_to");

    let both = InstanceSet::merge([
        single,
        InstanceSet::new()
            .with_time_dimension(window("hosts_scd", "host_from"))
            .with_time_dimension(window("hosts_scd", "host_to")),
    ]);
    let err = validity_window_join_description(&model, &both).unwrap_err();
    assert!(err
        .to_string()
        .starts_with("Found more than 1 set of validity window specs in instance set: "));
}
