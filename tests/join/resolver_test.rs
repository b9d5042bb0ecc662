use std::collections::HashSet;
use std::thread;

use semlayer::model::{DataSource, Dimension, Identifier, IdentifierType, TimeGranularity};
use semlayer::semantic::{DataSourceJoinValidator, JoinHops, SemanticError, SemanticModel, MAX_JOIN_HOPS};

fn marketplace() -> Vec<DataSource> {
    vec![
        DataSource::new("users")
            .with_identifier(Identifier::primary("user"))
            .with_identifier(Identifier::foreign("region")),
        DataSource::new("orders")
            .with_identifier(Identifier::primary("order"))
            .with_identifier(Identifier::foreign("user")),
        DataSource::new("sessions")
            .with_identifier(Identifier::primary("session"))
            .with_identifier(Identifier::foreign("user")),
        DataSource::new("order_items")
            .with_identifier(Identifier::foreign("order"))
            .with_identifier(Identifier::foreign("product")),
        DataSource::new("products").with_identifier(Identifier::primary("product")),
        DataSource::new("regions").with_identifier(Identifier::primary("region")),
        DataSource::new("user_profiles_scd")
            .with_identifier(Identifier::natural("user"))
            .with_dimension(Dimension::window_start("valid_from", TimeGranularity::Day))
            .with_dimension(Dimension::window_end("valid_to", TimeGranularity::Day)),
    ]
}

#[test]
fn test_users_orders_sessions_single_hop() {
    let model = SemanticModel::new(vec![
        DataSource::new("users").with_identifier(Identifier::primary("user")),
        DataSource::new("orders").with_identifier(Identifier::foreign("user")),
        DataSource::new("sessions").with_identifier(Identifier::foreign("user")),
    ])
    .unwrap();
    let validator = DataSourceJoinValidator::new(&model);

    let joins = validator
        .joinable_data_sources(&"users".into(), JoinHops::Single)
        .unwrap();

    let mut targets: Vec<&str> = joins.keys().map(String::as_str).collect();
    targets.sort();
    assert_eq!(targets, vec!["orders", "sessions"]);
    for (target, link) in &joins {
        assert_eq!(link.left_data_source_reference.name(), "users");
        assert_eq!(link.len(), 1);
        assert_eq!(link.target().name(), target);
        assert_eq!(link.join_path[0].identifier_reference.name(), "user");
        assert_eq!(
            link.join_path[0].join_type.left_identifier_type,
            IdentifierType::Foreign
        );
    }
}

#[test]
fn test_path_bounds_hold_for_every_origin() {
    let model = SemanticModel::new(marketplace()).unwrap();
    let validator = DataSourceJoinValidator::new(&model);

    for origin in model.data_sources() {
        for hops in [JoinHops::Single, JoinHops::Multi] {
            let joins = validator
                .joinable_data_sources(&origin.reference(), hops)
                .unwrap();
            for (target, link) in &joins {
                assert!(!link.is_empty());
                assert!(link.len() <= hops.budget());
                assert!(link.len() <= MAX_JOIN_HOPS);
                assert_eq!(link.target().name(), target);

                let names = link.data_sources();
                let unique: HashSet<&str> = names.iter().copied().collect();
                assert_eq!(unique.len(), names.len(), "repeated data source in {names:?}");
                assert_eq!(names[0], origin.name);
            }
        }
    }
}

#[test]
fn test_single_hop_is_subset_of_multi_hop() {
    let model = SemanticModel::new(marketplace()).unwrap();
    let validator = DataSourceJoinValidator::new(&model);

    for origin in model.data_sources() {
        let single = validator
            .joinable_data_sources(&origin.reference(), JoinHops::Single)
            .unwrap();
        let multi = validator
            .joinable_data_sources(&origin.reference(), JoinHops::Multi)
            .unwrap();
        for target in single.keys() {
            assert!(multi.contains_key(target), "{} lost {}", origin.name, target);
        }
    }
}

#[test]
fn test_multi_hop_from_regions() {
    let model = SemanticModel::new(marketplace()).unwrap();
    let validator = DataSourceJoinValidator::new(&model);

    let joins = validator
        .joinable_data_sources(&"regions".into(), JoinHops::Multi)
        .unwrap();

    assert_eq!(joins["users"].data_sources(), vec!["regions", "users"]);
    assert_eq!(joins["orders"].data_sources(), vec!["regions", "users", "orders"]);
    assert_eq!(joins["sessions"].data_sources(), vec!["regions", "users", "sessions"]);
    // natural -> primary: the window table can join users in
    assert_eq!(
        joins["user_profiles_scd"].data_sources(),
        vec!["regions", "users", "user_profiles_scd"]
    );
    // order_items is three hops from regions
    assert!(!joins.contains_key("order_items"));
}

#[test]
fn test_validity_window_table_joins_in_foreign_keys() {
    let model = SemanticModel::new(marketplace()).unwrap();
    let validator = DataSourceJoinValidator::new(&model);

    let joins = validator
        .joinable_data_sources(&"user_profiles_scd".into(), JoinHops::Single)
        .unwrap();

    // Joins landing on a natural key are legal because the right side has a window.
    let mut targets: Vec<&str> = joins.keys().map(String::as_str).collect();
    targets.sort();
    assert_eq!(targets, vec!["orders", "sessions", "users"]);
}

fn diamond(warehouses_first: bool) -> SemanticModel {
    let stores = DataSource::new("stores")
        .with_identifier(Identifier::primary("store"))
        .with_identifier(Identifier::foreign("region"));
    let warehouses = DataSource::new("warehouses")
        .with_identifier(Identifier::primary("warehouse"))
        .with_identifier(Identifier::foreign("region"));
    let middle = if warehouses_first {
        vec![warehouses, stores]
    } else {
        vec![stores, warehouses]
    };

    let mut data_sources = vec![DataSource::new("regions").with_identifier(Identifier::primary("region"))];
    data_sources.extend(middle);
    data_sources.push(
        DataSource::new("shipments")
            .with_identifier(Identifier::primary("shipment"))
            .with_identifier(Identifier::foreign("store"))
            .with_identifier(Identifier::foreign("warehouse")),
    );
    SemanticModel::new(data_sources).unwrap()
}

#[test]
fn test_first_discovered_path_wins() {
    for (warehouses_first, via) in [(false, "stores"), (true, "warehouses")] {
        let model = diamond(warehouses_first);
        let validator = DataSourceJoinValidator::new(&model);
        let joins = validator
            .joinable_data_sources(&"regions".into(), JoinHops::Multi)
            .unwrap();

        assert_eq!(joins["shipments"].data_sources(), vec!["regions", via, "shipments"]);
        assert_eq!(joins[via].discovery_rank, 0);
        assert_eq!(joins["shipments"].discovery_rank, 2);
    }
}

#[test]
fn test_unknown_origin() {
    let model = SemanticModel::new(marketplace()).unwrap();
    let validator = DataSourceJoinValidator::new(&model);
    assert_eq!(
        validator.joinable_data_sources(&"payments".into(), JoinHops::Multi),
        Err(SemanticError::UnknownDataSource("payments".to_string()))
    );
}

#[test]
fn test_concurrent_resolution_matches_sequential() {
    let model = SemanticModel::new(marketplace()).unwrap();
    let validator = DataSourceJoinValidator::new(&model);
    let origins: Vec<String> = model.data_sources().map(|ds| ds.name.clone()).collect();

    let sequential: Vec<_> = origins
        .iter()
        .map(|origin| {
            validator
                .joinable_data_sources(&origin.as_str().into(), JoinHops::Multi)
                .unwrap()
        })
        .collect();

    let concurrent: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = origins
            .iter()
            .map(|origin| {
                let validator = &validator;
                scope.spawn(move || {
                    validator
                        .joinable_data_sources(&origin.as_str().into(), JoinHops::Multi)
                        .unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(sequential, concurrent);
}
