use std::collections::HashSet;

use stratus_core::{
    AccountObjectIdentifier, DatabaseObjectIdentifier, ObjectIdentifier, ShowObject,
};
use stratus_testkit::{
    TEST_OBJECT_PREFIX, TestClient, check_object_not_exists, random_database_object_identifier,
    random_name, random_schema_object_identifier,
};

#[path = "support/local_client.rs"]
mod local_client;

use local_client::local_client;

#[test]
fn random_names_are_prefixed_and_unique() {
    let names: HashSet<_> = (0..32).map(|_| random_name()).collect();

    assert_eq!(names.len(), 32);
    for name in &names {
        assert!(name.starts_with(TEST_OBJECT_PREFIX), "unexpected name {name}");
        assert_eq!(name.to_ascii_uppercase(), *name);
    }
}

#[test]
fn random_identifiers_keep_their_container() {
    let database = AccountObjectIdentifier::new("ANALYTICS");
    let schema_id = random_database_object_identifier(&database);
    assert_eq!(schema_id.database_id(), database);
    assert!(schema_id.name().starts_with(TEST_OBJECT_PREFIX));

    let schema = DatabaseObjectIdentifier::new("ANALYTICS", "RAW");
    let table_id = random_schema_object_identifier(&schema);
    assert_eq!(table_id.schema_id(), schema);
    assert!(table_id.name().starts_with(TEST_OBJECT_PREFIX));
}

#[test]
fn cleanup_drops_the_object_when_it_goes_out_of_scope() {
    let client = local_client();
    let helper = TestClient::new(client.clone());

    let id = {
        let (warehouse, _cleanup) = helper.create_warehouse().expect("create warehouse");
        assert!(warehouse.metadata.name.starts_with(TEST_OBJECT_PREFIX));
        assert!(
            client
                .warehouses()
                .exists(&warehouse.id())
                .expect("lookup")
        );
        warehouse.id()
    };

    check_object_not_exists::<stratus_core::Warehouse>(Some(client.as_ref()), &id)
        .expect("cleanup dropped the warehouse");
}

#[test]
fn disarmed_cleanup_keeps_the_object() {
    let client = local_client();
    let helper = TestClient::new(client.clone());

    let (role, cleanup) = helper.create_role().expect("create role");
    cleanup.disarm();

    assert!(client.roles().exists(&role.id()).expect("lookup"));
}

#[test]
fn explicit_cleanup_run_reports_success_and_tolerates_prior_drop() {
    let client = local_client();
    let helper = TestClient::new(client.clone());
    let (database, cleanup) = helper.create_database().expect("create database");

    client
        .execute(&format!("DROP DATABASE {}", database.id()))
        .expect("drop database early");

    cleanup
        .run()
        .expect("cleanup uses IF EXISTS and succeeds on a missing object");
}

#[test]
fn nested_helpers_create_schema_scoped_objects() {
    let client = local_client();
    let helper = TestClient::new(client.clone());

    let (database, _database_cleanup) = helper.create_database().expect("create database");
    let (schema, _schema_cleanup) = helper
        .create_schema_in(&database.id())
        .expect("create schema");
    let (table, _table_cleanup) = helper.create_table_in(&schema.id()).expect("create table");
    let (view, _view_cleanup) = helper.create_view_in(&schema.id()).expect("create view");
    let (stage, _stage_cleanup) = helper.create_stage_in(&schema.id()).expect("create stage");
    let (tag, tag_cleanup) = helper.create_tag_in(&schema.id()).expect("create tag");

    for object in [table.id(), view.id(), stage.id(), tag.id()] {
        assert_eq!(object.schema_id(), schema.id());
        assert!(object.name().starts_with(TEST_OBJECT_PREFIX));
    }
    assert_eq!(table.location.database_name, database.metadata.name);

    tag_cleanup.run().expect("drop tag");
    assert!(!client.tags().exists(&tag.id()).expect("lookup"));
    assert!(client.stages().exists(&stage.id()).expect("lookup"));
}
