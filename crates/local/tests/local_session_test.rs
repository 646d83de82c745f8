use stratus_core::{
    AccountObjectIdentifier, AlterAction, AlterRequest, Client, ConnectionConfig, CreateRequest,
    DatabaseObjectIdentifier, DropRequest, OBJECT_ALREADY_EXISTS, OBJECT_DOES_NOT_EXIST,
    ObjectType, SYNTAX_ERROR, SchemaObjectIdentifier, Scope, Session, ShowObject, ShowRequest,
};
use stratus_local::{LocalSession, client};
use tempfile::tempdir;

fn in_memory_client() -> Client {
    client(&ConnectionConfig::in_memory()).expect("open in-memory local session")
}

fn seed_schema(client: &Client) -> DatabaseObjectIdentifier {
    client
        .execute(r#"CREATE DATABASE "DB""#)
        .expect("create database");
    client
        .execute(r#"CREATE SCHEMA "DB"."PUBLIC""#)
        .expect("create schema");
    DatabaseObjectIdentifier::new("DB", "PUBLIC")
}

#[test]
fn created_objects_are_listed_with_owner_and_comment() {
    let client = in_memory_client();
    let schema = seed_schema(&client);
    let stage = SchemaObjectIdentifier::in_schema(&schema, "LANDING");

    client
        .stages()
        .create(&CreateRequest::new(ObjectType::Stage, stage.clone()).with_comment("raw files"))
        .expect("create stage");

    let found = client.stages().show_by_id(&stage).expect("stage is visible");
    assert_eq!(found.id(), stage);
    assert_eq!(found.metadata.comment.as_deref(), Some("raw files"));
    assert_eq!(found.metadata.owner.as_deref(), Some("ACCOUNTADMIN"));
    assert!(found.metadata.created_on.is_some());
}

#[test]
fn dropping_a_database_cascades_to_its_children() {
    let client = in_memory_client();
    let schema = seed_schema(&client);
    let table = SchemaObjectIdentifier::in_schema(&schema, "ORDERS");
    client
        .tables()
        .create(&CreateRequest::new(ObjectType::Table, table.clone()))
        .expect("create table");

    client
        .databases()
        .drop(&DropRequest::new(ObjectType::Database, AccountObjectIdentifier::new("DB")))
        .expect("drop database");

    let error = client
        .tables()
        .show_by_id(&table)
        .expect_err("table must disappear with its database");
    assert!(error.is_object_not_found(), "unexpected error: {error}");
    assert!(
        !client
            .schemas()
            .exists(&schema)
            .expect("schema lookup succeeds")
    );
}

#[test]
fn show_like_is_case_insensitive_and_respects_scope_and_limit() {
    let client = in_memory_client();
    let schema = seed_schema(&client);
    for name in ["TAG_A", "TAG_B", "OTHER"] {
        client
            .execute(&format!(r#"CREATE TAG "DB"."PUBLIC"."{name}""#))
            .expect("create tag");
    }

    let tags = client
        .tags()
        .show(
            &ShowRequest::new(ObjectType::Tag)
                .like("tag_%")
                .in_scope(Scope::Schema(schema)),
        )
        .expect("show tags");
    let names: Vec<_> = tags.iter().map(|tag| tag.metadata.name.as_str()).collect();
    assert_eq!(names, vec!["TAG_A", "TAG_B"]);

    let limited = client
        .tags()
        .show(&ShowRequest::new(ObjectType::Tag).limit(1))
        .expect("show tags with limit");
    assert_eq!(limited.len(), 1);

    let all = client.tags().show_all().expect("show all tags");
    let mut names: Vec<_> = all.iter().map(|tag| tag.metadata.name.as_str()).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["OTHER", "TAG_A", "TAG_B"]);
}

#[test]
fn duplicate_create_and_missing_drop_surface_server_codes() {
    let session = LocalSession::open_in_memory().expect("open session");
    session
        .execute(r#"CREATE WAREHOUSE "WH""#)
        .expect("create warehouse");

    let duplicate = session
        .execute(r#"CREATE WAREHOUSE "WH""#)
        .expect_err("duplicate create must fail");
    assert_eq!(
        duplicate.server_error().map(|error| error.code.as_str()),
        Some(OBJECT_ALREADY_EXISTS)
    );

    session
        .execute(r#"CREATE WAREHOUSE IF NOT EXISTS "WH""#)
        .expect("IF NOT EXISTS tolerates duplicates");
    session
        .execute(r#"CREATE OR REPLACE WAREHOUSE "WH" COMMENT = 'replaced'"#)
        .expect("OR REPLACE recreates");

    let missing = session
        .execute(r#"DROP WAREHOUSE "NOPE""#)
        .expect_err("dropping a missing warehouse must fail");
    assert_eq!(
        missing.server_error().map(|error| error.code.as_str()),
        Some(OBJECT_DOES_NOT_EXIST)
    );
    session
        .execute(r#"DROP WAREHOUSE IF EXISTS "NOPE""#)
        .expect("IF EXISTS tolerates missing objects");

    let syntax = session
        .execute("DROP WAREHOUSE")
        .expect_err("missing identifier is a syntax error");
    assert_eq!(
        syntax.server_error().map(|error| error.code.as_str()),
        Some(SYNTAX_ERROR)
    );
}

#[test]
fn client_drop_of_missing_object_maps_to_not_found_sentinel() {
    let client = in_memory_client();
    let error = client
        .roles()
        .drop(&DropRequest::new(ObjectType::Role, AccountObjectIdentifier::new("GHOST")))
        .expect_err("role does not exist");

    assert!(error.is_object_not_found());
    assert!(error.to_string().contains(r#""GHOST""#));
}

#[test]
fn schema_objects_require_an_existing_schema() {
    let client = in_memory_client();
    client
        .execute(r#"CREATE DATABASE "DB""#)
        .expect("create database");

    let error = client
        .views()
        .create(&CreateRequest::new(
            ObjectType::View,
            SchemaObjectIdentifier::new("DB", "MISSING", "V"),
        ))
        .expect_err("schema is missing");
    assert_eq!(
        error.server_error().map(|error| error.code.as_str()),
        Some(OBJECT_DOES_NOT_EXIST)
    );
}

#[test]
fn renaming_a_schema_moves_its_children() {
    let client = in_memory_client();
    let schema = seed_schema(&client);
    let stage = SchemaObjectIdentifier::in_schema(&schema, "S1");
    client
        .stages()
        .create(&CreateRequest::new(ObjectType::Stage, stage))
        .expect("create stage");

    let renamed = DatabaseObjectIdentifier::new("DB", "RAW");
    client
        .schemas()
        .alter(&AlterRequest::new(
            ObjectType::Schema,
            schema.clone(),
            AlterAction::RenameTo(renamed.clone().into()),
        ))
        .expect("rename schema");

    assert!(!client.schemas().exists(&schema).expect("old schema lookup"));
    let moved = SchemaObjectIdentifier::in_schema(&renamed, "S1");
    assert!(client.stages().exists(&moved).expect("moved stage lookup"));
}

#[test]
fn comments_can_be_set_and_unset() {
    let client = in_memory_client();
    let database = AccountObjectIdentifier::new("DB");
    client
        .databases()
        .create(&CreateRequest::new(ObjectType::Database, database.clone()))
        .expect("create database");

    client
        .databases()
        .alter(&AlterRequest::new(
            ObjectType::Database,
            database.clone(),
            AlterAction::SetComment("it's mine".to_string()),
        ))
        .expect("set comment");
    let commented = client.databases().show_by_id(&database).expect("show");
    assert_eq!(commented.metadata.comment.as_deref(), Some("it's mine"));

    client
        .databases()
        .alter(&AlterRequest::new(
            ObjectType::Database,
            database.clone(),
            AlterAction::UnsetComment,
        ))
        .expect("unset comment");
    let uncommented = client.databases().show_by_id(&database).expect("show");
    assert_eq!(uncommented.metadata.comment, None);
}

#[test]
fn use_role_changes_owner_of_new_objects() {
    let client = in_memory_client();
    client
        .execute(r#"CREATE ROLE "LOADER""#)
        .expect("create role");
    client
        .execute(r#"USE ROLE "LOADER""#)
        .expect("use role");
    assert_eq!(client.current_role().expect("current role"), "LOADER");

    client
        .execute(r#"CREATE DATABASE "OWNED""#)
        .expect("create database");
    let owned = client
        .databases()
        .show_by_id(&AccountObjectIdentifier::new("OWNED"))
        .expect("show database");
    assert_eq!(owned.metadata.owner.as_deref(), Some("LOADER"));

    assert!(client.execute(r#"USE ROLE "UNKNOWN""#).is_err());
}

#[test]
fn catalog_persists_across_sessions_on_disk() {
    let tempdir = tempdir().unwrap_or_else(|error| panic!("failed to create tempdir: {error}"));
    let path = tempdir.path().join("catalog.db");
    let config = ConnectionConfig::new(path.to_string_lossy().into_owned());

    client(&config)
        .expect("first session")
        .execute(r#"CREATE DATABASE "PERSISTED""#)
        .expect("create database");

    let reopened = client(&config).expect("second session");
    assert!(
        reopened
            .databases()
            .exists(&AccountObjectIdentifier::new("PERSISTED"))
            .expect("lookup")
    );
}
