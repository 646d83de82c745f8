use stratus_core::{DatabaseObjectIdentifier, ObjectType, Schema};
use stratus_testkit::{
    CheckError, ObjectRef, Scenario, TestResult, TestState, object_exists, run_scenario,
};

#[path = "support/local_client.rs"]
mod local_client;

use local_client::{local_client, seeded_schema};

#[test]
fn object_exists_passes_for_visible_objects_and_names_missing_ones() {
    let client = local_client();
    let schema = seeded_schema(&client);

    object_exists::<Schema>(Some(client.clone()), schema)(&TestState::new())
        .expect("seeded schema is visible");

    let error = object_exists::<Schema>(
        Some(client),
        DatabaseObjectIdentifier::new("TEST_DB", "MISSING"),
    )(&TestState::new())
    .expect_err("schema was never created");

    let CheckError::ObjectMissing { object_type, id } = &error else {
        panic!("expected missing-object error, got {error:?}");
    };
    assert_eq!(*object_type, ObjectType::Schema);
    assert_eq!(id, r#""TEST_DB"."MISSING""#);
    assert_eq!(
        error.to_string(),
        r#"expected schema "TEST_DB"."MISSING" to exist, but it was not found"#
    );
}

#[test]
fn object_exists_without_client_fails() {
    let error = object_exists::<Schema>(None, DatabaseObjectIdentifier::new("TEST_DB", "PUBLIC"))(
        &TestState::new(),
    )
    .expect_err("no client");

    assert!(matches!(error, CheckError::ClientNotProvided));
}

#[test]
fn scenario_fails_when_a_present_object_is_missing() {
    let client = local_client();
    let case = Scenario {
        setup: vec![r#"CREATE DATABASE "D3""#.to_string()],
        present: vec![ObjectRef {
            object_type: "schema".to_string(),
            id: r#""D3"."RAW""#.to_string(),
        }],
        teardown: vec![r#"DROP DATABASE "D3""#.to_string()],
        ..Scenario::default()
    };

    assert_eq!(
        run_scenario(Some(client.as_ref()), &case),
        TestResult::Failed(
            r#"expected schema "D3"."RAW" to exist, but it was not found"#.to_string()
        )
    );
}
