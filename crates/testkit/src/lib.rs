mod assert;
mod check;
mod config;
mod existence;
mod helpers;
mod scenario;
mod state;

pub use assert::{ObjectAssert, ResourceAssert};
pub use check::{CheckError, CheckResult, TestCheck, compose_aggregate_checks, compose_checks};
pub use config::{DATABASE_ENV, LoadError, ROLE_ENV, TestConfig};
pub use existence::{
    ExistenceCheck, NonExistenceCheck, check_destroy, check_object_not_exists, object_exists,
    object_not_exists, resource_type_for,
};
pub use helpers::{
    Cleanup, TEST_OBJECT_PREFIX, TestClient, random_account_object_identifier,
    random_database_object_identifier, random_name, random_schema_object_identifier,
};
pub use scenario::{
    ObjectRef, Scenario, ScenarioError, TestResult, load_scenarios_from_path,
    load_scenarios_from_str, run_scenario, run_scenarios,
};
pub use state::{
    COMMENT_ATTRIBUTE, FULLY_QUALIFIED_NAME_ATTRIBUTE, NAME_ATTRIBUTE, ResourceState, TestState,
};
