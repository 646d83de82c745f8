use std::{collections::BTreeMap, path::Path};

use serde::Deserialize;
use stratus_core::{AnyObjectIdentifier, Client, ObjectType};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    CheckError, ExistenceCheck, LoadError, NonExistenceCheck, config::read_file,
};

const SCENARIO_SOURCE_LABEL: &str = "yaml scenario";

/// One acceptance case: statements to run and the objects expected afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Scenario {
    pub setup: Vec<String>,
    pub steps: Vec<String>,
    pub present: Vec<ObjectRef>,
    pub absent: Vec<ObjectRef>,
    /// Substring of the error the steps must fail with.
    pub error: Option<String>,
    pub teardown: Vec<String>,
    pub skip: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObjectRef {
    #[serde(rename = "type")]
    pub object_type: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestResult {
    Passed,
    Skipped(String),
    Failed(String),
}

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("invalid object reference `{object_type}` `{id}`: {message}")]
    ObjectRef {
        object_type: String,
        id: String,
        message: String,
    },
    #[error("{phase} statement {index} failed: {source}")]
    Statement {
        phase: &'static str,
        index: usize,
        #[source]
        source: stratus_core::Error,
    },
    #[error("expected error: {expected}, but got no error")]
    UnexpectedSuccess { expected: String },
    #[error("expected error: {expected}, but got: {actual}")]
    ErrorMismatch { expected: String, actual: String },
    #[error(transparent)]
    Check(#[from] CheckError),
}

pub fn load_scenarios_from_str(yaml: &str) -> Result<BTreeMap<String, Scenario>, LoadError> {
    serde_yaml::from_str(yaml).map_err(|source| LoadError::parse(SCENARIO_SOURCE_LABEL, source))
}

pub fn load_scenarios_from_path(
    path: impl AsRef<Path>,
) -> Result<BTreeMap<String, Scenario>, LoadError> {
    let path = path.as_ref();
    let yaml = read_file(path)?;
    serde_yaml::from_str(&yaml)
        .map_err(|source| LoadError::parse(path.display().to_string(), source))
}

/// Runs one scenario. Object references are validated before any statement
/// runs; once setup starts, teardown always runs.
pub fn run_scenario(client: Option<&Client>, scenario: &Scenario) -> TestResult {
    if let Some(reason) = scenario.skip.as_deref() {
        return TestResult::Skipped(reason.to_string());
    }

    let Some(client) = client else {
        return TestResult::Failed(CheckError::ClientNotProvided.to_string());
    };

    let (present, absent) = match resolve_expectations(scenario) {
        Ok(resolved) => resolved,
        Err(error) => return TestResult::Failed(error.to_string()),
    };

    let outcome = run_statements(client, "setup", &scenario.setup)
        .and_then(|()| {
            evaluate_expected_error(
                scenario.error.as_deref(),
                run_statements(client, "step", &scenario.steps),
            )
        })
        .and_then(|()| verify_objects(client, &present, &absent).map_err(ScenarioError::from));

    let teardown = run_statements(client, "teardown", &scenario.teardown);

    match (outcome, teardown) {
        (Ok(()), Ok(())) => TestResult::Passed,
        (Ok(()), Err(error)) => TestResult::Failed(error.to_string()),
        (Err(error), teardown) => {
            if let Err(teardown_error) = teardown {
                warn!(error = %teardown_error, "scenario teardown failed");
            }
            TestResult::Failed(error.to_string())
        }
    }
}

/// Runs every scenario in name order.
pub fn run_scenarios(
    client: Option<&Client>,
    scenarios: &BTreeMap<String, Scenario>,
) -> BTreeMap<String, TestResult> {
    scenarios
        .iter()
        .map(|(name, scenario)| {
            debug!(scenario = %name, "running scenario");
            (name.clone(), run_scenario(client, scenario))
        })
        .collect()
}

fn run_statements(
    client: &Client,
    phase: &'static str,
    statements: &[String],
) -> Result<(), ScenarioError> {
    for (index, sql) in statements.iter().enumerate() {
        client
            .execute(sql)
            .map_err(|source| ScenarioError::Statement {
                phase,
                index: index + 1,
                source,
            })?;
    }
    Ok(())
}

fn evaluate_expected_error(
    expected: Option<&str>,
    result: Result<(), ScenarioError>,
) -> Result<(), ScenarioError> {
    let Some(expected) = expected else {
        return result;
    };

    match result {
        Ok(()) => Err(ScenarioError::UnexpectedSuccess {
            expected: expected.to_string(),
        }),
        Err(error) => {
            let actual = error.to_string();
            if actual.contains(expected) {
                Ok(())
            } else {
                Err(ScenarioError::ErrorMismatch {
                    expected: expected.to_string(),
                    actual,
                })
            }
        }
    }
}

type ResolvedRef = (ObjectType, AnyObjectIdentifier);

fn resolve_expectations(
    scenario: &Scenario,
) -> Result<(Vec<ResolvedRef>, Vec<ResolvedRef>), ScenarioError> {
    let present = scenario.present.iter().map(resolve).collect::<Result<_, _>>()?;
    let absent = scenario.absent.iter().map(resolve).collect::<Result<_, _>>()?;
    Ok((present, absent))
}

fn verify_objects(
    client: &Client,
    present: &[ResolvedRef],
    absent: &[ResolvedRef],
) -> Result<(), CheckError> {
    let lookup = move |object_type: ObjectType| {
        move |id: &AnyObjectIdentifier| client.show_row_by_id(object_type, id)
    };

    let present = present.iter().map(|(object_type, id)| {
        ExistenceCheck::new(*object_type, id.clone(), lookup(*object_type)).check()
    });
    let absent = absent.iter().map(|(object_type, id)| {
        NonExistenceCheck::new(*object_type, id.clone(), lookup(*object_type)).check()
    });

    CheckError::collect(present.chain(absent).filter_map(Result::err).collect())
}

fn resolve(object: &ObjectRef) -> Result<(ObjectType, AnyObjectIdentifier), ScenarioError> {
    let invalid = |message: String| ScenarioError::ObjectRef {
        object_type: object.object_type.clone(),
        id: object.id.clone(),
        message,
    };

    let object_type: ObjectType = object
        .object_type
        .parse()
        .map_err(|error: stratus_core::UnknownObjectType| invalid(error.to_string()))?;
    let id = AnyObjectIdentifier::parse(object_type.scope(), &object.id)
        .map_err(|error| invalid(error.to_string()))?;
    Ok((object_type, id))
}
