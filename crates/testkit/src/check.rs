use stratus_core::ObjectType;
use thiserror::Error;

use crate::TestState;

pub type CheckResult = Result<(), CheckError>;

/// Closure the test runner invokes after an apply or destroy step.
pub type TestCheck = Box<dyn Fn(&TestState) -> CheckResult>;

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("client was not provided; build the check with a connected client")]
    ClientNotProvided,
    #[error("expected {object_type} {id} to not exist, but it still exists")]
    ObjectStillExists { object_type: ObjectType, id: String },
    #[error("expected {object_type} {id} to exist, but it was not found")]
    ObjectMissing { object_type: ObjectType, id: String },
    #[error("looking up {object_type} {id} failed: {source}")]
    Lookup {
        object_type: ObjectType,
        id: String,
        #[source]
        source: stratus_core::Error,
    },
    #[error("resource `{address}` is not present in state")]
    ResourceNotFound { address: String },
    #[error("{target}: {message}")]
    Assertion { target: String, message: String },
    #[error("check {index}/{total} failed: {source}")]
    Step {
        index: usize,
        total: usize,
        #[source]
        source: Box<CheckError>,
    },
    #[error("{}", render_aggregate(.0))]
    Aggregate(Vec<CheckError>),
}

impl CheckError {
    pub fn assertion(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Assertion {
            target: target.into(),
            message: message.into(),
        }
    }

    /// Collapses zero, one, or many failures into a single result.
    pub fn collect(mut errors: Vec<CheckError>) -> CheckResult {
        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(Self::Aggregate(errors)),
        }
    }
}

fn render_aggregate(errors: &[CheckError]) -> String {
    let mut rendered = format!("{} check(s) failed:", errors.len());
    for error in errors {
        rendered.push_str("\n  - ");
        rendered.push_str(&error.to_string());
    }
    rendered
}

/// Runs checks in order and stops at the first failure.
#[must_use]
pub fn compose_checks(checks: Vec<TestCheck>) -> TestCheck {
    Box::new(move |state| {
        let total = checks.len();
        for (index, check) in checks.iter().enumerate() {
            check(state).map_err(|source| CheckError::Step {
                index: index + 1,
                total,
                source: Box::new(source),
            })?;
        }
        Ok(())
    })
}

/// Runs every check and reports all failures together.
#[must_use]
pub fn compose_aggregate_checks(checks: Vec<TestCheck>) -> TestCheck {
    Box::new(move |state| {
        CheckError::collect(
            checks
                .iter()
                .filter_map(|check| check(state).err())
                .collect(),
        )
    })
}
