use std::sync::Arc;

use stratus_core::{Client, ObjectIdentifier, ShowObject};

use crate::{
    COMMENT_ATTRIBUTE, CheckError, CheckResult, FULLY_QUALIFIED_NAME_ATTRIBUTE, NAME_ATTRIBUTE,
    TestCheck, TestState,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum AttributeExpectation {
    Value { key: String, value: String },
    Set { key: String },
    Absent { key: String },
}

/// Assertions over one resource's attributes in [`TestState`].
///
/// Every expectation is evaluated; failures are reported together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceAssert {
    address: String,
    expectations: Vec<AttributeExpectation>,
}

impl ResourceAssert {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            expectations: Vec::new(),
        }
    }

    #[must_use]
    pub fn has_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.expectations.push(AttributeExpectation::Value {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    #[must_use]
    pub fn has_attribute_set(mut self, key: impl Into<String>) -> Self {
        self.expectations
            .push(AttributeExpectation::Set { key: key.into() });
        self
    }

    #[must_use]
    pub fn has_no_attribute(mut self, key: impl Into<String>) -> Self {
        self.expectations
            .push(AttributeExpectation::Absent { key: key.into() });
        self
    }

    #[must_use]
    pub fn has_name(self, name: impl Into<String>) -> Self {
        self.has_attribute(NAME_ATTRIBUTE, name)
    }

    #[must_use]
    pub fn has_comment(self, comment: impl Into<String>) -> Self {
        self.has_attribute(COMMENT_ATTRIBUTE, comment)
    }

    #[must_use]
    pub fn has_fully_qualified_name(self, id: &impl ObjectIdentifier) -> Self {
        self.has_attribute(FULLY_QUALIFIED_NAME_ATTRIBUTE, id.fully_qualified_name())
    }

    pub fn check(&self, state: &TestState) -> CheckResult {
        let resource = state
            .resource(&self.address)
            .ok_or_else(|| CheckError::ResourceNotFound {
                address: self.address.clone(),
            })?;

        let failures = self
            .expectations
            .iter()
            .filter_map(|expectation| match expectation {
                AttributeExpectation::Value { key, value } => match resource.attribute(key) {
                    Some(actual) if actual == value => None,
                    Some(actual) => Some(format!(
                        "expected `{key}` to be `{value}`, got `{actual}`"
                    )),
                    None => Some(format!("expected `{key}` to be `{value}`, but it is not set")),
                },
                AttributeExpectation::Set { key } => resource
                    .attribute(key)
                    .is_none()
                    .then(|| format!("expected `{key}` to be set")),
                AttributeExpectation::Absent { key } => resource
                    .attribute(key)
                    .map(|actual| format!("expected `{key}` to be unset, got `{actual}`")),
            })
            .map(|message| CheckError::assertion(&self.address, message))
            .collect();

        CheckError::collect(failures)
    }

    #[must_use]
    pub fn into_check(self) -> TestCheck {
        Box::new(move |state| self.check(state))
    }
}

struct ObjectExpectation<K> {
    description: String,
    predicate: Box<dyn Fn(&K) -> Result<(), String>>,
}

/// Assertions over a live object fetched by identifier.
pub struct ObjectAssert<K: ShowObject> {
    id: K::Id,
    expectations: Vec<ObjectExpectation<K>>,
}

impl<K: ShowObject + 'static> ObjectAssert<K> {
    pub fn new(id: K::Id) -> Self {
        Self {
            id,
            expectations: Vec::new(),
        }
    }

    #[must_use]
    pub fn has_name(self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.expect(format!("name is `{name}`"), move |object: &K| {
            expect_field("name", Some(name.as_str()), Some(object.metadata().name.as_str()))
        })
    }

    #[must_use]
    pub fn has_comment(self, comment: impl Into<String>) -> Self {
        let comment = comment.into();
        self.expect(format!("comment is `{comment}`"), move |object: &K| {
            expect_field(
                "comment",
                Some(comment.as_str()),
                object.metadata().comment.as_deref(),
            )
        })
    }

    #[must_use]
    pub fn has_no_comment(self) -> Self {
        self.expect("comment is unset".to_string(), |object: &K| {
            expect_field("comment", None, object.metadata().comment.as_deref())
        })
    }

    #[must_use]
    pub fn has_owner(self, owner: impl Into<String>) -> Self {
        let owner = owner.into();
        self.expect(format!("owner is `{owner}`"), move |object: &K| {
            expect_field(
                "owner",
                Some(owner.as_str()),
                object.metadata().owner.as_deref(),
            )
        })
    }

    #[must_use]
    pub fn satisfies(
        self,
        description: impl Into<String>,
        predicate: impl Fn(&K) -> bool + 'static,
    ) -> Self {
        self.expect(description.into(), move |object: &K| {
            if predicate(object) {
                Ok(())
            } else {
                Err("predicate returned false".to_string())
            }
        })
    }

    fn expect(
        mut self,
        description: String,
        predicate: impl Fn(&K) -> Result<(), String> + 'static,
    ) -> Self {
        self.expectations.push(ObjectExpectation {
            description,
            predicate: Box::new(predicate),
        });
        self
    }

    pub fn check(&self, client: Option<&Client>) -> CheckResult {
        let client = client.ok_or(CheckError::ClientNotProvided)?;
        let object = client
            .objects::<K>()
            .show_by_id(&self.id)
            .map_err(|error| {
                if error.is_object_not_found() {
                    CheckError::ObjectMissing {
                        object_type: K::OBJECT_TYPE,
                        id: self.id.fully_qualified_name(),
                    }
                } else {
                    CheckError::Lookup {
                        object_type: K::OBJECT_TYPE,
                        id: self.id.fully_qualified_name(),
                        source: error,
                    }
                }
            })?;

        let target = format!("{} {}", K::OBJECT_TYPE, self.id);
        let failures = self
            .expectations
            .iter()
            .filter_map(|expectation| {
                (expectation.predicate)(&object).err().map(|message| {
                    CheckError::assertion(
                        &target,
                        format!("expected {}: {message}", expectation.description),
                    )
                })
            })
            .collect();

        CheckError::collect(failures)
    }

    #[must_use]
    pub fn into_check(self, client: Option<Arc<Client>>) -> TestCheck {
        Box::new(move |_| self.check(client.as_deref()))
    }
}

fn expect_field(field: &str, expected: Option<&str>, actual: Option<&str>) -> Result<(), String> {
    if expected == actual {
        return Ok(());
    }

    Err(format!(
        "{field} is {}",
        actual.map_or_else(|| "unset".to_string(), |actual| format!("`{actual}`"))
    ))
}
