use std::sync::Arc;

use stratus_core::{AnyObjectIdentifier, Client, ObjectIdentifier, ObjectType, ShowObject};

use crate::{CheckError, CheckResult, FULLY_QUALIFIED_NAME_ATTRIBUTE, TestCheck};

/// Asserts that looking an object up yields the not-found sentinel.
///
/// The accessor is any show-by-id function bound to a live session. Exactly
/// one error, [`stratus_core::Error::ObjectNotFound`], counts as success; an
/// object that is still visible and every other error are failures.
pub struct NonExistenceCheck<Id, F> {
    object_type: ObjectType,
    id: Id,
    accessor: F,
}

impl<Id: ObjectIdentifier, F> NonExistenceCheck<Id, F> {
    pub const fn new(object_type: ObjectType, id: Id, accessor: F) -> Self {
        Self {
            object_type,
            id,
            accessor,
        }
    }

    pub fn check<T>(&self) -> CheckResult
    where
        F: Fn(&Id) -> stratus_core::Result<T>,
    {
        match (self.accessor)(&self.id) {
            Err(error) if error.is_object_not_found() => Ok(()),
            Ok(_) => Err(CheckError::ObjectStillExists {
                object_type: self.object_type,
                id: self.id.fully_qualified_name(),
            }),
            Err(source) => Err(CheckError::Lookup {
                object_type: self.object_type,
                id: self.id.fully_qualified_name(),
                source,
            }),
        }
    }

    #[must_use]
    pub fn into_test_check<T: 'static>(self) -> TestCheck
    where
        F: Fn(&Id) -> stratus_core::Result<T> + 'static,
    {
        Box::new(move |_| self.check())
    }
}

/// Mirror of [`NonExistenceCheck`]: the object must be visible.
pub struct ExistenceCheck<Id, F> {
    object_type: ObjectType,
    id: Id,
    accessor: F,
}

impl<Id: ObjectIdentifier, F> ExistenceCheck<Id, F> {
    pub const fn new(object_type: ObjectType, id: Id, accessor: F) -> Self {
        Self {
            object_type,
            id,
            accessor,
        }
    }

    pub fn check<T>(&self) -> CheckResult
    where
        F: Fn(&Id) -> stratus_core::Result<T>,
    {
        match (self.accessor)(&self.id) {
            Ok(_) => Ok(()),
            Err(error) if error.is_object_not_found() => Err(CheckError::ObjectMissing {
                object_type: self.object_type,
                id: self.id.fully_qualified_name(),
            }),
            Err(source) => Err(CheckError::Lookup {
                object_type: self.object_type,
                id: self.id.fully_qualified_name(),
                source,
            }),
        }
    }

    #[must_use]
    pub fn into_test_check<T: 'static>(self) -> TestCheck
    where
        F: Fn(&Id) -> stratus_core::Result<T> + 'static,
    {
        Box::new(move |_| self.check())
    }
}

/// Runs the non-existence check for `id` immediately.
pub fn check_object_not_exists<K: ShowObject>(client: Option<&Client>, id: &K::Id) -> CheckResult {
    let client = client.ok_or(CheckError::ClientNotProvided)?;
    NonExistenceCheck::new(K::OBJECT_TYPE, id.clone(), |id: &K::Id| {
        client.objects::<K>().show_by_id(id)
    })
    .check()
}

/// Builds a [`TestCheck`] asserting that `id` does not exist.
///
/// A missing client produces a check that fails with
/// [`CheckError::ClientNotProvided`] without issuing any query.
#[must_use]
pub fn object_not_exists<K: ShowObject + 'static>(
    client: Option<Arc<Client>>,
    id: K::Id,
) -> TestCheck {
    let Some(client) = client else {
        return Box::new(|_| Err(CheckError::ClientNotProvided));
    };

    NonExistenceCheck::new(K::OBJECT_TYPE, id, move |id: &K::Id| {
        client.objects::<K>().show_by_id(id)
    })
    .into_test_check()
}

/// Builds a [`TestCheck`] asserting that `id` exists.
#[must_use]
pub fn object_exists<K: ShowObject + 'static>(client: Option<Arc<Client>>, id: K::Id) -> TestCheck {
    let Some(client) = client else {
        return Box::new(|_| Err(CheckError::ClientNotProvided));
    };

    ExistenceCheck::new(K::OBJECT_TYPE, id, move |id: &K::Id| {
        client.objects::<K>().show_by_id(id)
    })
    .into_test_check()
}

/// State resource type managing objects of `object_type`, e.g. `stratus_database`.
#[must_use]
pub fn resource_type_for(object_type: ObjectType) -> String {
    format!("stratus_{object_type}")
}

/// Builds a [`TestCheck`] run after destroy: every `object_type` resource
/// left in state must be gone from the backend.
#[must_use]
pub fn check_destroy(client: Option<Arc<Client>>, object_type: ObjectType) -> TestCheck {
    let resource_type = resource_type_for(object_type);
    Box::new(move |state| {
        let client = client.as_deref().ok_or(CheckError::ClientNotProvided)?;
        for (address, resource) in state.resources_of_type(&resource_type) {
            let raw_id = resource
                .attribute(FULLY_QUALIFIED_NAME_ATTRIBUTE)
                .ok_or_else(|| {
                    CheckError::assertion(
                        address,
                        format!("attribute `{FULLY_QUALIFIED_NAME_ATTRIBUTE}` is not set"),
                    )
                })?;
            let id = AnyObjectIdentifier::parse(object_type.scope(), raw_id)
                .map_err(|error| CheckError::assertion(address, error.to_string()))?;

            NonExistenceCheck::new(object_type, id, |id: &AnyObjectIdentifier| {
                client.show_row_by_id(object_type, id)
            })
            .check()?;
        }
        Ok(())
    })
}
