use std::marker::PhantomData;

use tracing::debug;

use crate::{
    AlterRequest, AnyObjectIdentifier, CreateRequest, Database, DropRequest, Error,
    ObjectIdentifier, ObjectType, RequestError, Result, Role, Row, Schema, ServerError, Session,
    ShowObject, ShowRequest, Stage, Table, Tag, View, Warehouse, objects::row_identifier,
    request::validate_identifier,
};

pub struct Client {
    session: Box<dyn Session>,
}

impl Client {
    #[must_use]
    pub fn new(session: Box<dyn Session>) -> Self {
        Self { session }
    }

    pub fn execute(&self, sql: &str) -> Result<()> {
        debug!(sql, "executing statement");
        self.session.execute(sql)
    }

    pub fn query(&self, sql: &str) -> Result<Vec<Row>> {
        debug!(sql, "running query");
        self.session.query(sql)
    }

    pub fn current_role(&self) -> Result<String> {
        self.session.current_role()
    }

    pub fn show_rows(&self, request: &ShowRequest) -> Result<Vec<Row>> {
        let sql = request.to_sql()?;
        self.query(&sql)
    }

    /// Looks one object up with `SHOW <KINDS> LIKE '<name>' IN <container>`.
    ///
    /// `LIKE` may match more than the requested object, so rows are filtered
    /// by exact identifier. A missing object, or a missing container, yields
    /// [`Error::ObjectNotFound`].
    pub fn show_row_by_id(&self, object_type: ObjectType, id: &AnyObjectIdentifier) -> Result<Row> {
        validate_identifier(object_type, id)?;
        let request = ShowRequest::new(object_type)
            .like(id.name())
            .in_scope(id.container());

        let rows = self
            .show_rows(&request)
            .map_err(|error| map_missing_object(error, object_type, id))?;
        for row in rows {
            if row_identifier(object_type, &row)? == *id {
                return Ok(row);
            }
        }

        Err(Error::object_not_found(object_type, id.fully_qualified_name()))
    }

    #[must_use]
    pub const fn objects<K: ShowObject>(&self) -> Objects<'_, K> {
        Objects {
            client: self,
            kind: PhantomData,
        }
    }

    #[must_use]
    pub const fn databases(&self) -> Objects<'_, Database> {
        self.objects()
    }

    #[must_use]
    pub const fn schemas(&self) -> Objects<'_, Schema> {
        self.objects()
    }

    #[must_use]
    pub const fn warehouses(&self) -> Objects<'_, Warehouse> {
        self.objects()
    }

    #[must_use]
    pub const fn roles(&self) -> Objects<'_, Role> {
        self.objects()
    }

    #[must_use]
    pub const fn tables(&self) -> Objects<'_, Table> {
        self.objects()
    }

    #[must_use]
    pub const fn views(&self) -> Objects<'_, View> {
        self.objects()
    }

    #[must_use]
    pub const fn stages(&self) -> Objects<'_, Stage> {
        self.objects()
    }

    #[must_use]
    pub const fn tags(&self) -> Objects<'_, Tag> {
        self.objects()
    }
}

/// Typed access to one object kind through a [`Client`].
pub struct Objects<'a, K> {
    client: &'a Client,
    kind: PhantomData<fn() -> K>,
}

impl<K: ShowObject> Objects<'_, K> {
    pub fn create(&self, request: &CreateRequest) -> Result<()> {
        ensure_object_type::<K>(request.object_type)?;
        let sql = request.to_sql()?;
        self.client.execute(&sql)
    }

    pub fn drop(&self, request: &DropRequest) -> Result<()> {
        ensure_object_type::<K>(request.object_type)?;
        let sql = request.to_sql()?;
        self.client
            .execute(&sql)
            .map_err(|error| map_missing_object(error, K::OBJECT_TYPE, &request.id))
    }

    pub fn alter(&self, request: &AlterRequest) -> Result<()> {
        ensure_object_type::<K>(request.object_type)?;
        let sql = request.to_sql()?;
        self.client
            .execute(&sql)
            .map_err(|error| map_missing_object(error, K::OBJECT_TYPE, &request.id))
    }

    pub fn show(&self, request: &ShowRequest) -> Result<Vec<K>> {
        ensure_object_type::<K>(request.object_type)?;
        self.client
            .show_rows(request)?
            .iter()
            .map(|row| K::from_row(row).map_err(Error::from))
            .collect()
    }

    pub fn show_all(&self) -> Result<Vec<K>> {
        self.show(&ShowRequest::new(K::OBJECT_TYPE))
    }

    pub fn show_by_id(&self, id: &K::Id) -> Result<K> {
        let row = self.client.show_row_by_id(K::OBJECT_TYPE, &id.clone().into())?;
        Ok(K::from_row(&row)?)
    }

    pub fn exists(&self, id: &K::Id) -> Result<bool> {
        match self.show_by_id(id) {
            Ok(_) => Ok(true),
            Err(error) if error.is_object_not_found() => Ok(false),
            Err(error) => Err(error),
        }
    }
}

fn ensure_object_type<K: ShowObject>(actual: ObjectType) -> Result<()> {
    if actual == K::OBJECT_TYPE {
        return Ok(());
    }

    Err(RequestError::ObjectTypeMismatch {
        expected: K::OBJECT_TYPE,
        actual,
    }
    .into())
}

fn map_missing_object(error: Error, object_type: ObjectType, id: &AnyObjectIdentifier) -> Error {
    if error.server_error().is_some_and(ServerError::is_object_missing) {
        Error::object_not_found(object_type, id.fully_qualified_name())
    } else {
        error
    }
}
