use std::sync::Arc;

use stratus_core::{
    AccountObjectIdentifier, Client, CreateRequest, Database, DatabaseObjectIdentifier,
    DropRequest, ObjectIdentifier, Result, Role, Schema, SchemaObjectIdentifier, ShowObject,
    Stage, Table, Tag, View, Warehouse,
};
use tracing::warn;
use uuid::Uuid;

pub const TEST_OBJECT_PREFIX: &str = "STRATUS_TEST_";

#[must_use]
pub fn random_name() -> String {
    let suffix = Uuid::new_v4().simple().to_string().to_ascii_uppercase();
    format!("{TEST_OBJECT_PREFIX}{suffix}")
}

#[must_use]
pub fn random_account_object_identifier() -> AccountObjectIdentifier {
    AccountObjectIdentifier::new(random_name())
}

#[must_use]
pub fn random_database_object_identifier(
    database: &AccountObjectIdentifier,
) -> DatabaseObjectIdentifier {
    DatabaseObjectIdentifier::new(database.name(), random_name())
}

#[must_use]
pub fn random_schema_object_identifier(schema: &DatabaseObjectIdentifier) -> SchemaObjectIdentifier {
    SchemaObjectIdentifier::in_schema(schema, random_name())
}

/// Drops an object when it goes out of scope unless disarmed.
#[must_use = "dropping a Cleanup immediately drops the object it guards"]
pub struct Cleanup {
    client: Arc<Client>,
    request: Option<DropRequest>,
}

impl Cleanup {
    pub fn new(client: Arc<Client>, request: DropRequest) -> Self {
        Self {
            client,
            request: Some(request.if_exists()),
        }
    }

    /// Drops the object now and reports the outcome.
    pub fn run(mut self) -> Result<()> {
        match self.request.take() {
            Some(request) => drop_object(&self.client, &request),
            None => Ok(()),
        }
    }

    /// Keeps the object alive past this guard.
    pub fn disarm(mut self) {
        self.request = None;
    }
}

impl Drop for Cleanup {
    fn drop(&mut self) {
        let Some(request) = self.request.take() else {
            return;
        };

        if let Err(error) = drop_object(&self.client, &request) {
            warn!(
                object_type = %request.object_type,
                id = %request.id,
                %error,
                "test cleanup failed"
            );
        }
    }
}

fn drop_object(client: &Client, request: &DropRequest) -> Result<()> {
    client.execute(&request.to_sql()?)
}

/// Setup and teardown helpers over a shared [`Client`].
#[derive(Clone)]
pub struct TestClient {
    client: Arc<Client>,
}

impl TestClient {
    #[must_use]
    pub const fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    #[must_use]
    pub const fn client(&self) -> &Arc<Client> {
        &self.client
    }

    /// Creates an object and returns it as the server reports it, together
    /// with a guard that drops it.
    pub fn create<K: ShowObject>(&self, request: CreateRequest) -> Result<(K, Cleanup)> {
        self.client.objects::<K>().create(&request)?;
        let cleanup = Cleanup::new(
            Arc::clone(&self.client),
            DropRequest::new(K::OBJECT_TYPE, request.id.clone()),
        );

        let row = self.client.show_row_by_id(K::OBJECT_TYPE, &request.id)?;
        Ok((K::from_row(&row)?, cleanup))
    }

    pub fn create_database(&self) -> Result<(Database, Cleanup)> {
        self.create_database_with_id(random_account_object_identifier())
    }

    pub fn create_database_with_id(
        &self,
        id: AccountObjectIdentifier,
    ) -> Result<(Database, Cleanup)> {
        self.create(CreateRequest::new(Database::OBJECT_TYPE, id))
    }

    pub fn create_warehouse(&self) -> Result<(Warehouse, Cleanup)> {
        self.create(CreateRequest::new(
            Warehouse::OBJECT_TYPE,
            random_account_object_identifier(),
        ))
    }

    pub fn create_role(&self) -> Result<(Role, Cleanup)> {
        self.create(CreateRequest::new(
            Role::OBJECT_TYPE,
            random_account_object_identifier(),
        ))
    }

    pub fn create_schema_in(
        &self,
        database: &AccountObjectIdentifier,
    ) -> Result<(Schema, Cleanup)> {
        self.create(CreateRequest::new(
            Schema::OBJECT_TYPE,
            random_database_object_identifier(database),
        ))
    }

    pub fn create_table_in(&self, schema: &DatabaseObjectIdentifier) -> Result<(Table, Cleanup)> {
        self.create(CreateRequest::new(
            Table::OBJECT_TYPE,
            random_schema_object_identifier(schema),
        ))
    }

    pub fn create_view_in(&self, schema: &DatabaseObjectIdentifier) -> Result<(View, Cleanup)> {
        self.create(CreateRequest::new(
            View::OBJECT_TYPE,
            random_schema_object_identifier(schema),
        ))
    }

    pub fn create_stage_in(&self, schema: &DatabaseObjectIdentifier) -> Result<(Stage, Cleanup)> {
        self.create(CreateRequest::new(
            Stage::OBJECT_TYPE,
            random_schema_object_identifier(schema),
        ))
    }

    pub fn create_tag_in(&self, schema: &DatabaseObjectIdentifier) -> Result<(Tag, Cleanup)> {
        self.create(CreateRequest::new(
            Tag::OBJECT_TYPE,
            random_schema_object_identifier(schema),
        ))
    }
}
