use super::{DATABASE_NAME_COLUMN, ObjectMetadata, ShowObject, required};
use crate::{
    AccountObjectIdentifier, DatabaseObjectIdentifier, DecodeError, ObjectType, Row,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Database {
    pub metadata: ObjectMetadata,
}

impl ShowObject for Database {
    type Id = AccountObjectIdentifier;
    const OBJECT_TYPE: ObjectType = ObjectType::Database;

    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            metadata: ObjectMetadata::from_row(Self::OBJECT_TYPE, row)?,
        })
    }

    fn id(&self) -> Self::Id {
        AccountObjectIdentifier::new(self.metadata.name.clone())
    }

    fn metadata(&self) -> &ObjectMetadata {
        &self.metadata
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warehouse {
    pub metadata: ObjectMetadata,
}

impl ShowObject for Warehouse {
    type Id = AccountObjectIdentifier;
    const OBJECT_TYPE: ObjectType = ObjectType::Warehouse;

    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            metadata: ObjectMetadata::from_row(Self::OBJECT_TYPE, row)?,
        })
    }

    fn id(&self) -> Self::Id {
        AccountObjectIdentifier::new(self.metadata.name.clone())
    }

    fn metadata(&self) -> &ObjectMetadata {
        &self.metadata
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub metadata: ObjectMetadata,
}

impl ShowObject for Role {
    type Id = AccountObjectIdentifier;
    const OBJECT_TYPE: ObjectType = ObjectType::Role;

    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            metadata: ObjectMetadata::from_row(Self::OBJECT_TYPE, row)?,
        })
    }

    fn id(&self) -> Self::Id {
        AccountObjectIdentifier::new(self.metadata.name.clone())
    }

    fn metadata(&self) -> &ObjectMetadata {
        &self.metadata
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub metadata: ObjectMetadata,
    pub database_name: String,
}

impl ShowObject for Schema {
    type Id = DatabaseObjectIdentifier;
    const OBJECT_TYPE: ObjectType = ObjectType::Schema;

    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            metadata: ObjectMetadata::from_row(Self::OBJECT_TYPE, row)?,
            database_name: required(Self::OBJECT_TYPE, row, DATABASE_NAME_COLUMN)?,
        })
    }

    fn id(&self) -> Self::Id {
        DatabaseObjectIdentifier::new(self.database_name.clone(), self.metadata.name.clone())
    }

    fn metadata(&self) -> &ObjectMetadata {
        &self.metadata
    }
}
