use super::{DATABASE_NAME_COLUMN, ObjectMetadata, SCHEMA_NAME_COLUMN, ShowObject, required};
use crate::{DecodeError, ObjectType, Row, SchemaObjectIdentifier};

/// Container columns shared by objects living inside a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaLocation {
    pub database_name: String,
    pub schema_name: String,
}

impl SchemaLocation {
    fn from_row(object_type: ObjectType, row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            database_name: required(object_type, row, DATABASE_NAME_COLUMN)?,
            schema_name: required(object_type, row, SCHEMA_NAME_COLUMN)?,
        })
    }

    fn id(&self, name: &str) -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new(
            self.database_name.clone(),
            self.schema_name.clone(),
            name.to_string(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub metadata: ObjectMetadata,
    pub location: SchemaLocation,
}

impl ShowObject for Table {
    type Id = SchemaObjectIdentifier;
    const OBJECT_TYPE: ObjectType = ObjectType::Table;

    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            metadata: ObjectMetadata::from_row(Self::OBJECT_TYPE, row)?,
            location: SchemaLocation::from_row(Self::OBJECT_TYPE, row)?,
        })
    }

    fn id(&self) -> Self::Id {
        self.location.id(&self.metadata.name)
    }

    fn metadata(&self) -> &ObjectMetadata {
        &self.metadata
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub metadata: ObjectMetadata,
    pub location: SchemaLocation,
}

impl ShowObject for View {
    type Id = SchemaObjectIdentifier;
    const OBJECT_TYPE: ObjectType = ObjectType::View;

    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            metadata: ObjectMetadata::from_row(Self::OBJECT_TYPE, row)?,
            location: SchemaLocation::from_row(Self::OBJECT_TYPE, row)?,
        })
    }

    fn id(&self) -> Self::Id {
        self.location.id(&self.metadata.name)
    }

    fn metadata(&self) -> &ObjectMetadata {
        &self.metadata
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    pub metadata: ObjectMetadata,
    pub location: SchemaLocation,
}

impl ShowObject for Stage {
    type Id = SchemaObjectIdentifier;
    const OBJECT_TYPE: ObjectType = ObjectType::Stage;

    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            metadata: ObjectMetadata::from_row(Self::OBJECT_TYPE, row)?,
            location: SchemaLocation::from_row(Self::OBJECT_TYPE, row)?,
        })
    }

    fn id(&self) -> Self::Id {
        self.location.id(&self.metadata.name)
    }

    fn metadata(&self) -> &ObjectMetadata {
        &self.metadata
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub metadata: ObjectMetadata,
    pub location: SchemaLocation,
}

impl ShowObject for Tag {
    type Id = SchemaObjectIdentifier;
    const OBJECT_TYPE: ObjectType = ObjectType::Tag;

    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            metadata: ObjectMetadata::from_row(Self::OBJECT_TYPE, row)?,
            location: SchemaLocation::from_row(Self::OBJECT_TYPE, row)?,
        })
    }

    fn id(&self) -> Self::Id {
        self.location.id(&self.metadata.name)
    }

    fn metadata(&self) -> &ObjectMetadata {
        &self.metadata
    }
}
