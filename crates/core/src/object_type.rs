use std::{fmt, str::FromStr};

/// Shape of the identifier an object kind is addressed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierScope {
    Account,
    Database,
    Schema,
}

impl IdentifierScope {
    #[must_use]
    pub const fn part_count(self) -> usize {
        match self {
            Self::Account => 1,
            Self::Database => 2,
            Self::Schema => 3,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Account => "account-level",
            Self::Database => "database-level",
            Self::Schema => "schema-level",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectType {
    Database,
    Schema,
    Warehouse,
    Role,
    Table,
    View,
    Stage,
    Tag,
}

impl ObjectType {
    pub const ALL: [Self; 8] = [
        Self::Database,
        Self::Schema,
        Self::Warehouse,
        Self::Role,
        Self::Table,
        Self::View,
        Self::Stage,
        Self::Tag,
    ];

    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Database => "DATABASE",
            Self::Schema => "SCHEMA",
            Self::Warehouse => "WAREHOUSE",
            Self::Role => "ROLE",
            Self::Table => "TABLE",
            Self::View => "VIEW",
            Self::Stage => "STAGE",
            Self::Tag => "TAG",
        }
    }

    #[must_use]
    pub const fn plural_keyword(self) -> &'static str {
        match self {
            Self::Database => "DATABASES",
            Self::Schema => "SCHEMAS",
            Self::Warehouse => "WAREHOUSES",
            Self::Role => "ROLES",
            Self::Table => "TABLES",
            Self::View => "VIEWS",
            Self::Stage => "STAGES",
            Self::Tag => "TAGS",
        }
    }

    #[must_use]
    pub const fn scope(self) -> IdentifierScope {
        match self {
            Self::Database | Self::Warehouse | Self::Role => IdentifierScope::Account,
            Self::Schema => IdentifierScope::Database,
            Self::Table | Self::View | Self::Stage | Self::Tag => IdentifierScope::Schema,
        }
    }

    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|object_type| object_type.keyword().eq_ignore_ascii_case(keyword))
    }

    #[must_use]
    pub fn from_plural_keyword(keyword: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|object_type| object_type.plural_keyword().eq_ignore_ascii_case(keyword))
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.keyword().to_ascii_lowercase())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownObjectType(pub String);

impl fmt::Display for UnknownObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown object type `{}`", self.0)
    }
}

impl std::error::Error for UnknownObjectType {}

impl FromStr for ObjectType {
    type Err = UnknownObjectType;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::from_keyword(raw.trim()).ok_or_else(|| UnknownObjectType(raw.to_string()))
    }
}
