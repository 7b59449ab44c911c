use super::Statement;

/// `CREATE DATABASE` with an explicit character set and collation.
///
/// Neither can be bound as a parameter; both are rendered as given, so
/// callers pass validated names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDatabase {
    pub name: String,
    pub charset: String,
    pub collation: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropDatabase {
    pub name: String,
    pub if_exists: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UseDatabase {
    pub name: String,
}

impl Statement {
    pub fn create_database(
        name: impl Into<String>,
        charset: impl Into<String>,
        collation: impl Into<String>,
    ) -> Self {
        CreateDatabase {
            name: name.into(),
            charset: charset.into(),
            collation: collation.into(),
        }
        .into()
    }

    pub fn drop_database_if_exists(name: impl Into<String>) -> Self {
        DropDatabase {
            name: name.into(),
            if_exists: true,
        }
        .into()
    }

    pub fn use_database(name: impl Into<String>) -> Self {
        UseDatabase { name: name.into() }.into()
    }
}

impl From<CreateDatabase> for Statement {
    fn from(value: CreateDatabase) -> Self {
        Self::CreateDatabase(value)
    }
}

impl From<DropDatabase> for Statement {
    fn from(value: DropDatabase) -> Self {
        Self::DropDatabase(value)
    }
}

impl From<UseDatabase> for Statement {
    fn from(value: UseDatabase) -> Self {
        Self::UseDatabase(value)
    }
}
