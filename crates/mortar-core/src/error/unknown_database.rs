use super::Error;

/// The server does not know the configured database.
#[derive(Debug)]
pub(super) struct UnknownDatabase {
    database: Box<str>,
}

impl std::error::Error for UnknownDatabase {}

impl core::fmt::Display for UnknownDatabase {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unknown database `{}`", self.database)
    }
}

impl Error {
    pub fn unknown_database(database: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnknownDatabase(UnknownDatabase {
            database: database.into().into(),
        }))
    }

    pub fn is_unknown_database(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnknownDatabase(_))
    }
}
