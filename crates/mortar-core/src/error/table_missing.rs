use super::Error;

/// Introspection found no table with the given name.
///
/// This is a signal rather than a failure: the migration orchestrator reacts
/// by creating the table.
#[derive(Debug)]
pub(super) struct TableMissing {
    table: Box<str>,
}

impl std::error::Error for TableMissing {}

impl core::fmt::Display for TableMissing {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "table `{}` does not exist", self.table)
    }
}

impl Error {
    pub fn table_missing(table: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::TableMissing(TableMissing {
            table: table.into().into(),
        }))
    }

    pub fn is_table_missing(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::TableMissing(_))
    }
}
