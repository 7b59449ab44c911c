use super::Statement;

/// `DROP TABLE`, issued by migrations before a table is recreated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropTable {
    pub name: String,

    /// Render `IF EXISTS`, so dropping a table that was never created is not
    /// an error
    pub if_exists: bool,
}

impl Statement {
    pub fn drop_table(name: impl Into<String>) -> Self {
        DropTable::new(name, false).into()
    }

    pub fn drop_table_if_exists(name: impl Into<String>) -> Self {
        DropTable::new(name, true).into()
    }
}

impl DropTable {
    fn new(name: impl Into<String>, if_exists: bool) -> DropTable {
        DropTable {
            name: name.into(),
            if_exists,
        }
    }
}

impl From<DropTable> for Statement {
    fn from(value: DropTable) -> Self {
        Self::DropTable(value)
    }
}
