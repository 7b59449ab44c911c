use super::{ColumnDef, IndexDef, PrimaryKeyDef, Statement};

/// A statement to alter a SQL table.
#[derive(Debug, Clone, PartialEq)]
pub struct AlterTable {
    /// Name of the table.
    pub name: String,

    /// The alterations to apply, in order.
    pub alterations: Vec<Alteration>,
}

/// One operation of an `ALTER TABLE` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alteration {
    /// Convert the `id` column to the model's primary key strategy
    ChangePrimaryKey(PrimaryKeyDef),
    AddColumn(ColumnDef),
    ChangeColumn(ColumnDef),
    DropColumn(String),
    DropIndex(String),
    AddIndex(IndexDef),
}

impl Statement {
    pub fn alter_table(name: impl Into<String>, alterations: Vec<Alteration>) -> Self {
        AlterTable {
            name: name.into(),
            alterations,
        }
        .into()
    }
}

impl From<AlterTable> for Statement {
    fn from(value: AlterTable) -> Self {
        Self::AlterTable(value)
    }
}
