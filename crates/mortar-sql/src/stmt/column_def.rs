use crate::ty::{self, ColumnType};

use mortar_core::schema::{PrimaryKey, Property};

/// A column definition, as used by `CREATE TABLE`, `ADD COLUMN` and
/// `CHANGE COLUMN`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    /// Name of the column
    pub name: String,

    /// Column type, including character set and collation
    pub ty: ColumnType,

    /// Whether or not the column is nullable
    pub not_null: bool,
}

/// The `id` column, shaped by the model's primary key strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimaryKeyDef(pub PrimaryKey);

impl ColumnDef {
    pub fn from_property(prop: &Property) -> ColumnDef {
        ColumnDef {
            name: prop.name.clone(),
            ty: ty::column_type(prop),
            not_null: prop.is_not_null(),
        }
    }
}

impl PrimaryKeyDef {
    /// The column type the strategy expects to find on the server.
    pub fn column_type(&self) -> &'static str {
        match self.0 {
            PrimaryKey::Uuid(_) => "CHAR(36)",
            PrimaryKey::AutoIncrement => "INT(11)",
        }
    }

    pub fn is_auto_increment(&self) -> bool {
        self.0 == PrimaryKey::AutoIncrement
    }
}
