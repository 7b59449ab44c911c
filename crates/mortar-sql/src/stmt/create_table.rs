use super::{ColumnDef, IndexDef, PrimaryKeyDef, Statement};

use mortar_core::Model;

/// A statement to create a table for a model.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTable {
    /// Name of the table
    pub name: String,

    /// The `id` column, always rendered first
    pub primary_key: PrimaryKeyDef,

    /// Column definitions, in declaration order
    pub columns: Vec<ColumnDef>,

    /// Single column indexes followed by named multi-column indexes
    pub indexes: Vec<IndexDef>,
}

impl CreateTable {
    pub fn new(model: &Model) -> CreateTable {
        let single = model
            .properties
            .values()
            .filter_map(|prop| Some(IndexDef::from_property(prop, prop.column_index()?)));

        let named = model.indexes.values().map(IndexDef::from);

        CreateTable {
            name: model.table_name.clone(),
            primary_key: PrimaryKeyDef(model.primary_key),
            columns: model.columns().map(ColumnDef::from_property).collect(),
            indexes: single.chain(named).collect(),
        }
    }
}

impl Statement {
    pub fn create_table(model: &Model) -> Self {
        CreateTable::new(model).into()
    }
}

impl From<CreateTable> for Statement {
    fn from(value: CreateTable) -> Self {
        Self::CreateTable(value)
    }
}
