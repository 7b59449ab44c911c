use super::Statement;

use mortar_core::stmt::Value;

/// A single row insert.
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub table: String,

    /// Column names, one per value
    pub columns: Vec<String>,

    /// Values, already cast for storage
    pub values: Vec<Value>,

    /// Turn a duplicate key into an update of every non-`id` column
    pub on_duplicate_key_update: bool,
}

impl From<Insert> for Statement {
    fn from(value: Insert) -> Self {
        Self::Insert(value)
    }
}
