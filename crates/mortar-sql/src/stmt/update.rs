use super::{Expr, Statement};

use mortar_core::stmt::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub table: String,

    /// `column = ?` pairs, values already cast for storage
    pub assignments: Vec<(String, Value)>,

    pub filter: Option<Expr>,
}

impl From<Update> for Statement {
    fn from(value: Update) -> Self {
        Self::Update(value)
    }
}
