use super::{Formatter, ToSql};

use mortar_core::stmt::Value;

/// Collects the values bound to a statement's placeholders.
pub trait Params {
    fn push(&mut self, param: Value) -> Placeholder;
}

/// Position of a bound value, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder(pub usize);

impl Params for Vec<Value> {
    fn push(&mut self, value: Value) -> Placeholder {
        Vec::push(self, value);
        Placeholder(self.len())
    }
}

impl ToSql for Placeholder {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        f.dst.push('?');
    }
}

impl ToSql for &Value {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let placeholder = f.params.push(self.clone());
        placeholder.to_sql(f);
    }
}
