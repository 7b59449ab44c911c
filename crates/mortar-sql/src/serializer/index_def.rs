use super::{Comma, Formatter, Ident, Params, ToSql};

use crate::stmt::IndexDef;

impl ToSql for &IndexDef {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        if let Some(kind) = self.kind {
            fmt!(f, kind.as_sql(), " ");
        }

        fmt!(f, "INDEX ", Ident(&self.name));

        if let Some(algorithm) = self.using() {
            fmt!(f, " USING ", algorithm.as_sql());
        }

        fmt!(f, " (", Comma(self.columns.iter().map(Ident)), ")");
    }
}
