use super::{Formatter, Ident, Params, ToSql};

use crate::stmt::{ColumnDef, PrimaryKeyDef};

impl ToSql for &ColumnDef {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let ty = self.ty.to_string();
        let null = if self.not_null { " NOT NULL" } else { " NULL" };

        fmt!(f, Ident(&self.name), " ", &ty, null);
    }
}

impl ToSql for PrimaryKeyDef {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let extra = if self.is_auto_increment() {
            " AUTO_INCREMENT"
        } else {
            ""
        };

        fmt!(f, Ident("id"), " ", self.column_type(), " NOT NULL", extra);
    }
}
