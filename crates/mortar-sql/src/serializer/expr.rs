use super::{Comma, Delimited, Formatter, Ident, Params, Period, ToSql};

use crate::stmt::{ColumnRef, Expr};

impl ToSql for &Expr {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            Expr::Conjunction(exprs) if exprs.is_empty() => fmt!(f, "1"),
            Expr::Conjunction(exprs) => fmt!(f, Delimited(exprs, " AND ")),
            Expr::Combine(combinator, exprs) => {
                fmt!(f, "(", Delimited(exprs, combinator.as_sql()), ")")
            }
            Expr::Not(expr) => fmt!(f, "NOT (", &**expr, ")"),
            Expr::IsNull(column) => fmt!(f, column, " IS NULL"),
            Expr::BinaryOp { column, op, value } => {
                fmt!(f, column, " ", op.as_sql(), " ", value)
            }
            Expr::Between { column, low, high } => {
                fmt!(f, column, " BETWEEN ", low, " AND ", high)
            }
            Expr::InList {
                column,
                negated,
                values,
            } => {
                let op = if *negated { " NOT IN (" } else { " IN (" };
                fmt!(f, column, op, Comma(values), ")")
            }
            Expr::Const(true) => fmt!(f, "1"),
            Expr::Const(false) => fmt!(f, "0"),
        }
    }
}

impl ToSql for &ColumnRef {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, Period(self.0.split('.').map(Ident)));
    }
}
