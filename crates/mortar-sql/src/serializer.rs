#[macro_use]
mod fmt;
use fmt::ToSql;

mod delim;
use delim::{Comma, Delimited, Period};

mod ident;
use ident::Ident;

mod params;
pub use params::{Params, Placeholder};

// Fragment serializers
mod column_def;
mod expr;
mod index_def;
mod statement;

use crate::stmt::{Expr, Statement};

use mortar_core::{Filter, Model, Result};

/// Serializes statements to MySQL.
///
/// Identifiers are backtick quoted. Values never appear in the output: each
/// one is pushed to the [`Params`] sink and replaced by a `?`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Serializer {
    _p: (),
}

struct Formatter<'a, P> {
    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Where to store parameters
    params: &'a mut P,
}

impl Serializer {
    pub fn mysql() -> Serializer {
        Serializer::default()
    }

    pub fn serialize(&self, stmt: &Statement, params: &mut impl Params) -> String {
        let mut ret = String::new();

        let mut fmt = Formatter {
            dst: &mut ret,
            params,
        };

        stmt.to_sql(&mut fmt);
        ret
    }

    /// Compiles a filter into a WHERE fragment for `model`.
    ///
    /// Field names are checked against the model and values are cast to
    /// their column's storage form before being pushed to `params`, in
    /// left-to-right order. An empty filter compiles to an empty string; an
    /// empty sub-filter nested in a combinator still renders `1`.
    pub fn filter(&self, model: &Model, filter: &Filter, params: &mut impl Params) -> Result<String> {
        let expr = Expr::from_filter(model, filter)?;

        if expr.is_empty() {
            return Ok(String::new());
        }

        let mut ret = String::new();
        let mut fmt = Formatter {
            dst: &mut ret,
            params,
        };

        expr.to_sql(&mut fmt);
        Ok(ret)
    }
}
