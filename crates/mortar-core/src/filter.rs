//! Structured WHERE-clause predicates.
//!
//! A [`Filter`] is a list of [`Node`]s joined with AND. Each node either
//! constrains one field or combines nested filters with a boolean
//! combinator. The shapes are closed: anything a caller can express is one of
//! the variants below, and [`Filter::from_json`] rejects everything else up
//! front.

mod json;

use crate::stmt::Value;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Constraint on one field
    Field { name: String, constraint: Constraint },

    /// `and` / `or` / `xor` over nested filters
    Combine(Combinator, Vec<Filter>),

    /// Negation of exactly one nested filter
    Not(Box<Filter>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    And,
    Or,
    Xor,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// `IS NULL`
    Null,

    /// Equality with a scalar
    Eq(Value),

    /// List membership, shorthand for [`Op::Inq`]
    In(Vec<Value>),

    /// A single named operator
    Op(Op),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Between(Value, Value),
    Inq(Vec<Value>),
    Nin(Vec<Value>),
    Gt(Value),
    Gte(Value),
    Lt(Value),
    Lte(Value),
    Ne(Value),
    Like(Value),
    Nlike(Value),
}

impl Filter {
    pub fn new() -> Filter {
        Filter::default()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn field(mut self, name: impl Into<String>, constraint: Constraint) -> Self {
        self.nodes.push(Node::Field {
            name: name.into(),
            constraint,
        });
        self
    }

    /// Field equals value. A null value constrains the field to `IS NULL`.
    pub fn eq(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let value = value.into();
        let constraint = if value.is_null() {
            Constraint::Null
        } else {
            Constraint::Eq(value)
        };
        self.field(name, constraint)
    }

    pub fn is_null(self, name: impl Into<String>) -> Self {
        self.field(name, Constraint::Null)
    }

    pub fn is_in<I>(self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.field(name, Constraint::In(values.into_iter().map(Into::into).collect()))
    }

    pub fn op(self, name: impl Into<String>, op: Op) -> Self {
        self.field(name, Constraint::Op(op))
    }

    pub fn and(self, filters: impl IntoIterator<Item = Filter>) -> Self {
        self.combine(Combinator::And, filters)
    }

    pub fn or(self, filters: impl IntoIterator<Item = Filter>) -> Self {
        self.combine(Combinator::Or, filters)
    }

    pub fn xor(self, filters: impl IntoIterator<Item = Filter>) -> Self {
        self.combine(Combinator::Xor, filters)
    }

    pub fn not(mut self, filter: Filter) -> Self {
        self.nodes.push(Node::Not(Box::new(filter)));
        self
    }

    fn combine(mut self, combinator: Combinator, filters: impl IntoIterator<Item = Filter>) -> Self {
        self.nodes
            .push(Node::Combine(combinator, filters.into_iter().collect()));
        self
    }
}

impl Combinator {
    pub fn name(self) -> &'static str {
        match self {
            Combinator::And => "and",
            Combinator::Or => "or",
            Combinator::Xor => "xor",
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            Combinator::And => " AND ",
            Combinator::Or => " OR ",
            Combinator::Xor => " XOR ",
        }
    }
}
