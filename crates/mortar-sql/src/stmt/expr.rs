use mortar_core::{
    filter::{Combinator, Constraint, Node, Op},
    stmt::Value,
    Filter, Model, Result,
};

/// A WHERE-clause expression, with every value already cast for storage.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Constraints of one filter level, joined with AND and not parenthesized
    Conjunction(Vec<Expr>),

    /// A parenthesized boolean combination
    Combine(Combinator, Vec<Expr>),

    /// `NOT (...)`
    Not(Box<Expr>),

    /// `column IS NULL`
    IsNull(ColumnRef),

    /// `column <op> ?`
    BinaryOp {
        column: ColumnRef,
        op: BinaryOp,
        value: Value,
    },

    /// `column BETWEEN ? AND ?`
    Between {
        column: ColumnRef,
        low: Value,
        high: Value,
    },

    /// `column [NOT] IN (?, ...)`, never empty
    InList {
        column: ColumnRef,
        negated: bool,
        values: Vec<Value>,
    },

    /// `1` or `0`
    Const(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
    Like,
    NotLike,
}

/// A column reference. Dotted names are quoted per segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef(pub String);

impl Expr {
    /// Lowers a filter against `model`.
    ///
    /// Fails on fields the model does not declare and on values that cannot
    /// be cast to their column's storage form.
    pub fn from_filter(model: &Model, filter: &Filter) -> Result<Expr> {
        let exprs = filter
            .nodes
            .iter()
            .map(|node| Expr::from_node(model, node))
            .collect::<Result<Vec<_>>>()?;

        Ok(Expr::Conjunction(exprs))
    }

    fn from_node(model: &Model, node: &Node) -> Result<Expr> {
        match node {
            Node::Field { name, constraint } => Expr::from_constraint(model, name, constraint),
            Node::Combine(combinator, filters) => {
                if filters.is_empty() {
                    return Ok(Expr::Const(*combinator == Combinator::And));
                }

                let exprs = filters
                    .iter()
                    .map(|filter| Expr::from_filter(model, filter))
                    .collect::<Result<Vec<_>>>()?;

                Ok(Expr::Combine(*combinator, exprs))
            }
            Node::Not(filter) => Ok(Expr::Not(Box::new(Expr::from_filter(model, filter)?))),
        }
    }

    fn from_constraint(model: &Model, name: &str, constraint: &Constraint) -> Result<Expr> {
        model.check_field(name)?;

        let cast = |value: &Value| -> Result<Value> {
            match model.field(name) {
                Some(prop) => prop.cast_for_db(&model.name, value.clone()),
                None => Ok(value.clone()),
            }
        };

        let column = ColumnRef(name.to_string());

        let binary = |op: BinaryOp, value: &Value| -> Result<Expr> {
            Ok(Expr::BinaryOp {
                column: column.clone(),
                op,
                value: cast(value)?,
            })
        };

        let in_list = |negated: bool, values: &[Value]| -> Result<Expr> {
            if values.is_empty() {
                // Nothing is in the empty set
                return Ok(Expr::Const(negated));
            }

            Ok(Expr::InList {
                column: column.clone(),
                negated,
                values: values.iter().map(cast).collect::<Result<_>>()?,
            })
        };

        match constraint {
            Constraint::Null => Ok(Expr::IsNull(column.clone())),
            Constraint::Eq(Value::Null) => Ok(Expr::IsNull(column.clone())),
            Constraint::Eq(value) => binary(BinaryOp::Eq, value),
            Constraint::In(values) => in_list(false, values),
            Constraint::Op(op) => match op {
                Op::Between(low, high) => Ok(Expr::Between {
                    column: column.clone(),
                    low: cast(low)?,
                    high: cast(high)?,
                }),
                Op::Inq(values) => in_list(false, values),
                Op::Nin(values) => in_list(true, values),
                Op::Gt(value) => binary(BinaryOp::Gt, value),
                Op::Gte(value) => binary(BinaryOp::Ge, value),
                Op::Lt(value) => binary(BinaryOp::Lt, value),
                Op::Lte(value) => binary(BinaryOp::Le, value),
                Op::Ne(value) => binary(BinaryOp::Ne, value),
                Op::Like(value) => binary(BinaryOp::Like, value),
                Op::Nlike(value) => binary(BinaryOp::NotLike, value),
            },
        }
    }

    /// `` `id` = ? ``
    pub fn id_eq(id: Value) -> Expr {
        Expr::BinaryOp {
            column: ColumnRef("id".to_string()),
            op: BinaryOp::Eq,
            value: id,
        }
    }

    /// Returns `true` for a conjunction without constraints.
    pub fn is_empty(&self) -> bool {
        matches!(self, Expr::Conjunction(exprs) if exprs.is_empty())
    }
}

impl BinaryOp {
    pub fn as_sql(self) -> &'static str {
        match self {
            BinaryOp::Eq => "=",
            BinaryOp::Ne => "!=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Like => "LIKE",
            BinaryOp::NotLike => "NOT LIKE",
        }
    }
}

impl ColumnRef {
    pub fn new(name: impl Into<String>) -> ColumnRef {
        ColumnRef(name.into())
    }
}
