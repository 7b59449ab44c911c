use super::{Combinator, Constraint, Filter, Node, Op};
use crate::{stmt::Value, Error, Result};

use serde_json::{Map, Value as Json};

impl Filter {
    /// Parses a JSON-shaped filter such as
    /// `{"title": "a", "or": [{"views": {"gt": 10}}, {"draft": null}]}`.
    ///
    /// Keys are kept in document order, so parameters bind in the order the
    /// caller wrote them.
    pub fn from_json(json: &Json) -> Result<Filter> {
        let Json::Object(object) = json else {
            return Err(Error::invalid_operand(format!(
                "filter must be an object, found {json}"
            )));
        };

        object_to_filter(object)
    }
}

fn object_to_filter(object: &Map<String, Json>) -> Result<Filter> {
    let mut nodes = Vec::with_capacity(object.len());

    for (key, value) in object {
        let node = match key.as_str() {
            "and" => combine(Combinator::And, value)?,
            "or" => combine(Combinator::Or, value)?,
            "xor" => combine(Combinator::Xor, value)?,
            "not" => Node::Not(Box::new(Filter::from_json(value)?)),
            _ => Node::Field {
                name: key.clone(),
                constraint: constraint(key, value)?,
            },
        };
        nodes.push(node);
    }

    Ok(Filter { nodes })
}

fn combine(combinator: Combinator, value: &Json) -> Result<Node> {
    let Json::Array(items) = value else {
        return Err(Error::invalid_operand(format!(
            "`{}` expects a list of filters",
            combinator.name()
        )));
    };

    let filters = items
        .iter()
        .map(Filter::from_json)
        .collect::<Result<Vec<_>>>()?;

    Ok(Node::Combine(combinator, filters))
}

fn constraint(field: &str, value: &Json) -> Result<Constraint> {
    Ok(match value {
        Json::Null => Constraint::Null,
        Json::Array(items) => Constraint::In(items.iter().map(Value::from_json).collect()),
        Json::Object(object) => {
            let mut entries = object.iter();
            match (entries.next(), entries.next()) {
                (Some((name, operand)), None) => Constraint::Op(operator(name, operand)?),
                (None, _) => {
                    return Err(Error::invalid_operand(format!(
                        "`{field}` expects an operator, found an empty object"
                    )))
                }
                _ => return Err(Error::ambiguous_condition(field, object.len())),
            }
        }
        scalar => Constraint::Eq(Value::from_json(scalar)),
    })
}

fn operator(name: &str, operand: &Json) -> Result<Op> {
    let scalar = || Value::from_json(operand);

    Ok(match name {
        "between" => match operand {
            Json::Array(items) if items.len() == 2 => {
                Op::Between(Value::from_json(&items[0]), Value::from_json(&items[1]))
            }
            _ => {
                return Err(Error::invalid_operand(
                    "`between` expects exactly two operands",
                ))
            }
        },
        "inq" => Op::Inq(list(name, operand)?),
        "nin" => Op::Nin(list(name, operand)?),
        "gt" => Op::Gt(scalar()),
        "gte" => Op::Gte(scalar()),
        "lt" => Op::Lt(scalar()),
        "lte" => Op::Lte(scalar()),
        "ne" | "neq" => Op::Ne(scalar()),
        "like" => Op::Like(scalar()),
        "nlike" => Op::Nlike(scalar()),
        _ => return Err(Error::unsupported_operator(name)),
    })
}

fn list(name: &str, operand: &Json) -> Result<Vec<Value>> {
    match operand {
        Json::Array(items) => Ok(items.iter().map(Value::from_json).collect()),
        _ => Err(Error::invalid_operand(format!("`{name}` expects a list"))),
    }
}
