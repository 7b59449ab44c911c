//! Arguments of the read and bulk update operations.

use mortar_core::{stmt::Record, Error, Filter, Result};
use mortar_sql::stmt::Direction;

use serde_json::Value as Json;

/// What [`Db::all`](crate::Db::all) reads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    /// Columns to read; empty reads every column
    pub fields: Vec<String>,

    pub filter: Filter,

    pub group: Vec<String>,

    pub order: Vec<(String, Option<Direction>)>,

    pub limit: Option<u64>,

    pub offset: Option<u64>,
}

/// A bulk update: every row matching `filter` receives `update`.
///
/// Both halves are required. They are optional here so a spec parsed from
/// user input can be rejected with a precise error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateSpec {
    pub filter: Option<Filter>,
    pub update: Option<Record>,
}

impl Query {
    pub fn new() -> Query {
        Query::default()
    }

    pub fn fields<I>(mut self, fields: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    pub fn group_by(mut self, field: impl Into<String>) -> Self {
        self.group.push(field.into());
        self
    }

    /// Adds an ordering given as `"field"`, `"field ASC"` or `"field DESC"`.
    pub fn order(mut self, order: &str) -> Result<Self> {
        self.order.push(parse_order(order)?);
        Ok(self)
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Parses a JSON-shaped query.
    ///
    /// Recognized keys are `fields`, `where`, `group`, `order`, `limit` and
    /// `offset` (or `skip`). Other keys are ignored.
    pub fn from_json(json: &Json) -> Result<Query> {
        let Json::Object(object) = json else {
            return Err(Error::invalid_operand("query must be an object"));
        };

        let mut query = Query::new();

        if let Some(fields) = object.get("fields") {
            query.fields = fields_from_json(fields)?;
        }

        if let Some(filter) = object.get("where") {
            query.filter = Filter::from_json(filter)?;
        }

        if let Some(group) = object.get("group") {
            query.group = strings(group, "group")?;
        }

        if let Some(order) = object.get("order") {
            query.order = strings(order, "order")?
                .iter()
                .map(|order| parse_order(order))
                .collect::<Result<_>>()?;
        }

        if let Some(limit) = object.get("limit") {
            query.limit = number(limit, "limit")?;
        }

        if let Some(offset) = object.get("offset").or_else(|| object.get("skip")) {
            query.offset = number(offset, "offset")?;
        }

        Ok(query)
    }
}

impl UpdateSpec {
    pub fn new(filter: Filter, update: Record) -> UpdateSpec {
        UpdateSpec {
            filter: Some(filter),
            update: Some(update),
        }
    }
}

fn parse_order(order: &str) -> Result<(String, Option<Direction>)> {
    let mut parts = order.split_whitespace();

    let (Some(field), direction, None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(Error::invalid_operand(format!("invalid order `{order}`")));
    };

    let direction = match direction {
        Some(direction) => Some(Direction::parse(direction).ok_or_else(|| {
            Error::invalid_operand(format!("invalid order direction `{direction}`"))
        })?),
        None => None,
    };

    Ok((field.to_string(), direction))
}

/// `["a", "b"]` or `{"a": true, "b": false}`.
fn fields_from_json(fields: &Json) -> Result<Vec<String>> {
    match fields {
        Json::Object(object) => Ok(object
            .iter()
            .filter(|(_, include)| include.as_bool().unwrap_or(false))
            .map(|(field, _)| field.clone())
            .collect()),
        other => strings(other, "fields"),
    }
}

/// A string or an array of strings.
fn strings(json: &Json, key: &str) -> Result<Vec<String>> {
    match json {
        Json::String(value) => Ok(value
            .split(',')
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .collect()),
        Json::Array(values) => values
            .iter()
            .map(|value| {
                value
                    .as_str()
                    .map(str::to_string)
                    .ok_or_else(|| Error::invalid_operand(format!("`{key}` expects strings")))
            })
            .collect(),
        _ => Err(Error::invalid_operand(format!(
            "`{key}` expects a string or an array of strings"
        ))),
    }
}

fn number(json: &Json, key: &str) -> Result<Option<u64>> {
    match json {
        Json::Null => Ok(None),
        Json::Number(number) => number
            .as_u64()
            .map(Some)
            .ok_or_else(|| Error::missing_argument(format!("`{key}` must be a non-negative integer"))),
        Json::String(value) => value
            .parse()
            .map(Some)
            .map_err(|_| Error::missing_argument(format!("`{key}` must be a number, got `{value}`"))),
        _ => Err(Error::missing_argument(format!("`{key}` must be a number"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn parse_full_query() {
        let query = Query::from_json(&json!({
            "fields": ["title", "order"],
            "where": {"order": {"gt": 2}},
            "group": "title",
            "order": ["order DESC", "title"],
            "limit": 10,
            "skip": "5",
        }))
        .unwrap();

        assert_eq!(query.fields, ["title", "order"]);
        assert_eq!(query.group, ["title"]);
        assert_eq!(
            query.order,
            [
                ("order".to_string(), Some(Direction::Desc)),
                ("title".to_string(), None)
            ]
        );
        assert_eq!(query.limit, Some(10));
        assert_eq!(query.offset, Some(5));
        assert!(!query.filter.is_empty());
    }

    #[test]
    fn fields_as_object() {
        let query = Query::from_json(&json!({"fields": {"title": true, "body": false}})).unwrap();
        assert_eq!(query.fields, ["title"]);
    }

    #[test]
    fn order_as_comma_separated_string() {
        let query = Query::from_json(&json!({"order": "a ASC, b DESC"})).unwrap();
        assert_eq!(
            query.order,
            [
                ("a".to_string(), Some(Direction::Asc)),
                ("b".to_string(), Some(Direction::Desc))
            ]
        );
    }

    #[test]
    fn non_numeric_limit() {
        let err = Query::from_json(&json!({"limit": "ten"})).unwrap_err();
        assert!(err.is_missing_argument());

        let err = Query::from_json(&json!({"limit": -1})).unwrap_err();
        assert!(err.is_missing_argument());
    }

    #[test]
    fn bad_order() {
        assert!(Query::new().order("a sideways").unwrap_err().is_invalid_operand());
        assert!(Query::new().order("a b c").unwrap_err().is_invalid_operand());
        assert!(Query::new().order("").unwrap_err().is_invalid_operand());
    }

    #[test]
    fn bad_where_is_reported() {
        let err = Query::from_json(&json!({"where": {"a": {"regexp": "x"}}})).unwrap_err();
        assert!(err.is_unsupported_operator());
    }
}
