//! Maps property descriptors onto MySQL column types.
//!
//! Every logical type has a default column type. `data_type` overrides it and
//! is rendered verbatim, so `data_type("bigint")` produces `bigint(20)` and
//! not `BIGINT(20)`. Options then decorate the chosen type: a length for
//! character types, a display width for integers, precision and scale for
//! fixed and floating point numbers.

use mortar_core::schema::{Property, PropertyType};

use std::fmt;

/// A rendered column type.
///
/// `base` is what `SHOW FIELDS` reports in its `Type` column. The character
/// set and collation are rendered after it but never reported back, so only
/// `base` takes part in comparisons against the live schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnType {
    pub base: String,
    pub charset: Option<String>,
    pub collation: Option<String>,
}

const TEXT_TYPES: &[&str] = &["text", "tinytext", "mediumtext", "longtext"];

// Longest first so `integer` is not read as `int` followed by `eger`.
const INTEGER_TYPES: &[&str] = &["mediumint", "smallint", "tinyint", "integer", "bigint", "int"];

/// Renders the column type for a property.
pub fn column_type(prop: &Property) -> ColumnType {
    match &prop.ty {
        PropertyType::Array(_) => ColumnType::plain("LONGTEXT"),
        PropertyType::String | PropertyType::Custom(_) => character(prop, declared(prop, "VARCHAR")),
        PropertyType::Text | PropertyType::Json => character(prop, declared(prop, "LONGTEXT")),
        PropertyType::Number => ColumnType::plain(numeric(prop, declared(prop, "INT"))),
        PropertyType::Date => ColumnType::plain(declared(prop, "DATETIME")),
        PropertyType::Boolean => ColumnType::plain("TINYINT(1)"),
        PropertyType::Point => ColumnType::plain("POINT"),
        PropertyType::Enum(members) => {
            let members = members
                .iter()
                .map(|member| format!("'{}'", member.replace('\'', "''")))
                .collect::<Vec<_>>()
                .join(",");

            ColumnType {
                base: format!("ENUM({members})"),
                charset: prop.charset.clone(),
                collation: prop.collation.clone(),
            }
        }
    }
}

/// Renders the column type followed by its nullability.
pub fn column_clause(prop: &Property) -> String {
    let null = if prop.is_not_null() { "NOT NULL" } else { "NULL" };
    format!("{} {null}", column_type(prop))
}

/// Compares a live `Type` against a rendered base type.
///
/// The comparison ignores case. Servers from MySQL 8.0.19 on stopped
/// reporting integer display widths, so when the live type has none the
/// desired width is ignored too.
pub fn types_match(live: &str, desired: &str) -> bool {
    let live = live.trim();

    if live.eq_ignore_ascii_case(desired) {
        return true;
    }

    let stripped = strip_integer_width(live);
    stripped.len() == live.len() && strip_integer_width(desired).eq_ignore_ascii_case(live)
}

fn declared<'a>(prop: &'a Property, default: &'a str) -> &'a str {
    prop.data_type.as_deref().unwrap_or(default)
}

fn character(prop: &Property, data_type: &str) -> ColumnType {
    let lower = data_type.to_ascii_lowercase();

    let base = if data_type.contains('(') || TEXT_TYPES.contains(&lower.as_str()) {
        data_type.to_string()
    } else {
        let length = positive(prop.limit)
            .or(positive(prop.length))
            .unwrap_or(255);
        format!("{data_type}({length})")
    };

    ColumnType {
        base,
        charset: prop.charset.clone(),
        collation: prop.collation.clone(),
    }
}

fn numeric(prop: &Property, data_type: &str) -> String {
    let lower = data_type.to_ascii_lowercase();
    let precision = positive(prop.precision);
    let scale = positive(prop.scale);

    let mut ty = if data_type.contains('(') {
        data_type.to_string()
    } else {
        match lower.as_str() {
            "decimal" | "numeric" => format!(
                "{data_type}({},{})",
                precision.unwrap_or(9),
                scale.unwrap_or(2)
            ),
            "float" | "double" => match (precision, scale) {
                (Some(precision), Some(scale)) => format!("{data_type}({precision},{scale})"),
                (Some(precision), None) => format!("{data_type}({precision})"),
                _ => data_type.to_string(),
            },
            _ => {
                let width = positive(prop.display)
                    .or(positive(prop.limit))
                    .unwrap_or_else(|| integer_width(&lower, prop.unsigned));
                format!("{data_type}({width})")
            }
        }
    };

    if prop.unsigned {
        ty.push_str(" UNSIGNED");
    }

    ty
}

fn integer_width(data_type: &str, unsigned: bool) -> u32 {
    match (data_type, unsigned) {
        ("tinyint", true) => 3,
        ("tinyint", false) => 4,
        ("smallint", true) => 5,
        ("smallint", false) => 6,
        ("mediumint", true) => 8,
        ("mediumint", false) => 9,
        ("bigint", _) => 20,
        (_, true) => 10,
        (_, false) => 11,
    }
}

fn strip_integer_width(ty: &str) -> String {
    let lower = ty.to_ascii_lowercase();

    for keyword in INTEGER_TYPES {
        if lower.starts_with(keyword) && lower[keyword.len()..].starts_with('(') {
            if let Some(close) = lower.find(')') {
                return format!("{}{}", &ty[..keyword.len()], &ty[close + 1..]);
            }
        }
    }

    ty.to_string()
}

fn positive(value: Option<u32>) -> Option<u32> {
    value.filter(|value| *value > 0)
}

impl ColumnType {
    fn plain(base: impl Into<String>) -> ColumnType {
        ColumnType {
            base: base.into(),
            charset: None,
            collation: None,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)?;

        if let Some(charset) = &self.charset {
            write!(f, " CHARACTER SET {charset}")?;
        }

        if let Some(collation) = &self.collation {
            write!(f, " COLLATE {collation}")?;
        }

        Ok(())
    }
}
