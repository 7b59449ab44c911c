//! Snapshots of a table as the server reports it.
//!
//! Columns come from `SHOW FIELDS FROM t`, indexes from `SHOW INDEXES FROM t`.
//! Both are fetched fresh for every check; nothing here is cached.

use super::IndexKind;
use crate::{
    stmt::{Record, Value},
    Error, Result,
};

/// One row of `SHOW FIELDS`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveColumn {
    pub field: String,

    /// Column type as reported, e.g. `varchar(255)` or `int(11) unsigned`
    pub ty: String,

    pub nullable: bool,
    pub key: String,
    pub default: Option<String>,
    pub extra: String,
}

/// One row of `SHOW INDEXES`. Multi-column indexes span several rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveIndex {
    pub key_name: String,
    pub seq_in_index: u32,
    pub column_name: String,
    pub non_unique: bool,
    pub index_type: String,
}

/// Live columns and indexes of one table.
///
/// A table without columns does not exist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableInfo {
    pub columns: Vec<LiveColumn>,
    pub indexes: Vec<LiveIndex>,
}

impl TableInfo {
    pub fn missing() -> TableInfo {
        TableInfo::default()
    }

    pub fn is_missing(&self) -> bool {
        self.columns.is_empty()
    }
}

impl LiveColumn {
    pub fn new(field: impl Into<String>, ty: impl Into<String>, nullable: bool) -> LiveColumn {
        LiveColumn {
            field: field.into(),
            ty: ty.into(),
            nullable,
            key: String::new(),
            default: None,
            extra: String::new(),
        }
    }

    pub fn from_record(record: &Record) -> Result<LiveColumn> {
        Ok(LiveColumn {
            field: required_text(record, "Field")?,
            ty: required_text(record, "Type")?,
            nullable: text(record, "Null").is_some_and(|null| null.eq_ignore_ascii_case("YES")),
            key: text(record, "Key").unwrap_or_default(),
            default: text(record, "Default"),
            extra: text(record, "Extra").unwrap_or_default(),
        })
    }
}

impl LiveIndex {
    pub fn new(key_name: impl Into<String>, seq_in_index: u32, column_name: impl Into<String>) -> LiveIndex {
        LiveIndex {
            key_name: key_name.into(),
            seq_in_index,
            column_name: column_name.into(),
            non_unique: true,
            index_type: "BTREE".to_string(),
        }
    }

    /// Marks the index as it is reported for `kind`.
    pub fn with_kind(mut self, kind: Option<IndexKind>) -> Self {
        match kind {
            Some(IndexKind::Unique) => self.non_unique = false,
            Some(IndexKind::Fulltext) => self.index_type = "FULLTEXT".to_string(),
            Some(IndexKind::Spatial) => self.index_type = "SPATIAL".to_string(),
            None => {}
        }
        self
    }

    /// The index kind the server reports, `None` for a plain index.
    pub fn kind(&self) -> Option<IndexKind> {
        if self.index_type.eq_ignore_ascii_case("FULLTEXT") {
            Some(IndexKind::Fulltext)
        } else if self.index_type.eq_ignore_ascii_case("SPATIAL") {
            Some(IndexKind::Spatial)
        } else if !self.non_unique {
            Some(IndexKind::Unique)
        } else {
            None
        }
    }

    pub fn from_record(record: &Record) -> Result<LiveIndex> {
        Ok(LiveIndex {
            key_name: required_text(record, "Key_name")?,
            seq_in_index: integer(record, "Seq_in_index")?
                .try_into()
                .map_err(|_| Error::invalid_value("Seq_in_index out of range"))?,
            column_name: text(record, "Column_name").unwrap_or_default(),
            non_unique: integer(record, "Non_unique")? != 0,
            index_type: text(record, "Index_type").unwrap_or_default(),
        })
    }
}

// The text protocol reports every value as a string, the binary protocol
// reports typed values. Accept both.
fn text(record: &Record, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::Null => None,
        Value::String(v) => Some(v.clone()),
        Value::I64(v) => Some(v.to_string()),
        Value::U64(v) => Some(v.to_string()),
        other => Some(match other.to_json() {
            serde_json::Value::String(v) => v,
            json => json.to_string(),
        }),
    }
}

fn required_text(record: &Record, key: &str) -> Result<String> {
    text(record, key)
        .ok_or_else(|| Error::invalid_value(format!("introspection row has no `{key}` column")))
}

fn integer(record: &Record, key: &str) -> Result<i64> {
    let value = record
        .get(key)
        .ok_or_else(|| Error::invalid_value(format!("introspection row has no `{key}` column")))?;

    match value {
        Value::String(v) => v
            .trim()
            .parse()
            .map_err(|_| Error::invalid_value(format!("`{key}` is not an integer: {v}"))),
        other => other
            .as_i64()
            .ok_or_else(|| Error::invalid_value(format!("`{key}` is not an integer: {other:?}"))),
    }
}
