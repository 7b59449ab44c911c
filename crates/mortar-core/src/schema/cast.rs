use super::{Property, PropertyType};
use crate::{stmt::Value, Error, Result};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

impl Property {
    /// Converts an application value into the form stored in this property's
    /// column.
    ///
    /// `model` only names the model in error messages.
    pub fn cast_for_db(&self, model: &str, value: Value) -> Result<Value> {
        if value.is_null() {
            return Ok(Value::Null);
        }

        match &self.ty {
            PropertyType::Json | PropertyType::Array(_) => {
                Ok(Value::String(value.to_json().to_string()))
            }
            _ if value.is_structured() => Err(Error::invalid_value(format!(
                "unexpected object value for `{model}.{}`",
                self.name
            ))),
            PropertyType::Boolean => Ok(match value {
                Value::Bool(v) => Value::I64(v as i64),
                Value::I64(v) => Value::I64((v != 0) as i64),
                Value::U64(v) => Value::I64((v != 0) as i64),
                other => other,
            }),
            PropertyType::Date => match value {
                Value::String(v) => parse_date(&v).map(Value::DateTime).ok_or_else(|| {
                    Error::invalid_value(format!("`{model}.{}`: cannot parse date {v:?}", self.name))
                }),
                // Milliseconds since the epoch
                Value::I64(v) => DateTime::from_timestamp_millis(v)
                    .map(|v| Value::DateTime(v.naive_utc()))
                    .ok_or_else(|| {
                        Error::invalid_value(format!("`{model}.{}`: timestamp out of range", self.name))
                    }),
                other => Ok(other),
            },
            PropertyType::Number => Ok(value),
            _ => Ok(match value {
                Value::String(v) => Value::String(v),
                Value::Json(serde_json::Value::String(v)) => Value::String(v),
                Value::DateTime(v) => Value::String(v.format("%Y-%m-%d %H:%M:%S").to_string()),
                Value::Decimal(v) => Value::String(v.to_string()),
                other => Value::String(other.to_json().to_string()),
            }),
        }
    }

    /// Converts a value read from this property's column back into its
    /// application form.
    pub fn cast_from_db(&self, value: Value) -> Value {
        match (&self.ty, value) {
            (_, Value::Null) => Value::Null,
            (PropertyType::Json | PropertyType::Array(_), Value::String(text)) => {
                match serde_json::from_str::<serde_json::Value>(&text) {
                    Ok(json) => Value::from_json(&json),
                    Err(_) => Value::String(text),
                }
            }
            (PropertyType::Boolean, Value::I64(v)) => Value::Bool(v != 0),
            (PropertyType::Boolean, Value::U64(v)) => Value::Bool(v != 0),
            (PropertyType::Boolean, Value::String(v)) => Value::Bool(v.trim() != "0" && !v.is_empty()),
            (PropertyType::Number, Value::String(text)) if self.is_fixed_point() => {
                match text.parse::<Decimal>() {
                    Ok(v) => Value::Decimal(v),
                    Err(_) => Value::String(text),
                }
            }
            (PropertyType::Number, Value::String(text)) => {
                if let Ok(v) = text.parse::<i64>() {
                    Value::I64(v)
                } else if let Ok(v) = text.parse::<f64>() {
                    Value::F64(v)
                } else {
                    Value::String(text)
                }
            }
            (PropertyType::Date, Value::String(text)) => match parse_date(&text) {
                Some(v) => Value::DateTime(v),
                None => Value::String(text),
            },
            (_, value) => value,
        }
    }
}

fn parse_date(text: &str) -> Option<NaiveDateTime> {
    if let Ok(v) = DateTime::parse_from_rfc3339(text) {
        return Some(v.naive_utc());
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            // A bare date means midnight
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}
