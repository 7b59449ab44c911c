use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use mortar_core::stmt::Value as CoreValue;
use mysql_async::prelude::ToValue;

/// Bridges core values and the values `mysql_async` reads and binds.
#[derive(Debug)]
pub struct Value(CoreValue);

impl Value {
    pub fn into_inner(self) -> CoreValue {
        self.0
    }
}

impl From<CoreValue> for Value {
    fn from(value: CoreValue) -> Self {
        Self(value)
    }
}

impl From<mysql_async::Value> for Value {
    fn from(value: mysql_async::Value) -> Self {
        use mysql_async::Value::*;

        Self(match value {
            NULL => CoreValue::Null,
            Bytes(bytes) => CoreValue::String(String::from_utf8_lossy(&bytes).into_owned()),
            Int(v) => CoreValue::I64(v),
            UInt(v) => CoreValue::U64(v),
            Float(v) => CoreValue::F64(v.into()),
            Double(v) => CoreValue::F64(v),
            Date(year, month, day, hour, minute, second, micros) => {
                // Zero dates have no calendar counterpart
                NaiveDate::from_ymd_opt(year.into(), month.into(), day.into())
                    .and_then(|date| {
                        date.and_hms_micro_opt(hour.into(), minute.into(), second.into(), micros)
                    })
                    .map_or(CoreValue::Null, CoreValue::DateTime)
            }
            Time(negative, days, hours, minutes, seconds, micros) => {
                let sign = if negative { "-" } else { "" };
                let hours = days * 24 + u32::from(hours);
                let mut time = format!("{sign}{hours:02}:{minutes:02}:{seconds:02}");
                if micros > 0 {
                    time.push_str(&format!(".{micros:06}"));
                }
                CoreValue::String(time)
            }
        })
    }
}

impl ToValue for Value {
    fn to_value(&self) -> mysql_async::Value {
        match &self.0 {
            CoreValue::Null => mysql_async::Value::NULL,
            CoreValue::Bool(value) => value.to_value(),
            CoreValue::I64(value) => value.to_value(),
            CoreValue::U64(value) => value.to_value(),
            CoreValue::F64(value) => value.to_value(),
            CoreValue::Decimal(value) => value.to_string().to_value(),
            CoreValue::String(value) => value.to_value(),
            CoreValue::DateTime(value) => datetime(value),
            CoreValue::Json(value) => value.to_string().to_value(),
        }
    }
}

fn datetime(value: &NaiveDateTime) -> mysql_async::Value {
    // Years outside 0..=9999 are rejected by the server anyway
    let year = u16::try_from(value.year()).unwrap_or_default();

    mysql_async::Value::Date(
        year,
        value.month() as u8,
        value.day() as u8,
        value.hour() as u8,
        value.minute() as u8,
        value.second() as u8,
        value.nanosecond() / 1_000,
    )
}
