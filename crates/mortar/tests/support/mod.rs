#![allow(dead_code)]

use mortar::{
    schema::{LiveColumn, LiveIndex},
    async_trait, Channel, CommandResult, Error, Record, Result, Value,
};

use std::{
    collections::{HashMap, VecDeque},
    sync::Mutex,
};

/// An in-memory channel that records every statement.
///
/// `SHOW` statements are answered from the tables installed with
/// [`FakeChannel::table`]; any other query pops the next queued row set.
#[derive(Debug, Default)]
pub struct FakeChannel {
    log: Mutex<Vec<(String, Vec<Value>)>>,
    tables: Mutex<HashMap<String, (Vec<LiveColumn>, Vec<LiveIndex>)>>,
    rows: Mutex<VecDeque<Vec<Record>>>,
    last_insert_id: Mutex<Option<u64>>,
    affected_rows: Mutex<u64>,
    fail_on: Mutex<Option<String>>,
}

impl FakeChannel {
    pub fn table(&self, name: &str, columns: Vec<LiveColumn>, indexes: Vec<LiveIndex>) {
        self.tables
            .lock()
            .unwrap()
            .insert(name.to_string(), (columns, indexes));
    }

    pub fn push_rows(&self, rows: Vec<Record>) {
        self.rows.lock().unwrap().push_back(rows);
    }

    pub fn last_insert_id(&self, id: u64) {
        *self.last_insert_id.lock().unwrap() = Some(id);
    }

    pub fn affected_rows(&self, n: u64) {
        *self.affected_rows.lock().unwrap() = n;
    }

    /// Fails every command whose SQL contains `needle`.
    pub fn fail_on(&self, needle: &str) {
        *self.fail_on.lock().unwrap() = Some(needle.to_string());
    }

    pub fn statements(&self) -> Vec<String> {
        self.log
            .lock()
            .unwrap()
            .iter()
            .map(|(sql, _)| sql.clone())
            .collect()
    }

    /// Statements other than introspection.
    pub fn commands(&self) -> Vec<String> {
        self.statements()
            .into_iter()
            .filter(|sql| !sql.starts_with("SHOW "))
            .collect()
    }

    pub fn params(&self) -> Vec<Vec<Value>> {
        self.log
            .lock()
            .unwrap()
            .iter()
            .map(|(_, params)| params.clone())
            .collect()
    }

    fn record(&self, sql: &str, params: Vec<Value>) -> Result<()> {
        assert_eq!(
            sql.matches('?').count(),
            params.len(),
            "placeholder count mismatch: {sql}"
        );

        self.log.lock().unwrap().push((sql.to_string(), params));

        match &*self.fail_on.lock().unwrap() {
            Some(needle) if sql.contains(needle.as_str()) => {
                Err(Error::driver(std::io::Error::other(format!("failed: {sql}"))))
            }
            _ => Ok(()),
        }
    }

    fn show(&self, sql: &str) -> Result<Vec<Record>> {
        let (what, table) = sql
            .strip_prefix("SHOW FIELDS FROM ")
            .map(|table| ("fields", table))
            .or_else(|| {
                sql.strip_prefix("SHOW INDEXES FROM ")
                    .map(|table| ("indexes", table))
            })
            .unwrap();
        let table = table.trim_matches('`');

        let tables = self.tables.lock().unwrap();
        let Some((columns, indexes)) = tables.get(table) else {
            return Err(Error::table_missing(table));
        };

        Ok(if what == "fields" {
            columns.iter().map(field_row).collect()
        } else {
            indexes.iter().map(index_row).collect()
        })
    }
}

#[async_trait]
impl Channel for FakeChannel {
    async fn command(&self, sql: &str, params: Vec<Value>) -> Result<CommandResult> {
        self.record(sql, params)?;

        Ok(CommandResult {
            affected_rows: *self.affected_rows.lock().unwrap(),
            last_insert_id: *self.last_insert_id.lock().unwrap(),
        })
    }

    async fn query(&self, sql: &str, params: Vec<Value>) -> Result<Vec<Record>> {
        self.record(sql, params)?;

        if sql.starts_with("SHOW ") {
            return self.show(sql);
        }

        Ok(self.rows.lock().unwrap().pop_front().unwrap_or_default())
    }
}

/// A row as the text protocol reports it.
pub fn row<const N: usize>(columns: [(&str, Value); N]) -> Record {
    columns
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

fn field_row(column: &LiveColumn) -> Record {
    row([
        ("Field", Value::from(column.field.as_str())),
        ("Type", Value::from(column.ty.as_str())),
        ("Null", Value::from(if column.nullable { "YES" } else { "NO" })),
        ("Key", Value::from(column.key.as_str())),
        ("Default", Value::Null),
        ("Extra", Value::from(column.extra.as_str())),
    ])
}

fn index_row(index: &LiveIndex) -> Record {
    row([
        ("Table", Value::from("t")),
        ("Non_unique", Value::from(if index.non_unique { "1" } else { "0" })),
        ("Key_name", Value::from(index.key_name.as_str())),
        ("Seq_in_index", Value::from(index.seq_in_index.to_string())),
        ("Column_name", Value::from(index.column_name.as_str())),
        ("Index_type", Value::from(index.index_type.as_str())),
    ])
}
