use crate::{
    async_trait,
    stmt::{Record, Value},
    Result,
};

use std::fmt::Debug;

/// Outcome of a statement that returns no rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommandResult {
    pub affected_rows: u64,

    /// Id generated by an `AUTO_INCREMENT` column, if the statement assigned
    /// one
    pub last_insert_id: Option<u64>,
}

/// The database connection an adapter talks through.
///
/// Every placeholder in `sql` is a `?` with one entry in `params`, in order.
/// Implementations map the server's "no such table" error to
/// [`Error::table_missing`](crate::Error::table_missing) and its "unknown
/// database" error to
/// [`Error::unknown_database`](crate::Error::unknown_database). Every other
/// failure is passed through as [`Error::driver`](crate::Error::driver).
#[async_trait]
pub trait Channel: Debug + Send + Sync + 'static {
    /// Executes a statement that returns no rows.
    async fn command(&self, sql: &str, params: Vec<Value>) -> Result<CommandResult>;

    /// Executes a statement and collects its rows.
    async fn query(&self, sql: &str, params: Vec<Value>) -> Result<Vec<Record>>;
}
