mod value;
pub(crate) use value::Value;

use mortar_core::{
    async_trait,
    driver::{Channel, CommandResult},
    stmt::{self, Record},
    Config, Error, Result,
};
use mortar_sql as sql;
use mysql_async::{
    prelude::{Queryable, ToValue},
    Conn, OptsBuilder, Pool, PoolConstraints, PoolOpts, Row,
};
use tracing::Instrument;

/// `ER_BAD_DB_ERROR`
const UNKNOWN_DATABASE: u16 = 1049;

/// `ER_NO_SUCH_TABLE`
const NO_SUCH_TABLE: u16 = 1146;

#[derive(Debug)]
pub struct MySQL {
    pool: Pool,
}

impl MySQL {
    /// Opens a pool for `config` and checks that the server accepts it.
    ///
    /// When the database does not exist and `create_database_if_missing` is
    /// set, the database is created with the configured character set and
    /// collation, then the pool is opened again.
    pub async fn connect(config: &Config) -> Result<MySQL> {
        config.validate()?;

        let mysql = MySQL::from(Pool::new(opts(config, Some(&config.database))));

        match mysql.ping().await {
            Ok(()) => Ok(mysql),
            Err(err) if err.is_unknown_database() && config.create_database_if_missing => {
                tracing::info!(database = %config.database, "creating missing database");

                mysql.disconnect().await?;
                create_database(config).await?;

                let mysql = MySQL::from(Pool::new(opts(config, Some(&config.database))));
                mysql.ping().await?;
                Ok(mysql)
            }
            Err(err) => Err(err),
        }
    }

    /// Closes every connection of the pool.
    pub async fn disconnect(self) -> Result<()> {
        self.pool.disconnect().await.map_err(error)
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.conn().await?;
        conn.ping().await.map_err(error)
    }

    async fn conn(&self) -> Result<Conn> {
        self.pool.get_conn().await.map_err(error)
    }

    async fn exec_command(&self, sql: &str, params: Vec<stmt::Value>) -> Result<CommandResult> {
        let mut conn = self.conn().await?;

        // Statements without parameters go through the text protocol: SHOW,
        // USE and most DDL cannot be prepared.
        let (affected_rows, last_insert_id) = if params.is_empty() {
            let result = conn.query_iter(sql).await.map_err(error)?;
            let outcome = (result.affected_rows(), result.last_insert_id());
            result.drop_result().await.map_err(error)?;
            outcome
        } else {
            let result = conn.exec_iter(sql, bind(params)).await.map_err(error)?;
            let outcome = (result.affected_rows(), result.last_insert_id());
            result.drop_result().await.map_err(error)?;
            outcome
        };

        Ok(CommandResult {
            affected_rows,
            last_insert_id: last_insert_id.filter(|id| *id > 0),
        })
    }

    async fn exec_query(&self, sql: &str, params: Vec<stmt::Value>) -> Result<Vec<Record>> {
        let mut conn = self.conn().await?;

        let rows: Vec<Row> = if params.is_empty() {
            conn.query(sql).await.map_err(error)?
        } else {
            conn.exec(sql, bind(params)).await.map_err(error)?
        };

        Ok(rows.into_iter().map(record).collect())
    }
}

impl From<Pool> for MySQL {
    fn from(pool: Pool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Channel for MySQL {
    async fn command(&self, sql: &str, params: Vec<stmt::Value>) -> Result<CommandResult> {
        let span = tracing::debug_span!(
            "db.command",
            sql = %sql,
            params = params.len(),
            affected = tracing::field::Empty,
        );

        let result = self.exec_command(sql, params).instrument(span.clone()).await?;
        span.record("affected", result.affected_rows);
        Ok(result)
    }

    async fn query(&self, sql: &str, params: Vec<stmt::Value>) -> Result<Vec<Record>> {
        let span = tracing::debug_span!(
            "db.query",
            sql = %sql,
            params = params.len(),
            rows = tracing::field::Empty,
        );

        let rows = self.exec_query(sql, params).instrument(span.clone()).await?;
        span.record("rows", rows.len());
        Ok(rows)
    }
}

fn opts(config: &Config, database: Option<&str>) -> OptsBuilder {
    let constraints = PoolConstraints::new(0, config.connection_limit).unwrap_or_default();

    OptsBuilder::default()
        .ip_or_hostname(config.host.clone())
        .tcp_port(config.port)
        .user(config.user.clone())
        .pass(config.password.clone())
        .db_name(database)
        .pool_opts(PoolOpts::default().with_constraints(constraints))
        .client_found_rows(true)
        .init(vec![format!(
            "SET NAMES {} COLLATE {}",
            config.charset_name(),
            config.collation
        )])
}

async fn create_database(config: &Config) -> Result<()> {
    let server = MySQL::from(Pool::new(opts(config, None)));

    let mut params: Vec<stmt::Value> = vec![];
    let sql = sql::Serializer::mysql().serialize(
        &sql::Statement::create_database(
            &config.database,
            config.charset_name(),
            &config.collation,
        ),
        &mut params,
    );

    let result = server.command(&sql, params).await;
    server.disconnect().await?;
    result.map(|_| ())
}

fn bind(params: Vec<stmt::Value>) -> mysql_async::Params {
    mysql_async::Params::Positional(
        params
            .into_iter()
            .map(|param| Value::from(param).to_value())
            .collect(),
    )
}

fn record(mut row: Row) -> Record {
    let columns = row.columns();

    columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            let value = row
                .take::<mysql_async::Value, _>(i)
                .unwrap_or(mysql_async::Value::NULL);
            (column.name_str().into_owned(), Value::from(value).into_inner())
        })
        .collect()
}

/// Maps server errors the adapter reacts to onto their error kinds.
fn error(err: mysql_async::Error) -> Error {
    match &err {
        mysql_async::Error::Server(server) if server.code == NO_SUCH_TABLE => {
            Error::table_missing(object_name(&server.message))
        }
        mysql_async::Error::Server(server) if server.code == UNKNOWN_DATABASE => {
            Error::unknown_database(object_name(&server.message))
        }
        _ => Error::driver(err),
    }
}

/// The unqualified name quoted in a server message such as
/// `Table 'blog.users' doesn't exist`.
fn object_name(message: &str) -> &str {
    let quoted = message
        .split('\'')
        .nth(1)
        .unwrap_or(message);

    quoted.rsplit('.').next().unwrap_or(quoted)
}
