mod crud;

mod migrate;
pub use migrate::{MigrationReport, TableOutcome};

use mortar_core::{
    driver::{Channel, CommandResult},
    stmt::Record,
    Config, Model, Registry, Result,
};
use mortar_driver_mysql::MySQL;
use mortar_sql::{Serializer, Statement};

use std::sync::Arc;

/// The adapter: a model registry bound to a database channel.
///
/// Every operation borrows the registry for its duration, so models can only
/// be changed through [`Db::registry_mut`] between operations.
#[derive(Debug)]
pub struct Db {
    registry: Registry,
    channel: Arc<dyn Channel>,
    config: Config,
}

impl Db {
    pub fn new(registry: Registry, channel: Arc<dyn Channel>, config: Config) -> Db {
        Db {
            registry,
            channel,
            config,
        }
    }

    /// Connects to MySQL with `config`.
    pub async fn connect(config: Config, registry: Registry) -> Result<Db> {
        let mysql = MySQL::connect(&config).await?;
        Ok(Db::new(registry, Arc::new(mysql), config))
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn channel(&self) -> &Arc<dyn Channel> {
        &self.channel
    }

    fn model(&self, name: &str) -> Result<&Model> {
        self.registry.model(name)
    }

    async fn command(&self, stmt: Statement) -> Result<CommandResult> {
        let mut params = vec![];
        let sql = Serializer::mysql().serialize(&stmt, &mut params);
        self.channel.command(&sql, params).await
    }

    async fn query(&self, stmt: Statement) -> Result<Vec<Record>> {
        let mut params = vec![];
        let sql = Serializer::mysql().serialize(&stmt, &mut params);
        self.channel.query(&sql, params).await
    }
}
