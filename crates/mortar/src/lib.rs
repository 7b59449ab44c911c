pub mod db;
pub use db::{Db, MigrationReport, TableOutcome};

pub mod query;
pub use query::{Query, UpdateSpec};

pub use mortar_core::{
    async_trait, bail, err,
    driver::{Channel, CommandResult},
    filter::{self, Filter},
    schema::{self, Model, Property, Registry},
    stmt::{Record, Value},
    Config, Error, Result,
};

pub use mortar_driver_mysql::MySQL;
