use super::Db;

use indexmap::IndexMap;
use mortar_core::{
    schema::{LiveColumn, LiveIndex, TableInfo},
    Error, Model, Result,
};
use mortar_sql::{plan_alterations, plan_table, Statement, TablePlan};

use futures::future::{join_all, try_join_all};

/// What a migration did to one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableOutcome {
    Created,

    /// Altered with this many operations
    Altered(usize),

    Unchanged,
}

/// Per-model outcomes of a migration, in registration order.
///
/// A failing model does not stop the others; its error is kept here.
#[derive(Debug, Default)]
pub struct MigrationReport {
    pub tables: IndexMap<String, Result<TableOutcome>>,
}

impl MigrationReport {
    pub fn is_ok(&self) -> bool {
        self.tables.values().all(Result::is_ok)
    }

    pub fn errors(&self) -> impl Iterator<Item = (&str, &Error)> + '_ {
        self.tables
            .iter()
            .filter_map(|(model, outcome)| Some((model.as_str(), outcome.as_ref().err()?)))
    }

    /// The first failure, with the model it happened on as context.
    pub fn into_result(self) -> Result<IndexMap<String, TableOutcome>> {
        self.tables
            .into_iter()
            .map(|(model, outcome)| match outcome {
                Ok(outcome) => Ok((model, outcome)),
                Err(err) => Err(err.context(format!("migrating model `{model}`"))),
            })
            .collect()
    }
}

impl Db {
    /// Reads the live columns and indexes of a model's table.
    ///
    /// Both statements run concurrently. A table that does not exist is
    /// reported as [`TableInfo::missing`], not as an error.
    pub async fn table_info(&self, model: &str) -> Result<TableInfo> {
        let model = self.model(model)?;

        let fields = self.query(Statement::show_fields(&model.table_name));
        let indexes = self.query(Statement::show_indexes(&model.table_name));

        match futures::try_join!(fields, indexes) {
            Ok((fields, indexes)) => Ok(TableInfo {
                columns: fields
                    .iter()
                    .map(LiveColumn::from_record)
                    .collect::<Result<_>>()?,
                indexes: indexes
                    .iter()
                    .map(LiveIndex::from_record)
                    .collect::<Result<_>>()?,
            }),
            Err(err) if err.is_table_missing() => Ok(TableInfo::missing()),
            Err(err) => Err(err),
        }
    }

    /// The `ALTER TABLE` operations that would converge a model's table.
    pub async fn alter_table_sql(&self, model: &str) -> Result<Vec<String>> {
        let info = self.table_info(model).await?;
        let model = self.model(model)?;

        if info.is_missing() {
            return Err(Error::table_missing(&model.table_name));
        }

        Ok(plan_alterations(model, &info.columns, &info.indexes)
            .iter()
            .map(ToString::to_string)
            .collect())
    }

    pub async fn create_table(&self, model: &str) -> Result<()> {
        let model = self.model(model)?;
        self.command(Statement::create_table(model)).await?;

        tracing::info!(table = %model.table_name, "created table");
        Ok(())
    }

    /// Drops a model's table if it exists.
    pub async fn drop_table(&self, model: &str) -> Result<()> {
        let model = self.model(model)?;
        self.command(Statement::drop_table_if_exists(&model.table_name))
            .await?;

        tracing::info!(table = %model.table_name, "dropped table");
        Ok(())
    }

    /// Applies the alter plan of an existing table.
    pub async fn alter_table(&self, model: &str) -> Result<TableOutcome> {
        let info = self.table_info(model).await?;
        let model = self.model(model)?;

        if info.is_missing() {
            return Err(Error::table_missing(&model.table_name));
        }

        self.apply(model, plan_table(model, &info)).await
    }

    /// Creates missing tables and alters existing ones, every model
    /// concurrently.
    pub async fn autoupdate(&self) -> Result<MigrationReport> {
        let outcomes = join_all(self.registry.models().map(|model| self.update_table(model))).await;
        Ok(self.report(outcomes))
    }

    /// Recreates the database, then drops and creates every table.
    ///
    /// Failing to recreate the database is fatal. Table failures are reported
    /// per model.
    pub async fn automigrate(&self) -> Result<MigrationReport> {
        self.config.validate()?;
        let database = &self.config.database;

        self.command(Statement::drop_database_if_exists(database))
            .await?;
        self.command(Statement::create_database(
            database,
            self.config.charset_name(),
            &self.config.collation,
        ))
        .await?;
        self.command(Statement::use_database(database)).await?;

        tracing::info!(database = %database, "recreated database");

        let outcomes = join_all(self.registry.models().map(|model| self.recreate_table(model))).await;
        Ok(self.report(outcomes))
    }

    /// Returns `true` when every table exists and matches its model.
    pub async fn is_actual(&self) -> Result<bool> {
        let plans = try_join_all(self.registry.models().map(|model| async move {
            let info = self.table_info(&model.name).await?;
            Ok::<_, Error>(plan_table(model, &info))
        }))
        .await?;

        Ok(plans.iter().all(TablePlan::is_empty))
    }

    async fn update_table(&self, model: &Model) -> Result<TableOutcome> {
        let info = self.table_info(&model.name).await?;
        self.apply(model, plan_table(model, &info)).await
    }

    async fn recreate_table(&self, model: &Model) -> Result<TableOutcome> {
        self.drop_table(&model.name).await?;
        self.create_table(&model.name).await?;
        Ok(TableOutcome::Created)
    }

    async fn apply(&self, model: &Model, plan: TablePlan) -> Result<TableOutcome> {
        let outcome = match &plan {
            TablePlan::Create(_) => TableOutcome::Created,
            TablePlan::Alter(alterations) if alterations.is_empty() => TableOutcome::Unchanged,
            TablePlan::Alter(alterations) => {
                tracing::debug!(
                    table = %model.table_name,
                    operations = ?alterations.iter().map(ToString::to_string).collect::<Vec<_>>(),
                    "alter plan"
                );
                TableOutcome::Altered(alterations.len())
            }
        };

        if let Some(stmt) = plan.into_statement(&model.table_name) {
            self.command(stmt).await?;
            tracing::info!(table = %model.table_name, ?outcome, "migrated table");
        }

        Ok(outcome)
    }

    fn report(&self, outcomes: Vec<Result<TableOutcome>>) -> MigrationReport {
        MigrationReport {
            tables: self
                .registry
                .model_names()
                .map(str::to_string)
                .zip(outcomes)
                .collect(),
        }
    }
}
