use super::Db;
use crate::{Query, UpdateSpec};

use mortar_core::{
    stmt::{Record, Value},
    Error, Filter, Model, Result,
};
use mortar_sql::stmt::{
    ColumnRef, Delete, Expr, Insert, Limit, OrderBy, Projection, Select, Update,
};

use futures::future::try_join_all;

impl Db {
    /// Inserts a record and returns its id.
    ///
    /// Models with a UUID primary key get a fresh id when the record has
    /// none. Otherwise the id is the one the server assigned.
    pub async fn create(&self, model: &str, record: Record) -> Result<Value> {
        self.insert(model, record, false).await
    }

    /// Inserts a record, or updates the row whose key it collides with.
    pub async fn update_or_create(&self, model: &str, record: Record) -> Result<Value> {
        self.insert(model, record, true).await
    }

    /// Writes every property of a record back to the row with its `id`.
    pub async fn save(&self, model: &str, mut record: Record) -> Result<()> {
        let id = record
            .shift_remove("id")
            .filter(|id| !id.is_null())
            .ok_or_else(|| Error::missing_argument("save requires an `id`"))?;

        self.update_attributes(model, id, record).await
    }

    /// Updates the given properties of the row with `id`.
    pub async fn update_attributes(&self, model: &str, id: Value, mut record: Record) -> Result<()> {
        let model = self.model(model)?;
        let id = required_id(id, "update_attributes")?;
        record.shift_remove("id");

        if record.is_empty() {
            return Ok(());
        }

        self.command(
            Update {
                table: model.table_name.clone(),
                assignments: cast_record(model, record)?,
                filter: Some(Expr::id_eq(id)),
            }
            .into(),
        )
        .await?;

        Ok(())
    }

    /// Updates every row matching the spec's filter, returning how many
    /// rows matched.
    pub async fn update(&self, model: &str, spec: UpdateSpec) -> Result<u64> {
        let model = self.model(model)?;

        let Some(filter) = spec.filter else {
            return Err(Error::missing_argument("update requires a filter"));
        };

        let update = spec
            .update
            .filter(|update| !update.is_empty())
            .ok_or_else(|| Error::missing_argument("update requires values to set"))?;

        let filter = Expr::from_filter(model, &filter)?;

        let result = self
            .command(
                Update {
                    table: model.table_name.clone(),
                    assignments: cast_record(model, update)?,
                    filter: Some(filter).filter(|filter| !filter.is_empty()),
                }
                .into(),
            )
            .await?;

        Ok(result.affected_rows)
    }

    /// Runs several updates concurrently.
    pub async fn update_all(&self, model: &str, specs: Vec<UpdateSpec>) -> Result<Vec<u64>> {
        try_join_all(specs.into_iter().map(|spec| self.update(model, spec))).await
    }

    pub async fn find(&self, model: &str, id: Value) -> Result<Option<Record>> {
        let model = self.model(model)?;
        let id = required_id(id, "find")?;

        let select = Select::new(&model.table_name, Projection::All)
            .filter(Expr::id_eq(id))
            .limit(Limit {
                limit: Some(1),
                offset: None,
            });

        let rows = self.query(select.into()).await?;
        Ok(rows.into_iter().next().map(|row| from_row(model, row)))
    }

    pub async fn exists(&self, model: &str, id: Value) -> Result<bool> {
        let model = self.model(model)?;
        let id = required_id(id, "exists")?;

        let select = Select::new(&model.table_name, Projection::Found)
            .filter(Expr::id_eq(id))
            .limit(Limit {
                limit: Some(1),
                offset: None,
            });

        Ok(!self.query(select.into()).await?.is_empty())
    }

    pub async fn all(&self, model: &str, query: &Query) -> Result<Vec<Record>> {
        let model = self.model(model)?;

        let projection = if query.fields.is_empty() {
            Projection::All
        } else {
            Projection::Columns(columns(model, &query.fields)?)
        };

        let mut select = Select::new(&model.table_name, projection)
            .filter(Expr::from_filter(model, &query.filter)?)
            .limit(Limit {
                limit: query.limit,
                offset: query.offset,
            });

        select.group_by = columns(model, &query.group)?;
        select.order_by = query
            .order
            .iter()
            .map(|(field, direction)| {
                model.check_field(field)?;
                Ok(OrderBy {
                    column: ColumnRef::new(field),
                    direction: *direction,
                })
            })
            .collect::<Result<_>>()?;

        let rows = self.query(select.into()).await?;
        Ok(rows.into_iter().map(|row| from_row(model, row)).collect())
    }

    pub async fn count(&self, model: &str, filter: Option<&Filter>) -> Result<u64> {
        let model = self.model(model)?;

        let mut select = Select::new(&model.table_name, Projection::Count);
        if let Some(filter) = filter {
            select = select.filter(Expr::from_filter(model, filter)?);
        }

        let rows = self.query(select.into()).await?;
        let count = rows.first().and_then(|row| row.get("cnt"));

        match count {
            Some(Value::I64(n)) => Ok(u64::try_from(*n).unwrap_or_default()),
            Some(Value::U64(n)) => Ok(*n),
            // The text protocol reports numbers as strings
            Some(Value::String(n)) => n
                .parse()
                .map_err(|_| mortar_core::err!("unexpected row count `{n}`")),
            _ => Ok(0),
        }
    }

    /// Deletes the row with `id`, returning whether one existed.
    pub async fn destroy(&self, model: &str, id: Value) -> Result<bool> {
        let model = self.model(model)?;
        let id = required_id(id, "destroy")?;

        let result = self
            .command(
                Delete {
                    table: model.table_name.clone(),
                    filter: Some(Expr::id_eq(id)),
                }
                .into(),
            )
            .await?;

        Ok(result.affected_rows > 0)
    }

    /// Deletes every row matching `filter`, or every row when there is none.
    pub async fn destroy_all(&self, model: &str, filter: Option<&Filter>) -> Result<u64> {
        let model = self.model(model)?;

        let filter = match filter {
            Some(filter) => Some(Expr::from_filter(model, filter)?),
            None => None,
        };

        let result = self
            .command(
                Delete {
                    table: model.table_name.clone(),
                    filter: filter.filter(|filter| !filter.is_empty()),
                }
                .into(),
            )
            .await?;

        Ok(result.affected_rows)
    }

    async fn insert(&self, model: &str, mut record: Record, upsert: bool) -> Result<Value> {
        let model = self.model(model)?;

        if record.get("id").map_or(true, Value::is_null) {
            match model.generate_id() {
                Some(id) => {
                    record.insert("id".to_string(), id);
                }
                None => {
                    record.shift_remove("id");
                }
            }
        }

        let id = record.get("id").cloned();
        let (columns, values) = cast_record(model, record)?.into_iter().unzip();

        let result = self
            .command(
                Insert {
                    table: model.table_name.clone(),
                    columns,
                    values,
                    on_duplicate_key_update: upsert,
                }
                .into(),
            )
            .await?;

        Ok(match (id, result.last_insert_id) {
            (Some(id), _) => id,
            (None, Some(id)) => Value::U64(id),
            (None, None) => Value::Null,
        })
    }
}

fn required_id(id: Value, operation: &str) -> Result<Value> {
    if id.is_null() {
        Err(Error::missing_argument(format!("{operation} requires an `id`")))
    } else {
        Ok(id)
    }
}

/// Checks a record against the model and casts every value for storage.
fn cast_record(model: &Model, record: Record) -> Result<Vec<(String, Value)>> {
    record
        .into_iter()
        .map(|(name, value)| {
            let value = match model.field(&name) {
                Some(prop) => prop.cast_for_db(&model.name, value)?,
                None if name == "id" => value,
                None => return Err(Error::unknown_field(&model.name, &name)),
            };
            Ok((name, value))
        })
        .collect()
}

fn columns(model: &Model, fields: &[String]) -> Result<Vec<ColumnRef>> {
    fields
        .iter()
        .map(|field| {
            model.check_field(field)?;
            Ok(ColumnRef::new(field))
        })
        .collect()
}

fn from_row(model: &Model, row: Record) -> Record {
    row.into_iter()
        .map(|(name, value)| {
            let value = match model.field(&name) {
                Some(prop) => prop.cast_from_db(value),
                None => value,
            };
            (name, value)
        })
        .collect()
}
