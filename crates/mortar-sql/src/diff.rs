//! Schema diffing.
//!
//! Compares a model against the table the server reports and produces the
//! `ALTER TABLE` operations that converge the table to the model. Operations
//! come out in a fixed phase order:
//!
//! 1. primary key strategy change
//! 2. added columns
//! 3. changed columns
//! 4. dropped columns
//! 5. dropped indexes
//! 6. added single column indexes
//! 7. added multi-column indexes
//!
//! Indexes dropped in phase 5 because their definition changed are re-added
//! in phase 6 or 7 with the new definition. The live snapshot is only read;
//! the drops are tracked in a derived view.

use crate::{
    stmt::{Alteration, ColumnDef, CreateTable, IndexDef, PrimaryKeyDef, Statement},
    ty,
};

use indexmap::IndexMap;
use mortar_core::{
    schema::{IndexKind, LiveColumn, LiveIndex, TableInfo},
    Model, Property,
};
use std::collections::HashSet;

/// What it takes to bring one table in line with its model.
#[derive(Debug, Clone, PartialEq)]
pub enum TablePlan {
    /// The table does not exist
    Create(CreateTable),

    /// The table exists; apply these operations. Empty when up to date.
    Alter(Vec<Alteration>),
}

impl TablePlan {
    /// Returns `true` when the table already matches its model.
    pub fn is_empty(&self) -> bool {
        matches!(self, TablePlan::Alter(alterations) if alterations.is_empty())
    }

    /// The statement carrying out the plan, `None` when there is nothing to do.
    pub fn into_statement(self, table: &str) -> Option<Statement> {
        match self {
            TablePlan::Create(create) => Some(create.into()),
            TablePlan::Alter(alterations) if alterations.is_empty() => None,
            TablePlan::Alter(alterations) => Some(Statement::alter_table(table, alterations)),
        }
    }
}

/// Plans a table: create it when the server reports no columns, otherwise
/// alter it.
pub fn plan_table(model: &Model, info: &TableInfo) -> TablePlan {
    if info.is_missing() {
        TablePlan::Create(CreateTable::new(model))
    } else {
        TablePlan::Alter(plan_alterations(model, &info.columns, &info.indexes))
    }
}

/// Computes the operations converging an existing table to `model`.
pub fn plan_alterations(
    model: &Model,
    columns: &[LiveColumn],
    indexes: &[LiveIndex],
) -> Vec<Alteration> {
    let mut alterations = vec![];

    let live_columns = columns
        .iter()
        .map(|column| (column.field.as_str(), column))
        .collect::<IndexMap<_, _>>();

    if let Some(id) = live_columns.get("id") {
        let primary_key = PrimaryKeyDef(model.primary_key);
        if !ty::types_match(&id.ty, primary_key.column_type()) {
            alterations.push(Alteration::ChangePrimaryKey(primary_key));
        }
    }

    for prop in model.columns() {
        if !live_columns.contains_key(prop.name.as_str()) {
            alterations.push(Alteration::AddColumn(ColumnDef::from_property(prop)));
        }
    }

    for prop in model.columns() {
        if let Some(column) = live_columns.get(prop.name.as_str()) {
            if column_changed(prop, column) {
                alterations.push(Alteration::ChangeColumn(ColumnDef::from_property(prop)));
            }
        }
    }

    let mut dropped_columns = HashSet::new();

    for column in columns {
        if column.field != "id" && !model.properties.contains_key(&column.field) {
            alterations.push(Alteration::DropColumn(column.field.clone()));
            dropped_columns.insert(column.field.as_str());
        }
    }

    let live_indexes = group_indexes(indexes);
    let mut dropped = HashSet::new();

    for (name, index) in &live_indexes {
        if *name == "PRIMARY" || !index_obsolete(model, name, index) {
            continue;
        }

        // The server drops an index along with the last of its columns
        if !index.columns.iter().all(|column| dropped_columns.contains(column)) {
            alterations.push(Alteration::DropIndex(name.to_string()));
        }
        dropped.insert(*name);
    }

    let present = |name: &str| live_indexes.contains_key(name) && !dropped.contains(name);

    for prop in model.properties.values() {
        if let Some(index) = prop.column_index() {
            if !present(prop.name.as_str()) {
                alterations.push(Alteration::AddIndex(IndexDef::from_property(prop, index)));
            }
        }
    }

    for index in model.indexes.values() {
        if !present(index.name.as_str()) {
            alterations.push(Alteration::AddIndex(IndexDef::from(index)));
        }
    }

    alterations
}

fn column_changed(prop: &Property, column: &LiveColumn) -> bool {
    let desired = ty::column_type(prop);

    // Unset nullability means nullable, so a NOT NULL column whose property
    // says nothing is changed back to NULL.
    !ty::types_match(&column.ty, &desired.base) || column.nullable == prop.is_not_null()
}

/// A live index with its rows folded together.
struct GroupedIndex<'a> {
    kind: Option<IndexKind>,

    /// Ordered by `Seq_in_index`
    columns: Vec<&'a str>,
}

/// Live indexes by name, in first appearance order.
fn group_indexes(indexes: &[LiveIndex]) -> IndexMap<&str, GroupedIndex<'_>> {
    let mut grouped = IndexMap::<&str, Vec<&LiveIndex>>::new();

    for index in indexes {
        grouped.entry(index.key_name.as_str()).or_default().push(index);
    }

    grouped
        .into_iter()
        .map(|(name, mut rows)| {
            rows.sort_by_key(|row| row.seq_in_index);
            let index = GroupedIndex {
                kind: rows.first().and_then(|row| row.kind()),
                columns: rows.into_iter().map(|row| row.column_name.as_str()).collect(),
            };
            (name, index)
        })
        .collect()
}

/// An index is obsolete when the model no longer declares it, or declares
/// it over other columns or with another kind. The algorithm is not
/// compared; InnoDB reports `HASH` indexes as `BTREE`.
fn index_obsolete(model: &Model, name: &str, live: &GroupedIndex<'_>) -> bool {
    if let Some(index) = model.indexes.get(name) {
        return index.kind != live.kind
            || !index.columns.iter().map(String::as_str).eq(live.columns.iter().copied());
    }

    match model.field(name).and_then(Property::column_index) {
        Some(index) => index.kind != live.kind,
        None => true,
    }
}
