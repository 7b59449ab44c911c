use super::{IndexSpec, Property};
use crate::{stmt::Value, Error, Result};

use indexmap::IndexMap;
use uuid::Uuid;

/// Declarative description of one model and the table backing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    /// Name the model is registered under
    pub name: String,

    /// Name of the backing table
    pub table_name: String,

    /// Properties in declaration order. Declaration order is column order.
    pub properties: IndexMap<String, Property>,

    /// Named multi-column indexes in declaration order
    pub indexes: IndexMap<String, IndexSpec>,

    pub primary_key: PrimaryKey,
}

/// How the `id` column is populated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PrimaryKey {
    /// `INT(11)` assigned by the server
    #[default]
    AutoIncrement,

    /// `CHAR(36)` assigned by the client
    Uuid(UuidVersion),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UuidVersion {
    V1,
    V4,
}

impl Model {
    pub fn new(name: impl Into<String>) -> Model {
        let name = name.into();

        Model {
            table_name: name.clone(),
            name,
            properties: IndexMap::new(),
            indexes: IndexMap::new(),
            primary_key: PrimaryKey::AutoIncrement,
        }
    }

    pub fn table(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = table_name.into();
        self
    }

    pub fn property(mut self, property: Property) -> Self {
        self.properties.insert(property.name.clone(), property);
        self
    }

    pub fn index(mut self, index: IndexSpec) -> Self {
        self.indexes.insert(index.name.clone(), index);
        self
    }

    pub fn primary_key(mut self, primary_key: PrimaryKey) -> Self {
        self.primary_key = primary_key;
        self
    }

    /// Returns the declared property with the given name.
    pub fn field(&self, name: &str) -> Option<&Property> {
        self.properties.get(name)
    }

    /// Returns `true` if `name` is the primary key or a declared property.
    pub fn has_field(&self, name: &str) -> bool {
        name == "id" || self.properties.contains_key(name)
    }

    /// Fails with an unknown field error unless [`Model::has_field`] holds.
    pub fn check_field(&self, name: &str) -> Result<()> {
        if self.has_field(name) {
            Ok(())
        } else {
            Err(Error::unknown_field(&self.name, name))
        }
    }

    /// Declared properties other than the primary key.
    pub fn columns(&self) -> impl Iterator<Item = &Property> + '_ {
        self.properties.values().filter(|prop| prop.name != "id")
    }

    /// Generates a client side identifier for UUID keyed models.
    pub fn generate_id(&self) -> Option<Value> {
        let PrimaryKey::Uuid(version) = self.primary_key else {
            return None;
        };

        let id = match version {
            UuidVersion::V4 => Uuid::new_v4(),
            UuidVersion::V1 => {
                let random = *Uuid::new_v4().as_bytes();
                let mut node = [0u8; 6];
                node.copy_from_slice(&random[..6]);
                Uuid::now_v1(&node)
            }
        };

        Some(Value::String(id.to_string()))
    }

    /// Checks the invariants index declarations rely on.
    pub fn validate(&self) -> Result<()> {
        for index in self.indexes.values() {
            if index.columns.is_empty() {
                return Err(Error::invalid_schema(
                    &self.name,
                    format!("index `{}` has no columns", index.name),
                ));
            }

            for column in &index.columns {
                if !self.has_field(column) {
                    return Err(Error::invalid_schema(
                        &self.name,
                        format!("index `{}` covers undeclared column `{column}`", index.name),
                    ));
                }
            }
        }

        Ok(())
    }
}
