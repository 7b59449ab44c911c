use mortar_core::schema::{IndexAlgorithm, IndexKind, IndexSpec, Property, PropertyIndex};

/// An index definition, as used by `CREATE TABLE` and `ADD INDEX`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDef {
    pub name: String,
    pub kind: Option<IndexKind>,
    pub algorithm: Option<IndexAlgorithm>,
    pub columns: Vec<String>,
}

impl IndexDef {
    /// The single column index a property declares, named after the
    /// property.
    pub fn from_property(prop: &Property, index: PropertyIndex) -> IndexDef {
        IndexDef {
            name: prop.name.clone(),
            kind: index.kind,
            algorithm: index.algorithm,
            columns: vec![prop.name.clone()],
        }
    }

    /// The `USING` clause to render, if the index kind accepts one.
    pub fn using(&self) -> Option<IndexAlgorithm> {
        match self.kind {
            Some(kind) if !kind.accepts_algorithm() => None,
            _ => self.algorithm,
        }
    }
}

impl From<&IndexSpec> for IndexDef {
    fn from(spec: &IndexSpec) -> IndexDef {
        IndexDef {
            name: spec.name.clone(),
            kind: spec.kind,
            algorithm: spec.algorithm,
            columns: spec.columns.clone(),
        }
    }
}
