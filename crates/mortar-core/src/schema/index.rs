/// A named index over one or more columns.
///
/// Column order is significant: `(a, b)` and `(b, a)` are different indexes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSpec {
    /// Index name as it appears in `SHOW INDEXES`
    pub name: String,

    /// `None` for a plain index
    pub kind: Option<IndexKind>,

    /// `USING` clause; `None` lets the server pick
    pub algorithm: Option<IndexAlgorithm>,

    /// Indexed columns, in key order
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    Unique,
    Fulltext,
    Spatial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexAlgorithm {
    BTree,
    Hash,
}

impl IndexSpec {
    pub fn new<I>(name: impl Into<String>, columns: I) -> IndexSpec
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        IndexSpec {
            name: name.into(),
            kind: None,
            algorithm: None,
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Builds an index from a comma separated column list such as
    /// `"email, createdByAdmin"`.
    pub fn from_column_list(name: impl Into<String>, columns: &str) -> IndexSpec {
        IndexSpec::new(
            name,
            columns
                .split(',')
                .map(str::trim)
                .filter(|column| !column.is_empty()),
        )
    }

    pub fn kind(mut self, kind: IndexKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn unique(self) -> Self {
        self.kind(IndexKind::Unique)
    }

    pub fn using(mut self, algorithm: IndexAlgorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }
}

impl IndexKind {
    pub fn as_sql(self) -> &'static str {
        match self {
            IndexKind::Unique => "UNIQUE",
            IndexKind::Fulltext => "FULLTEXT",
            IndexKind::Spatial => "SPATIAL",
        }
    }

    /// FULLTEXT and SPATIAL indexes do not take a `USING` clause.
    pub fn accepts_algorithm(self) -> bool {
        matches!(self, IndexKind::Unique)
    }
}

impl IndexAlgorithm {
    pub fn as_sql(self) -> &'static str {
        match self {
            IndexAlgorithm::BTree => "BTREE",
            IndexAlgorithm::Hash => "HASH",
        }
    }
}
