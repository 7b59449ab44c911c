use super::{ColumnRef, Expr, Statement};

/// A query over one table.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub table: String,
    pub projection: Projection,
    pub filter: Option<Expr>,
    pub group_by: Vec<ColumnRef>,
    pub order_by: Vec<OrderBy>,
    pub limit: Option<Limit>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    /// `*`
    All,

    /// Named columns
    Columns(Vec<ColumnRef>),

    /// `count(*) as cnt`
    Count,

    /// `1 as found`
    Found,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub column: ColumnRef,
    pub direction: Option<Direction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit {
    /// `None` leaves the number of rows unbounded
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl Select {
    pub fn new(table: impl Into<String>, projection: Projection) -> Select {
        Select {
            table: table.into(),
            projection,
            filter: None,
            group_by: vec![],
            order_by: vec![],
            limit: None,
        }
    }

    pub fn filter(mut self, filter: Expr) -> Self {
        self.filter = Some(filter).filter(|filter| !filter.is_empty());
        self
    }

    pub fn limit(mut self, limit: Limit) -> Self {
        self.limit = Some(limit).filter(|limit| limit.limit.is_some() || limit.offset.is_some());
        self
    }
}

impl Direction {
    pub fn parse(direction: &str) -> Option<Direction> {
        if direction.eq_ignore_ascii_case("asc") {
            Some(Direction::Asc)
        } else if direction.eq_ignore_ascii_case("desc") {
            Some(Direction::Desc)
        } else {
            None
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

impl From<Select> for Statement {
    fn from(value: Select) -> Self {
        Self::Select(value)
    }
}
