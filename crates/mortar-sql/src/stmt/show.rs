use super::Statement;

/// Introspection of one table, as read by the schema differ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Show {
    pub table: String,
    pub what: ShowWhat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowWhat {
    /// `SHOW FIELDS FROM`
    Fields,

    /// `SHOW INDEXES FROM`
    Indexes,
}

impl Statement {
    pub fn show_fields(table: impl Into<String>) -> Self {
        Show {
            table: table.into(),
            what: ShowWhat::Fields,
        }
        .into()
    }

    pub fn show_indexes(table: impl Into<String>) -> Self {
        Show {
            table: table.into(),
            what: ShowWhat::Indexes,
        }
        .into()
    }
}

impl From<Show> for Statement {
    fn from(value: Show) -> Self {
        Self::Show(value)
    }
}
