use super::{Comma, Delimited, Formatter, Ident, Params, ToSql};

use crate::stmt::{
    AlterTable, Alteration, CreateDatabase, CreateTable, Delete, DropDatabase, DropTable, Insert,
    Limit, OrderBy, Projection, Select, Show, ShowWhat, Statement, Update, UseDatabase,
};

impl ToSql for &Statement {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            Statement::AlterTable(stmt) => stmt.to_sql(f),
            Statement::CreateDatabase(stmt) => stmt.to_sql(f),
            Statement::CreateTable(stmt) => stmt.to_sql(f),
            Statement::Delete(stmt) => stmt.to_sql(f),
            Statement::DropDatabase(stmt) => stmt.to_sql(f),
            Statement::DropTable(stmt) => stmt.to_sql(f),
            Statement::Insert(stmt) => stmt.to_sql(f),
            Statement::Select(stmt) => stmt.to_sql(f),
            Statement::Show(stmt) => stmt.to_sql(f),
            Statement::Update(stmt) => stmt.to_sql(f),
            Statement::UseDatabase(stmt) => stmt.to_sql(f),
        }
    }
}

/// The comma separated body of a `CREATE TABLE` statement.
struct TableBody<'a>(&'a CreateTable);

impl ToSql for TableBody<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, self.0.primary_key, " PRIMARY KEY");

        for column in &self.0.columns {
            fmt!(f, ",\n  ", column);
        }

        for index in &self.0.indexes {
            fmt!(f, ",\n  ", index);
        }
    }
}

impl ToSql for &CreateTable {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, "CREATE TABLE ", Ident(&self.name), " (\n  ", TableBody(self), "\n)");
    }
}

impl ToSql for &DropTable {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let if_exists = if self.if_exists { "IF EXISTS " } else { "" };
        fmt!(f, "DROP TABLE ", if_exists, Ident(&self.name));
    }
}

impl ToSql for &AlterTable {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(
            f,
            "ALTER TABLE ",
            Ident(&self.name),
            " ",
            Delimited(&self.alterations, ",\n")
        );
    }
}

impl ToSql for &Alteration {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            Alteration::ChangePrimaryKey(primary_key) => {
                fmt!(f, "CHANGE COLUMN ", Ident("id"), " ", *primary_key)
            }
            Alteration::AddColumn(column) => fmt!(f, "ADD COLUMN ", column),
            Alteration::ChangeColumn(column) => {
                fmt!(f, "CHANGE COLUMN ", Ident(&column.name), " ", column)
            }
            Alteration::DropColumn(name) => fmt!(f, "DROP COLUMN ", Ident(name)),
            Alteration::DropIndex(name) => fmt!(f, "DROP INDEX ", Ident(name)),
            Alteration::AddIndex(index) => fmt!(f, "ADD ", index),
        }
    }
}

impl ToSql for &CreateDatabase {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(
            f,
            "CREATE DATABASE ",
            Ident(&self.name),
            " CHARACTER SET ",
            &self.charset,
            " COLLATE ",
            &self.collation
        );
    }
}

impl ToSql for &DropDatabase {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let if_exists = if self.if_exists { "IF EXISTS " } else { "" };
        fmt!(f, "DROP DATABASE ", if_exists, Ident(&self.name));
    }
}

impl ToSql for &UseDatabase {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, "USE ", Ident(&self.name));
    }
}

impl ToSql for &Select {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, "SELECT ", &self.projection, " FROM ", Ident(&self.table));

        if let Some(filter) = &self.filter {
            fmt!(f, " WHERE ", filter);
        }

        if !self.group_by.is_empty() {
            fmt!(f, " GROUP BY ", Comma(&self.group_by));
        }

        if !self.order_by.is_empty() {
            fmt!(f, " ORDER BY ", Comma(&self.order_by));
        }

        fmt!(f, self.limit);
    }
}

impl ToSql for &Projection {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            Projection::All => fmt!(f, "*"),
            Projection::Columns(columns) => fmt!(f, Comma(columns)),
            Projection::Count => fmt!(f, "count(*) as cnt"),
            Projection::Found => fmt!(f, "1 as found"),
        }
    }
}

impl ToSql for &OrderBy {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, &self.column);

        if let Some(direction) = self.direction {
            fmt!(f, " ", direction.as_sql());
        }
    }
}

impl ToSql for Limit {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match (self.offset, self.limit) {
            (None, None) => {}
            (None, Some(limit)) => fmt!(f, " LIMIT ", limit),
            // MySQL has no offset without a row count
            (Some(offset), limit) => fmt!(f, " LIMIT ", offset, ", ", limit.unwrap_or(u64::MAX)),
        }
    }
}

impl ToSql for &Show {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let what = match self.what {
            ShowWhat::Fields => "SHOW FIELDS FROM ",
            ShowWhat::Indexes => "SHOW INDEXES FROM ",
        };

        fmt!(f, what, Ident(&self.table));
    }
}

impl ToSql for &Insert {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(
            f,
            "INSERT INTO ",
            Ident(&self.table),
            " (",
            Comma(self.columns.iter().map(Ident)),
            ") VALUES (",
            Comma(&self.values),
            ")"
        );

        if self.on_duplicate_key_update {
            let updates = self
                .columns
                .iter()
                .zip(&self.values)
                .filter(|(column, _)| *column != "id")
                .collect::<Vec<_>>();

            fmt!(f, " ON DUPLICATE KEY UPDATE ");

            if updates.is_empty() {
                fmt!(f, Ident("id"), " = ", Ident("id"));
            } else {
                fmt!(f, Comma(updates.into_iter().map(Assignment)));
            }
        }
    }
}

impl ToSql for &Update {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(
            f,
            "UPDATE ",
            Ident(&self.table),
            " SET ",
            Comma(self.assignments.iter().map(|(column, value)| Assignment((column, value))))
        );

        if let Some(filter) = &self.filter {
            fmt!(f, " WHERE ", filter);
        }
    }
}

impl ToSql for &Delete {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, "DELETE FROM ", Ident(&self.table));

        if let Some(filter) = &self.filter {
            fmt!(f, " WHERE ", filter);
        }
    }
}

/// `` `column` = ? ``
struct Assignment<'a>((&'a String, &'a mortar_core::stmt::Value));

impl ToSql for Assignment<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let (column, value) = self.0;
        fmt!(f, Ident(column), " = ", value);
    }
}

impl std::fmt::Display for Alteration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut sql = String::new();
        let mut params: Vec<mortar_core::stmt::Value> = vec![];

        self.to_sql(&mut Formatter {
            dst: &mut sql,
            params: &mut params,
        });

        f.write_str(&sql)
    }
}
