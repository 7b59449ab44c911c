mod alter_table;
pub use alter_table::{AlterTable, Alteration};

mod column_def;
pub use column_def::{ColumnDef, PrimaryKeyDef};

mod create_table;
pub use create_table::CreateTable;

mod database;
pub use database::{CreateDatabase, DropDatabase, UseDatabase};

mod delete;
pub use delete::Delete;

mod drop_table;
pub use drop_table::DropTable;

mod expr;
pub use expr::{BinaryOp, ColumnRef, Expr};

mod index_def;
pub use index_def::IndexDef;

mod insert;
pub use insert::Insert;

mod select;
pub use select::{Direction, Limit, OrderBy, Projection, Select};

mod show;
pub use show::{Show, ShowWhat};

mod update;
pub use update::Update;

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    AlterTable(AlterTable),
    CreateDatabase(CreateDatabase),
    CreateTable(CreateTable),
    Delete(Delete),
    DropDatabase(DropDatabase),
    DropTable(DropTable),
    Insert(Insert),
    Select(Select),
    Show(Show),
    Update(Update),
    UseDatabase(UseDatabase),
}

impl Statement {
    /// Returns `true` for statements that produce rows.
    pub fn is_query(&self) -> bool {
        matches!(self, Statement::Select(_) | Statement::Show(_))
    }
}
