pub mod diff;
pub use diff::{plan_alterations, plan_table, TablePlan};

pub mod serializer;
pub use serializer::{Params, Placeholder, Serializer};

pub mod stmt;
pub use stmt::{Alteration, Statement};

pub mod ty;
pub use ty::ColumnType;
