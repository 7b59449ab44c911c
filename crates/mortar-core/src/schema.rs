mod cast;

mod index;
pub use index::{IndexAlgorithm, IndexKind, IndexSpec};

pub mod live;
pub use live::{LiveColumn, LiveIndex, TableInfo};

mod model;
pub use model::{Model, PrimaryKey, UuidVersion};

mod property;
pub use property::{Property, PropertyIndex, PropertyType};

mod registry;
pub use registry::Registry;
