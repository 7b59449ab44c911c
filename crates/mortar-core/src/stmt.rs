mod value;
pub use value::Value;

use indexmap::IndexMap;

/// Property values keyed by property name, in declaration or column order.
pub type Record = IndexMap<String, Value>;
