pub mod config;
pub use config::Config;

pub mod driver;
pub use driver::Channel;

mod error;
pub use error::{Error, IntoError};

pub mod filter;
pub use filter::Filter;

pub mod schema;
pub use schema::{Model, Property, Registry};

pub mod stmt;

/// A Result type alias that uses Mortar's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
