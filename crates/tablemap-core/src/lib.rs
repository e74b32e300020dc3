pub mod driver;
pub use driver::{Row, Store};

mod error;
pub use error::{Error, IntoError};

pub mod schema;
pub use schema::{Entity, EntityBuilder, Field};

pub mod stmt;

/// A Result type alias that uses tablemap's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
