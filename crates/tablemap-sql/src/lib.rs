pub mod serializer;
pub use serializer::{Params, Placeholder, Serializer};

mod stmt;
pub use stmt::Statement;
