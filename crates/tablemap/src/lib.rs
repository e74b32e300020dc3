pub mod db;
pub use db::Db;

mod record;
pub use record::Record;

pub use tablemap_core::{
    bail, err,
    schema::{FieldDefault, FieldKind, Trigger},
    stmt::Value,
    Entity, EntityBuilder, Error, Field, Result, Row, Store,
};

#[cfg(feature = "sqlite")]
pub use tablemap_driver_sqlite::Sqlite;

/// Builds a slice of bound parameters for `find_first` and `find_by`.
///
/// ```
/// use tablemap::{params, Value};
///
/// let params = params![5.0, "a"];
/// assert_eq!(params, &[Value::F64(5.0), Value::from("a")]);
/// ```
#[macro_export]
macro_rules! params {
    () => {
        &[] as &[$crate::Value]
    };
    ($($param:expr),+ $(,)?) => {
        &[$($crate::Value::from($param)),+]
    };
}
