mod row;
pub use row::Row;

use crate::{stmt::Value, Result};

use std::fmt::Debug;

/// The storage collaborator that executes SQL on behalf of entities.
///
/// SQL text uses `?` positional placeholders, bound in order to `params`.
/// Implementations report their native failures through
/// [`Error::driver_operation_failed`](crate::Error::driver_operation_failed)
/// and never retry.
pub trait Store: Debug + Send + Sync + 'static {
    /// Runs a query and returns its first row, if any.
    fn select_one(&self, sql: &str, params: &[Value]) -> Result<Option<Row>>;

    /// Runs a query and returns every row, in the order the store produced
    /// them.
    fn select(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>>;

    /// Runs a query whose first column of the first row is an integer.
    fn select_int(&self, sql: &str, params: &[Value]) -> Result<i64>;

    /// Executes an `update` or `delete` statement, returning the number of
    /// affected rows.
    fn update(&self, sql: &str, params: &[Value]) -> Result<u64>;

    /// Inserts one row into `table`, binding each `(column, value)` pair.
    fn insert(&self, table: &str, values: &[(String, Value)]) -> Result<u64>;
}

impl<S: Store + ?Sized> Store for Box<S> {
    fn select_one(&self, sql: &str, params: &[Value]) -> Result<Option<Row>> {
        (**self).select_one(sql, params)
    }

    fn select(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>> {
        (**self).select(sql, params)
    }

    fn select_int(&self, sql: &str, params: &[Value]) -> Result<i64> {
        (**self).select_int(sql, params)
    }

    fn update(&self, sql: &str, params: &[Value]) -> Result<u64> {
        (**self).update(sql, params)
    }

    fn insert(&self, table: &str, values: &[(String, Value)]) -> Result<u64> {
        (**self).insert(table, values)
    }
}
