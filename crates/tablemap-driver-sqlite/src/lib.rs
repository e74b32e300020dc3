mod value;
use value::Value;

use rusqlite::Connection;
use std::{
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard, PoisonError},
};
use tablemap_core::{stmt, Error, Result, Row, Store};
use tablemap_sql::Serializer;
use url::Url;

/// A [`Store`] backed by a single SQLite connection.
#[derive(Debug)]
pub struct Sqlite {
    /// Where the database lives, for diagnostics.
    location: Location,

    connection: Mutex<Connection>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    File(PathBuf),
    InMemory,
}

impl Sqlite {
    /// Opens a database from a connection URL: `sqlite::memory:` or
    /// `sqlite:<path>`.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str)
            .map_err(|err| Error::invalid_connection_url(format!("{err}; url={url_str}")))?;

        if url.scheme() != "sqlite" {
            return Err(Error::invalid_connection_url(format!(
                "connection URL does not have a `sqlite` scheme; url={url_str}"
            )));
        }

        if url.path() == ":memory:" {
            Self::in_memory()
        } else {
            Self::open(url.path())
        }
    }

    /// Create an in-memory SQLite database
    pub fn in_memory() -> Result<Self> {
        let connection = Connection::open_in_memory().map_err(Error::driver_operation_failed)?;
        Ok(Self::with_connection(Location::InMemory, connection))
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let connection = Connection::open(&path).map_err(Error::driver_operation_failed)?;
        Ok(Self::with_connection(Location::File(path), connection))
    }

    fn with_connection(location: Location, connection: Connection) -> Self {
        log::debug!("opened sqlite database; location={location:?}");
        Self {
            location,
            connection: Mutex::new(connection),
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Runs one or more statements without parameters, e.g. schema setup.
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        log::trace!("execute batch `{sql}`");
        self.connection()
            .execute_batch(sql)
            .map_err(Error::driver_operation_failed)
    }

    fn connection(&self) -> MutexGuard<'_, Connection> {
        self.connection
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn query(&self, sql: &str, params: &[stmt::Value], limit: Option<usize>) -> Result<Vec<Row>> {
        log::trace!("query `{sql}`; params={params:?}");

        let connection = self.connection();
        let mut stmt = connection
            .prepare_cached(sql)
            .map_err(Error::driver_operation_failed)?;

        let columns: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();

        let mut rows = stmt
            .query(rusqlite::params_from_iter(params.iter().map(Value)))
            .map_err(Error::driver_operation_failed)?;

        let mut ret = vec![];

        while let Some(row) = rows.next().map_err(Error::driver_operation_failed)? {
            let mut record = Row::new();

            for (index, column) in columns.iter().enumerate() {
                let value: rusqlite::types::Value =
                    row.get(index).map_err(Error::driver_operation_failed)?;
                record.insert(column.as_str(), Value::from_sql(value));
            }

            ret.push(record);

            if limit.is_some_and(|limit| ret.len() >= limit) {
                break;
            }
        }

        Ok(ret)
    }

    fn execute(&self, sql: &str, params: &[stmt::Value]) -> Result<u64> {
        log::trace!("execute `{sql}`; params={params:?}");

        let connection = self.connection();
        let mut stmt = connection
            .prepare_cached(sql)
            .map_err(Error::driver_operation_failed)?;

        let count = stmt
            .execute(rusqlite::params_from_iter(params.iter().map(Value)))
            .map_err(Error::driver_operation_failed)?;

        Ok(count as u64)
    }
}

impl Store for Sqlite {
    fn select_one(&self, sql: &str, params: &[stmt::Value]) -> Result<Option<Row>> {
        Ok(self.query(sql, params, Some(1))?.into_iter().next())
    }

    fn select(&self, sql: &str, params: &[stmt::Value]) -> Result<Vec<Row>> {
        self.query(sql, params, None)
    }

    fn select_int(&self, sql: &str, params: &[stmt::Value]) -> Result<i64> {
        let row = self
            .query(sql, params, Some(1))?
            .into_iter()
            .next()
            .ok_or_else(|| tablemap_core::err!("query returned no rows; sql=`{sql}`"))?;

        match row.get_index(0) {
            Some(stmt::Value::I64(value)) => Ok(*value),
            Some(value) => Err(Error::type_conversion(value.clone(), "i64")),
            None => Err(tablemap_core::err!("query returned no columns; sql=`{sql}`")),
        }
    }

    fn update(&self, sql: &str, params: &[stmt::Value]) -> Result<u64> {
        self.execute(sql, params)
    }

    fn insert(&self, table: &str, values: &[(String, stmt::Value)]) -> Result<u64> {
        let stmt = Serializer::insert_into(table, values);
        self.execute(&stmt.sql, &stmt.params)
    }
}
