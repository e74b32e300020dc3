mod builder;
pub use builder::Builder;

use crate::{Record, Result};

use indexmap::IndexMap;
use tablemap_core::{stmt::Value, Entity, Row, Store};
use tablemap_sql::{Serializer, Statement};

use std::sync::Arc;

/// A database handle: the registered entities plus the store that runs their
/// statements.
///
/// Cloning is cheap; clones share the store.
#[derive(Debug, Clone)]
pub struct Db {
    store: Arc<dyn Store>,

    /// Registered entities, keyed by entity name
    entities: Arc<IndexMap<String, Arc<Entity>>>,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Connects to the database at `url` with no registered entities.
    pub fn connect(url: &str) -> Result<Db> {
        Builder::default().connect(url)
    }

    pub fn store(&self) -> &dyn Store {
        &*self.store
    }

    /// Returns a registered entity by name.
    pub fn entity(&self, name: &str) -> Option<&Arc<Entity>> {
        self.entities.get(name)
    }

    pub fn entities(&self) -> impl ExactSizeIterator<Item = &Arc<Entity>> + '_ {
        self.entities.values()
    }

    /// Creates the entity's table.
    pub fn create_table(&self, entity: &Entity) -> Result<()> {
        let stmt = Serializer::new(entity).create_table()?;
        self.exec_update(&stmt)?;
        Ok(())
    }

    /// Creates the table of every registered entity, in registration order.
    pub fn create_tables(&self) -> Result<()> {
        for entity in self.entities.values() {
            self.create_table(entity)?;
        }
        Ok(())
    }

    /// Loads the row whose primary key equals `key`.
    pub fn get(&self, entity: &Arc<Entity>, key: impl Into<Value>) -> Result<Option<Record>> {
        let stmt = Serializer::new(entity).select_by_key(&key.into());
        let row = self.select_one(&stmt)?;
        Ok(row.map(|row| Record::from_row(entity, row)))
    }

    /// Loads the first row matching a `where` fragment.
    ///
    /// Only `clause` is copied into the SQL text; `params` are always bound.
    pub fn find_first(
        &self,
        entity: &Arc<Entity>,
        clause: &str,
        params: &[Value],
    ) -> Result<Option<Record>> {
        let stmt = Serializer::new(entity).select_where(clause, params);
        let row = self.select_one(&stmt)?;
        Ok(row.map(|row| Record::from_row(entity, row)))
    }

    /// Loads every row of the entity's table, in the order the store returns
    /// them.
    pub fn find_all(&self, entity: &Arc<Entity>) -> Result<Vec<Record>> {
        let stmt = Serializer::new(entity).select_all();
        self.select(entity, &stmt)
    }

    pub fn find_by(
        &self,
        entity: &Arc<Entity>,
        clause: &str,
        params: &[Value],
    ) -> Result<Vec<Record>> {
        let stmt = Serializer::new(entity).select_where(clause, params);
        self.select(entity, &stmt)
    }

    /// Counts the rows of the entity's table.
    pub fn count_all(&self, entity: &Entity) -> Result<i64> {
        let stmt = Serializer::new(entity).count();
        log_statement(&stmt);
        self.store.select_int(stmt.sql(), stmt.params())
    }

    fn select_one(&self, stmt: &Statement) -> Result<Option<Row>> {
        log_statement(stmt);
        self.store.select_one(stmt.sql(), stmt.params())
    }

    fn select(&self, entity: &Arc<Entity>, stmt: &Statement) -> Result<Vec<Record>> {
        log_statement(stmt);
        let rows = self.store.select(stmt.sql(), stmt.params())?;
        Ok(rows
            .into_iter()
            .map(|row| Record::from_row(entity, row))
            .collect())
    }

    pub(crate) fn exec_update(&self, stmt: &Statement) -> Result<u64> {
        log_statement(stmt);
        self.store.update(stmt.sql(), stmt.params())
    }

    pub(crate) fn exec_insert(&self, table: &str, values: &[(String, Value)]) -> Result<u64> {
        log::debug!("insert into {table}; params={}", values.len());
        self.store.insert(table, values)
    }
}

fn log_statement(stmt: &Statement) {
    log::debug!("{}; params={}", stmt.sql(), stmt.params().len());
}
