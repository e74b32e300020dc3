use super::Db;
use crate::{Error, Result};

use indexmap::IndexMap;
use tablemap_core::{EntityBuilder, Store};
use url::Url;

use std::sync::Arc;

#[derive(Default)]
pub struct Builder {
    /// Entities to scan when the database is built
    entities: Vec<EntityBuilder>,

    /// If set, prefix every table name with this string
    table_name_prefix: Option<String>,
}

impl Builder {
    pub fn register(&mut self, entity: EntityBuilder) -> &mut Self {
        self.entities.push(entity);
        self
    }

    /// Set the table name prefix for all tables
    pub fn table_name_prefix(&mut self, prefix: &str) -> &mut Self {
        self.table_name_prefix = Some(prefix.to_string());
        self
    }

    /// Opens a store from a connection URL and builds the database on it.
    pub fn connect(&mut self, url: &str) -> Result<Db> {
        let parsed = Url::parse(url)
            .map_err(|err| Error::invalid_connection_url(format!("{err}; url={url}")))?;

        match parsed.scheme() {
            #[cfg(feature = "sqlite")]
            "sqlite" => self.build(tablemap_driver_sqlite::Sqlite::new(url)?),
            #[cfg(not(feature = "sqlite"))]
            "sqlite" => Err(Error::invalid_connection_url("`sqlite` feature not enabled")),
            scheme => Err(Error::invalid_connection_url(format!(
                "unsupported database; scheme={scheme}; url={url}"
            ))),
        }
    }

    /// Scans every registered entity and builds the database on `store`.
    ///
    /// Fails on the first entity with an invalid mapping, or if two entities
    /// share a name.
    pub fn build(&mut self, store: impl Store) -> Result<Db> {
        let mut entities = IndexMap::with_capacity(self.entities.len());

        for mut entity in std::mem::take(&mut self.entities) {
            if let Some(prefix) = &self.table_name_prefix {
                entity = entity.table_name_prefix(prefix);
            }

            let entity = entity.build()?;

            if entities.contains_key(entity.name()) {
                return Err(Error::invalid_schema(format!(
                    "entity `{}` is registered more than once",
                    entity.name()
                )));
            }

            entities.insert(entity.name().to_string(), entity);
        }

        Ok(Db {
            store: Arc::new(store),
            entities: Arc::new(entities),
        })
    }
}
