use crate::{Db, Error, Result};

use indexmap::IndexMap;
use tablemap_core::{stmt::Value, Entity, Row};
use tablemap_sql::Serializer;

use std::sync::Arc;

/// One instance of a mapped entity: attribute name to value.
///
/// Only declared attributes can be set. An attribute that was never set
/// falls back to its field's default the first time a write needs it, and
/// the default is then kept on the record.
///
/// ```
/// use tablemap::{Entity, Field, Record, Value};
///
/// let player = Entity::builder("Player")
///     .field("id", Field::integer().primary_key())
///     .field("name", Field::string())
///     .build()
///     .unwrap();
///
/// let mut record = Record::new(&player);
/// record.set("id", 1).unwrap().set("name", "a").unwrap();
///
/// assert_eq!(record.get("name").unwrap(), &Value::from("a"));
/// assert!(record.set("nickname", "b").unwrap_err().is_unknown_column());
/// ```
#[derive(Debug, Clone)]
pub struct Record {
    entity: Arc<Entity>,

    /// Values currently set, keyed by attribute name
    values: IndexMap<String, Value>,
}

impl Record {
    /// An empty record.
    pub fn new(entity: &Arc<Entity>) -> Record {
        Record {
            entity: entity.clone(),
            values: IndexMap::new(),
        }
    }

    /// A record with the given attributes set.
    pub fn from_values<K, V>(
        entity: &Arc<Entity>,
        values: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Record>
    where
        K: AsRef<str>,
        V: Into<Value>,
    {
        let mut record = Record::new(entity);
        for (attr, value) in values {
            record.set(attr.as_ref(), value)?;
        }
        Ok(record)
    }

    /// Builds a record from a row returned by the store. Columns are mapped
    /// back to attribute names; columns with no mapped attribute are dropped.
    pub fn from_row(entity: &Arc<Entity>, row: Row) -> Record {
        let mut values = IndexMap::with_capacity(row.len());

        for (column, value) in row {
            let Some(attr) = entity.attr_for_column(&column) else {
                log::debug!(
                    "dropping unmapped column `{column}` of table `{}`",
                    entity.table_name()
                );
                continue;
            };

            let value = match entity.field(attr) {
                Some(field) => field.kind().normalize(value),
                None => value,
            };

            values.insert(attr.to_string(), value);
        }

        Record {
            entity: entity.clone(),
            values,
        }
    }

    pub fn entity(&self) -> &Arc<Entity> {
        &self.entity
    }

    /// Reads an attribute.
    ///
    /// Fails with an unknown column error if the entity does not declare
    /// `attr`, and with an attribute not set error if it is declared but has
    /// no value on this record.
    pub fn get(&self, attr: &str) -> Result<&Value> {
        if !self.entity.contains(attr) {
            return Err(Error::unknown_column(self.entity.name(), attr));
        }

        self.values
            .get(attr)
            .ok_or_else(|| Error::attribute_not_set(self.entity.name(), attr))
    }

    pub fn try_get(&self, attr: &str) -> Option<&Value> {
        self.values.get(attr)
    }

    /// Reads an attribute and converts it.
    pub fn get_as<T>(&self, attr: &str) -> Result<T>
    where
        T: TryFrom<Value, Error = Error>,
    {
        T::try_from(self.get(attr)?.clone())
    }

    pub fn set(&mut self, attr: &str, value: impl Into<Value>) -> Result<&mut Self> {
        if !self.entity.contains(attr) {
            return Err(Error::unknown_column(self.entity.name(), attr));
        }

        self.values.insert(attr.to_string(), value.into());
        Ok(self)
    }

    /// Whether the attribute has a value on this record.
    pub fn contains(&self, attr: &str) -> bool {
        self.values.contains_key(attr)
    }

    /// Iterates the attributes set on this record, in the order they were
    /// first set.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.values.iter().map(|(attr, value)| (attr.as_str(), value))
    }

    /// Inserts the record as a new row.
    ///
    /// Every insertable attribute is bound by column name. Unset attributes
    /// take their field's default, which is kept on the record.
    pub fn insert(&mut self, db: &Db) -> Result<&mut Self> {
        let entity = self.entity.clone();
        entity.triggers().fire_pre_insert();

        let values: Vec<_> = entity
            .fields()
            .filter(|(_, field)| field.is_insertable())
            .map(|(attr, field)| {
                let value = self
                    .values
                    .entry(attr.to_string())
                    .or_insert_with(|| field.default_value())
                    .clone();
                (field.expect_column_name().to_string(), value)
            })
            .collect();

        db.exec_insert(entity.table_name(), &values)?;
        Ok(self)
    }

    /// Writes every updatable attribute to the row with this record's
    /// primary key.
    pub fn update(&mut self, db: &Db) -> Result<()> {
        let entity = self.entity.clone();

        if !entity.fields().any(|(_, field)| field.is_updatable()) {
            crate::bail!(
                "entity `{}` has no updatable attributes",
                entity.name()
            );
        }

        let key = self.get(entity.primary_key_attr())?.clone();
        entity.triggers().fire_pre_update();

        let assignments: Vec<_> = entity
            .fields()
            .filter(|(_, field)| field.is_updatable())
            .map(|(attr, field)| {
                let value = self
                    .values
                    .entry(attr.to_string())
                    .or_insert_with(|| field.default_value())
                    .clone();
                (field.expect_column_name().to_string(), value)
            })
            .collect();

        let stmt = Serializer::new(&entity).update(&assignments, &key);
        db.exec_update(&stmt)?;
        Ok(())
    }

    /// Deletes the row with this record's primary key and hands the record
    /// back. Its values no longer reflect a stored row.
    pub fn delete(self, db: &Db) -> Result<Record> {
        let key = self.get(self.entity.primary_key_attr())?.clone();
        self.entity.triggers().fire_pre_delete();

        let stmt = Serializer::new(&self.entity).delete(&key);
        db.exec_update(&stmt)?;
        Ok(self)
    }
}
