use super::{Entity, Field, Trigger, Triggers};
use crate::{Error, Result};

use indexmap::IndexMap;
use std::sync::Arc;

/// Collects an entity's declared attributes and turns them into a validated
/// [`Entity`].
///
/// ```
/// use tablemap_core::{Entity, Field};
///
/// let user = Entity::builder("User")
///     .field("id", Field::integer().primary_key())
///     .field("name", Field::string())
///     .build()
///     .unwrap();
///
/// assert_eq!(user.table_name(), "user");
/// assert_eq!(user.primary_key_column(), "id");
/// ```
pub struct EntityBuilder {
    name: String,

    /// Explicit table name. Defaults to the lower-cased entity name.
    table_name: Option<String>,

    /// If set, prefix the table name with this string
    table_name_prefix: Option<String>,

    /// Declared attributes, duplicates included; `build` rejects them.
    attrs: Vec<(String, Field)>,

    triggers: Triggers,
}

impl EntityBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table_name: None,
            table_name_prefix: None,
            attrs: vec![],
            triggers: Triggers::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Overrides the table name.
    pub fn table(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = Some(table_name.into());
        self
    }

    pub fn table_name_prefix(mut self, prefix: &str) -> Self {
        self.table_name_prefix = Some(prefix.to_string());
        self
    }

    /// Declares a mapped attribute.
    pub fn field(mut self, attr: impl Into<String>, field: Field) -> Self {
        self.attrs.push((attr.into(), field));
        self
    }

    pub fn pre_insert(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.triggers.pre_insert = Some(Arc::new(hook) as Trigger);
        self
    }

    pub fn pre_update(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.triggers.pre_update = Some(Arc::new(hook) as Trigger);
        self
    }

    pub fn pre_delete(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.triggers.pre_delete = Some(Arc::new(hook) as Trigger);
        self
    }

    /// Scans the declared attributes and builds the entity.
    ///
    /// Fails if the entity declares no primary key, more than one primary
    /// key, the same attribute twice, or two attributes mapped to the same
    /// column.
    pub fn build(self) -> Result<Arc<Entity>> {
        let EntityBuilder {
            name,
            table_name,
            table_name_prefix,
            attrs,
            triggers,
        } = self;

        if name.is_empty() {
            return Err(Error::invalid_schema("entity name must not be empty"));
        }

        log::info!("scan mapping {name}");

        let mut mapping: IndexMap<String, Field> = IndexMap::with_capacity(attrs.len());
        let mut primary_key: Option<(usize, String)> = None;

        for (attr, mut field) in attrs {
            if mapping.contains_key(&attr) {
                return Err(Error::invalid_schema(format!(
                    "attribute `{attr}` is declared more than once in entity `{name}`"
                )));
            }

            field.assign_name(&attr);

            let column = field.expect_column_name();
            if let Some((other, _)) = mapping
                .iter()
                .find(|(_, existing)| existing.column_name() == Some(column))
            {
                return Err(Error::invalid_schema(format!(
                    "attributes `{other}` and `{attr}` both map to column `{column}` in entity `{name}`"
                )));
            }

            if field.is_primary_key() {
                if field.kind().is_version() {
                    return Err(Error::invalid_schema(format!(
                        "version field `{attr}` cannot be the primary key of entity `{name}`"
                    )));
                }

                if let Some((_, existing)) = &primary_key {
                    return Err(Error::invalid_schema(format!(
                        "cannot define more than one primary key in entity `{name}`; \
                         found `{existing}` and `{attr}`"
                    )));
                }

                let coercion = field.coerce_primary_key();
                if coercion.updatable {
                    log::warn!("primary key `{name}.{attr}` changed to non-updatable");
                }
                if coercion.nullable {
                    log::warn!("primary key `{name}.{attr}` changed to non-nullable");
                }

                primary_key = Some((mapping.len(), attr.clone()));
            }

            log::debug!("found mapping {attr} => {field}");
            mapping.insert(attr, field);
        }

        let Some((primary_key, _)) = primary_key else {
            return Err(Error::invalid_schema(format!(
                "primary key not defined in entity `{name}`"
            )));
        };

        let mut table_name = table_name.unwrap_or_else(|| name.to_lowercase());
        if let Some(prefix) = table_name_prefix {
            table_name.insert_str(0, &prefix);
        }

        Ok(Arc::new(Entity {
            name,
            table_name,
            mapping,
            primary_key,
            triggers,
        }))
    }
}
