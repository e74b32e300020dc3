use super::{EntityBuilder, Field, Triggers};

use indexmap::IndexMap;

/// The validated mapping of one entity: its table, its columns keyed by
/// attribute name, and its single primary key.
///
/// An `Entity` only comes out of [`EntityBuilder::build`], which guarantees
/// exactly one primary key. It is never mutated afterwards and is shared
/// between threads behind an `Arc`.
#[derive(Debug)]
pub struct Entity {
    pub(super) name: String,
    pub(super) table_name: String,

    /// Attribute name to field, in declaration order.
    pub(super) mapping: IndexMap<String, Field>,

    /// Index of the primary key within `mapping`.
    pub(super) primary_key: usize,

    pub(super) triggers: Triggers,
}

impl Entity {
    pub fn builder(name: impl Into<String>) -> EntityBuilder {
        EntityBuilder::new(name)
    }

    /// The entity name, as declared.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn mapping(&self) -> &IndexMap<String, Field> {
        &self.mapping
    }

    /// Iterates `(attribute, field)` pairs in declaration order.
    pub fn fields(&self) -> impl ExactSizeIterator<Item = (&str, &Field)> + '_ {
        self.mapping.iter().map(|(attr, field)| (attr.as_str(), field))
    }

    pub fn field(&self, attr: &str) -> Option<&Field> {
        self.mapping.get(attr)
    }

    pub fn contains(&self, attr: &str) -> bool {
        self.mapping.contains_key(attr)
    }

    pub fn primary_key(&self) -> &Field {
        &self.mapping[self.primary_key]
    }

    /// The attribute name holding the primary key.
    pub fn primary_key_attr(&self) -> &str {
        self.mapping
            .get_index(self.primary_key)
            .map(|(attr, _)| attr.as_str())
            .unwrap_or_default()
    }

    pub fn primary_key_column(&self) -> &str {
        self.primary_key().expect_column_name()
    }

    /// Finds the attribute mapped to a column name.
    pub fn attr_for_column(&self, column: &str) -> Option<&str> {
        self.mapping
            .iter()
            .find(|(_, field)| field.column_name() == Some(column))
            .map(|(attr, _)| attr.as_str())
    }

    /// Fields sorted by the order in which they were constructed.
    pub fn fields_by_declaration(&self) -> Vec<&Field> {
        let mut fields: Vec<_> = self.mapping.values().collect();
        fields.sort_by_key(|field| field.order());
        fields
    }

    pub fn triggers(&self) -> &Triggers {
        &self.triggers
    }
}
