mod default;
pub use default::FieldDefault;

mod kind;
pub use kind::FieldKind;

use crate::stmt::Value;

use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

/// Process-wide counter handing out declaration order to every constructed
/// field.
static NEXT_ORDER: AtomicU64 = AtomicU64::new(0);

/// Describes one mapped column.
///
/// Fields are built with one of the kind constructors ([`Field::integer`],
/// [`Field::string`], ...) and refined with chained setters. Setters always
/// win over the kind's defaults:
///
/// ```
/// use tablemap_core::Field;
///
/// let field = Field::string().ddl("varchar(50)").default("anonymous");
/// assert_eq!(field.ddl_type(), "varchar(50)");
/// ```
///
/// Once a field is handed to an [`EntityBuilder`](super::EntityBuilder), only
/// the scanner touches it: it fills in a missing name and normalizes primary
/// key flags.
#[derive(Debug, Clone)]
pub struct Field {
    /// The column name. When unset the scanner uses the attribute name.
    name: Option<String>,

    kind: FieldKind,

    default: FieldDefault,

    primary_key: bool,

    /// `None` until the field is declared nullable or not. Unset is treated
    /// as non-nullable.
    nullable: Option<bool>,

    updatable: bool,

    insertable: bool,

    /// Native column type expression, e.g. `bigint`.
    ddl: String,

    order: u64,
}

impl Field {
    /// A field with no kind-specific defaults: empty DDL and a null default.
    pub fn new() -> Field {
        Field::of_kind(FieldKind::Any)
    }

    pub fn string() -> Field {
        Field::of_kind(FieldKind::String)
    }

    pub fn integer() -> Field {
        Field::of_kind(FieldKind::Integer)
    }

    pub fn float() -> Field {
        Field::of_kind(FieldKind::Float)
    }

    pub fn boolean() -> Field {
        Field::of_kind(FieldKind::Boolean)
    }

    pub fn text() -> Field {
        Field::of_kind(FieldKind::Text)
    }

    pub fn blob() -> Field {
        Field::of_kind(FieldKind::Blob)
    }

    /// A `bigint` counter defaulting to `0`, intended for optimistic
    /// concurrency. Version fields can never be the primary key.
    pub fn version() -> Field {
        Field::of_kind(FieldKind::Version)
    }

    fn of_kind(kind: FieldKind) -> Field {
        Field {
            name: None,
            kind,
            default: FieldDefault::Value(kind.default_value()),
            primary_key: false,
            nullable: None,
            updatable: true,
            insertable: true,
            ddl: kind.default_ddl().to_string(),
            order: NEXT_ORDER.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Sets the column name.
    pub fn name(mut self, name: impl Into<String>) -> Field {
        self.name = Some(name.into());
        self
    }

    /// Sets a fixed default value.
    pub fn default(mut self, value: impl Into<Value>) -> Field {
        self.default = FieldDefault::Value(value.into());
        self
    }

    /// Sets a default producer, called every time a default is needed.
    pub fn default_with(mut self, f: impl Fn() -> Value + Send + Sync + 'static) -> Field {
        self.default = FieldDefault::producer(f);
        self
    }

    /// Marks the field as the entity's primary key.
    pub fn primary_key(mut self) -> Field {
        self.primary_key = true;
        self
    }

    pub fn nullable(mut self, nullable: bool) -> Field {
        self.nullable = Some(nullable);
        self
    }

    pub fn updatable(mut self, updatable: bool) -> Field {
        self.updatable = updatable;
        self
    }

    pub fn insertable(mut self, insertable: bool) -> Field {
        self.insertable = insertable;
        self
    }

    pub fn ddl(mut self, ddl: impl Into<String>) -> Field {
        self.ddl = ddl.into();
        self
    }
}

impl Field {
    /// The column name, once assigned.
    pub fn column_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The column name of a field that belongs to a built entity.
    ///
    /// # Panics
    ///
    /// Panics if the field has not been through the scanner and no name was
    /// declared.
    #[track_caller]
    pub fn expect_column_name(&self) -> &str {
        match &self.name {
            Some(name) => name,
            None => panic!("field has no column name; field={self}"),
        }
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Evaluates the default value. A producer default is invoked on every
    /// call.
    pub fn default_value(&self) -> Value {
        self.default.eval()
    }

    pub fn field_default(&self) -> &FieldDefault {
        &self.default
    }

    pub fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    /// Whether the column accepts null. Unset means not nullable.
    pub fn is_nullable(&self) -> bool {
        self.nullable.unwrap_or(false)
    }

    /// The nullability as declared, before any normalization.
    pub fn declared_nullable(&self) -> Option<bool> {
        self.nullable
    }

    pub fn is_updatable(&self) -> bool {
        self.updatable
    }

    pub fn is_insertable(&self) -> bool {
        self.insertable
    }

    pub fn ddl_type(&self) -> &str {
        &self.ddl
    }

    /// Position of this field's construction relative to every other field
    /// in the process.
    pub fn order(&self) -> u64 {
        self.order
    }

    pub(crate) fn assign_name(&mut self, name: &str) {
        if self.name.is_none() {
            self.name = Some(name.to_string());
        }
    }

    /// Forces primary key flags: a primary key is never updatable and never
    /// nullable. Returns the flags that were flipped from `true`.
    pub(crate) fn coerce_primary_key(&mut self) -> PrimaryKeyCoercion {
        let coercion = PrimaryKeyCoercion {
            updatable: self.updatable,
            nullable: self.nullable == Some(true),
        };
        self.updatable = false;
        self.nullable = Some(false);
        coercion
    }
}

pub(crate) struct PrimaryKeyCoercion {
    pub(crate) updatable: bool,
    pub(crate) nullable: bool,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<{}:{},{},default({}),",
            self.kind.type_name(),
            self.name.as_deref().unwrap_or(""),
            self.ddl,
            self.default
        )?;
        if self.is_nullable() {
            f.write_str("N")?;
        }
        if self.updatable {
            f.write_str("U")?;
        }
        if self.insertable {
            f.write_str("E")?;
        }
        f.write_str(">")
    }
}
