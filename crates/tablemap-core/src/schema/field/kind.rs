use crate::stmt::Value;

/// The family a [`Field`](super::Field) was declared with.
///
/// Each kind supplies the default value and DDL type used when the caller
/// does not set them explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// A field with no variant-specific defaults.
    Any,
    String,
    Integer,
    Float,
    Boolean,
    Text,
    Blob,
    /// An optimistic-concurrency counter column. Declared, but no update path
    /// reads, compares or increments it.
    Version,
}

impl FieldKind {
    /// The type name shown when a field is displayed.
    pub fn type_name(self) -> &'static str {
        match self {
            FieldKind::Any => "Field",
            FieldKind::String => "StringField",
            FieldKind::Integer => "IntegerField",
            FieldKind::Float => "FloatField",
            FieldKind::Boolean => "BooleanField",
            FieldKind::Text => "TextField",
            FieldKind::Blob => "BlobField",
            FieldKind::Version => "VersionField",
        }
    }

    pub(super) fn default_ddl(self) -> &'static str {
        match self {
            FieldKind::Any => "",
            FieldKind::String => "varchar(255)",
            FieldKind::Integer | FieldKind::Version => "bigint",
            FieldKind::Float => "real",
            FieldKind::Boolean => "bool",
            FieldKind::Text => "text",
            FieldKind::Blob => "blob",
        }
    }

    pub(super) fn default_value(self) -> Value {
        match self {
            FieldKind::Any => Value::Null,
            FieldKind::String | FieldKind::Text => Value::String(String::new()),
            FieldKind::Integer | FieldKind::Version => Value::I64(0),
            FieldKind::Float => Value::F64(0.0),
            FieldKind::Boolean => Value::Bool(false),
            FieldKind::Blob => Value::Bytes(vec![]),
        }
    }

    pub fn is_version(self) -> bool {
        matches!(self, FieldKind::Version)
    }

    /// Adjusts a value read back from a store to this kind.
    ///
    /// Stores without a native boolean type hand back `0`/`1`, and a real
    /// column may return a whole number as an integer.
    pub fn normalize(self, value: Value) -> Value {
        match (self, value) {
            (FieldKind::Boolean, Value::I64(v)) => Value::Bool(v != 0),
            (FieldKind::Float, Value::I64(v)) => Value::F64(v as f64),
            (_, value) => value,
        }
    }
}
