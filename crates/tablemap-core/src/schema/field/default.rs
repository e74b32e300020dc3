use crate::stmt::Value;

use std::{fmt, sync::Arc};

/// How a field produces its default value.
#[derive(Clone)]
pub enum FieldDefault {
    /// A fixed value, cloned on every read.
    Value(Value),

    /// A producer invoked on every read, for non-deterministic defaults such
    /// as timestamps.
    Producer(Arc<dyn Fn() -> Value + Send + Sync>),
}

impl FieldDefault {
    pub fn producer(f: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        FieldDefault::Producer(Arc::new(f))
    }

    /// Evaluates the default. Producers are called again each time; nothing
    /// is cached.
    pub fn eval(&self) -> Value {
        match self {
            FieldDefault::Value(value) => value.clone(),
            FieldDefault::Producer(f) => f(),
        }
    }

    pub fn is_producer(&self) -> bool {
        matches!(self, FieldDefault::Producer(_))
    }
}

impl fmt::Debug for FieldDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldDefault::Value(value) => f.debug_tuple("Value").field(value).finish(),
            FieldDefault::Producer(_) => f.write_str("Producer(..)"),
        }
    }
}

impl fmt::Display for FieldDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldDefault::Value(value) => fmt::Display::fmt(value, f),
            FieldDefault::Producer(_) => f.write_str("<fn>"),
        }
    }
}
