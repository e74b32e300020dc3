#[macro_use]
mod fmt;
use fmt::ToSql;

mod delim;
use delim::Comma;

mod ident;
use ident::Ident;

mod params;
use params::Bind;
pub use params::{Params, Placeholder};

// Statement serializers
mod create_table;
mod statement;

use crate::Statement;

use tablemap_core::{stmt::Value, Entity};

/// Renders the statements of one entity.
///
/// Table and column names are taken from the entity's mapping. Every value
/// is bound as a `?` parameter; only the WHERE fragments passed to
/// [`Serializer::select_where`] are copied into the SQL text, and those are
/// expected to come from code, not from user input.
#[derive(Debug)]
pub struct Serializer<'a> {
    entity: &'a Entity,
}

struct Formatter<'a, P> {
    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Where to store parameters
    params: &'a mut P,
}

impl<'a> Serializer<'a> {
    pub fn new(entity: &'a Entity) -> Serializer<'a> {
        Serializer { entity }
    }

    fn table_name(&self) -> Ident<&'a str> {
        Ident(self.entity.table_name())
    }

    fn primary_key_column(&self) -> Ident<&'a str> {
        Ident(self.entity.primary_key_column())
    }
}

fn serialize(f: impl FnOnce(&mut Formatter<'_, Vec<Value>>)) -> Statement {
    let mut sql = String::new();
    let mut params = Vec::new();

    f(&mut Formatter {
        dst: &mut sql,
        params: &mut params,
    });

    log::trace!("serialized `{sql}` with {} params", params.len());
    Statement { sql, params }
}
