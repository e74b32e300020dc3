use super::{serialize, Formatter, Ident, Params, Serializer, ToSql};
use crate::Statement;

use tablemap_core::{Error, Field, Result};

/// `  <column> <ddl>[ not null],`
struct ColumnDef<'a>(&'a Field);

impl ToSql for ColumnDef<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let name = Ident(self.0.expect_column_name());
        let not_null = if self.0.is_nullable() { "" } else { " not null" };

        fmt!(f, "  ", name, " ", self.0.ddl_type(), not_null, ",\n");
    }
}

impl Serializer<'_> {
    /// Renders the `create table` statement for the entity. Columns appear in
    /// the order their fields were constructed, followed by the primary key
    /// constraint.
    ///
    /// Fails if a field has no DDL type.
    pub fn create_table(&self) -> Result<Statement> {
        let fields = self.entity.fields_by_declaration();

        if let Some(field) = fields.iter().find(|field| field.ddl_type().is_empty()) {
            return Err(Error::invalid_schema(format!(
                "no ddl in field `{}` of entity `{}`",
                field.expect_column_name(),
                self.entity.name()
            )));
        }

        let table = self.table_name();
        let pk = self.primary_key_column();

        Ok(serialize(|f| {
            fmt!(f, "create table ", table, " (\n");
            for field in fields {
                fmt!(f, ColumnDef(field));
            }
            fmt!(f, "  primary key(", pk, ")\n);");
        }))
    }
}
