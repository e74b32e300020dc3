use super::{serialize, Bind, Comma, Formatter, Ident, Params, Serializer, ToSql};
use crate::Statement;

use tablemap_core::stmt::Value;

/// `<column>=?`
struct Assignment<'a>(&'a str, &'a Value);

impl ToSql for &Assignment<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, Ident(self.0), "=", Bind(self.1));
    }
}

impl Serializer<'_> {
    /// `select * from <table> where <pk>=?`
    pub fn select_by_key(&self, key: &Value) -> Statement {
        let table = self.table_name();
        let pk = self.primary_key_column();

        serialize(|f| fmt!(f, "select * from ", table, " where ", pk, "=", Bind(key)))
    }

    /// `select * from <table>`
    pub fn select_all(&self) -> Statement {
        let table = self.table_name();

        serialize(|f| fmt!(f, "select * from ", table))
    }

    /// `select * from <table> <clause>`, with `clause` copied verbatim and
    /// `params` bound in order.
    pub fn select_where(&self, clause: &str, params: &[Value]) -> Statement {
        let table = self.table_name();
        let clause = clause.trim();

        let mut stmt = serialize(|f| {
            fmt!(f, "select * from ", table);
            if !clause.is_empty() {
                fmt!(f, " ", clause);
            }
        });
        stmt.params.extend_from_slice(params);
        stmt
    }

    /// `select count(<pk>) from <table>`
    pub fn count(&self) -> Statement {
        let table = self.table_name();
        let pk = self.primary_key_column();

        serialize(|f| fmt!(f, "select count(", pk, ") from ", table))
    }

    /// `update <table> set <c1>=?, <c2>=? where <pk>=?`, binding the
    /// assignments in order and the key last.
    pub fn update(&self, assignments: &[(String, Value)], key: &Value) -> Statement {
        let table = self.table_name();
        let pk = self.primary_key_column();
        let assignments: Vec<_> = assignments
            .iter()
            .map(|(column, value)| Assignment(column, value))
            .collect();

        serialize(|f| {
            fmt!(
                f,
                "update ",
                table,
                " set ",
                Comma(&assignments),
                " where ",
                pk,
                "=",
                Bind(key)
            )
        })
    }

    /// `delete from <table> where <pk>=?`
    pub fn delete(&self, key: &Value) -> Statement {
        let table = self.table_name();
        let pk = self.primary_key_column();

        serialize(|f| fmt!(f, "delete from ", table, " where ", pk, "=", Bind(key)))
    }

    /// `insert into <table> (<c1>, <c2>) values (?, ?)`.
    ///
    /// This only needs a table name, so stores can render inserts without
    /// holding the entity.
    pub fn insert_into(table: &str, values: &[(String, Value)]) -> Statement {
        let columns = values.iter().map(|(column, _)| Ident(column.as_str()));
        let binds = values.iter().map(|(_, value)| Bind(value));

        serialize(|f| {
            fmt!(
                f,
                "insert into ",
                Ident(table),
                " (",
                Comma(columns),
                ") values (",
                Comma(binds),
                ")"
            )
        })
    }
}
