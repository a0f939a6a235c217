//! Catalog introspection for SQLite.
//!
//! Tables come from `sqlite_master`, columns and keys from the
//! `pragma_table_xinfo`, `pragma_table_info` and `pragma_foreign_key_list`
//! table-valued functions. Internal `sqlite_%` tables are skipped and tables
//! are listed by name.

use std::collections::BTreeMap;

use rusqlite::Connection;
use schema_doc_core::{
    ColumnDescriptor, ForeignKeyDescriptor, SampleRanking, SampleRow, SchemaIntrospector,
    most_complete_row,
};
use tracing::debug;

use crate::convert::{quote_identifier, sample_row};
use crate::error::{Result, SqliteError};

const TABLES_QUERY: &str = "SELECT name FROM sqlite_master \
     WHERE type = 'table' AND name NOT LIKE 'sqlite~_%' ESCAPE '~' \
     ORDER BY name";

/// `hidden` is 2 or 3 for generated columns, 1 for hidden virtual-table columns.
const COLUMNS_QUERY: &str =
    "SELECT name, type FROM pragma_table_xinfo(?1) WHERE hidden IN (0, 2, 3) ORDER BY cid";

const PRIMARY_KEY_QUERY: &str =
    "SELECT name FROM pragma_table_info(?1) WHERE pk > 0 ORDER BY pk";

const FOREIGN_KEYS_QUERY: &str = r#"SELECT id, "table", "from", "to"
    FROM pragma_foreign_key_list(?1)
    ORDER BY id, seq"#;

/// Reads schema metadata from a SQLite connection.
///
/// # Examples
///
/// ```
/// use rusqlite::Connection;
/// use schema_doc_core::{SampleRanking, SchemaIntrospector};
/// use schema_doc_sqlite::SqliteIntrospector;
///
/// let conn = Connection::open_in_memory().unwrap();
/// conn.execute_batch("CREATE TABLE empresa (id INTEGER PRIMARY KEY, nome TEXT NOT NULL);").unwrap();
///
/// let introspector = SqliteIntrospector::new(&conn, SampleRanking::Query);
/// assert_eq!(introspector.table_names().unwrap(), vec!["empresa"]);
/// assert_eq!(introspector.primary_key("empresa").unwrap(), vec!["id"]);
/// ```
pub struct SqliteIntrospector<'a> {
    conn: &'a Connection,
    ranking: SampleRanking,
}

impl<'a> SqliteIntrospector<'a> {
    pub fn new(conn: &'a Connection, ranking: SampleRanking) -> Self {
        Self { conn, ranking }
    }

    /// Ranks rows inside SQLite by their non-NULL column count.
    fn ranked_by_query(&self, table: &str, columns: &[ColumnDescriptor]) -> Result<Option<SampleRow>> {
        let score = columns
            .iter()
            .map(|c| {
                format!(
                    "CASE WHEN {} IS NOT NULL THEN 1 ELSE 0 END",
                    quote_identifier(&c.name)
                )
            })
            .collect::<Vec<_>>()
            .join(" + ");
        let sql = format!(
            "SELECT * FROM {} ORDER BY ({score}) DESC LIMIT 1",
            quote_identifier(table)
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let mut rows = stmt.query([])?;
        match rows.next()? {
            Some(row) => Ok(Some(sample_row(row, &names)?)),
            None => Ok(None),
        }
    }

    /// Fetches every row and scores them in process.
    fn ranked_by_scan(&self, table: &str) -> Result<Option<SampleRow>> {
        let sql = format!("SELECT * FROM {}", quote_identifier(table));
        let mut stmt = self.conn.prepare(&sql)?;
        let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let rows = stmt
            .query_map([], |row| sample_row(row, &names))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        debug!(table, rows = rows.len(), "scanned rows for sample");
        Ok(most_complete_row(rows))
    }
}

impl SchemaIntrospector for SqliteIntrospector<'_> {
    type Error = SqliteError;

    fn table_names(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(TABLES_QUERY)?;
        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(names)
    }

    fn columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>> {
        let mut stmt = self.conn.prepare(COLUMNS_QUERY)?;
        let columns = stmt
            .query_map([table], |row| {
                Ok(ColumnDescriptor {
                    name: row.get(0)?,
                    type_label: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(columns)
    }

    fn primary_key(&self, table: &str) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(PRIMARY_KEY_QUERY)?;
        let names = stmt
            .query_map([table], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(names)
    }

    /// Groups `pragma_foreign_key_list` rows by constraint id.
    ///
    /// A constraint declared without referenced columns points at the
    /// referenced table's primary key.
    fn foreign_keys(&self, table: &str) -> Result<Vec<ForeignKeyDescriptor>> {
        let mut stmt = self.conn.prepare(FOREIGN_KEYS_QUERY)?;
        let rows = stmt
            .query_map([table], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, Option<String>>(3)?,
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut grouped: BTreeMap<i64, (String, Vec<String>, Vec<Option<String>>)> =
            BTreeMap::new();
        for (id, referenced_table, from, to) in rows {
            let entry = grouped
                .entry(id)
                .or_insert_with(|| (referenced_table, Vec::new(), Vec::new()));
            entry.1.push(from);
            entry.2.push(to);
        }

        let mut foreign_keys = Vec::with_capacity(grouped.len());
        for (referenced_table, columns, targets) in grouped.into_values() {
            let referenced_columns = if targets.iter().all(Option::is_some) {
                targets.into_iter().flatten().collect()
            } else {
                self.primary_key(&referenced_table)?
            };
            foreign_keys.push(ForeignKeyDescriptor {
                columns,
                referenced_table,
                referenced_columns,
            });
        }
        Ok(foreign_keys)
    }

    fn most_complete_row(
        &self,
        table: &str,
        columns: &[ColumnDescriptor],
    ) -> Result<Option<SampleRow>> {
        if columns.is_empty() {
            return Ok(None);
        }
        match self.ranking {
            SampleRanking::Query => self.ranked_by_query(table, columns),
            SampleRanking::Scan => self.ranked_by_scan(table),
        }
    }
}

#[cfg(test)]
mod tests {
    use schema_doc_core::SampleValue;

    use super::*;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE parent (a INTEGER, b INTEGER, label, PRIMARY KEY (b, a));
            CREATE TABLE child (
                id INTEGER PRIMARY KEY,
                pa INTEGER,
                pb INTEGER,
                owner INTEGER REFERENCES parent,
                FOREIGN KEY (pb, pa) REFERENCES parent(b, a)
            );
            CREATE TABLE "odd ""name""" (x TEXT);
            INSERT INTO "odd ""name""" VALUES ('only');
            "#,
        )
        .unwrap();
        conn
    }

    #[test]
    fn test_table_names_sorted_and_filtered() {
        let conn = setup();
        conn.execute_batch("CREATE TABLE auto (id INTEGER PRIMARY KEY AUTOINCREMENT);")
            .unwrap();
        let introspector = SqliteIntrospector::new(&conn, SampleRanking::Query);
        let names = introspector.table_names().unwrap();
        // sqlite_sequence exists now but is internal.
        assert_eq!(names, vec!["auto", "child", "odd \"name\"", "parent"]);
    }

    #[test]
    fn test_columns_with_untyped_column() {
        let conn = setup();
        let introspector = SqliteIntrospector::new(&conn, SampleRanking::Query);
        let columns = introspector.columns("parent").unwrap();
        assert_eq!(
            columns,
            vec![
                ColumnDescriptor::new("a", "INTEGER"),
                ColumnDescriptor::new("b", "INTEGER"),
                ColumnDescriptor::new("label", ""),
            ]
        );
    }

    #[test]
    fn test_generated_columns_are_listed() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE g (
                a INTEGER,
                b INTEGER GENERATED ALWAYS AS (a * 2) VIRTUAL,
                c TEXT GENERATED ALWAYS AS ('n' || a) STORED
            );
            INSERT INTO g (a) VALUES (1);",
        )
        .unwrap();
        let introspector = SqliteIntrospector::new(&conn, SampleRanking::Query);
        let columns = introspector.columns("g").unwrap();
        assert_eq!(
            columns,
            vec![
                ColumnDescriptor::new("a", "INTEGER"),
                ColumnDescriptor::new("b", "INTEGER"),
                ColumnDescriptor::new("c", "TEXT"),
            ]
        );

        let row = introspector.most_complete_row("g", &columns).unwrap().unwrap();
        let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(row.column_names().collect::<Vec<_>>(), names);
        assert_eq!(row.get("b"), Some(&SampleValue::Integer(2)));
    }

    #[test]
    fn test_composite_primary_key_order() {
        let conn = setup();
        let introspector = SqliteIntrospector::new(&conn, SampleRanking::Query);
        assert_eq!(introspector.primary_key("parent").unwrap(), vec!["b", "a"]);
        assert!(introspector.primary_key("odd \"name\"").unwrap().is_empty());
    }

    #[test]
    fn test_foreign_keys_grouped_and_resolved() {
        let conn = setup();
        let introspector = SqliteIntrospector::new(&conn, SampleRanking::Query);
        let mut fks = introspector.foreign_keys("child").unwrap();
        fks.sort_by(|x, y| x.columns.cmp(&y.columns));

        assert_eq!(fks.len(), 2);
        assert_eq!(fks[0].columns, vec!["owner"]);
        assert_eq!(fks[0].referenced_table, "parent");
        assert_eq!(fks[0].referenced_columns, vec!["b", "a"]);
        assert_eq!(fks[1].columns, vec!["pb", "pa"]);
        assert_eq!(fks[1].referenced_columns, vec!["b", "a"]);
    }

    #[test]
    fn test_sample_with_quoted_table_name() {
        let conn = setup();
        for ranking in [SampleRanking::Query, SampleRanking::Scan] {
            let introspector = SqliteIntrospector::new(&conn, ranking);
            let columns = introspector.columns("odd \"name\"").unwrap();
            let row = introspector
                .most_complete_row("odd \"name\"", &columns)
                .unwrap()
                .unwrap();
            assert_eq!(row.get("x"), Some(&SampleValue::Text("only".into())));
        }
    }

    #[test]
    fn test_sample_none_for_empty_table() {
        let conn = setup();
        for ranking in [SampleRanking::Query, SampleRanking::Scan] {
            let introspector = SqliteIntrospector::new(&conn, ranking);
            let columns = introspector.columns("parent").unwrap();
            assert!(introspector.most_complete_row("parent", &columns).unwrap().is_none());
        }
    }

    #[test]
    fn test_missing_table_sample_fails() {
        let conn = setup();
        let introspector = SqliteIntrospector::new(&conn, SampleRanking::Query);
        let columns = vec![ColumnDescriptor::new("x", "TEXT")];
        let err = introspector.most_complete_row("gone", &columns).unwrap_err();
        assert!(err.to_string().contains("no such table"));
    }
}
