//! Schema model produced by catalog introspection.
//!
//! These types are derived from the live database on every documentation
//! run and never persisted. Type labels are kept as the engine reports them
//! rather than parsed into a closed set, since every engine spells its
//! types differently.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DocumentError;

/// A single column as reported by the database catalog.
///
/// # Examples
///
/// ```
/// use schema_doc_core::ColumnDescriptor;
///
/// let col = ColumnDescriptor::new("id", "INTEGER");
/// assert_eq!(col.name, "id");
/// assert_eq!(col.type_label, "INTEGER");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name.
    pub name: String,
    /// Engine-reported type label, possibly empty for untyped columns.
    pub type_label: String,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, type_label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_label: type_label.into(),
        }
    }
}

/// A foreign key relationship from one table to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyDescriptor {
    /// Constrained columns in the owning table.
    pub columns: Vec<String>,
    /// Table the key points at.
    pub referenced_table: String,
    /// Columns in the referenced table, in the same order as `columns`.
    pub referenced_columns: Vec<String>,
}

/// Structural description of one table.
///
/// # Examples
///
/// ```
/// use schema_doc_core::{ColumnDescriptor, TableDescriptor};
///
/// let mut table = TableDescriptor::new("empresa");
/// table.columns.push(ColumnDescriptor::new("id", "INTEGER"));
/// table.primary_key.push("id".to_string());
///
/// assert!(table.has_primary_key());
/// assert!(table.foreign_keys.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDescriptor {
    pub name: String,
    /// Columns in declaration order.
    pub columns: Vec<ColumnDescriptor>,
    /// Primary key columns ordered by key position. Empty when the table has none.
    #[serde(default)]
    pub primary_key: Vec<String>,
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKeyDescriptor>,
}

impl TableDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            primary_key: Vec::new(),
            foreign_keys: Vec::new(),
        }
    }

    pub fn has_primary_key(&self) -> bool {
        !self.primary_key.is_empty()
    }
}

/// A single cell value read from a sample row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum SampleValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl SampleValue {
    pub fn is_null(&self) -> bool {
        matches!(self, SampleValue::Null)
    }
}

impl fmt::Display for SampleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleValue::Null => f.write_str("NULL"),
            SampleValue::Integer(v) => write!(f, "{v}"),
            SampleValue::Real(v) => write!(f, "{v}"),
            SampleValue::Text(v) => f.write_str(v),
            SampleValue::Blob(bytes) => write!(f, "<blob: {} bytes>", bytes.len()),
        }
    }
}

/// The representative row chosen for a table.
///
/// Cells are kept in result-set order so the rendered sample table lines up
/// with the query's column list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleRow {
    pub cells: Vec<(String, SampleValue)>,
}

impl SampleRow {
    pub fn new(cells: Vec<(String, SampleValue)>) -> Self {
        Self { cells }
    }

    /// Number of cells holding a non-NULL value.
    ///
    /// This is the completeness score rows are ranked by.
    ///
    /// ```
    /// use schema_doc_core::{SampleRow, SampleValue};
    ///
    /// let row = SampleRow::new(vec![
    ///     ("id".into(), SampleValue::Integer(3)),
    ///     ("nome".into(), SampleValue::Null),
    /// ]);
    /// assert_eq!(row.non_null_count(), 1);
    /// ```
    pub fn non_null_count(&self) -> usize {
        self.cells.iter().filter(|(_, v)| !v.is_null()).count()
    }

    /// Looks up a cell by column name.
    pub fn get(&self, column: &str) -> Option<&SampleValue> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }
}

/// Picks the row with the most non-NULL cells.
///
/// The first row reaching the highest score wins, so ties resolve to
/// whichever row the caller yields first.
pub fn most_complete_row<I>(rows: I) -> Option<SampleRow>
where
    I: IntoIterator<Item = SampleRow>,
{
    let mut best: Option<(usize, SampleRow)> = None;
    for row in rows {
        let score = row.non_null_count();
        if best.as_ref().is_none_or(|(best_score, _)| score > *best_score) {
            best = Some((score, row));
        }
    }
    best.map(|(_, row)| row)
}

/// Result of introspecting one table.
///
/// A failed table does not abort the document; it is carried through to
/// rendering as an inline note.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TableOutcome {
    Documented {
        table: TableDescriptor,
        /// `None` when the table has no rows (or no columns).
        sample: Option<SampleRow>,
    },
    Failed {
        table: String,
        #[serde(serialize_with = "serialize_error")]
        error: DocumentError,
    },
}

impl TableOutcome {
    pub fn table_name(&self) -> &str {
        match self {
            TableOutcome::Documented { table, .. } => &table.name,
            TableOutcome::Failed { table, .. } => table,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, TableOutcome::Failed { .. })
    }
}

fn serialize_error<S>(error: &DocumentError, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(error)
}
