//! Catalog access needed to document a database.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::types::{ColumnDescriptor, ForeignKeyDescriptor, SampleRow};

/// How the most complete row of a table is selected.
///
/// Both strategies score a row by its number of non-NULL columns and take
/// the highest; they differ only in where the scoring runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleRanking {
    /// Rank inside the database with an `ORDER BY ... DESC LIMIT 1` query.
    #[default]
    Query,
    /// Fetch every row and score them in process.
    Scan,
}

/// Read access to a database's metadata catalog.
///
/// Implemented per engine. The [`Documenter`](crate::Documenter) only talks
/// to the database through this trait.
pub trait SchemaIntrospector {
    type Error: Display;

    /// Lists user tables in the order the catalog reports them.
    fn table_names(&self) -> Result<Vec<String>, Self::Error>;

    /// Columns of `table` in declaration order.
    fn columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>, Self::Error>;

    /// Primary key columns of `table`, ordered by key position.
    fn primary_key(&self, table: &str) -> Result<Vec<String>, Self::Error>;

    fn foreign_keys(&self, table: &str) -> Result<Vec<ForeignKeyDescriptor>, Self::Error>;

    /// The row of `table` with the most non-NULL values among `columns`,
    /// or `None` when the table is empty.
    fn most_complete_row(
        &self,
        table: &str,
        columns: &[ColumnDescriptor],
    ) -> Result<Option<SampleRow>, Self::Error>;
}
