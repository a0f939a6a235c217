//! Splitting a schema script into individual statements.
//!
//! The executor only sees the [`StatementSplitter`] trait, so a SQL-aware
//! splitter can replace [`SemicolonSplitter`] without touching transaction
//! handling.

/// Turns a multi-statement script into the statements to execute, in order.
pub trait StatementSplitter {
    /// Returns the non-empty statements of `script`, trimmed.
    fn split<'a>(&self, script: &'a str) -> Vec<&'a str>;
}

/// Splits on every `;`, trims each fragment and drops empty ones.
///
/// Semicolons inside string literals, quoted identifiers or trigger bodies
/// are treated as separators too. Scripts relying on those must use a
/// different splitter.
///
/// # Examples
///
/// ```
/// use schema_doc_core::{SemicolonSplitter, StatementSplitter};
///
/// let stmts = SemicolonSplitter.split("CREATE TABLE a (id INTEGER);\n\n  ; SELECT 1;  ");
/// assert_eq!(stmts, vec!["CREATE TABLE a (id INTEGER)", "SELECT 1"]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SemicolonSplitter;

impl StatementSplitter for SemicolonSplitter {
    fn split<'a>(&self, script: &'a str) -> Vec<&'a str> {
        script
            .split(';')
            .map(str::trim)
            .filter(|stmt| !stmt.is_empty())
            .collect()
    }
}
