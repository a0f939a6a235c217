//! Atomic execution of schema scripts.
//!
//! A script is split into statements by a [`StatementSplitter`] and every
//! statement runs inside one transaction. The first failing statement
//! aborts the run and the transaction is rolled back, so the database is
//! left exactly as it was before the call.
//!
//! Transaction-control statements (`BEGIN`, `COMMIT`, `END`, `ROLLBACK`)
//! would end that transaction early, so a script containing one is refused
//! before anything runs. `SAVEPOINT`, `RELEASE` and `ROLLBACK TO` are
//! allowed.
//!
//! # Example
//!
//! ```
//! use schema_doc_core::DEFAULT_SCHEMA_SQL;
//! use schema_doc_sqlite::ScriptExecutor;
//! use rusqlite::Connection;
//!
//! let mut conn = Connection::open_in_memory().unwrap();
//! let report = ScriptExecutor::new().execute(&mut conn, DEFAULT_SCHEMA_SQL).unwrap();
//! assert_eq!(report.statements_executed, 6);
//! ```

use rusqlite::Connection;
use schema_doc_core::{SemicolonSplitter, StatementSplitter};
use tracing::{debug, info, warn};

use crate::error::{Result, SqliteError};

/// Runs schema scripts atomically.
///
/// Generic over the splitter so smarter statement splitting can be plugged
/// in without touching transaction handling.
#[derive(Debug, Clone, Default)]
pub struct ScriptExecutor<S = SemicolonSplitter> {
    splitter: S,
}

impl ScriptExecutor {
    /// Executor using naive semicolon splitting.
    pub fn new() -> Self {
        Self {
            splitter: SemicolonSplitter,
        }
    }
}

impl<S: StatementSplitter> ScriptExecutor<S> {
    pub fn with_splitter(splitter: S) -> Self {
        Self { splitter }
    }

    /// Executes every statement of `script` in order, all-or-nothing.
    ///
    /// Statements that produce rows are stepped and their rows discarded.
    /// Comment-only statements are accepted and do nothing.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteError::ExecutionError`] naming the 1-based index of
    /// the failing or refused statement. Nothing from the script is
    /// committed. If a statement still manages to end the transaction (for
    /// instance a splitter that hands over several statements at once),
    /// execution stops with [`SqliteError::TransactionEnded`].
    pub fn execute(&self, conn: &mut Connection, script: &str) -> Result<ExecutionReport> {
        let statements = self.splitter.split(script);
        if let Some(index) = statements.iter().position(|s| is_transaction_control(s)) {
            return Err(SqliteError::ExecutionError {
                statement: index + 1,
                message: "transaction control statements are not allowed in a script".into(),
            });
        }

        let tx = conn.transaction()?;
        for (index, statement) in statements.iter().enumerate() {
            debug!(statement = index + 1, sql = %statement, "executing");
            tx.execute_batch(statement)
                .map_err(|e| SqliteError::ExecutionError {
                    statement: index + 1,
                    message: e.to_string(),
                })?;
            if tx.is_autocommit() {
                warn!(statement = index + 1, "script statement ended the transaction");
                return Err(SqliteError::TransactionEnded {
                    statement: index + 1,
                });
            }
        }

        tx.commit()?;
        info!(statements = statements.len(), "script committed");
        Ok(ExecutionReport {
            statements_executed: statements.len(),
        })
    }
}

/// Whether `statement` begins or ends a transaction.
///
/// Leading comments are skipped. `ROLLBACK TO` only unwinds a savepoint and
/// is not counted.
fn is_transaction_control(statement: &str) -> bool {
    let mut words = skip_comments(statement)
        .split(|c: char| c.is_whitespace() || c == ';')
        .filter(|w| !w.is_empty())
        .map(str::to_ascii_uppercase);
    match words.next().as_deref() {
        Some("BEGIN" | "COMMIT" | "END") => true,
        Some("ROLLBACK") => !words.take(2).any(|w| w == "TO"),
        _ => false,
    }
}

fn skip_comments(mut sql: &str) -> &str {
    loop {
        sql = sql.trim_start();
        if let Some(rest) = sql.strip_prefix("--") {
            sql = rest.split_once('\n').map_or("", |(_, tail)| tail);
        } else if let Some(rest) = sql.strip_prefix("/*") {
            sql = rest.split_once("*/").map_or("", |(_, tail)| tail);
        } else {
            return sql;
        }
    }
}

/// Outcome of a successful script execution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecutionReport {
    /// Number of statements run (and committed).
    pub statements_executed: usize,
}
