//! One-shot operations that own their connection.
//!
//! Each function opens a connection for its target, does its work and drops
//! the connection before returning, on success and on failure alike.

use schema_doc_core::{
    DocConfig, DocumentError, Documenter, MarkdownDocument, SampleRanking, TableOutcome,
    collect_tables,
};
use tracing::info;

use crate::error::{Result, SqliteError};
use crate::executor::{ExecutionReport, ScriptExecutor};
use crate::introspect::SqliteIntrospector;
use crate::target::{ConnectOptions, ConnectionTarget};

/// Runs `script` against `target` in a single transaction.
///
/// # Errors
///
/// Returns [`SqliteError::OpenError`] if the database cannot be opened and
/// [`SqliteError::ExecutionError`] if any statement fails, in which case
/// nothing was committed.
pub fn execute_script(
    target: &ConnectionTarget,
    script: &str,
    foreign_keys: bool,
) -> Result<ExecutionReport> {
    let mut conn = target.open(ConnectOptions {
        read_only: false,
        foreign_keys,
    })?;
    let report = ScriptExecutor::new().execute(&mut conn, script)?;
    info!(db = %target, statements = report.statements_executed, "database reset");
    Ok(report)
}

/// Introspects every table of `target`.
///
/// # Errors
///
/// Returns [`DocumentError::Introspection`] (wrapped) when the database
/// cannot be opened or its tables cannot be listed.
pub fn collect_schema(
    target: &ConnectionTarget,
    ranking: SampleRanking,
) -> Result<Vec<TableOutcome>> {
    let conn = open_for_introspection(target)?;
    let introspector = SqliteIntrospector::new(&conn, ranking);
    Ok(collect_tables(&introspector)?)
}

/// Generates the Markdown document for `target` as configured.
///
/// # Errors
///
/// Returns [`DocumentError::Introspection`] (wrapped) when the database
/// cannot be opened or its tables cannot be listed. Failures on individual
/// tables are rendered inline instead.
pub fn document_database(
    target: &ConnectionTarget,
    config: &DocConfig,
) -> Result<MarkdownDocument> {
    let conn = open_for_introspection(target)?;
    let introspector = SqliteIntrospector::new(&conn, config.sample_ranking);
    let documenter = Documenter::new(config.document_title(), config.language);
    let document = documenter.generate(&introspector)?;
    info!(db = %target, tables = document.sections.len(), "document generated");
    Ok(document)
}

fn open_for_introspection(target: &ConnectionTarget) -> Result<rusqlite::Connection> {
    target
        .open(ConnectOptions {
            read_only: true,
            foreign_keys: false,
        })
        .map_err(|e| match e {
            SqliteError::OpenError { message, .. } => {
                SqliteError::DocumentError(DocumentError::Introspection(message))
            }
            other => other,
        })
}
