//! Schema documentation: collect every table, then render.
//!
//! Collection never fails because of a single table. Each table is
//! described independently and any error is kept as a
//! [`TableOutcome::Failed`] so the remaining tables still make it into the
//! document. Only failing to list tables aborts the run.

use tracing::{debug, info, warn};

use crate::error::{DocumentError, Result};
use crate::introspect::SchemaIntrospector;
use crate::render::{Language, MarkdownDocument, MarkdownRenderer};
use crate::types::{TableDescriptor, TableOutcome};

/// Produces Markdown documentation from a [`SchemaIntrospector`].
///
/// # Examples
///
/// ```no_run
/// use schema_doc_core::{Documenter, Language, SchemaIntrospector};
///
/// fn describe<I: SchemaIntrospector>(introspector: &I) -> String {
///     let documenter = Documenter::new("exemplo_sqlite", Language::English);
///     documenter.generate(introspector).unwrap().to_string()
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Documenter {
    renderer: MarkdownRenderer,
}

impl Documenter {
    pub fn new(title: impl Into<String>, language: Language) -> Self {
        Self {
            renderer: MarkdownRenderer::new(title, language),
        }
    }

    /// Introspects every table and renders the document.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Introspection`] if the table list cannot be
    /// read. Per-table failures are rendered inline.
    pub fn generate<I: SchemaIntrospector>(&self, introspector: &I) -> Result<MarkdownDocument> {
        let outcomes = collect_tables(introspector)?;
        Ok(self.renderer.render(&outcomes))
    }
}

/// Introspects every table in listing order.
///
/// # Errors
///
/// Returns [`DocumentError::Introspection`] if the table list cannot be read.
pub fn collect_tables<I: SchemaIntrospector>(introspector: &I) -> Result<Vec<TableOutcome>> {
    let names = introspector
        .table_names()
        .map_err(|e| DocumentError::Introspection(e.to_string()))?;
    debug!(tables = names.len(), "listed tables");

    let outcomes: Vec<TableOutcome> = names
        .into_iter()
        .map(|name| match describe_table(introspector, &name) {
            Ok(outcome) => outcome,
            Err(message) => {
                warn!(table = %name, %message, "table introspection failed");
                TableOutcome::Failed {
                    error: DocumentError::TableIntrospection {
                        table: name.clone(),
                        message,
                    },
                    table: name,
                }
            }
        })
        .collect();

    let failed = outcomes.iter().filter(|o| o.is_failed()).count();
    info!(tables = outcomes.len(), failed, "collected schema");
    Ok(outcomes)
}

fn describe_table<I: SchemaIntrospector>(
    introspector: &I,
    name: &str,
) -> std::result::Result<TableOutcome, String> {
    let columns = introspector.columns(name).map_err(|e| e.to_string())?;
    let primary_key = introspector.primary_key(name).map_err(|e| e.to_string())?;
    let foreign_keys = introspector.foreign_keys(name).map_err(|e| e.to_string())?;

    let sample = if columns.is_empty() {
        None
    } else {
        introspector
            .most_complete_row(name, &columns)
            .map_err(|e| e.to_string())?
    };
    debug!(
        table = name,
        columns = columns.len(),
        foreign_keys = foreign_keys.len(),
        has_sample = sample.is_some(),
        "described table"
    );

    Ok(TableOutcome::Documented {
        table: TableDescriptor {
            name: name.to_string(),
            columns,
            primary_key,
            foreign_keys,
        },
        sample,
    })
}
