//! Markdown rendering of introspected tables.
//!
//! A document is a `## Database: <name>` header followed by one section per
//! table, in the order the tables were listed. Every section has the same
//! shape:
//!
//! ```text
//! ### Table: `cliente`
//!
//! | Column | Type |
//! |--------|------|
//! | id | INTEGER |
//!
//! **Primary Key:** `id`
//!
//! **Relationships (foreign keys):**
//! - `empresa_id` → `empresa(id)`
//!
//! **Sample data:**
//!
//! | id | ... |
//! ```
//!
//! The primary key, relationship and sample blocks are omitted when empty.
//! A table with no rows gets a "no data available" marker instead of the
//! sample block, and a table that failed introspection gets a single error
//! note under its heading.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{SampleRow, TableDescriptor, TableOutcome};

/// File name offered for the downloadable document.
pub const DOCUMENT_FILE_NAME: &str = "documentacao_banco.md";

/// Media type of the downloadable document.
pub const MARKDOWN_MEDIA_TYPE: &str = "text/markdown";

/// Language of the fixed labels in the rendered document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "pt")]
    Portuguese,
}

impl Language {
    pub fn labels(self) -> &'static Labels {
        match self {
            Language::English => &ENGLISH,
            Language::Portuguese => &PORTUGUESE,
        }
    }
}

/// Fixed strings used when rendering a document.
#[derive(Debug)]
pub struct Labels {
    pub database: &'static str,
    pub table: &'static str,
    pub column: &'static str,
    pub column_type: &'static str,
    pub primary_key: &'static str,
    pub foreign_keys: &'static str,
    pub sample: &'static str,
    pub no_data: &'static str,
    pub table_error: &'static str,
}

static ENGLISH: Labels = Labels {
    database: "Database",
    table: "Table",
    column: "Column",
    column_type: "Type",
    primary_key: "Primary Key",
    foreign_keys: "Relationships (foreign keys)",
    sample: "Sample data",
    no_data: "No data available",
    table_error: "error processing table",
};

static PORTUGUESE: Labels = Labels {
    database: "Banco de Dados",
    table: "Tabela",
    column: "Coluna",
    column_type: "Tipo",
    primary_key: "Chave Primária",
    foreign_keys: "Relacionamentos (chaves estrangeiras)",
    sample: "Exemplo de dados",
    no_data: "Sem dados disponíveis",
    table_error: "Erro ao processar tabela",
};

/// A rendered document: a header plus one section per table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownDocument {
    pub header: String,
    pub sections: Vec<String>,
}

impl MarkdownDocument {
    /// Wraps the document for download under [`DOCUMENT_FILE_NAME`].
    pub fn into_artifact(self) -> MarkdownArtifact {
        MarkdownArtifact {
            file_name: DOCUMENT_FILE_NAME.to_string(),
            media_type: MARKDOWN_MEDIA_TYPE.to_string(),
            content: self.to_string(),
        }
    }
}

impl fmt::Display for MarkdownDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.header)?;
        for section in &self.sections {
            f.write_str("\n")?;
            f.write_str(section)?;
        }
        Ok(())
    }
}

/// A document packaged as a downloadable file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkdownArtifact {
    pub file_name: String,
    pub media_type: String,
    pub content: String,
}

/// Renders table outcomes into a [`MarkdownDocument`].
///
/// # Examples
///
/// ```
/// use schema_doc_core::{Language, MarkdownRenderer};
///
/// let renderer = MarkdownRenderer::new("exemplo_sqlite", Language::English);
/// let doc = renderer.render(&[]);
/// assert_eq!(doc.to_string(), "## Database: exemplo_sqlite\n");
/// ```
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    title: String,
    labels: &'static Labels,
}

impl MarkdownRenderer {
    pub fn new(title: impl Into<String>, language: Language) -> Self {
        Self {
            title: title.into(),
            labels: language.labels(),
        }
    }

    pub fn render(&self, outcomes: &[TableOutcome]) -> MarkdownDocument {
        MarkdownDocument {
            header: format!("## {}: {}\n", self.labels.database, self.title),
            sections: outcomes.iter().map(|o| self.section(o)).collect(),
        }
    }

    /// Renders the section for a single table.
    pub fn section(&self, outcome: &TableOutcome) -> String {
        let labels = self.labels;
        let mut lines = vec![format!("### {}: `{}`\n", labels.table, outcome.table_name())];

        match outcome {
            TableOutcome::Documented { table, sample } => {
                self.push_table_body(&mut lines, table, sample.as_ref());
            }
            TableOutcome::Failed { table, error } => {
                lines.push(format!(
                    "*{} `{table}`: {}*",
                    labels.table_error,
                    error.message()
                ));
            }
        }

        lines.push(String::new());
        lines.join("\n")
    }

    fn push_table_body(
        &self,
        lines: &mut Vec<String>,
        table: &TableDescriptor,
        sample: Option<&SampleRow>,
    ) {
        let labels = self.labels;

        lines.push(format!(
            "| {} | {} |\n|{}|{}|",
            labels.column,
            labels.column_type,
            "-".repeat(labels.column.chars().count() + 2),
            "-".repeat(labels.column_type.chars().count() + 2),
        ));
        for col in &table.columns {
            let type_label = if col.type_label.is_empty() {
                "NULL"
            } else {
                col.type_label.as_str()
            };
            lines.push(format!(
                "| {} | {} |",
                escape_cell(&col.name),
                escape_cell(type_label)
            ));
        }

        if table.has_primary_key() {
            lines.push(format!(
                "\n**{}:** `{}`\n",
                labels.primary_key,
                table.primary_key.join(", ")
            ));
        }

        if !table.foreign_keys.is_empty() {
            lines.push(format!("\n**{}:**", labels.foreign_keys));
            for fk in &table.foreign_keys {
                lines.push(format!(
                    "- `{}` → `{}({})`",
                    fk.columns.join(", "),
                    fk.referenced_table,
                    fk.referenced_columns.join(", ")
                ));
            }
        }

        if table.columns.is_empty() {
            return;
        }
        match sample {
            Some(row) => {
                lines.push(format!("\n**{}:**\n", labels.sample));
                lines.push(sample_table(row));
            }
            None => lines.push(format!("\n*{}*", labels.no_data)),
        }
    }
}

/// Renders a one-row pipe table.
fn sample_table(row: &SampleRow) -> String {
    let headers: Vec<String> = row.column_names().map(escape_cell).collect();
    let separators: Vec<String> = headers
        .iter()
        .map(|h| "-".repeat(h.chars().count().max(1) + 2))
        .collect();
    let values: Vec<String> = row
        .cells
        .iter()
        .map(|(_, value)| escape_cell(&value.to_string()))
        .collect();

    format!(
        "| {} |\n|{}|\n| {} |",
        headers.join(" | "),
        separators.join("|"),
        values.join(" | ")
    )
}

/// Keeps a value on one table row: pipes are escaped, line breaks flattened.
fn escape_cell(raw: &str) -> String {
    raw.replace('|', "\\|").replace("\r\n", " ").replace(['\n', '\r'], " ")
}
