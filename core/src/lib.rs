//! Core types for documenting a database schema as Markdown.
//!
//! This crate is engine-agnostic. It defines:
//!
//! - [`TableDescriptor`], [`ColumnDescriptor`], [`ForeignKeyDescriptor`] and
//!   [`SampleRow`]: the schema model read from a database catalog.
//! - [`SchemaIntrospector`]: the catalog capabilities a backend must offer.
//! - [`Documenter`]: walks every table through an introspector and renders
//!   a [`MarkdownDocument`], downgrading per-table failures to inline notes.
//! - [`StatementSplitter`]: splits schema scripts into statements, with the
//!   naive [`SemicolonSplitter`] as default.
//! - [`DocConfig`]: YAML-loadable run configuration.
//!
//! # Example
//!
//! ```
//! use schema_doc_core::*;
//!
//! let table = TableDescriptor {
//!     name: "empresa".into(),
//!     columns: vec![
//!         ColumnDescriptor::new("id", "INTEGER"),
//!         ColumnDescriptor::new("nome", "TEXT"),
//!     ],
//!     primary_key: vec!["id".into()],
//!     foreign_keys: vec![],
//! };
//! let sample = SampleRow::new(vec![
//!     ("id".into(), SampleValue::Integer(1)),
//!     ("nome".into(), SampleValue::Text("OpenAI".into())),
//! ]);
//!
//! let renderer = MarkdownRenderer::new("exemplo_sqlite", Language::English);
//! let doc = renderer.render(&[TableOutcome::Documented { table, sample: Some(sample) }]);
//! assert!(doc.to_string().contains("| 1 | OpenAI |"));
//! ```

mod bootstrap;
mod config;
mod document;
mod error;
mod introspect;
mod render;
mod split;
mod types;

pub use bootstrap::DEFAULT_SCHEMA_SQL;
pub use config::{DEFAULT_DATABASE, DocConfig};
pub use document::{Documenter, collect_tables};
pub use error::{ConfigError, DocumentError, Result};
pub use introspect::{SampleRanking, SchemaIntrospector};
pub use render::{
    DOCUMENT_FILE_NAME, Labels, Language, MARKDOWN_MEDIA_TYPE, MarkdownArtifact,
    MarkdownDocument, MarkdownRenderer,
};
pub use split::{SemicolonSplitter, StatementSplitter};
pub use types::*;
