//! SQLite backend for schema scripts and schema documentation.
//!
//! This crate executes user-supplied schema scripts atomically and reads
//! the SQLite catalog to feed the engine-agnostic
//! [`Documenter`](schema_doc_core::Documenter).
//!
//! # Architecture
//!
//! - **`target`**: connection targets and scoped connection opening
//! - **`executor`**: all-or-nothing script execution
//! - **`introspect`**: [`SchemaIntrospector`](schema_doc_core::SchemaIntrospector)
//!   over `sqlite_master` and the table-info pragmas
//! - **`convert`**: SQLite values to sample rows
//! - **`session`**: one-shot operations that own their connection
//!
//! # Quick start
//!
//! ```no_run
//! use schema_doc_core::{DEFAULT_SCHEMA_SQL, DocConfig};
//! use schema_doc_sqlite::{ConnectionTarget, document_database, execute_script};
//!
//! let target: ConnectionTarget = "meu_banco_teste.db".parse().unwrap();
//! execute_script(&target, DEFAULT_SCHEMA_SQL, false).unwrap();
//!
//! let document = document_database(&target, &DocConfig::default()).unwrap();
//! println!("{document}");
//! ```

mod convert;
mod error;
mod executor;
mod introspect;
mod session;
mod target;

pub use error::{Result, SqliteError};
pub use executor::{ExecutionReport, ScriptExecutor};
pub use introspect::SqliteIntrospector;
pub use session::{collect_schema, document_database, execute_script};
pub use target::{ConnectOptions, ConnectionTarget};
