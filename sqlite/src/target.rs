//! Connection targets and scoped connection opening.
//!
//! Every operation opens its own [`Connection`] from a [`ConnectionTarget`]
//! and drops it when done, so nothing is shared between user actions.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use rusqlite::{Connection, OpenFlags};
use tracing::debug;

use crate::error::{Result, SqliteError};

/// URL forms accepted in front of a file path, e.g. `sqlite:///app.db`.
const URL_PREFIXES: [&str; 2] = ["sqlite+aiosqlite:///", "sqlite:///"];

/// Where a connection points.
///
/// # Examples
///
/// ```
/// use schema_doc_sqlite::ConnectionTarget;
///
/// let target: ConnectionTarget = ":memory:".parse().unwrap();
/// assert_eq!(target, ConnectionTarget::Memory);
///
/// let target: ConnectionTarget = "meu_banco_teste.db".parse().unwrap();
/// assert_eq!(target.to_string(), "meu_banco_teste.db");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionTarget {
    File(PathBuf),
    Memory,
}

impl FromStr for ConnectionTarget {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        let s = URL_PREFIXES
            .iter()
            .find_map(|prefix| s.strip_prefix(prefix))
            .unwrap_or(s);
        if s.is_empty() || s == ":memory:" {
            Ok(ConnectionTarget::Memory)
        } else {
            Ok(ConnectionTarget::File(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for ConnectionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionTarget::File(path) => write!(f, "{}", path.display()),
            ConnectionTarget::Memory => f.write_str(":memory:"),
        }
    }
}

/// How a connection is opened.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectOptions {
    /// Open without write access. Fails instead of creating a missing file.
    pub read_only: bool,
    /// Value of `PRAGMA foreign_keys` for the connection. Always applied,
    /// since the bundled library may be compiled with enforcement on.
    pub foreign_keys: bool,
}

impl ConnectionTarget {
    /// Opens a new connection.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteError::OpenError`] if SQLite refuses the target, e.g.
    /// a missing file opened read-only.
    pub fn open(&self, options: ConnectOptions) -> Result<Connection> {
        let mut flags = OpenFlags::SQLITE_OPEN_URI | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        if options.read_only {
            flags |= OpenFlags::SQLITE_OPEN_READ_ONLY;
        } else {
            flags |= OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE;
        }

        let opened = match self {
            ConnectionTarget::File(path) => Connection::open_with_flags(path, flags),
            ConnectionTarget::Memory => Connection::open_in_memory_with_flags(flags),
        };
        let conn = opened.map_err(|e| SqliteError::OpenError {
            target: self.to_string(),
            message: e.to_string(),
        })?;

        conn.execute_batch(if options.foreign_keys {
            "PRAGMA foreign_keys = ON;"
        } else {
            "PRAGMA foreign_keys = OFF;"
        })?;
        debug!(
            db = %self,
            read_only = options.read_only,
            foreign_keys = options.foreign_keys,
            "opened connection"
        );
        Ok(conn)
    }
}
