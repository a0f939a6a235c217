//! Configuration for documentation and script execution runs.
//!
//! Every field has a default, so a YAML file only needs the keys it wants
//! to change.
//!
//! # Example YAML
//!
//! ```yaml
//! database: meu_banco_teste.db
//! title: exemplo_sqlite
//! language: pt
//! output: documentacao_banco.md
//! sample_ranking: query
//! foreign_keys: false
//! ```

use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::introspect::SampleRanking;
use crate::render::{DOCUMENT_FILE_NAME, Language};

/// Database file used when nothing else is configured.
pub const DEFAULT_DATABASE: &str = "meu_banco_teste.db";

/// Settings shared by the executor and the documenter.
///
/// # Examples
///
/// ```
/// use schema_doc_core::{DocConfig, Language};
///
/// let config: DocConfig = serde_yaml::from_str("language: pt").unwrap();
/// assert_eq!(config.language, Language::Portuguese);
/// assert_eq!(config.output.to_str(), Some("documentacao_banco.md"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocConfig {
    /// Database file, or `:memory:`.
    pub database: String,
    /// Name shown in the document heading. Defaults to the database file stem.
    pub title: Option<String>,
    pub language: Language,
    /// Where the generated document is written.
    pub output: PathBuf,
    pub sample_ranking: SampleRanking,
    /// Enforce foreign key constraints while executing scripts.
    pub foreign_keys: bool,
}

impl Default for DocConfig {
    fn default() -> Self {
        Self {
            database: DEFAULT_DATABASE.to_string(),
            title: None,
            language: Language::default(),
            output: PathBuf::from(DOCUMENT_FILE_NAME),
            sample_ranking: SampleRanking::default(),
            foreign_keys: false,
        }
    }
}

impl DocConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IoError`] if the file cannot be read, or
    /// [`ConfigError::YamlError`] if it is not valid configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path.as_ref())?;
        let config = serde_yaml::from_reader(BufReader::new(file))?;
        Ok(config)
    }

    /// Saves configuration to a YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let file = std::fs::File::create(path.as_ref())?;
        serde_yaml::to_writer(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Heading name: the configured title, else the database file stem.
    ///
    /// ```
    /// use schema_doc_core::DocConfig;
    ///
    /// let config = DocConfig {
    ///     database: "data/meu_banco_teste.db".into(),
    ///     ..Default::default()
    /// };
    /// assert_eq!(config.document_title(), "meu_banco_teste");
    /// ```
    pub fn document_title(&self) -> String {
        if let Some(title) = &self.title {
            return title.clone();
        }
        if self.database == ":memory:" {
            return "main".to_string();
        }
        Path::new(&self.database)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.database.clone())
    }
}
