//! Persistence abstraction traits
//!
//! A backend holds exactly one serialized [`Document`] under a fixed key.

use anyhow::{Context, Result};

use crate::models::Document;

/// The single key under which the document is persisted
pub const STORAGE_KEY: &str = "prd-builder.prd";

/// Types of persistence backends available
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    /// YAML file storage (the default)
    Yaml,
    /// JSON file storage
    Json,
    /// In-process key/value slot, lost when the process exits
    Memory,
}

impl std::fmt::Display for BackendType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendType::Yaml => write!(f, "YAML"),
            BackendType::Json => write!(f, "JSON"),
            BackendType::Memory => write!(f, "Memory"),
        }
    }
}

impl BackendType {
    /// Serializes a document in this backend's text format
    pub fn encode(&self, document: &Document) -> Result<String> {
        match self {
            BackendType::Json => serde_json::to_string_pretty(document)
                .context("Failed to serialize document as JSON"),
            BackendType::Yaml | BackendType::Memory => {
                serde_yaml::to_string(document).context("Failed to serialize document as YAML")
            }
        }
    }

    /// Parses a document from this backend's text format
    pub fn decode(&self, text: &str) -> Result<Document> {
        match self {
            BackendType::Json => {
                serde_json::from_str(text).context("Failed to parse document from JSON")
            }
            BackendType::Yaml | BackendType::Memory => {
                serde_yaml::from_str(text).context("Failed to parse document from YAML")
            }
        }
    }
}

/// Core trait for persistence backends
///
/// `save` and `clear` are called synchronously after every store mutation.
/// Callers treat their failures as non-fatal.
pub trait PersistenceBackend {
    /// Returns the backend type
    fn backend_type(&self) -> BackendType;

    /// Loads the stored document, or `None` if nothing has been stored
    fn load(&self) -> Result<Option<Document>>;

    /// Replaces the stored document
    fn save(&self, document: &Document) -> Result<()>;

    /// Removes the stored document
    fn clear(&self) -> Result<()>;

    /// Returns true if a document is currently stored
    fn exists(&self) -> bool {
        matches!(self.load(), Ok(Some(_)))
    }
}
