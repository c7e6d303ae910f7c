//! Persistence layer for the PRD document
//!
//! This module provides a trait-based abstraction for the single-slot
//! persistence substrate, allowing the store to use a YAML or JSON file,
//! or an in-memory slot, behind one interface.

mod file_backend;
mod memory_backend;
mod traits;

pub use file_backend::FileBackend;
pub use memory_backend::MemoryBackend;
pub use traits::{BackendType, PersistenceBackend, STORAGE_KEY};

use std::path::Path;

/// Creates a persistence backend based on the file extension or explicit type
pub fn create_backend(
    path: &Path,
    backend_type: Option<BackendType>,
) -> Box<dyn PersistenceBackend> {
    let bt = backend_type.unwrap_or_else(|| {
        // Infer from file extension
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => BackendType::Json,
            _ => BackendType::Yaml, // Default to YAML
        }
    });

    match bt {
        BackendType::Yaml => Box::new(FileBackend::new(path)),
        BackendType::Json => Box::new(FileBackend::json(path)),
        BackendType::Memory => Box::new(MemoryBackend::new()),
    }
}
