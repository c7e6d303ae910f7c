//! File storage backend
//!
//! Stores the document in a single YAML or JSON file.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::traits::{BackendType, PersistenceBackend};
use crate::models::Document;

/// File backend implementation
pub struct FileBackend {
    path: PathBuf,
    format: BackendType,
}

impl FileBackend {
    /// Creates a YAML file backend for the given path
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self::with_format(path, BackendType::Yaml)
    }

    /// Creates a JSON file backend for the given path
    pub fn json<P: AsRef<Path>>(path: P) -> Self {
        Self::with_format(path, BackendType::Json)
    }

    fn with_format<P: AsRef<Path>>(path: P, format: BackendType) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            format,
        }
    }

    /// Returns the path to the storage file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PersistenceBackend for FileBackend {
    fn backend_type(&self) -> BackendType {
        self.format
    }

    fn load(&self) -> Result<Option<Document>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read file: {:?}", self.path))?;

        // An empty file is what a fresh `touch` leaves behind
        if content.trim().is_empty() {
            return Ok(None);
        }

        let document = self
            .format
            .decode(&content)
            .with_context(|| format!("Failed to load document from {:?}", self.path))?;
        Ok(Some(document))
    }

    fn save(&self, document: &Document) -> Result<()> {
        // Create parent directories if they don't exist
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {:?}", parent))?;
            }
        }

        let text = self.format.encode(document)?;
        fs::write(&self.path, text)
            .with_context(|| format!("Failed to write file: {:?}", self.path))?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Failed to remove file: {:?}", self.path))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Feature, FeaturePriority};
    use tempfile::TempDir;

    fn sample_document() -> Document {
        let mut doc = Document::new();
        doc.app_name = Some("TaskMaster".into());
        doc.platform = Some("Web + Mobile".into());
        doc.description = Some("Line one\nLine two: with a colon".into());
        doc.unknown_aspects = vec!["Pain points need research".into()];
        doc.add_feature(
            Feature::new("Reminders", "Notify users")
                .with_priority(FeaturePriority::High)
                .with_acceptance_criteria("Fires on time"),
        );
        doc.add_feature(Feature::new("Sharing", "Share lists"));
        doc.in_scope = Some("To be determined".into());
        doc.is_prototype = true;
        doc.generated_from = Some("prototype".into());
        doc
    }

    #[test]
    fn test_missing_file_loads_as_none() {
        let temp_dir = TempDir::new().unwrap();
        let backend = FileBackend::new(temp_dir.path().join("prd.yaml"));
        assert!(backend.load().unwrap().is_none());
        assert!(!backend.exists());
    }

    #[test]
    fn test_yaml_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let backend = FileBackend::new(temp_dir.path().join("nested/dir/prd.yaml"));

        let doc = sample_document();
        backend.save(&doc).unwrap();

        let loaded = backend.load().unwrap().unwrap();
        assert_eq!(loaded, doc);
    }

    #[test]
    fn test_json_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prd.json");
        let backend = FileBackend::json(&path);

        let doc = sample_document();
        backend.save(&doc).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"appName\": \"TaskMaster\""));
        assert_eq!(backend.load().unwrap().unwrap(), doc);
    }

    #[test]
    fn test_empty_document_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let backend = FileBackend::new(temp_dir.path().join("prd.yaml"));
        backend.save(&Document::new()).unwrap();
        assert_eq!(backend.load().unwrap(), Some(Document::new()));
    }

    #[test]
    fn test_clear_removes_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prd.yaml");
        let backend = FileBackend::new(&path);
        backend.save(&sample_document()).unwrap();
        assert!(path.exists());

        backend.clear().unwrap();
        assert!(!path.exists());
        assert!(backend.load().unwrap().is_none());

        // Clearing twice is fine
        backend.clear().unwrap();
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prd.yaml");
        fs::write(&path, "features: [not, a, feature").unwrap();
        let backend = FileBackend::new(&path);
        assert!(backend.load().is_err());
    }
}
