use tracing::{debug, info, warn};

use crate::db::{BackendType, MemoryBackend, PersistenceBackend};
use crate::models::Document;

/// Updates accepted by [`DocumentStore::dispatch`]
#[derive(Debug, Clone, PartialEq)]
pub enum StoreAction {
    /// Replace the whole document
    SetDocument(Document),
    /// Start over with an empty document
    Reset,
}

/// Owns the canonical document and mirrors every change to persistence
///
/// Persistence failures never block or roll back an in-memory change. They
/// are logged and reported through [`DocumentStore::is_persisted`].
pub struct DocumentStore {
    document: Document,
    backend: Box<dyn PersistenceBackend>,
    persisted: bool,
}

impl DocumentStore {
    /// Creates a store, loading the persisted document if there is one
    pub fn new(backend: Box<dyn PersistenceBackend>) -> Self {
        let (document, persisted) = match backend.load() {
            Ok(Some(document)) => {
                debug!(backend = %backend.backend_type(), "loaded persisted document");
                (document, true)
            }
            Ok(None) => (Document::default(), true),
            Err(e) => {
                warn!("Could not load persisted document, starting empty: {:#}", e);
                (Document::default(), false)
            }
        };

        Self {
            document,
            backend,
            persisted,
        }
    }

    /// Creates a store backed by a fresh in-memory slot
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryBackend::new()))
    }

    pub fn get(&self) -> &Document {
        &self.document
    }

    /// Replaces the stored document and writes it to persistence
    pub fn set(&mut self, document: Document) {
        self.document = document;
        self.persist();
    }

    /// Applies a change to a copy of the document and stores the result
    pub fn update<F>(&mut self, update_fn: F)
    where
        F: FnOnce(&mut Document),
    {
        let mut document = self.document.clone();
        update_fn(&mut document);
        self.set(document);
    }

    /// Empties the document and clears the persisted copy
    pub fn reset(&mut self) {
        self.document = Document::default();
        match self.backend.clear() {
            Ok(()) => {
                self.persisted = true;
                info!("Document reset");
            }
            Err(e) => {
                self.persisted = false;
                warn!("Failed to clear persisted document: {:#}", e);
            }
        }
    }

    pub fn dispatch(&mut self, action: StoreAction) {
        match action {
            StoreAction::SetDocument(document) => self.set(document),
            StoreAction::Reset => self.reset(),
        }
    }

    /// Returns false if the last write to persistence failed
    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    pub fn backend_type(&self) -> BackendType {
        self.backend.backend_type()
    }

    fn persist(&mut self) {
        match self.backend.save(&self.document) {
            Ok(()) => self.persisted = true,
            Err(e) => {
                self.persisted = false;
                warn!("Failed to persist document, continuing in memory: {:#}", e);
            }
        }
    }
}

impl std::fmt::Debug for DocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStore")
            .field("document", &self.document)
            .field("backend", &self.backend.backend_type())
            .field("persisted", &self.persisted)
            .finish()
    }
}
