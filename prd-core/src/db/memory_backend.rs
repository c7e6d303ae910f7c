use anyhow::Result;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::traits::{BackendType, PersistenceBackend, STORAGE_KEY};
use crate::models::Document;

/// In-process key/value storage
///
/// Behaves like browser local storage: the document is kept as a serialized
/// blob under [`STORAGE_KEY`]. Clones share the same slots, so a test can
/// keep a handle and inspect what the store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    slots: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the raw blob currently stored, if any
    pub fn raw(&self) -> Option<String> {
        self.slots.borrow().get(STORAGE_KEY).cloned()
    }
}

impl PersistenceBackend for MemoryBackend {
    fn backend_type(&self) -> BackendType {
        BackendType::Memory
    }

    fn load(&self) -> Result<Option<Document>> {
        match self.raw() {
            Some(blob) => Ok(Some(BackendType::Memory.decode(&blob)?)),
            None => Ok(None),
        }
    }

    fn save(&self, document: &Document) -> Result<()> {
        let blob = BackendType::Memory.encode(document)?;
        self.slots.borrow_mut().insert(STORAGE_KEY.to_string(), blob);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.slots.borrow_mut().remove(STORAGE_KEY);
        Ok(())
    }
}
