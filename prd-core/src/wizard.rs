//! Full wizard session
//!
//! Ties a [`SectionEngine`] to a [`DocumentStore`]: field edits from the
//! front-end land in the store, navigation goes through the engine, and the
//! errors of a blocked advance are kept around for display.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

use crate::engine::SectionEngine;
use crate::error::WizardError;
use crate::export::{export_markdown, render};
use crate::models::{Document, Feature, FeaturePriority, FieldId, FieldValue, TO_BE_DETERMINED};
use crate::sections::{SectionDescriptor, SectionId};
use crate::store::DocumentStore;
use crate::summary::{summarize, SummaryView};
use crate::validation::{is_satisfied, ValidationError, ValidationErrors};

/// A single field change coming from a section's input
#[derive(Debug, Clone, PartialEq)]
pub struct FieldEdit {
    pub section: SectionId,
    pub field: FieldId,
    pub value: FieldValue,
}

impl FieldEdit {
    pub fn new(section: SectionId, field: FieldId, value: FieldValue) -> Self {
        Self {
            section,
            field,
            value,
        }
    }

    /// Shorthand for a text edit
    pub fn text(section: SectionId, field: FieldId, text: impl Into<String>) -> Self {
        Self::new(section, field, FieldValue::Text(text.into()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    Advance,
    Retreat,
    Skip,
    Jump(usize),
    Reset,
}

/// What a front-end needs to draw the current page
#[derive(Debug, Clone, PartialEq)]
pub struct WizardView {
    pub section: SectionDescriptor,
    pub position: usize,
    pub section_count: usize,
    pub progress: f64,
    pub errors: ValidationErrors,
}

#[derive(Debug)]
pub struct WizardSession {
    engine: SectionEngine,
    store: DocumentStore,
    errors: ValidationErrors,
}

impl WizardSession {
    /// Starts a session over the full wizard at its first section
    pub fn new(store: DocumentStore) -> Self {
        Self::with_engine(SectionEngine::wizard(), store)
    }

    pub fn with_engine(engine: SectionEngine, store: DocumentStore) -> Self {
        Self {
            engine,
            store,
            errors: ValidationErrors::new(),
        }
    }

    pub fn document(&self) -> &Document {
        self.store.get()
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn engine(&self) -> &SectionEngine {
        &self.engine
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Applies a field edit and stores the updated document
    pub fn edit(&mut self, edit: FieldEdit) -> Result<(), WizardError> {
        let section = self
            .engine
            .section(edit.section)
            .copied()
            .ok_or_else(|| WizardError::FieldNotInSection {
                field: edit.field,
                section: edit.section.to_string(),
            })?;
        if !section.owns(edit.field) {
            return Err(WizardError::FieldNotInSection {
                field: edit.field,
                section: section.label.to_string(),
            });
        }

        let mut document = self.store.get().clone();
        document.set_field(edit.field, edit.value)?;

        let satisfied = match section.rule_for(edit.field) {
            Some(rule) => rule.check(document.text(edit.field)).is_none(),
            None => !document.is_unset(edit.field),
        };
        if satisfied {
            self.errors.clear_field(edit.field.key());
        }

        self.store.set(document);
        Ok(())
    }

    /// Toggles one unknown-aspect tag, returning whether it is now selected
    pub fn toggle_unknown_aspect(&mut self, tag: &str) -> bool {
        let mut document = self.store.get().clone();
        let selected = document.toggle_unknown_aspect(tag);
        self.store.set(document);
        selected
    }

    /// Adds a feature; name and description must not be blank
    pub fn add_feature(
        &mut self,
        name: &str,
        description: &str,
        priority: FeaturePriority,
        acceptance_criteria: Option<&str>,
    ) -> Result<Uuid, WizardError> {
        let mut errors = ValidationErrors::new();
        if !is_satisfied(Some(name)) {
            errors.push(ValidationError::missing("name", "Feature name is required"));
        }
        if !is_satisfied(Some(description)) {
            errors.push(ValidationError::missing(
                "description",
                "Feature description is required",
            ));
        }
        if !errors.is_empty() {
            return Err(WizardError::Validation(errors));
        }

        let mut feature = Feature::new(name.trim(), description.trim()).with_priority(priority);
        if let Some(criteria) = acceptance_criteria {
            feature = feature.with_acceptance_criteria(criteria.trim());
        }

        let mut document = self.store.get().clone();
        let id = document.add_feature(feature);
        self.store.set(document);
        debug!(%id, "feature added");
        Ok(id)
    }

    /// Removes the feature with this id, returning whether one was removed
    pub fn remove_feature(&mut self, id: &Uuid) -> bool {
        let mut document = self.store.get().clone();
        if !document.remove_feature(id) {
            return false;
        }
        self.store.set(document);
        true
    }

    /// Runs one navigation command and returns the new section index
    ///
    /// A blocked advance keeps its errors for [`WizardSession::view`].
    pub fn navigate(&mut self, command: NavCommand) -> Result<usize, WizardError> {
        match command {
            NavCommand::Advance => match self.engine.advance(self.store.get()) {
                Ok(index) => {
                    self.errors.clear();
                    Ok(index)
                }
                Err(errors) => {
                    self.errors = errors.clone();
                    Err(WizardError::Validation(errors))
                }
            },
            NavCommand::Retreat => {
                self.errors.clear();
                Ok(self.engine.retreat())
            }
            NavCommand::Skip => {
                let mut document = self.store.get().clone();
                let index = self.engine.skip(&mut document, TO_BE_DETERMINED)?;
                self.store.set(document);
                self.errors.clear();
                Ok(index)
            }
            NavCommand::Jump(index) => {
                let index = self.engine.jump_to(index)?;
                self.errors.clear();
                Ok(index)
            }
            NavCommand::Reset => {
                self.store.reset();
                self.errors.clear();
                self.engine.jump_to(0)
            }
        }
    }

    pub fn view(&self) -> WizardView {
        WizardView {
            section: *self.engine.current_section(),
            position: self.engine.current_index(),
            section_count: self.engine.section_count(),
            progress: self.engine.progress_fraction(),
            errors: self.errors.clone(),
        }
    }

    pub fn render(&self) -> String {
        render(self.store.get())
    }

    pub fn summarize(&self) -> SummaryView {
        summarize(self.store.get())
    }

    /// Writes the markdown file into `dir`
    pub fn download(&self, dir: &Path) -> Result<PathBuf> {
        export_markdown(self.store.get(), dir)
    }

    pub fn into_store(self) -> DocumentStore {
        self.store
    }
}
