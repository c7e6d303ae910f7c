pub mod config;
pub mod db;
pub mod engine;
pub mod error;
pub mod export;
pub mod models;
pub mod prototype;
pub mod sections;
pub mod store;
pub mod summary;
pub mod validation;
pub mod wizard;

// Re-export commonly used types
pub use config::{determine_storage_path, get_config_path, resolve_config_path, Config};
pub use db::{create_backend, BackendType, FileBackend, MemoryBackend, PersistenceBackend};
pub use engine::SectionEngine;
pub use error::WizardError;
pub use export::{export_file_name, export_markdown, render, render_at};
pub use models::{
    Document, Feature, FeaturePriority, FieldId, FieldValue, NOT_SPECIFIED, PLATFORM_OPTIONS,
    TIMELINE_OPTIONS, TO_BE_DETERMINED, UNKNOWN_ASPECT_OPTIONS,
};
pub use prototype::{build_document, PrototypeSession, PrototypeStep, PROTOTYPE_QUESTIONS};
pub use sections::{
    check_field, owning_section, wizard_section, SectionDescriptor, SectionId, WIZARD_SECTIONS,
};
pub use store::{DocumentStore, StoreAction};
pub use summary::{summarize, SummaryView};
pub use validation::{ValidationError, ValidationErrorKind, ValidationErrors};
pub use wizard::{FieldEdit, NavCommand, WizardSession, WizardView};
