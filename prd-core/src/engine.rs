//! Section sequencing engine
//!
//! Tracks the current position within an ordered list of sections and
//! gates forward movement on the current section's validation rules.
//! Backward and direct navigation are never gated.

use tracing::debug;

use crate::error::WizardError;
use crate::models::Document;
use crate::sections::{SectionDescriptor, SectionId, WIZARD_SECTIONS};
use crate::validation::ValidationErrors;

#[derive(Debug, Clone)]
pub struct SectionEngine {
    sections: Vec<SectionDescriptor>,
    current_index: usize,
}

impl Default for SectionEngine {
    fn default() -> Self {
        Self::wizard()
    }
}

impl SectionEngine {
    /// Creates an engine over the five sections of the full wizard
    pub fn wizard() -> Self {
        Self::with_sections(WIZARD_SECTIONS.to_vec())
    }

    /// Creates an engine over a custom, non-empty list of sections
    ///
    /// # Panics
    ///
    /// Panics if `sections` is empty.
    pub fn with_sections(sections: Vec<SectionDescriptor>) -> Self {
        assert!(!sections.is_empty(), "a section engine needs at least one section");
        Self {
            sections,
            current_index: 0,
        }
    }

    pub fn sections(&self) -> &[SectionDescriptor] {
        &self.sections
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_section(&self) -> &SectionDescriptor {
        &self.sections[self.current_index]
    }

    /// Gets a section by id
    pub fn section(&self, id: SectionId) -> Option<&SectionDescriptor> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn is_first(&self) -> bool {
        self.current_index == 0
    }

    pub fn is_last(&self) -> bool {
        self.current_index == self.sections.len() - 1
    }

    /// `(current_index + 1) / section_count`, always in `(0, 1]`
    pub fn progress_fraction(&self) -> f64 {
        (self.current_index + 1) as f64 / self.sections.len() as f64
    }

    /// Moves to the next section
    ///
    /// A required section with validation errors blocks the move and the
    /// errors are returned. On the last section the index stays put.
    pub fn advance(&mut self, document: &Document) -> Result<usize, ValidationErrors> {
        let section = self.current_section();
        if section.required {
            let errors = section.validate(document);
            if !errors.is_empty() {
                debug!(
                    section = section.label,
                    errors = errors.len(),
                    "advance blocked by validation"
                );
                return Err(errors);
            }
        }

        let from = self.current_index;
        self.current_index = (self.current_index + 1).min(self.sections.len() - 1);
        debug!(from, to = self.current_index, "advanced");
        Ok(self.current_index)
    }

    /// Moves to the previous section, stopping at the first one
    pub fn retreat(&mut self) -> usize {
        self.current_index = self.current_index.saturating_sub(1);
        debug!(to = self.current_index, "retreated");
        self.current_index
    }

    /// Skips an optional section
    ///
    /// Every unset text field the section owns receives `default`, then the
    /// engine advances as usual.
    pub fn skip(&mut self, document: &mut Document, default: &str) -> Result<usize, WizardError> {
        let section = *self.current_section();
        if section.required {
            return Err(WizardError::SkipNotAllowed(section.label.to_string()));
        }

        let filled = section.apply_defaults(document, default);
        debug!(section = section.label, filled = filled.len(), "skipped section");
        Ok(self.advance(document)?)
    }

    /// Jumps directly to a section without checking earlier sections
    pub fn jump_to(&mut self, index: usize) -> Result<usize, WizardError> {
        if index >= self.sections.len() {
            return Err(WizardError::IndexOutOfRange {
                index,
                len: self.sections.len(),
            });
        }
        debug!(from = self.current_index, to = index, "jumped");
        self.current_index = index;
        Ok(index)
    }

    /// Finds the first required section before `index` whose rules fail
    ///
    /// Jumping never consults this; front-ends use it to warn the user that
    /// they are moving past unfinished required sections.
    pub fn first_unsatisfied_before(&self, index: usize, document: &Document) -> Option<usize> {
        self.sections
            .iter()
            .take(index.min(self.sections.len()))
            .position(|s| s.required && !s.validate(document).is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TO_BE_DETERMINED;

    fn basic_details_done() -> Document {
        Document {
            app_name: Some("TaskMaster".into()),
            platform: Some("Web".into()),
            description: Some("Keeps track of tasks".into()),
            ..Document::default()
        }
    }

    #[test]
    fn test_progress_fraction() {
        let mut engine = SectionEngine::wizard();
        assert!((engine.progress_fraction() - 0.2).abs() < f64::EPSILON);
        engine.jump_to(4).unwrap();
        assert!((engine.progress_fraction() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_advance_blocked_on_required_section() {
        let mut engine = SectionEngine::wizard();
        let mut doc = Document::new();

        let errors = engine.advance(&doc).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(engine.current_index(), 0);

        // Filling only some fields still blocks
        doc.app_name = Some("TaskMaster".into());
        let errors = engine.advance(&doc).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(!errors.contains("appName"));
        assert_eq!(engine.current_index(), 0);

        let doc = basic_details_done();
        assert_eq!(engine.advance(&doc), Ok(1));
    }

    #[test]
    fn test_advance_optional_section_ignores_content() {
        let mut engine = SectionEngine::wizard();
        engine.jump_to(2).unwrap();
        assert_eq!(engine.advance(&Document::new()), Ok(3));
    }

    #[test]
    fn test_advance_saturates_on_last_section() {
        let mut engine = SectionEngine::wizard();
        engine.jump_to(4).unwrap();
        assert_eq!(engine.advance(&Document::new()), Ok(4));
        assert!(engine.is_last());
    }

    #[test]
    fn test_retreat_saturates_at_zero() {
        let mut engine = SectionEngine::wizard();
        assert!(engine.is_first());
        assert_eq!(engine.retreat(), 0);
        engine.jump_to(2).unwrap();
        assert!(!engine.is_first());
        assert_eq!(engine.retreat(), 1);
        assert_eq!(engine.retreat(), 0);
        assert_eq!(engine.retreat(), 0);
        assert!(engine.is_first());
    }

    #[test]
    fn test_with_sections_keeps_order() {
        let sections = WIZARD_SECTIONS[3..].to_vec();
        let engine = SectionEngine::with_sections(sections);
        assert!(engine.is_first());
        assert_eq!(engine.current_section().id, SectionId::Scope);
    }

    #[test]
    #[should_panic(expected = "at least one section")]
    fn test_with_sections_rejects_empty() {
        SectionEngine::with_sections(Vec::new());
    }

    #[test]
    fn test_skip_fills_defaults_and_advances() {
        let mut engine = SectionEngine::wizard();
        engine.jump_to(3).unwrap();
        let mut doc = basic_details_done();

        assert_eq!(engine.skip(&mut doc, TO_BE_DETERMINED), Ok(4));
        assert_eq!(doc.in_scope.as_deref(), Some(TO_BE_DETERMINED));
        assert_eq!(doc.out_of_scope.as_deref(), Some(TO_BE_DETERMINED));
        assert_eq!(doc.assumptions.as_deref(), Some(TO_BE_DETERMINED));
        // Fields owned by other sections are untouched
        assert!(doc.problem_statement.is_none());
    }

    #[test]
    fn test_skip_refused_on_required_section() {
        let mut engine = SectionEngine::wizard();
        let mut doc = Document::new();
        let err = engine.skip(&mut doc, TO_BE_DETERMINED).unwrap_err();
        assert_eq!(err, WizardError::SkipNotAllowed("Basic Details".into()));
        assert_eq!(engine.current_index(), 0);
        assert!(doc.is_empty());
    }

    #[test]
    fn test_jump_bypasses_gating() {
        let mut engine = SectionEngine::wizard();
        let doc = Document::new();
        assert_eq!(engine.jump_to(3), Ok(3));
        assert_eq!(engine.first_unsatisfied_before(3, &doc), Some(0));

        let doc = basic_details_done();
        assert_eq!(engine.first_unsatisfied_before(3, &doc), Some(1));
        assert_eq!(engine.first_unsatisfied_before(1, &doc), None);
    }

    #[test]
    fn test_jump_out_of_range() {
        let mut engine = SectionEngine::wizard();
        engine.jump_to(2).unwrap();
        let err = engine.jump_to(5).unwrap_err();
        assert_eq!(err, WizardError::IndexOutOfRange { index: 5, len: 5 });
        assert_eq!(engine.current_index(), 2);
    }
}
