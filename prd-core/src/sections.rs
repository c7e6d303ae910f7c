//! Static configuration of the full wizard's sections

use std::fmt;

use crate::models::{Document, FieldId, FieldValue, PLATFORM_OPTIONS, TIMELINE_OPTIONS};
use crate::validation::{FieldRule, ValidationError, ValidationErrors};

/// Identifies one page of the full wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    BasicDetails,
    ProblemDefinition,
    Features,
    Scope,
    Summary,
}

impl SectionId {
    pub fn key(self) -> &'static str {
        match self {
            SectionId::BasicDetails => "basic-details",
            SectionId::ProblemDefinition => "problem-definition",
            SectionId::Features => "features",
            SectionId::Scope => "scope",
            SectionId::Summary => "summary",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        WIZARD_SECTIONS
            .iter()
            .map(|s| s.id)
            .find(|id| id.key() == key)
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Describes one section: its place in the sequence, the fields it owns
/// and the rules gating forward movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionDescriptor {
    pub id: SectionId,
    pub label: &'static str,
    /// Zero-based ordinal position in the wizard
    pub position: usize,
    pub required: bool,
    /// Document fields edited on this page
    pub fields: &'static [FieldId],
    pub rules: &'static [FieldRule],
    /// Whether the feature list is edited on this page
    pub owns_features: bool,
}

impl SectionDescriptor {
    /// Runs every rule of the section against the document
    pub fn validate(&self, document: &Document) -> ValidationErrors {
        self.rules
            .iter()
            .filter_map(|rule| rule.check(document.text(rule.field)))
            .collect()
    }

    pub fn owns(&self, field: FieldId) -> bool {
        self.fields.contains(&field)
    }

    /// Gets the rule for a field, if the section has one
    pub fn rule_for(&self, field: FieldId) -> Option<&FieldRule> {
        self.rules.iter().find(|r| r.field == field)
    }

    /// Writes `default` into every unset text field this section owns
    /// Returns the fields that were filled
    pub fn apply_defaults(&self, document: &mut Document, default: &str) -> Vec<FieldId> {
        let mut filled = Vec::new();
        for &field in self.fields {
            if field.is_list() || !document.is_unset(field) {
                continue;
            }
            if document
                .set_field(field, FieldValue::Text(default.to_string()))
                .is_ok()
            {
                filled.push(field);
            }
        }
        filled
    }
}

const BASIC_DETAILS_FIELDS: &[FieldId] = &[
    FieldId::AppName,
    FieldId::Platform,
    FieldId::Description,
    FieldId::TargetAudience,
    FieldId::Timeline,
    FieldId::Budget,
];

const BASIC_DETAILS_RULES: &[FieldRule] = &[
    FieldRule::text(FieldId::AppName, "Application name is required"),
    FieldRule::text(FieldId::Description, "Brief description is required"),
    FieldRule::select(
        FieldId::Platform,
        PLATFORM_OPTIONS,
        "Platform selection is required",
    ),
    FieldRule::optional_select(FieldId::Timeline, TIMELINE_OPTIONS),
];

const PROBLEM_FIELDS: &[FieldId] = &[
    FieldId::ProblemStatement,
    FieldId::TargetUsers,
    FieldId::CurrentSolutions,
    FieldId::PainPoints,
    FieldId::SuccessMetrics,
    FieldId::UnknownAspects,
];

const PROBLEM_RULES: &[FieldRule] = &[
    FieldRule::text(FieldId::ProblemStatement, "Problem statement is required"),
    FieldRule::text(FieldId::TargetUsers, "Target users definition is required"),
];

const SCOPE_FIELDS: &[FieldId] = &[
    FieldId::InScope,
    FieldId::OutOfScope,
    FieldId::Assumptions,
    FieldId::Constraints,
    FieldId::Dependencies,
];

/// The sections of the full wizard, in order
pub static WIZARD_SECTIONS: [SectionDescriptor; 5] = [
    SectionDescriptor {
        id: SectionId::BasicDetails,
        label: "Basic Details",
        position: 0,
        required: true,
        fields: BASIC_DETAILS_FIELDS,
        rules: BASIC_DETAILS_RULES,
        owns_features: false,
    },
    SectionDescriptor {
        id: SectionId::ProblemDefinition,
        label: "Problem Definition",
        position: 1,
        required: true,
        fields: PROBLEM_FIELDS,
        rules: PROBLEM_RULES,
        owns_features: false,
    },
    SectionDescriptor {
        id: SectionId::Features,
        label: "Features",
        position: 2,
        required: false,
        fields: &[],
        rules: &[],
        owns_features: true,
    },
    SectionDescriptor {
        id: SectionId::Scope,
        label: "Scope",
        position: 3,
        required: false,
        fields: SCOPE_FIELDS,
        rules: &[],
        owns_features: false,
    },
    SectionDescriptor {
        id: SectionId::Summary,
        label: "Summary & Download",
        position: 4,
        required: false,
        fields: &[],
        rules: &[],
        owns_features: false,
    },
];

/// Gets the descriptor for a section of the full wizard
pub fn wizard_section(id: SectionId) -> &'static SectionDescriptor {
    match id {
        SectionId::BasicDetails => &WIZARD_SECTIONS[0],
        SectionId::ProblemDefinition => &WIZARD_SECTIONS[1],
        SectionId::Features => &WIZARD_SECTIONS[2],
        SectionId::Scope => &WIZARD_SECTIONS[3],
        SectionId::Summary => &WIZARD_SECTIONS[4],
    }
}

/// Finds the section of the full wizard that edits a field
pub fn owning_section(field: FieldId) -> Option<&'static SectionDescriptor> {
    WIZARD_SECTIONS.iter().find(|s| s.owns(field))
}

/// Checks a single field against the rule of its owning section
pub fn check_field(document: &Document, field: FieldId) -> Option<ValidationError> {
    owning_section(field)?
        .rule_for(field)?
        .check(document.text(field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TO_BE_DETERMINED;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_positions_match_order() {
        for (i, section) in WIZARD_SECTIONS.iter().enumerate() {
            assert_eq!(section.position, i);
            assert_eq!(wizard_section(section.id), section);
            assert_eq!(SectionId::from_key(section.id.key()), Some(section.id));
        }
    }

    #[test]
    fn test_every_field_owned_once() {
        for field in FieldId::ALL {
            let owners = WIZARD_SECTIONS.iter().filter(|s| s.owns(field)).count();
            assert_eq!(owners, 1, "{} should have exactly one owner", field);
        }
    }

    #[test]
    fn test_basic_details_validation() {
        let section = wizard_section(SectionId::BasicDetails);
        let mut doc = Document::new();

        let errors = section.validate(&doc);
        assert_eq!(errors.len(), 3);
        assert!(errors.contains("appName"));
        assert!(errors.contains("description"));
        assert!(errors.contains("platform"));

        doc.app_name = Some("TaskMaster".into());
        doc.description = Some("Tracks tasks".into());
        doc.platform = Some("Smart fridge".into());
        let errors = section.validate(&doc);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get("platform").unwrap().kind,
            ValidationErrorKind::UnknownOption("Smart fridge".into())
        );

        doc.platform = Some("Web".into());
        assert!(section.validate(&doc).is_empty());

        doc.timeline = Some("Next week".into());
        assert!(section.validate(&doc).contains("timeline"));
    }

    #[test]
    fn test_check_field_uses_owning_section_rule() {
        assert_eq!(
            owning_section(FieldId::Platform).map(|s| s.id),
            Some(SectionId::BasicDetails)
        );
        assert_eq!(
            owning_section(FieldId::InScope).map(|s| s.id),
            Some(SectionId::Scope)
        );

        let mut doc = Document::new();
        doc.platform = Some("Smart fridge".into());
        let error = check_field(&doc, FieldId::Platform).unwrap();
        assert_eq!(error.field, "platform");
        assert_eq!(
            error.kind,
            ValidationErrorKind::UnknownOption("Smart fridge".into())
        );

        doc.platform = Some("Web".into());
        assert!(check_field(&doc, FieldId::Platform).is_none());

        // Fields without a rule never fail
        doc.in_scope = Some("anything".into());
        assert!(check_field(&doc, FieldId::InScope).is_none());
    }

    #[test]
    fn test_apply_defaults_only_fills_unset() {
        let section = wizard_section(SectionId::Scope);
        let mut doc = Document::new();
        doc.in_scope = Some("User accounts".into());
        doc.constraints = Some(" ".into());

        let filled = section.apply_defaults(&mut doc, TO_BE_DETERMINED);
        assert_eq!(filled.len(), 4);
        assert_eq!(doc.in_scope.as_deref(), Some("User accounts"));
        assert_eq!(doc.out_of_scope.as_deref(), Some(TO_BE_DETERMINED));
        assert_eq!(doc.constraints.as_deref(), Some(TO_BE_DETERMINED));
        assert_eq!(doc.dependencies.as_deref(), Some(TO_BE_DETERMINED));
    }
}
