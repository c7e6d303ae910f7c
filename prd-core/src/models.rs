use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::WizardError;

/// Placeholder written for a field the user chose not to answer
pub const TO_BE_DETERMINED: &str = "To be determined";

/// Fallback shown for an unanswered identity or problem field
pub const NOT_SPECIFIED: &str = "Not specified";

/// Platforms offered by the Basic Details section
pub const PLATFORM_OPTIONS: &[&str] = &[
    "Web",
    "Mobile (iOS)",
    "Mobile (Android)",
    "Mobile (Cross-platform)",
    "Desktop",
    "Web + Mobile",
    "Other",
];

/// Development timelines offered by the Basic Details section
pub const TIMELINE_OPTIONS: &[&str] = &[
    "Unknown",
    "1-3 months",
    "3-6 months",
    "6-12 months",
    "1+ years",
    TO_BE_DETERMINED,
];

/// Suggested tags for aspects of the problem that still need research
pub const UNKNOWN_ASPECT_OPTIONS: &[&str] = &[
    "Target users are not clearly defined",
    "Current solutions are unknown",
    "Pain points need research",
    "Success metrics to be determined",
    "Problem scope needs refinement",
];

/// Represents the priority of a feature
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum FeaturePriority {
    High,
    #[default]
    Medium,
    Low,
}

impl fmt::Display for FeaturePriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeaturePriority::High => write!(f, "High"),
            FeaturePriority::Medium => write!(f, "Medium"),
            FeaturePriority::Low => write!(f, "Low"),
        }
    }
}

impl FeaturePriority {
    /// All priorities, highest first
    pub fn all() -> &'static [FeaturePriority] {
        &[
            FeaturePriority::High,
            FeaturePriority::Medium,
            FeaturePriority::Low,
        ]
    }

    /// Parse a priority from a string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "high" => Some(FeaturePriority::High),
            "medium" => Some(FeaturePriority::Medium),
            "low" => Some(FeaturePriority::Low),
            _ => None,
        }
    }

    /// Uppercase label used in the rendered document
    pub fn badge(&self) -> String {
        self.to_string().to_uppercase()
    }
}

/// A single feature of the product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    /// Unique identifier, assigned at creation and never changed
    pub id: Uuid,

    /// Short name of the feature
    pub name: String,

    /// What the feature does
    pub description: String,

    #[serde(default)]
    pub priority: FeaturePriority,

    /// Conditions under which the feature counts as done
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acceptance_criteria: Option<String>,
}

impl Feature {
    /// Creates a new medium-priority feature with a fresh id
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            priority: FeaturePriority::default(),
            acceptance_criteria: None,
        }
    }

    pub fn with_priority(mut self, priority: FeaturePriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_acceptance_criteria(mut self, criteria: impl Into<String>) -> Self {
        let criteria = criteria.into();
        self.acceptance_criteria = if criteria.trim().is_empty() {
            None
        } else {
            Some(criteria)
        };
        self
    }
}

/// Identifies one editable field of a [`Document`]
///
/// The wire key of each field matches the key used in the persisted
/// document, so `FieldId::from_key(field.key())` always round-trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    AppName,
    Platform,
    Description,
    TargetAudience,
    Timeline,
    Budget,
    ProblemStatement,
    TargetUsers,
    CurrentSolutions,
    PainPoints,
    SuccessMetrics,
    UnknownAspects,
    InScope,
    OutOfScope,
    Assumptions,
    Constraints,
    Dependencies,
}

impl FieldId {
    pub const ALL: [FieldId; 17] = [
        FieldId::AppName,
        FieldId::Platform,
        FieldId::Description,
        FieldId::TargetAudience,
        FieldId::Timeline,
        FieldId::Budget,
        FieldId::ProblemStatement,
        FieldId::TargetUsers,
        FieldId::CurrentSolutions,
        FieldId::PainPoints,
        FieldId::SuccessMetrics,
        FieldId::UnknownAspects,
        FieldId::InScope,
        FieldId::OutOfScope,
        FieldId::Assumptions,
        FieldId::Constraints,
        FieldId::Dependencies,
    ];

    /// Wire key of the field (camelCase)
    pub fn key(self) -> &'static str {
        match self {
            FieldId::AppName => "appName",
            FieldId::Platform => "platform",
            FieldId::Description => "description",
            FieldId::TargetAudience => "targetAudience",
            FieldId::Timeline => "timeline",
            FieldId::Budget => "budget",
            FieldId::ProblemStatement => "problemStatement",
            FieldId::TargetUsers => "targetUsers",
            FieldId::CurrentSolutions => "currentSolutions",
            FieldId::PainPoints => "painPoints",
            FieldId::SuccessMetrics => "successMetrics",
            FieldId::UnknownAspects => "unknownAspects",
            FieldId::InScope => "inScope",
            FieldId::OutOfScope => "outOfScope",
            FieldId::Assumptions => "assumptions",
            FieldId::Constraints => "constraints",
            FieldId::Dependencies => "dependencies",
        }
    }

    /// Human-readable label for prompts
    pub fn label(self) -> &'static str {
        match self {
            FieldId::AppName => "Application Name",
            FieldId::Platform => "Platform",
            FieldId::Description => "Brief Description",
            FieldId::TargetAudience => "Target Audience",
            FieldId::Timeline => "Development Timeline",
            FieldId::Budget => "Budget Range",
            FieldId::ProblemStatement => "What problem are you solving?",
            FieldId::TargetUsers => "Who are your target users?",
            FieldId::CurrentSolutions => "How do people solve this problem today?",
            FieldId::PainPoints => "What are the main pain points?",
            FieldId::SuccessMetrics => "How will you measure success?",
            FieldId::UnknownAspects => "What aspects are still unknown?",
            FieldId::InScope => "In Scope",
            FieldId::OutOfScope => "Out of Scope",
            FieldId::Assumptions => "Assumptions",
            FieldId::Constraints => "Constraints",
            FieldId::Dependencies => "Dependencies",
        }
    }

    /// Looks a field up by its wire key
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.key() == key)
    }

    /// Returns true for fields holding a list of strings rather than text
    pub fn is_list(self) -> bool {
        matches!(self, FieldId::UnknownAspects)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Value carried by a field edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// The requirements document accumulated by either intake path
///
/// Unset fields are `None` (or an empty list) and are left out of the
/// persisted form entirely.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    // Basic details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_audience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,

    // Problem definition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problem_statement: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_users: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_solutions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pain_points: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_metrics: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unknown_aspects: Vec<String>,

    // Features
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<Feature>,

    // Scope
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_of_scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assumptions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<String>,

    /// Set when the document came from the prototype questionnaire
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_prototype: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_from: Option<String>,
}

impl Document {
    /// Creates an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if nothing has been filled in yet
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn text_slot(&self, field: FieldId) -> Option<&Option<String>> {
        let slot = match field {
            FieldId::AppName => &self.app_name,
            FieldId::Platform => &self.platform,
            FieldId::Description => &self.description,
            FieldId::TargetAudience => &self.target_audience,
            FieldId::Timeline => &self.timeline,
            FieldId::Budget => &self.budget,
            FieldId::ProblemStatement => &self.problem_statement,
            FieldId::TargetUsers => &self.target_users,
            FieldId::CurrentSolutions => &self.current_solutions,
            FieldId::PainPoints => &self.pain_points,
            FieldId::SuccessMetrics => &self.success_metrics,
            FieldId::InScope => &self.in_scope,
            FieldId::OutOfScope => &self.out_of_scope,
            FieldId::Assumptions => &self.assumptions,
            FieldId::Constraints => &self.constraints,
            FieldId::Dependencies => &self.dependencies,
            FieldId::UnknownAspects => return None,
        };
        Some(slot)
    }

    fn text_slot_mut(&mut self, field: FieldId) -> Option<&mut Option<String>> {
        let slot = match field {
            FieldId::AppName => &mut self.app_name,
            FieldId::Platform => &mut self.platform,
            FieldId::Description => &mut self.description,
            FieldId::TargetAudience => &mut self.target_audience,
            FieldId::Timeline => &mut self.timeline,
            FieldId::Budget => &mut self.budget,
            FieldId::ProblemStatement => &mut self.problem_statement,
            FieldId::TargetUsers => &mut self.target_users,
            FieldId::CurrentSolutions => &mut self.current_solutions,
            FieldId::PainPoints => &mut self.pain_points,
            FieldId::SuccessMetrics => &mut self.success_metrics,
            FieldId::InScope => &mut self.in_scope,
            FieldId::OutOfScope => &mut self.out_of_scope,
            FieldId::Assumptions => &mut self.assumptions,
            FieldId::Constraints => &mut self.constraints,
            FieldId::Dependencies => &mut self.dependencies,
            FieldId::UnknownAspects => return None,
        };
        Some(slot)
    }

    /// Gets the text stored in a text field, if any
    pub fn text(&self, field: FieldId) -> Option<&str> {
        self.text_slot(field).and_then(|slot| slot.as_deref())
    }

    /// Gets the value of any field
    pub fn field(&self, field: FieldId) -> Option<FieldValue> {
        if field.is_list() {
            if self.unknown_aspects.is_empty() {
                None
            } else {
                Some(FieldValue::List(self.unknown_aspects.clone()))
            }
        } else {
            self.text(field).map(|t| FieldValue::Text(t.to_string()))
        }
    }

    /// Sets a field from an edit value
    ///
    /// Text that is blank after trimming clears the field. List entries are
    /// trimmed, blanks dropped and duplicates removed, keeping first-seen order.
    pub fn set_field(&mut self, field: FieldId, value: FieldValue) -> Result<(), WizardError> {
        match (field.is_list(), value) {
            (false, FieldValue::Text(text)) => {
                if let Some(slot) = self.text_slot_mut(field) {
                    *slot = if text.trim().is_empty() { None } else { Some(text) };
                }
                Ok(())
            }
            (true, FieldValue::List(items)) => {
                let mut tags: Vec<String> = Vec::with_capacity(items.len());
                for item in items {
                    let item = item.trim().to_string();
                    if !item.is_empty() && !tags.contains(&item) {
                        tags.push(item);
                    }
                }
                self.unknown_aspects = tags;
                Ok(())
            }
            (false, FieldValue::List(_)) => Err(WizardError::FieldTypeMismatch {
                field,
                expected: "text",
            }),
            (true, FieldValue::Text(_)) => Err(WizardError::FieldTypeMismatch {
                field,
                expected: "list",
            }),
        }
    }

    /// Removes any value stored in a field
    pub fn clear_field(&mut self, field: FieldId) {
        match self.text_slot_mut(field) {
            Some(slot) => *slot = None,
            None => self.unknown_aspects.clear(),
        }
    }

    /// Returns true if the field has no meaningful value (absent or blank)
    pub fn is_unset(&self, field: FieldId) -> bool {
        if field.is_list() {
            self.unknown_aspects.is_empty()
        } else {
            self.text(field).map_or(true, |t| t.trim().is_empty())
        }
    }

    /// Toggles an unknown-aspect tag, returning whether it is now present
    pub fn toggle_unknown_aspect(&mut self, tag: &str) -> bool {
        if let Some(pos) = self.unknown_aspects.iter().position(|t| t == tag) {
            self.unknown_aspects.remove(pos);
            false
        } else {
            self.unknown_aspects.push(tag.to_string());
            true
        }
    }

    /// Appends a feature and returns its id
    pub fn add_feature(&mut self, feature: Feature) -> Uuid {
        let id = feature.id;
        self.features.push(feature);
        id
    }

    /// Removes the feature with the given id, returning true if one was removed
    pub fn remove_feature(&mut self, id: &Uuid) -> bool {
        match self.features.iter().position(|f| f.id == *id) {
            Some(pos) => {
                self.features.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Gets a feature by id
    pub fn get_feature(&self, id: &Uuid) -> Option<&Feature> {
        self.features.iter().find(|f| f.id == *id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_keys_round_trip() {
        for field in FieldId::ALL {
            assert_eq!(FieldId::from_key(field.key()), Some(field));
        }
        assert_eq!(FieldId::from_key("nonsense"), None);
    }

    #[test]
    fn test_set_field_blank_text_clears() {
        let mut doc = Document::new();
        doc.set_field(FieldId::AppName, FieldValue::Text("TaskMaster".into()))
            .unwrap();
        assert_eq!(doc.app_name.as_deref(), Some("TaskMaster"));

        doc.set_field(FieldId::AppName, FieldValue::Text("   ".into()))
            .unwrap();
        assert!(doc.app_name.is_none());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_set_field_type_mismatch() {
        let mut doc = Document::new();
        let err = doc
            .set_field(FieldId::AppName, FieldValue::List(vec!["a".into()]))
            .unwrap_err();
        assert!(matches!(err, WizardError::FieldTypeMismatch { .. }));

        let err = doc
            .set_field(FieldId::UnknownAspects, FieldValue::Text("a".into()))
            .unwrap_err();
        assert!(matches!(err, WizardError::FieldTypeMismatch { .. }));
    }

    #[test]
    fn test_unknown_aspects_deduplicated() {
        let mut doc = Document::new();
        doc.set_field(
            FieldId::UnknownAspects,
            FieldValue::List(vec![
                "Pain points need research".into(),
                " ".into(),
                "Pain points need research".into(),
                "Current solutions are unknown".into(),
            ]),
        )
        .unwrap();
        assert_eq!(
            doc.unknown_aspects,
            vec![
                "Pain points need research".to_string(),
                "Current solutions are unknown".to_string()
            ]
        );
    }

    #[test]
    fn test_toggle_unknown_aspect() {
        let mut doc = Document::new();
        assert!(doc.toggle_unknown_aspect(UNKNOWN_ASPECT_OPTIONS[0]));
        assert!(doc.toggle_unknown_aspect(UNKNOWN_ASPECT_OPTIONS[2]));
        assert_eq!(doc.unknown_aspects.len(), 2);

        assert!(!doc.toggle_unknown_aspect(UNKNOWN_ASPECT_OPTIONS[0]));
        assert_eq!(doc.unknown_aspects, vec![UNKNOWN_ASPECT_OPTIONS[2].to_string()]);
    }

    #[test]
    fn test_feature_ids_are_distinct_and_stable() {
        let mut doc = Document::new();
        let first = doc.add_feature(Feature::new("Login", "Users sign in"));
        let second = doc.add_feature(Feature::new("Search", "Find tasks"));
        let third = doc.add_feature(Feature::new("Export", "Download data"));
        assert_ne!(first, second);
        assert_ne!(second, third);

        assert!(doc.remove_feature(&second));
        assert_eq!(doc.features.len(), 2);
        assert_eq!(doc.features[0].id, first);
        assert_eq!(doc.features[1].id, third);
        assert_eq!(doc.get_feature(&third).map(|f| f.name.as_str()), Some("Export"));
        assert!(doc.get_feature(&second).is_none());

        // Removing again is a no-op
        assert!(!doc.remove_feature(&second));
        assert_eq!(doc.features.len(), 2);
    }

    #[test]
    fn test_feature_defaults() {
        let feature = Feature::new("Login", "Users sign in").with_acceptance_criteria("  ");
        assert_eq!(feature.priority, FeaturePriority::Medium);
        assert!(feature.acceptance_criteria.is_none());
    }

    #[test]
    fn test_priority_parse_and_badge() {
        assert_eq!(FeaturePriority::parse("HIGH"), Some(FeaturePriority::High));
        assert_eq!(FeaturePriority::parse(" low "), Some(FeaturePriority::Low));
        assert_eq!(FeaturePriority::parse("urgent"), None);
        assert_eq!(FeaturePriority::Medium.badge(), "MEDIUM");
    }

    #[test]
    fn test_is_unset() {
        let mut doc = Document::new();
        assert!(doc.is_unset(FieldId::InScope));
        doc.in_scope = Some("  ".into());
        assert!(doc.is_unset(FieldId::InScope));
        doc.in_scope = Some("Everything".into());
        assert!(!doc.is_unset(FieldId::InScope));
        assert!(doc.is_unset(FieldId::UnknownAspects));
    }

    #[test]
    fn test_wire_keys_are_camel_case() {
        let mut doc = Document::new();
        doc.app_name = Some("TaskMaster".into());
        doc.is_prototype = true;
        let yaml = serde_yaml::to_string(&doc).unwrap();
        assert!(yaml.contains("appName: TaskMaster"));
        assert!(yaml.contains("isPrototype: true"));
        assert!(!yaml.contains("features"));
    }
}
