//! Condensed review view of a document

use std::fmt;

use crate::models::{Document, FeaturePriority, NOT_SPECIFIED};

/// Preview length for description, problem and target users
pub const DESCRIPTION_PREVIEW_LEN: usize = 100;

/// Preview length for the scope fields
pub const SCOPE_PREVIEW_LEN: usize = 80;

/// Number of list entries shown before the "+N more" marker
pub const LIST_PREVIEW_LEN: usize = 3;

pub const ELLIPSIS: &str = "...";

/// Shortens text longer than `max_chars` characters
///
/// Text within the limit is returned as is; longer text keeps its first
/// `max_chars` characters followed by `...`. Missing or empty text becomes
/// "Not specified".
pub fn truncate_preview(text: Option<&str>, max_chars: usize) -> String {
    match text.filter(|t| !t.is_empty()) {
        None => NOT_SPECIFIED.to_string(),
        Some(t) if t.chars().count() <= max_chars => t.to_string(),
        Some(t) => {
            let mut preview: String = t.chars().take(max_chars).collect();
            preview.push_str(ELLIPSIS);
            preview
        }
    }
}

/// The first few entries of a list and how many were left out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPreview<T> {
    pub shown: Vec<T>,
    pub remaining: usize,
}

impl<T: Clone> ListPreview<T> {
    pub fn of(items: &[T]) -> Self {
        Self {
            shown: items.iter().take(LIST_PREVIEW_LEN).cloned().collect(),
            remaining: items.len().saturating_sub(LIST_PREVIEW_LEN),
        }
    }
}

impl<T> ListPreview<T> {
    /// `+N more`, or None when nothing was left out
    pub fn more_marker(&self) -> Option<String> {
        (self.remaining > 0).then(|| format!("+{} more", self.remaining))
    }

    pub fn is_empty(&self) -> bool {
        self.shown.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeaturePreview {
    pub name: String,
    pub priority: FeaturePriority,
}

/// Review summary shown before download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryView {
    pub app_name: String,
    pub platform: String,
    pub description: String,
    pub target_audience: Option<String>,
    pub problem: String,
    pub target_users: String,
    pub unknown_aspects: ListPreview<String>,
    pub feature_count: usize,
    pub features: ListPreview<FeaturePreview>,
    pub in_scope: String,
    pub out_of_scope: String,
    /// True when every field required by the full wizard has a value
    pub is_complete: bool,
}

/// Builds the review summary of a document
pub fn summarize(document: &Document) -> SummaryView {
    let features: Vec<FeaturePreview> = document
        .features
        .iter()
        .map(|f| FeaturePreview {
            name: f.name.clone(),
            priority: f.priority,
        })
        .collect();

    let required = [
        &document.app_name,
        &document.description,
        &document.platform,
        &document.problem_statement,
        &document.target_users,
    ];
    let is_complete = required
        .iter()
        .all(|v| v.as_deref().map_or(false, |t| !t.is_empty()));

    SummaryView {
        app_name: truncate_preview(document.app_name.as_deref(), usize::MAX),
        platform: truncate_preview(document.platform.as_deref(), usize::MAX),
        description: truncate_preview(document.description.as_deref(), DESCRIPTION_PREVIEW_LEN),
        target_audience: document
            .target_audience
            .clone()
            .filter(|t| !t.is_empty()),
        problem: truncate_preview(
            document.problem_statement.as_deref(),
            DESCRIPTION_PREVIEW_LEN,
        ),
        target_users: truncate_preview(document.target_users.as_deref(), DESCRIPTION_PREVIEW_LEN),
        unknown_aspects: ListPreview::of(&document.unknown_aspects),
        feature_count: features.len(),
        features: ListPreview::of(&features),
        in_scope: truncate_preview(document.in_scope.as_deref(), SCOPE_PREVIEW_LEN),
        out_of_scope: truncate_preview(document.out_of_scope.as_deref(), SCOPE_PREVIEW_LEN),
        is_complete,
    }
}

impl fmt::Display for SummaryView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Basic Details")?;
        writeln!(f, "  App Name:    {}", self.app_name)?;
        writeln!(f, "  Platform:    {}", self.platform)?;
        writeln!(f, "  Description: {}", self.description)?;
        if let Some(audience) = &self.target_audience {
            writeln!(f, "  Audience:    {}", audience)?;
        }

        writeln!(f)?;
        writeln!(f, "Problem Definition")?;
        writeln!(f, "  Problem:      {}", self.problem)?;
        writeln!(f, "  Target Users: {}", self.target_users)?;
        if !self.unknown_aspects.is_empty() {
            writeln!(f, "  Unknown Aspects:")?;
            for aspect in &self.unknown_aspects.shown {
                writeln!(f, "    - {}", aspect)?;
            }
            if let Some(more) = self.unknown_aspects.more_marker() {
                writeln!(f, "    {}", more)?;
            }
        }

        writeln!(f)?;
        writeln!(f, "Features ({})", self.feature_count)?;
        if self.features.is_empty() {
            writeln!(f, "  No features defined")?;
        }
        for feature in &self.features.shown {
            writeln!(f, "  [{}] {}", feature.priority.badge(), feature.name)?;
        }
        if let Some(more) = self.features.more_marker() {
            writeln!(f, "  {} features", more)?;
        }

        writeln!(f)?;
        writeln!(f, "Project Scope")?;
        writeln!(f, "  In Scope:     {}", self.in_scope)?;
        writeln!(f, "  Out of Scope: {}", self.out_of_scope)?;

        writeln!(f)?;
        if self.is_complete {
            write!(f, "Your PRD is complete and ready for download.")
        } else {
            write!(f, "Some required sections are incomplete.")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Feature, UNKNOWN_ASPECT_OPTIONS};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_truncate_preview() {
        assert_eq!(truncate_preview(None, 10), NOT_SPECIFIED);
        assert_eq!(truncate_preview(Some(""), 10), NOT_SPECIFIED);
        assert_eq!(truncate_preview(Some("short"), 10), "short");
        assert_eq!(truncate_preview(Some("exactly 10"), 10), "exactly 10");
        assert_eq!(truncate_preview(Some("a bit longer"), 10), "a bit long...");
    }

    #[test]
    fn test_truncate_counts_characters() {
        let text = "é".repeat(12);
        assert_eq!(truncate_preview(Some(&text), 10), format!("{}...", "é".repeat(10)));
    }

    #[test]
    fn test_long_fields_are_truncated() {
        let long = "x".repeat(150);
        let doc = Document {
            problem_statement: Some(long.clone()),
            in_scope: Some(long),
            ..Document::default()
        };

        let view = summarize(&doc);
        assert_eq!(view.problem, format!("{}...", "x".repeat(100)));
        assert_eq!(view.in_scope, format!("{}...", "x".repeat(80)));
        assert_eq!(view.out_of_scope, NOT_SPECIFIED);
        assert!(!view.is_complete);
    }

    #[test]
    fn test_list_previews() {
        let mut doc = Document::new();
        for name in ["Login", "Search", "Export", "Share", "Print"] {
            doc.add_feature(Feature::new(name, "does things"));
        }
        doc.unknown_aspects = vec!["a".into(), "b".into()];

        let view = summarize(&doc);
        assert_eq!(view.feature_count, 5);
        assert_eq!(view.features.shown.len(), 3);
        assert_eq!(view.features.more_marker().as_deref(), Some("+2 more"));
        assert_eq!(view.unknown_aspects.more_marker(), None);

        let text = view.to_string();
        assert!(text.contains("Features (5)"));
        assert!(text.contains("[MEDIUM] Export"));
        assert!(!text.contains("Share"));
        assert!(text.contains("+2 more features"));
    }

    #[test]
    fn test_unknown_aspect_overflow() {
        let mut doc = Document::new();
        doc.unknown_aspects = UNKNOWN_ASPECT_OPTIONS.iter().map(|s| s.to_string()).collect();

        let view = summarize(&doc);
        assert_eq!(view.unknown_aspects.shown.len(), 3);
        assert_eq!(view.unknown_aspects.more_marker().as_deref(), Some("+2 more"));

        let text = view.to_string();
        assert!(text.contains("Unknown Aspects:"));
        assert!(text.contains(UNKNOWN_ASPECT_OPTIONS[2]));
        assert!(!text.contains(UNKNOWN_ASPECT_OPTIONS[3]));
        assert!(!text.contains(UNKNOWN_ASPECT_OPTIONS[4]));
        assert!(text.contains("    +2 more\n"));
    }

    #[test]
    fn test_is_complete() {
        let mut doc = Document {
            app_name: Some("TaskMaster".into()),
            platform: Some("Web".into()),
            description: Some("Tracks tasks".into()),
            problem_statement: Some("People forget".into()),
            ..Document::default()
        };
        assert!(!summarize(&doc).is_complete);

        doc.target_users = Some("Professionals".into());
        let view = summarize(&doc);
        assert!(view.is_complete);
        assert!(view.to_string().ends_with("ready for download."));
    }
}
