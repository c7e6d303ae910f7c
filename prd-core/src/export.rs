use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::models::{Document, NOT_SPECIFIED, TO_BE_DETERMINED};

/// Title used when the application has no name yet
pub const UNTITLED_PROJECT: &str = "Untitled Project";

/// Closing line of every rendered document
pub const ATTRIBUTION: &str = "*This PRD was generated using the PRD Builder tool.*";

/// Returns the value if it is present and non-empty
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn or_fallback<'a>(value: &'a Option<String>, fallback: &'a str) -> &'a str {
    present(value).unwrap_or(fallback)
}

fn push_subsection(output: &mut String, heading: &str, value: &Option<String>) {
    if let Some(text) = present(value) {
        output.push_str(&format!("### {}\n\n", heading));
        output.push_str(&format!("{}\n\n", text));
    }
}

/// Renders the document as markdown, stamped with today's date
pub fn render(document: &Document) -> String {
    render_at(document, Local::now().date_naive())
}

/// Renders the document as markdown with an explicit generation date
///
/// The output depends only on `document` and `generated_on`.
pub fn render_at(document: &Document, generated_on: NaiveDate) -> String {
    let mut output = String::new();

    // Title
    output.push_str(&format!(
        "# Product Requirements Document: {}\n\n",
        or_fallback(&document.app_name, UNTITLED_PROJECT)
    ));
    output.push_str(&format!(
        "**Generated on:** {}\n\n",
        generated_on.format("%Y-%m-%d")
    ));

    // Basic details
    output.push_str("## Basic Details\n\n");
    output.push_str(&format!(
        "**Application Name:** {}\n\n",
        or_fallback(&document.app_name, NOT_SPECIFIED)
    ));
    output.push_str(&format!(
        "**Platform:** {}\n\n",
        or_fallback(&document.platform, NOT_SPECIFIED)
    ));
    output.push_str(&format!(
        "**Description:** {}\n\n",
        or_fallback(&document.description, NOT_SPECIFIED)
    ));
    if let Some(audience) = present(&document.target_audience) {
        output.push_str(&format!("**Target Audience:** {}\n\n", audience));
    }
    if let Some(timeline) = present(&document.timeline) {
        output.push_str(&format!("**Timeline:** {}\n\n", timeline));
    }
    if let Some(budget) = present(&document.budget) {
        output.push_str(&format!("**Budget:** {}\n\n", budget));
    }

    // Problem definition
    output.push_str("## Problem Definition\n\n");
    output.push_str("### What problem are we solving?\n\n");
    output.push_str(&format!(
        "{}\n\n",
        or_fallback(&document.problem_statement, NOT_SPECIFIED)
    ));
    output.push_str("### Target Users\n\n");
    output.push_str(&format!(
        "{}\n\n",
        or_fallback(&document.target_users, NOT_SPECIFIED)
    ));
    push_subsection(&mut output, "Current Solutions", &document.current_solutions);
    push_subsection(&mut output, "Pain Points", &document.pain_points);
    push_subsection(&mut output, "Success Metrics", &document.success_metrics);

    if !document.unknown_aspects.is_empty() {
        output.push_str("### Unknown Aspects (Requiring Further Research)\n\n");
        for aspect in &document.unknown_aspects {
            output.push_str(&format!("- {}\n", aspect));
        }
        output.push('\n');
    }

    // Features
    if !document.features.is_empty() {
        output.push_str("## Main Features\n\n");
        for (index, feature) in document.features.iter().enumerate() {
            output.push_str(&format!("### {}. {}\n\n", index + 1, feature.name));
            output.push_str(&format!("**Priority:** {}\n\n", feature.priority.badge()));
            output.push_str(&format!("**Description:** {}\n\n", feature.description));
            if let Some(criteria) = present(&feature.acceptance_criteria) {
                output.push_str("**Acceptance Criteria:**\n\n");
                output.push_str(&format!("{}\n\n", criteria));
            }
            output.push_str("---\n\n");
        }
    }

    // Scope
    output.push_str("## Project Scope\n\n");
    output.push_str("### In Scope\n\n");
    output.push_str(&format!(
        "{}\n\n",
        or_fallback(&document.in_scope, TO_BE_DETERMINED)
    ));
    output.push_str("### Out of Scope\n\n");
    output.push_str(&format!(
        "{}\n\n",
        or_fallback(&document.out_of_scope, TO_BE_DETERMINED)
    ));
    push_subsection(&mut output, "Assumptions", &document.assumptions);
    push_subsection(&mut output, "Constraints", &document.constraints);
    push_subsection(&mut output, "Dependencies", &document.dependencies);

    output.push_str("---\n\n");
    output.push_str(ATTRIBUTION);

    output
}

/// File name for the exported document: `<App_Name>_PRD.md`
///
/// Each run of whitespace in the application name becomes one underscore.
/// Without a name the file is called `PRD_PRD.md`.
pub fn export_file_name(document: &Document) -> String {
    let name = present(&document.app_name).unwrap_or("PRD");

    let mut stem = String::with_capacity(name.len());
    let mut in_whitespace = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                stem.push('_');
            }
            in_whitespace = true;
        } else {
            stem.push(c);
            in_whitespace = false;
        }
    }

    format!("{}_PRD.md", stem)
}

/// Writes the rendered document into `dir` and returns the file path
pub fn export_markdown(document: &Document, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create directory: {:?}", dir))?;

    let path = dir.join(export_file_name(document));
    fs::write(&path, render(document))
        .with_context(|| format!("Failed to write PRD to {:?}", path))?;

    info!(path = %path.display(), features = document.features.len(), "Exported PRD");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Feature, FeaturePriority};
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn test_render_empty_document() {
        let markdown = render_at(&Document::new(), date());

        assert!(markdown.starts_with("# Product Requirements Document: Untitled Project\n\n"));
        assert!(markdown.matches(NOT_SPECIFIED).count() >= 3);
        assert!(markdown.contains("### In Scope\n\nTo be determined\n\n"));
        assert!(markdown.contains("### Out of Scope\n\nTo be determined\n\n"));
        assert!(!markdown.contains("Main Features"));
        assert!(!markdown.contains("Target Audience"));
        assert!(!markdown.contains("Unknown Aspects"));
        assert!(markdown.ends_with(ATTRIBUTION));
    }

    #[test]
    fn test_render_full_document() {
        let mut doc = Document::new();
        doc.app_name = Some("TaskMaster".into());
        doc.platform = Some("Web".into());
        doc.description = Some("Tracks tasks".into());
        doc.timeline = Some("3-6 months".into());
        doc.problem_statement = Some("People forget tasks".into());
        doc.target_users = Some("Busy professionals".into());
        doc.pain_points = Some("Too many apps".into());
        doc.unknown_aspects = vec!["Pain points need research".into()];
        doc.add_feature(
            Feature::new("Reminders", "Notify before deadlines")
                .with_priority(FeaturePriority::High)
                .with_acceptance_criteria("Notification arrives 10 minutes early"),
        );
        doc.add_feature(Feature::new("Lists", "Group tasks").with_priority(FeaturePriority::Low));
        doc.in_scope = Some("Core task management".into());
        doc.constraints = Some("Two developers".into());

        let expected = "\
# Product Requirements Document: TaskMaster

**Generated on:** 2024-03-15

## Basic Details

**Application Name:** TaskMaster

**Platform:** Web

**Description:** Tracks tasks

**Timeline:** 3-6 months

## Problem Definition

### What problem are we solving?

People forget tasks

### Target Users

Busy professionals

### Pain Points

Too many apps

### Unknown Aspects (Requiring Further Research)

- Pain points need research

## Main Features

### 1. Reminders

**Priority:** HIGH

**Description:** Notify before deadlines

**Acceptance Criteria:**

Notification arrives 10 minutes early

---

### 2. Lists

**Priority:** LOW

**Description:** Group tasks

---

## Project Scope

### In Scope

Core task management

### Out of Scope

To be determined

### Constraints

Two developers

---

*This PRD was generated using the PRD Builder tool.*";

        assert_eq!(render_at(&doc, date()), expected);
    }

    #[test]
    fn test_render_is_deterministic() {
        let mut doc = Document::new();
        doc.app_name = Some("ShopEasy".into());
        doc.add_feature(Feature::new("Cart", "Hold items"));
        assert_eq!(render_at(&doc, date()), render_at(&doc, date()));
    }

    #[test]
    fn test_empty_strings_render_as_absent() {
        let mut doc = Document::new();
        doc.app_name = Some(String::new());
        doc.budget = Some(String::new());
        let markdown = render_at(&doc, date());
        assert!(markdown.contains("Untitled Project"));
        assert!(!markdown.contains("**Budget:**"));
    }

    #[test]
    fn test_export_file_name() {
        let mut doc = Document::new();
        assert_eq!(export_file_name(&doc), "PRD_PRD.md");

        doc.app_name = Some("My Cool App".into());
        assert_eq!(export_file_name(&doc), "My_Cool_App_PRD.md");

        doc.app_name = Some("Two  \t Spaces".into());
        assert_eq!(export_file_name(&doc), "Two_Spaces_PRD.md");

        doc.app_name = Some("TaskMaster".into());
        assert_eq!(export_file_name(&doc), "TaskMaster_PRD.md");
    }

    #[test]
    fn test_export_markdown_writes_rendered_document() -> Result<()> {
        let dir = tempdir()?;
        let mut doc = Document::new();
        doc.app_name = Some("Fit Tracker".into());

        let path = export_markdown(&doc, dir.path())?;
        assert_eq!(path, dir.path().join("Fit_Tracker_PRD.md"));

        let content = fs::read_to_string(&path)?;
        assert!(content.starts_with("# Product Requirements Document: Fit Tracker"));
        assert!(content.ends_with(ATTRIBUTION));

        Ok(())
    }
}
