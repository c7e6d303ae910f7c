use anyhow::Result;
use inquire::{Confirm, Editor, MultiSelect, Select, Text};
use std::fmt;
use uuid::Uuid;

use prd_core::models::UNKNOWN_ASPECT_OPTIONS;
use prd_core::prototype::PrototypeQuestion;
use prd_core::validation::{FieldRule, RuleKind};
use prd_core::{Feature, FeaturePriority, FieldId, FieldValue, SectionDescriptor, WizardView};

const SKIP_OPTION: &str = "(skip)";

/// Prompts for one field of a wizard section, starting from its current value
pub fn prompt_field(
    field: FieldId,
    rule: Option<&FieldRule>,
    current: Option<FieldValue>,
) -> Result<FieldValue> {
    if field.is_list() {
        let selected = match current {
            Some(FieldValue::List(items)) => items,
            _ => Vec::new(),
        };
        let defaults: Vec<usize> = UNKNOWN_ASPECT_OPTIONS
            .iter()
            .enumerate()
            .filter(|(_, option)| selected.iter().any(|s| s == *option))
            .map(|(i, _)| i)
            .collect();

        let tags = MultiSelect::new(field.label(), UNKNOWN_ASPECT_OPTIONS.to_vec())
            .with_default(&defaults)
            .prompt()?;
        return Ok(FieldValue::List(
            tags.into_iter().map(str::to_string).collect(),
        ));
    }

    let current = match current {
        Some(FieldValue::Text(text)) => text,
        _ => String::new(),
    };
    let label = match rule {
        Some(rule) if rule.required => format!("{} *", field.label()),
        _ => field.label().to_string(),
    };

    if let Some(options) = rule.and_then(|r| r.kind.options()) {
        let mut choices: Vec<&str> = options.to_vec();
        let required = rule.map_or(false, |r| r.required);
        if !required {
            choices.push(SKIP_OPTION);
        }
        let cursor = choices.iter().position(|c| *c == current).unwrap_or(0);

        let choice = Select::new(&label, choices)
            .with_starting_cursor(cursor)
            .prompt()?;
        let value = if choice == SKIP_OPTION { "" } else { choice };
        return Ok(FieldValue::Text(value.to_string()));
    }

    // Use the Editor type for the long-form problem statement
    let text = if field == FieldId::ProblemStatement {
        Editor::new(&label).with_predefined_text(&current).prompt()?
    } else {
        Text::new(&label).with_initial_value(&current).prompt()?
    };
    Ok(FieldValue::Text(text.trim().to_string()))
}

/// Prompts the user for a new feature
pub fn prompt_new_feature() -> Result<(String, String, FeaturePriority, Option<String>)> {
    let name = Text::new("Feature name:").prompt()?;
    let description = Text::new("Description:").prompt()?;

    let priority = Select::new("Priority:", FeaturePriority::all().to_vec())
        .with_starting_cursor(1)
        .prompt()?;

    let add_criteria = Confirm::new("Add acceptance criteria?")
        .with_default(false)
        .prompt()?;
    let acceptance = if add_criteria {
        Some(Text::new("Acceptance criteria:").prompt()?)
    } else {
        None
    };

    Ok((name, description, priority, acceptance))
}

/// Prompts the user to select a feature from a list
pub fn prompt_select_feature(features: &[Feature]) -> Result<Uuid> {
    let options: Vec<String> = features
        .iter()
        .map(|f| format!("{} [{}]", f.name, f.priority))
        .collect();

    let selection = Select::new("Select a feature:", options.clone()).prompt()?;

    let index = options
        .iter()
        .position(|o| o == &selection)
        .unwrap_or_default();
    Ok(features[index].id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureAction {
    Add,
    Remove,
    Done,
}

impl fmt::Display for FeatureAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureAction::Add => write!(f, "Add a feature"),
            FeatureAction::Remove => write!(f, "Remove a feature"),
            FeatureAction::Done => write!(f, "Done with features"),
        }
    }
}

pub fn prompt_feature_action(has_features: bool) -> Result<FeatureAction> {
    let mut options = vec![FeatureAction::Add];
    if has_features {
        options.push(FeatureAction::Remove);
    }
    options.push(FeatureAction::Done);

    Ok(Select::new("Features:", options).prompt()?)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavChoice {
    Next,
    Back,
    Skip,
    Jump,
    Edit,
    Quit,
}

impl fmt::Display for NavChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavChoice::Next => write!(f, "Next section"),
            NavChoice::Back => write!(f, "Previous section"),
            NavChoice::Skip => write!(f, "Skip this section"),
            NavChoice::Jump => write!(f, "Jump to section..."),
            NavChoice::Edit => write!(f, "Edit this section again"),
            NavChoice::Quit => write!(f, "Save and quit"),
        }
    }
}

/// Asks where to go after a section has been filled in
pub fn prompt_nav(view: &WizardView) -> Result<NavChoice> {
    let mut options = vec![NavChoice::Next];
    if view.position > 0 {
        options.push(NavChoice::Back);
    }
    if !view.section.required {
        options.push(NavChoice::Skip);
    }
    options.extend([NavChoice::Jump, NavChoice::Edit, NavChoice::Quit]);

    Ok(Select::new("What next?", options).prompt()?)
}

/// Prompts for a section to jump to and returns its index
pub fn prompt_jump(sections: &[SectionDescriptor]) -> Result<usize> {
    let options: Vec<String> = sections
        .iter()
        .map(|s| format!("{}. {}", s.position + 1, s.label))
        .collect();

    let selection = Select::new("Jump to:", options.clone()).prompt()?;
    Ok(options
        .iter()
        .position(|o| o == &selection)
        .unwrap_or_default())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryAction {
    Download,
    StartOver,
    Back,
    Quit,
}

impl fmt::Display for SummaryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryAction::Download => write!(f, "Download PRD"),
            SummaryAction::StartOver => write!(f, "Start over"),
            SummaryAction::Back => write!(f, "Previous section"),
            SummaryAction::Quit => write!(f, "Quit"),
        }
    }
}

pub fn prompt_summary_action() -> Result<SummaryAction> {
    let options = vec![
        SummaryAction::Download,
        SummaryAction::StartOver,
        SummaryAction::Back,
        SummaryAction::Quit,
    ];
    Ok(Select::new("Summary & Download:", options).prompt()?)
}

/// Result of prompting for one prototype question
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionInput {
    Answer(String),
    Skip,
    Back,
}

/// Prompts for one prototype question; Esc goes back
pub fn prompt_question(question: &PrototypeQuestion, current: Option<&str>) -> Result<QuestionInput> {
    let label = if question.required {
        format!("{} *", question.label)
    } else {
        question.label.to_string()
    };
    let current = current.unwrap_or_default();

    let answer = match question.kind {
        RuleKind::Select(options) => {
            let mut choices: Vec<&str> = options.to_vec();
            if !question.required {
                choices.push(SKIP_OPTION);
            }
            let cursor = choices.iter().position(|c| *c == current).unwrap_or(0);
            Select::new(&label, choices)
                .with_starting_cursor(cursor)
                .with_help_message("esc to go back")
                .prompt_skippable()?
                .map(|choice| {
                    if choice == SKIP_OPTION {
                        String::new()
                    } else {
                        choice.to_string()
                    }
                })
        }
        RuleKind::Text => {
            let mut prompt = Text::new(&label)
                .with_initial_value(current)
                .with_help_message("esc to go back");
            if let Some(placeholder) = question.placeholder {
                prompt = prompt.with_placeholder(placeholder);
            }
            prompt.prompt_skippable()?
        }
    };

    Ok(match answer {
        None => QuestionInput::Back,
        Some(text) if text.trim().is_empty() && !question.required => QuestionInput::Skip,
        Some(text) => QuestionInput::Answer(text.trim().to_string()),
    })
}

pub fn confirm(message: &str) -> Result<bool> {
    Ok(Confirm::new(message).with_default(false).prompt()?)
}
