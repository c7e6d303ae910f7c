//! Ten-question prototype intake
//!
//! A linear questionnaire that collects the minimum needed for a first PRD
//! and maps the answers onto a full [`Document`].

use std::collections::HashMap;
use tracing::{debug, info};

use crate::error::WizardError;
use crate::models::{Document, Feature, FeaturePriority, TO_BE_DETERMINED};
use crate::validation::{check_answer, RuleKind, ValidationError};

pub const PROTOTYPE_PLATFORM_OPTIONS: &[&str] = &[
    "Web",
    "Mobile (iOS)",
    "Mobile (Android)",
    "Mobile (Cross-platform)",
    "Desktop",
    "Web + Mobile",
];

pub const PROTOTYPE_TIMELINE_OPTIONS: &[&str] = &[
    "1-3 months",
    "3-6 months",
    "6-12 months",
    "1+ years",
    "Not sure yet",
];

pub const PROTOTYPE_OUT_OF_SCOPE: &str = "Advanced features, complex integrations, and secondary functionality will be considered for future phases";

/// Provenance tag written into documents built from the questionnaire
pub const GENERATED_FROM_PROTOTYPE: &str = "prototype";

pub const REQUIRED_ANSWER_MESSAGE: &str = "This question is required";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrototypeQuestion {
    /// Answer key
    pub id: &'static str,
    pub label: &'static str,
    pub kind: RuleKind,
    pub required: bool,
    pub placeholder: Option<&'static str>,
}

impl PrototypeQuestion {
    const fn text(
        id: &'static str,
        label: &'static str,
        required: bool,
        placeholder: &'static str,
    ) -> Self {
        Self {
            id,
            label,
            kind: RuleKind::Text,
            required,
            placeholder: Some(placeholder),
        }
    }

    const fn select(
        id: &'static str,
        label: &'static str,
        required: bool,
        options: &'static [&'static str],
    ) -> Self {
        Self {
            id,
            label,
            kind: RuleKind::Select(options),
            required,
            placeholder: None,
        }
    }

    /// Validates an answer to this question
    pub fn check(&self, answer: Option<&str>) -> Option<ValidationError> {
        check_answer(
            self.id,
            answer,
            self.required,
            self.kind,
            REQUIRED_ANSWER_MESSAGE,
        )
    }
}

pub static PROTOTYPE_QUESTIONS: [PrototypeQuestion; 10] = [
    PrototypeQuestion::text(
        "appName",
        "What is your application called?",
        true,
        "e.g., TaskMaster, ShopEasy, FitTracker",
    ),
    PrototypeQuestion::select(
        "platform",
        "What platform will it run on?",
        true,
        PROTOTYPE_PLATFORM_OPTIONS,
    ),
    PrototypeQuestion::text(
        "description",
        "In one sentence, what does your app do?",
        true,
        "e.g., Helps users track daily tasks and boost productivity",
    ),
    PrototypeQuestion::text(
        "mainProblem",
        "What main problem does it solve?",
        true,
        "e.g., People forget important tasks and feel overwhelmed",
    ),
    PrototypeQuestion::text(
        "targetUser",
        "Who is your primary user?",
        true,
        "e.g., Busy professionals, Students, Small business owners",
    ),
    PrototypeQuestion::text(
        "coreFeature",
        "What is the ONE most important feature?",
        true,
        "e.g., Task creation and reminders",
    ),
    PrototypeQuestion::text(
        "currentSolution",
        "How do people solve this problem today?",
        false,
        "e.g., Paper lists, phone notes, existing apps",
    ),
    PrototypeQuestion::text(
        "differentiator",
        "What makes your solution different/better?",
        false,
        "e.g., AI-powered prioritization, Voice input, Team collaboration",
    ),
    PrototypeQuestion::text(
        "successMetric",
        "How will you know if it's successful?",
        false,
        "e.g., Users complete 80% more tasks, 4.5+ star rating",
    ),
    PrototypeQuestion::select(
        "timeline",
        "When do you want to launch?",
        false,
        PROTOTYPE_TIMELINE_OPTIONS,
    ),
];

/// Where the questionnaire stands after a forward move
#[derive(Debug, Clone, PartialEq)]
pub enum PrototypeStep {
    /// Now on the question at this index
    Question(usize),
    /// The last question was answered; the built document is attached
    Completed(Document),
}

/// State of one pass through the questionnaire
#[derive(Debug, Clone, Default)]
pub struct PrototypeSession {
    current: usize,
    answers: HashMap<String, String>,
    error: Option<ValidationError>,
}

impl PrototypeSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> &'static PrototypeQuestion {
        &PROTOTYPE_QUESTIONS[self.current]
    }

    pub fn question_count(&self) -> usize {
        PROTOTYPE_QUESTIONS.len()
    }

    pub fn is_last(&self) -> bool {
        self.current == PROTOTYPE_QUESTIONS.len() - 1
    }

    pub fn progress_fraction(&self) -> f64 {
        (self.current + 1) as f64 / PROTOTYPE_QUESTIONS.len() as f64
    }

    pub fn answers(&self) -> &HashMap<String, String> {
        &self.answers
    }

    /// Gets the stored answer to a question
    pub fn answer_for(&self, id: &str) -> Option<&str> {
        self.answers.get(id).map(String::as_str)
    }

    /// The error raised by the last blocked move, if any
    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    /// Records the answer to the current question and clears the error
    pub fn answer(&mut self, value: impl Into<String>) {
        let id = self.current_question().id;
        self.answers.insert(id.to_string(), value.into());
        self.error = None;
    }

    /// Validates the current answer and moves on
    ///
    /// On the last question a valid answer completes the questionnaire and
    /// returns the generated document.
    pub fn advance(&mut self) -> Result<PrototypeStep, ValidationError> {
        let question = self.current_question();
        if let Some(error) = question.check(self.answer_for(question.id)) {
            debug!(question = question.id, "prototype answer rejected");
            self.error = Some(error.clone());
            return Err(error);
        }

        self.error = None;
        if self.is_last() {
            info!(answers = self.answers.len(), "Prototype questionnaire completed");
            return Ok(PrototypeStep::Completed(build_document(&self.answers)));
        }

        self.current += 1;
        Ok(PrototypeStep::Question(self.current))
    }

    /// Goes back one question, stopping at the first
    pub fn retreat(&mut self) -> usize {
        self.current = self.current.saturating_sub(1);
        self.error = None;
        self.current
    }

    /// Leaves an optional question unanswered and moves on
    pub fn skip(&mut self) -> Result<PrototypeStep, WizardError> {
        let question = self.current_question();
        if question.required {
            return Err(WizardError::SkipNotAllowed(question.label.to_string()));
        }

        self.answers.remove(question.id);
        self.advance()
            .map_err(|e| WizardError::Validation(std::iter::once(e).collect()))
    }
}

fn given<'a>(answers: &'a HashMap<String, String>, id: &str) -> Option<&'a str> {
    answers
        .get(id)
        .map(String::as_str)
        .filter(|v| !v.trim().is_empty())
}

/// Builds a full document from questionnaire answers
///
/// Blank answers count as missing.
pub fn build_document(answers: &HashMap<String, String>) -> Document {
    let get = |id: &str| given(answers, id);
    let owned = |id: &str| get(id).map(str::to_string);
    let or_tbd = |id: &str| Some(get(id).unwrap_or(TO_BE_DETERMINED).to_string());

    let core_feature = get("coreFeature");

    let features = core_feature
        .map(|core| {
            vec![Feature::new(core, format!("Core feature: {}", core))
                .with_priority(FeaturePriority::High)
                .with_acceptance_criteria(TO_BE_DETERMINED)]
        })
        .unwrap_or_default();

    let mut in_scope = format!(
        "Core functionality: {}",
        core_feature.unwrap_or("Primary feature set")
    );
    if let Some(differentiator) = get("differentiator") {
        in_scope.push_str(&format!("\nDifferentiator: {}", differentiator));
    }

    Document {
        app_name: owned("appName"),
        platform: owned("platform"),
        description: owned("description"),
        timeline: or_tbd("timeline"),
        problem_statement: owned("mainProblem"),
        target_users: owned("targetUser"),
        current_solutions: or_tbd("currentSolution"),
        success_metrics: or_tbd("successMetric"),
        features,
        in_scope: Some(in_scope),
        out_of_scope: Some(PROTOTYPE_OUT_OF_SCOPE.to_string()),
        is_prototype: true,
        generated_from: Some(GENERATED_FROM_PROTOTYPE.to_string()),
        ..Document::default()
    }
}
