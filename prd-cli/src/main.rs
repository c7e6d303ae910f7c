mod cli;
mod prompts;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::fs;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use prd_core::{
    check_field, create_backend, determine_storage_path, export_markdown, get_config_path, render,
    summarize, Config, Document, DocumentStore, FeaturePriority, FieldEdit, FieldId, FieldValue,
    NavCommand, PrototypeSession, PrototypeStep, SectionDescriptor, SectionId, WizardError,
    WizardSession,
};

use crate::cli::{Cli, Command, FeatureCommand};
use crate::prompts::{FeatureAction, NavChoice, QuestionInput, SummaryAction};

/// Environment variable holding the log filter
const LOG_ENV: &str = "PRD_LOG";

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => get_config_path()?,
    };
    let config = Config::load_or_create(&config_path)?;

    // Determine which document file to use
    let storage_path = determine_storage_path(cli.file.as_deref(), &config)?;
    tracing::debug!(
        config = %config_path.display(),
        document = %storage_path.display(),
        "resolved paths"
    );
    let mut store = DocumentStore::new(create_backend(&storage_path, None));

    match &cli.command {
        Command::Wizard => {
            run_wizard(store, &config)?;
        }
        Command::Prototype => {
            run_prototype(&mut store)?;
        }
        Command::Summary => {
            println!("{}", summarize(store.get()));
        }
        Command::Render { output } => {
            handle_render_command(&store, output.as_deref())?;
        }
        Command::Export { dir } => {
            let dir = dir.clone().unwrap_or_else(|| config.export_dir.clone());
            let path = export_markdown(store.get(), &dir)?;
            println!("{} PRD written to {}", "✓".green(), path.display());
        }
        Command::Set { field, value } => {
            set_field(&mut store, field, value)?;
        }
        Command::Feature(feature_cmd) => {
            handle_feature_command(feature_cmd, store)?;
        }
        Command::Reset { yes } => {
            reset_document(&mut store, *yes)?;
        }
        Command::Path => {
            println!("{}", storage_path.display());
        }
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn warn_if_unpersisted(store: &DocumentStore) {
    if !store.is_persisted() {
        println!(
            "{} Changes could not be saved and are kept for this session only.",
            "!".yellow()
        );
    }
}

fn handle_render_command(store: &DocumentStore, output: Option<&Path>) -> Result<()> {
    let markdown = render(store.get());
    match output {
        Some(path) => {
            fs::write(path, &markdown)
                .with_context(|| format!("Failed to write PRD to {:?}", path))?;
            println!("{} PRD written to {}", "✓".green(), path.display());
        }
        None => println!("{}", markdown),
    }
    Ok(())
}

fn set_field(store: &mut DocumentStore, key: &str, value: &str) -> Result<()> {
    let field = FieldId::from_key(key).ok_or_else(|| WizardError::UnknownField(key.to_string()))?;

    let value = if field.is_list() {
        FieldValue::List(
            value
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        )
    } else {
        FieldValue::Text(value.to_string())
    };

    let mut document = store.get().clone();
    document.set_field(field, value)?;
    store.set(document);

    println!("{} {} updated", "✓".green(), field.label());
    if let Some(error) = check_field(store.get(), field) {
        println!("{} {}", "!".yellow(), error.message);
    }
    warn_if_unpersisted(store);
    Ok(())
}

fn handle_feature_command(cmd: &FeatureCommand, store: DocumentStore) -> Result<()> {
    let mut session = WizardSession::new(store);

    match cmd {
        FeatureCommand::Add {
            name,
            description,
            priority,
            acceptance,
            interactive,
        } => {
            // Default to interactive mode if name or description is missing
            let (name, description, priority, acceptance) =
                if *interactive || name.is_none() || description.is_none() {
                    prompts::prompt_new_feature()?
                } else {
                    let priority = match priority {
                        Some(p) => parse_priority(p)?,
                        None => FeaturePriority::default(),
                    };
                    (
                        name.clone().unwrap_or_default(),
                        description.clone().unwrap_or_default(),
                        priority,
                        acceptance.clone(),
                    )
                };

            match session.add_feature(&name, &description, priority, acceptance.as_deref()) {
                Ok(id) => {
                    println!("{} Feature '{}' added", "✓".green(), name.trim());
                    println!("ID: {}", id.to_string().green());
                }
                Err(WizardError::Validation(errors)) => {
                    for error in &errors {
                        println!("{} {}", "!".red(), error.message);
                    }
                    anyhow::bail!("Feature was not added");
                }
                Err(e) => return Err(e.into()),
            }
            warn_if_unpersisted(session.store());
        }
        FeatureCommand::Remove { id } => {
            let target = find_feature_id(session.document(), id)?;
            session.remove_feature(&target);
            println!("{} Feature removed", "✓".green());
            warn_if_unpersisted(session.store());
        }
        FeatureCommand::List => {
            let features = &session.document().features;
            if features.is_empty() {
                println!("{}", "No features defined.".yellow());
                return Ok(());
            }

            for (index, feature) in features.iter().enumerate() {
                let priority = match feature.priority {
                    FeaturePriority::High => "High".red(),
                    FeaturePriority::Medium => "Medium".yellow(),
                    FeaturePriority::Low => "Low".green(),
                };
                println!(
                    "{}. {} [{}] {}",
                    index + 1,
                    feature.name.bold(),
                    priority,
                    feature.id.to_string().dimmed()
                );
                println!("   {}", feature.description);
            }
        }
    }
    Ok(())
}

fn parse_priority(priority_str: &str) -> Result<FeaturePriority> {
    FeaturePriority::parse(priority_str)
        .with_context(|| format!("Invalid priority: {}", priority_str))
}

/// Resolves a feature by UUID or exact name
fn find_feature_id(document: &Document, id_or_name: &str) -> Result<Uuid> {
    let features = &document.features;
    if let Ok(id) = Uuid::parse_str(id_or_name) {
        if features.iter().any(|f| f.id == id) {
            return Ok(id);
        }
    }

    features
        .iter()
        .find(|f| f.name == id_or_name)
        .map(|f| f.id)
        .with_context(|| format!("Feature '{}' not found", id_or_name))
}

fn reset_document(store: &mut DocumentStore, skip_confirm: bool) -> Result<()> {
    if !skip_confirm && !prompts::confirm("Discard the current document and start over?")? {
        println!("{}", "Reset cancelled.".yellow());
        return Ok(());
    }

    store.reset();
    println!("{} Document reset", "✓".green());
    warn_if_unpersisted(store);
    Ok(())
}

fn print_section_header(session: &WizardSession) {
    let view = session.view();
    println!();
    println!(
        "{} {}",
        format!("[{}/{}]", view.position + 1, view.section_count).dimmed(),
        view.section.label.bold()
    );
    println!("{}", format!("{:.0}% complete", view.progress * 100.0).dimmed());

    for error in &view.errors {
        println!("  {} {}", "!".red(), error.message);
    }
}

fn edit_section(session: &mut WizardSession, section: &SectionDescriptor) -> Result<()> {
    for &field in section.fields {
        let current = session.document().field(field);
        let value = prompts::prompt_field(field, section.rule_for(field), current)?;
        session.edit(FieldEdit::new(section.id, field, value))?;
    }
    Ok(())
}

fn edit_features(session: &mut WizardSession) -> Result<()> {
    loop {
        let features = session.document().features.clone();
        if features.is_empty() {
            println!("{}", "No features yet.".yellow());
        }
        for (index, feature) in features.iter().enumerate() {
            println!("  {}. {} [{}]", index + 1, feature.name, feature.priority.badge());
        }

        match prompts::prompt_feature_action(!features.is_empty())? {
            FeatureAction::Add => {
                let (name, description, priority, acceptance) = prompts::prompt_new_feature()?;
                match session.add_feature(&name, &description, priority, acceptance.as_deref()) {
                    Ok(_) => println!("{} Feature added", "✓".green()),
                    Err(WizardError::Validation(errors)) => {
                        for error in &errors {
                            println!("  {} {}", "!".red(), error.message);
                        }
                    }
                    Err(e) => return Err(e.into()),
                }
            }
            FeatureAction::Remove => {
                let id = prompts::prompt_select_feature(&features)?;
                if session.remove_feature(&id) {
                    println!("{} Feature removed", "✓".green());
                }
            }
            FeatureAction::Done => return Ok(()),
        }
    }
}

fn run_wizard(store: DocumentStore, config: &Config) -> Result<()> {
    let mut session = WizardSession::new(store);

    loop {
        print_section_header(&session);
        let view = session.view();

        if view.section.id == SectionId::Summary {
            println!();
            println!("{}", session.summarize());
            println!();

            match prompts::prompt_summary_action()? {
                SummaryAction::Download => {
                    let path = session.download(&config.export_dir)?;
                    println!("{} PRD written to {}", "✓".green(), path.display());
                }
                SummaryAction::StartOver => {
                    if prompts::confirm("Discard the current document and start over?")? {
                        session.navigate(NavCommand::Reset)?;
                    }
                }
                SummaryAction::Back => {
                    session.navigate(NavCommand::Retreat)?;
                }
                SummaryAction::Quit => break,
            }
            continue;
        }

        if view.section.owns_features {
            edit_features(&mut session)?;
        } else {
            edit_section(&mut session, &view.section)?;
        }

        loop {
            let view = session.view();
            match prompts::prompt_nav(&view)? {
                NavChoice::Next => {
                    // A blocked advance leaves its errors in the view
                    if let Err(e) = session.navigate(NavCommand::Advance) {
                        println!("{} {}", "!".red(), e);
                    }
                }
                NavChoice::Back => {
                    session.navigate(NavCommand::Retreat)?;
                }
                NavChoice::Skip => match session.navigate(NavCommand::Skip) {
                    Ok(_) => {}
                    Err(e) => {
                        println!("{} {}", "!".yellow(), e);
                        continue;
                    }
                },
                NavChoice::Jump => {
                    let index = prompts::prompt_jump(session.engine().sections())?;
                    if let Some(unfinished) =
                        session.engine().first_unsatisfied_before(index, session.document())
                    {
                        let label = session.engine().sections()[unfinished].label;
                        println!(
                            "{} '{}' still has required fields missing",
                            "!".yellow(),
                            label
                        );
                    }
                    session.navigate(NavCommand::Jump(index))?;
                }
                NavChoice::Edit => {}
                NavChoice::Quit => {
                    warn_if_unpersisted(session.store());
                    return Ok(());
                }
            }
            break;
        }
    }

    warn_if_unpersisted(session.store());
    Ok(())
}

fn run_prototype(store: &mut DocumentStore) -> Result<()> {
    let mut session = PrototypeSession::new();
    println!(
        "{}",
        "Answer a few quick questions to generate a prototype PRD.".bold()
    );

    let document = loop {
        let question = session.current_question();
        println!(
            "{}",
            format!(
                "Question {} of {}",
                session.current_index() + 1,
                session.question_count()
            )
            .dimmed()
        );
        if let Some(error) = session.error() {
            println!("  {} {}", "!".red(), error.message);
        }

        let step = match prompts::prompt_question(question, session.answer_for(question.id))? {
            QuestionInput::Answer(value) => {
                session.answer(value);
                // Rejected answers are kept on the session and shown next round
                session.advance().ok()
            }
            QuestionInput::Skip => match session.skip() {
                Ok(step) => Some(step),
                Err(e) => {
                    println!("  {} {}", "!".yellow(), e);
                    None
                }
            },
            QuestionInput::Back => {
                session.retreat();
                None
            }
        };

        if let Some(PrototypeStep::Completed(document)) = step {
            break document;
        }
    };

    store.set(document);
    println!("{}", "Prototype PRD generated!".green());
    println!();
    println!("{}", summarize(store.get()));
    warn_if_unpersisted(store);
    Ok(())
}
