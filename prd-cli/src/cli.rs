use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Build a product requirements document step by step")]
pub struct Cli {
    /// Path to the file holding the working document (.yaml or .json)
    #[clap(long)]
    pub file: Option<PathBuf>,

    /// Path to the config file
    #[clap(long)]
    pub config: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum FeatureCommand {
    /// Add a new feature
    Add {
        /// Name of the feature
        #[clap(long)]
        name: Option<String>,

        /// What the feature does
        #[clap(long)]
        description: Option<String>,

        /// Priority (high, medium, low)
        #[clap(long)]
        priority: Option<String>,

        /// Acceptance criteria
        #[clap(long)]
        acceptance: Option<String>,

        /// Use interactive mode (prompts)
        #[clap(long)]
        interactive: bool,
    },

    /// Remove a feature by id or name
    Remove {
        /// The ID or exact name of the feature
        id: String,
    },

    /// List all features
    List,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Walk through the full five-section wizard
    Wizard,

    /// Answer ten quick questions to get a first draft
    Prototype,

    /// Show the review summary of the current document
    Summary,

    /// Print the markdown document
    Render {
        /// Write to this file instead of stdout
        #[clap(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Write <App_Name>_PRD.md to the export directory
    Export {
        /// Directory to write into (defaults to the configured export_dir)
        #[clap(long)]
        dir: Option<PathBuf>,
    },

    /// Set one field by its key (e.g. appName, inScope)
    Set {
        /// Field key
        field: String,

        /// New value; unknownAspects takes a comma-separated list
        value: String,
    },

    /// Feature management commands
    #[clap(subcommand)]
    Feature(FeatureCommand),

    /// Discard the current document and start over
    Reset {
        /// Skip confirmation prompt
        #[clap(long, short = 'y')]
        yes: bool,
    },

    /// Print the path of the working document
    Path,
}
