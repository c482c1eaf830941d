//! Command-line interface definition using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Academy Studio - author and publish courses from a JSON draft
#[derive(Parser, Debug)]
#[command(name = "academy-studio")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Course API base URL (overrides ACADEMY_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Walk the draft through every wizard step and report what blocks it
    Validate {
        /// Path to the draft JSON file
        draft: PathBuf,
    },

    /// Print the create requests publishing would issue, in order
    Plan {
        /// Path to the draft JSON file
        draft: PathBuf,
    },

    /// Print module, lesson, and assignment totals
    Summary {
        /// Path to the draft JSON file
        draft: PathBuf,
    },

    /// Validate and publish the draft to the course API
    Publish {
        /// Path to the draft JSON file
        draft: PathBuf,
    },
}

impl Cli {
    /// The draft file every subcommand operates on.
    pub fn draft_path(&self) -> &PathBuf {
        match &self.command {
            Commands::Validate { draft }
            | Commands::Plan { draft }
            | Commands::Summary { draft }
            | Commands::Publish { draft } => draft,
        }
    }
}
