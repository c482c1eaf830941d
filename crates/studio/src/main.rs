//! `academy-studio` -- course authoring from the command line.
//!
//! Loads a course draft from a JSON file, runs it through the authoring
//! wizard's step validators, and publishes it to the course API.
//! `publish` reads its configuration from the environment (see
//! [`StudioConfig::from_env`](academy_studio::config::StudioConfig::from_env));
//! a `.env` file in the working directory is honoured.

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use academy_studio::cli::{Cli, Commands};
use academy_studio::commands;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "academy_studio=info,academy_core=info,academy_client=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let draft = cli.draft_path().clone();
    let result = match cli.command {
        Commands::Validate { .. } => commands::run_validate(&draft),
        Commands::Plan { .. } => commands::run_plan(&draft),
        Commands::Summary { .. } => commands::run_summary(&draft),
        Commands::Publish { .. } => commands::run_publish(&draft, cli.api_url).await,
    };

    result.with_context(|| format!("{} failed", draft.display()))
}
