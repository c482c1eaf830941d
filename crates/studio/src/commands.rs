//! Command implementations.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use academy_client::{CourseApi, CourseApiError};
use academy_core::draft::CourseDraft;
use academy_core::error::CoreError;
use academy_core::publish::{PublishError, PublishPlan, PublishTask, Publisher, StaticActorProvider};
use academy_core::validation::{self, WizardStep};
use academy_core::wizard::{CourseWizard, Notice, NoticeTone, PublishOutcome};

use crate::config::{ConfigError, StudioConfig};

/// Errors surfaced by studio commands.
#[derive(Debug, thiserror::Error)]
pub enum StudioError {
    #[error("Failed to read draft {}: {source}", path.display())]
    ReadDraft {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Draft {} is not valid JSON: {source}", path.display())]
    ParseDraft {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Draft is not ready to publish ({failed} step(s) failing)")]
    NotReady { failed: usize },

    #[error("Failed to render summary: {0}")]
    Render(#[source] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Client(#[from] CourseApiError),

    #[error(transparent)]
    Publish(#[from] PublishError),
}

pub type Result<T> = std::result::Result<T, StudioError>;

/// Per-step outcome of [`check_draft`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepCheck {
    pub step: WizardStep,
    /// `None` when the step passes.
    pub failure: Option<String>,
}

/// Every step's validator result plus advisory warnings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftCheck {
    pub steps: Vec<StepCheck>,
    pub warnings: Vec<String>,
}

impl DraftCheck {
    pub fn failed(&self) -> usize {
        self.steps.iter().filter(|s| s.failure.is_some()).count()
    }
}

/// Read a draft from a JSON file.
pub fn load_draft(path: &Path) -> Result<CourseDraft> {
    let text = std::fs::read_to_string(path).map_err(|source| StudioError::ReadDraft {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| StudioError::ParseDraft {
        path: path.to_path_buf(),
        source,
    })
}

/// Run every step validator without stopping at the first failure.
pub fn check_draft(draft: &CourseDraft) -> DraftCheck {
    DraftCheck {
        steps: WizardStep::ALL
            .into_iter()
            .map(|step| StepCheck {
                step,
                failure: validation::validate_step(draft, step)
                    .err()
                    .map(|e| e.reason().to_string()),
            })
            .collect(),
        warnings: validation::schedule_warnings(draft),
    }
}

/// One line per planned request, e.g. `3. module 1 lesson 1: Welcome`.
pub fn describe_plan(draft: &CourseDraft) -> Vec<String> {
    PublishPlan::from_draft(draft)
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let title = match task {
                PublishTask::CreateCourse => draft.title(),
                PublishTask::CreateModule { module } => draft.modules()[module].title(),
                PublishTask::CreateLesson { module, lesson } => {
                    draft.modules()[module].lessons()[lesson].title()
                }
                PublishTask::CreateAssignment { assignment } => {
                    draft.assignments()[assignment].title()
                }
            };
            format!("{}. {task}: {title}", i + 1)
        })
        .collect()
}

pub fn run_validate(path: &Path) -> Result<()> {
    let draft = load_draft(path)?;
    let check = check_draft(&draft);

    for step in &check.steps {
        match &step.failure {
            None => println!("[ok]   {}", step.step),
            Some(reason) => println!("[fail] {}: {reason}", step.step),
        }
    }
    for warning in &check.warnings {
        println!("[warn] {warning}");
    }

    match check.failed() {
        0 => Ok(()),
        failed => Err(StudioError::NotReady { failed }),
    }
}

pub fn run_plan(path: &Path) -> Result<()> {
    let draft = load_draft(path)?;
    for line in describe_plan(&draft) {
        println!("{line}");
    }
    Ok(())
}

pub fn run_summary(path: &Path) -> Result<()> {
    let draft = load_draft(path)?;
    let summary = draft.summary();
    let json = serde_json::to_string_pretty(&summary).map_err(StudioError::Render)?;
    println!("{json}");
    Ok(())
}

/// Load publish settings from the environment, then apply the `--api-url`
/// override.
pub fn load_config(api_url: Option<String>) -> Result<StudioConfig> {
    Ok(with_api_url(StudioConfig::from_env()?, api_url))
}

/// [`load_config`] over an arbitrary variable lookup.
pub fn load_config_from<F>(lookup: F, api_url: Option<String>) -> Result<StudioConfig>
where
    F: Fn(&str) -> Option<String>,
{
    Ok(with_api_url(StudioConfig::from_lookup(lookup)?, api_url))
}

fn with_api_url(mut config: StudioConfig, api_url: Option<String>) -> StudioConfig {
    if let Some(api_url) = api_url {
        config.api_url = api_url;
    }
    config
}

/// Build a publisher talking to the configured course API.
pub fn build_publisher(config: &StudioConfig) -> Result<Publisher> {
    let mut api = CourseApi::with_timeout(config.api_url.as_str(), config.request_timeout)?;
    if let Some(token) = &config.api_token {
        api = api.with_bearer_token(token.as_str());
    }
    let actors = match &config.actor {
        Some(actor) => StaticActorProvider::new(actor.clone()),
        None => StaticActorProvider::signed_out(),
    };
    Ok(Publisher::new(Arc::new(api), Arc::new(actors)))
}

/// Step through the wizard the way an author would, then publish.
pub async fn publish_draft(
    draft: CourseDraft,
    publisher: &Publisher,
    config: &StudioConfig,
) -> Result<PublishOutcome> {
    let mut wizard = CourseWizard::with_draft(draft);

    for warning in validation::schedule_warnings(wizard.draft()) {
        tracing::warn!("{warning}");
    }

    while wizard.current_step() != WizardStep::Publish {
        let advanced = wizard.next();
        report_notices(wizard.take_notices());
        advanced?;
    }

    let result = wizard.publish(publisher, &config.redirect).await;
    report_notices(wizard.take_notices());
    Ok(result?)
}

pub async fn run_publish(path: &Path, api_url: Option<String>) -> Result<()> {
    let config = load_config(api_url)?;
    let draft = load_draft(path)?;
    let publisher = build_publisher(&config)?;

    tracing::info!(api_url = %config.api_url, draft = %path.display(), "Publishing draft");
    let outcome = publish_draft(draft, &publisher, &config).await?;

    println!(
        "Published course {} ({} requests). Continue at {}",
        outcome.report.course_id, outcome.report.requests_issued, outcome.redirect_to
    );
    Ok(())
}

fn report_notices(notices: Vec<Notice>) {
    for notice in notices {
        match notice.tone {
            NoticeTone::Destructive => {
                tracing::error!(title = %notice.title, "{}", notice.description)
            }
            NoticeTone::Default => tracing::info!(title = %notice.title, "{}", notice.description),
        }
    }
}
