//! Course-authoring wizard state machine.
//!
//! [`CourseWizard`] owns the draft under construction together with the
//! step pointer. Only `next` is guarded by the step validators; `back` and
//! direct jumps through the step indicator are always allowed. While a
//! publish run is in flight every navigation and draft mutation is refused.

use serde::Serialize;

use crate::draft::CourseDraft;
use crate::error::CoreError;
use crate::publish::{PublishError, PublishReport, PublishStage, Publisher, RedirectConfig};
use crate::types::EntityId;
use crate::validation::{self, WizardStep};

// ---------------------------------------------------------------------------
// Notices
// ---------------------------------------------------------------------------

/// Visual weight of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeTone {
    Default,
    Destructive,
}

/// A transient message for the author (rendered as a toast).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub tone: NoticeTone,
    pub title: String,
    pub description: String,
}

impl Notice {
    fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            tone: NoticeTone::Default,
            title: title.into(),
            description: description.into(),
        }
    }

    fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            tone: NoticeTone::Destructive,
            title: title.into(),
            description: description.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Navigation and publishing state of the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WizardState {
    pub current_step: WizardStep,
    pub is_publishing: bool,
    pub publish_stage_label: String,
    /// Set once a publish run succeeded.
    pub published_course_id: Option<EntityId>,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            current_step: WizardStep::Overview,
            is_publishing: false,
            publish_stage_label: String::new(),
            published_course_id: None,
        }
    }
}

/// Result of a successful publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOutcome {
    pub report: PublishReport,
    /// Where the author should be sent next.
    pub redirect_to: String,
}

/// Marks the wizard as publishing for as long as it lives.
///
/// Dropping it (including when the publish future is abandoned) clears the
/// flag so the wizard never stays locked.
struct PublishingGuard<'a> {
    state: &'a mut WizardState,
}

impl<'a> PublishingGuard<'a> {
    fn engage(state: &'a mut WizardState) -> Self {
        state.is_publishing = true;
        state.publish_stage_label.clear();
        Self { state }
    }

    fn set_label(&mut self, label: String) {
        tracing::info!(stage = %label, "Publish progress");
        self.state.publish_stage_label = label;
    }
}

impl Drop for PublishingGuard<'_> {
    fn drop(&mut self) {
        self.state.is_publishing = false;
    }
}

// ---------------------------------------------------------------------------
// CourseWizard
// ---------------------------------------------------------------------------

/// The authoring wizard: a draft plus the step pointer.
#[derive(Debug, Clone, Default)]
pub struct CourseWizard {
    draft: CourseDraft,
    state: WizardState,
    notices: Vec<Notice>,
}

impl CourseWizard {
    /// Open the wizard on an empty draft at step 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the wizard on an existing draft at step 1.
    pub fn with_draft(draft: CourseDraft) -> Self {
        Self {
            draft,
            ..Self::default()
        }
    }

    pub fn draft(&self) -> &CourseDraft {
        &self.draft
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn current_step(&self) -> WizardStep {
        self.state.current_step
    }

    /// Mutable access to the draft, refused while publishing.
    pub fn draft_mut(&mut self) -> Result<&mut CourseDraft, CoreError> {
        self.ensure_idle()?;
        Ok(&mut self.draft)
    }

    /// Drain notices queued since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Move forward if the current step validates.
    ///
    /// On failure a destructive notice carrying the reason is queued and
    /// the step pointer does not move. On the last step this is a no-op.
    pub fn next(&mut self) -> Result<WizardStep, CoreError> {
        self.ensure_idle()?;
        let step = self.state.current_step;

        if let Err(e) = validation::validate_step(&self.draft, step) {
            tracing::debug!(step = step.to_number(), reason = e.reason(), "Step blocked");
            self.notices
                .push(Notice::destructive("Missing information", e.reason()));
            return Err(e);
        }

        if let Some(next) = step.next() {
            self.state.current_step = next;
        }
        Ok(self.state.current_step)
    }

    /// Move back one step; a no-op on step 1.
    pub fn back(&mut self) -> Result<WizardStep, CoreError> {
        self.ensure_idle()?;
        if let Some(previous) = self.state.current_step.previous() {
            self.state.current_step = previous;
        }
        Ok(self.state.current_step)
    }

    /// Jump straight to `step` (step indicator click); not validated.
    pub fn jump_to(&mut self, step: WizardStep) -> Result<WizardStep, CoreError> {
        self.ensure_idle()?;
        self.state.current_step = step;
        Ok(step)
    }

    /// Abandon authoring: returns the discarded draft and resets the wizard.
    pub fn cancel(&mut self) -> Result<CourseDraft, CoreError> {
        self.ensure_idle()?;
        self.state = WizardState::default();
        self.notices.clear();
        Ok(std::mem::take(&mut self.draft))
    }

    /// Publish the draft. Only available on the last step.
    ///
    /// Stage labels from the publisher are mirrored into
    /// [`WizardState::publish_stage_label`]. On failure a destructive notice
    /// is queued, publishing is cleared, and the wizard stays on the last
    /// step so the author can try again (which starts over from the course).
    /// On success the completion label stays up for `redirect.delay` before
    /// the outcome is returned.
    pub async fn publish(
        &mut self,
        publisher: &Publisher,
        redirect: &RedirectConfig,
    ) -> Result<PublishOutcome, PublishError> {
        if let Err(e) = self.ensure_publishable() {
            self.notices
                .push(Notice::destructive("Publishing failed", e.to_string()));
            return Err(e);
        }

        let Self {
            draft,
            state,
            notices,
        } = self;

        let mut guard = PublishingGuard::engage(state);
        let result = publisher
            .publish(draft, |stage: &PublishStage| guard.set_label(stage.label()))
            .await;

        match result {
            Ok(report) => {
                guard.state.published_course_id = Some(report.course_id.clone());
                notices.push(Notice::info(
                    PublishStage::Completed.label(),
                    format!("\"{}\" is now live", draft.title()),
                ));
                tokio::time::sleep(redirect.delay).await;
                Ok(PublishOutcome {
                    report,
                    redirect_to: redirect.path.clone(),
                })
            }
            Err(e) => {
                notices.push(Notice::destructive("Publishing failed", e.to_string()));
                Err(e)
            }
        }
    }

    fn ensure_publishable(&self) -> Result<(), PublishError> {
        self.ensure_idle()
            .map_err(|e| PublishError::Validation(e.reason().to_string()))?;

        if self.state.current_step != WizardStep::Publish {
            return Err(PublishError::Validation(format!(
                "Publishing is only available from {}",
                WizardStep::Publish
            )));
        }
        if let Some(course_id) = &self.state.published_course_id {
            return Err(PublishError::Validation(format!(
                "This draft was already published as course {course_id}"
            )));
        }
        Ok(())
    }

    fn ensure_idle(&self) -> Result<(), CoreError> {
        if self.state.is_publishing {
            return Err(CoreError::Conflict(
                "The course is being published; please wait".to_string(),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::draft::{Category, LessonDraft, ModuleDraft};

    fn filled_overview() -> CourseDraft {
        CourseDraft::new()
            .with_title("Intro to X")
            .with_category(Category::Business)
            .with_description("desc")
    }

    #[test]
    fn starts_on_overview_with_empty_draft() {
        let wizard = CourseWizard::new();
        assert_eq!(wizard.current_step(), WizardStep::Overview);
        assert_eq!(wizard.draft(), &CourseDraft::new());
        assert!(!wizard.state().is_publishing);
    }

    #[test]
    fn next_blocked_by_validator_keeps_step_and_queues_notice() {
        let mut wizard = CourseWizard::new();

        let err = wizard.next().unwrap_err();

        assert_matches!(err, CoreError::Validation(_));
        assert_eq!(wizard.current_step(), WizardStep::Overview);
        let notices = wizard.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].tone, NoticeTone::Destructive);
        assert!(notices[0].description.contains("title"));
        assert!(wizard.take_notices().is_empty());
    }

    #[test]
    fn next_advances_through_valid_steps() {
        let mut wizard = CourseWizard::with_draft(
            filled_overview().with_module(ModuleDraft::new("M1").with_lesson(LessonDraft::new("L1"))),
        );

        assert_eq!(wizard.next().unwrap(), WizardStep::Curriculum);
        assert_eq!(wizard.next().unwrap(), WizardStep::Assignments);
        assert_eq!(wizard.next().unwrap(), WizardStep::Publish);
    }

    #[test]
    fn curriculum_gate_blocks_module_without_lessons() {
        let mut wizard = CourseWizard::with_draft(filled_overview());
        wizard.next().unwrap();
        wizard
            .draft_mut()
            .unwrap()
            .add_module(ModuleDraft::new("Empty"));

        assert!(wizard.next().is_err());
        assert_eq!(wizard.current_step(), WizardStep::Curriculum);
    }

    #[test]
    fn back_is_unguarded_and_stops_at_first_step() {
        let mut wizard = CourseWizard::new();
        wizard.jump_to(WizardStep::Assignments).unwrap();

        assert_eq!(wizard.back().unwrap(), WizardStep::Curriculum);
        assert_eq!(wizard.back().unwrap(), WizardStep::Overview);
        assert_eq!(wizard.back().unwrap(), WizardStep::Overview);
    }

    #[test]
    fn jump_skips_validation() {
        let mut wizard = CourseWizard::new();
        assert_eq!(wizard.jump_to(WizardStep::Publish).unwrap(), WizardStep::Publish);
        assert!(wizard.take_notices().is_empty());
    }

    #[test]
    fn cancel_discards_draft_and_resets() {
        let mut wizard = CourseWizard::with_draft(filled_overview());
        wizard.jump_to(WizardStep::Assignments).unwrap();

        let discarded = wizard.cancel().unwrap();

        assert_eq!(discarded.title(), "Intro to X");
        assert_eq!(wizard.current_step(), WizardStep::Overview);
        assert_eq!(wizard.draft(), &CourseDraft::new());
    }

    #[test]
    fn navigation_refused_while_publishing() {
        let mut wizard = CourseWizard::new();
        wizard.state.is_publishing = true;

        assert_matches!(wizard.next(), Err(CoreError::Conflict(_)));
        assert_matches!(wizard.back(), Err(CoreError::Conflict(_)));
        assert_matches!(wizard.jump_to(WizardStep::Curriculum), Err(CoreError::Conflict(_)));
        assert_matches!(wizard.cancel(), Err(CoreError::Conflict(_)));
        assert!(wizard.draft_mut().is_err());
    }

    #[test]
    fn guard_clears_publishing_flag_on_drop() {
        let mut state = WizardState::default();
        {
            let mut guard = PublishingGuard::engage(&mut state);
            guard.set_label("Creating course...".to_string());
        }
        assert!(!state.is_publishing);
        assert_eq!(state.publish_stage_label, "Creating course...");
    }
}
