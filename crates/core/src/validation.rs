//! Course wizard step definitions and the validators that gate them.
//!
//! Each step has a pure validator over the whole [`CourseDraft`]. Forward
//! navigation out of a step requires its validator to pass; the returned
//! [`CoreError::Validation`] message is meant to be shown to the author.

use serde::{Deserialize, Serialize};

use crate::draft::CourseDraft;
use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Wizard steps
// ---------------------------------------------------------------------------

/// The four steps of the course-authoring wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Overview,
    Curriculum,
    Assignments,
    Publish,
}

/// Total number of steps in the wizard.
pub const TOTAL_STEPS: u8 = 4;

/// Minimum step number (1-based).
pub const MIN_STEP: u8 = 1;

/// Maximum step number (1-based).
pub const MAX_STEP: u8 = 4;

impl WizardStep {
    /// Every step in navigation order.
    pub const ALL: [WizardStep; 4] = [
        Self::Overview,
        Self::Curriculum,
        Self::Assignments,
        Self::Publish,
    ];

    /// Convert a 1-based step number to a `WizardStep`.
    pub fn from_number(n: u8) -> Result<Self, CoreError> {
        match n {
            1 => Ok(Self::Overview),
            2 => Ok(Self::Curriculum),
            3 => Ok(Self::Assignments),
            4 => Ok(Self::Publish),
            _ => Err(CoreError::Validation(format!(
                "Invalid step number {n}. Must be between {MIN_STEP} and {MAX_STEP}"
            ))),
        }
    }

    /// Convert to a 1-based step number.
    pub fn to_number(self) -> u8 {
        match self {
            Self::Overview => 1,
            Self::Curriculum => 2,
            Self::Assignments => 3,
            Self::Publish => 4,
        }
    }

    /// Human-readable label for the step indicator.
    pub fn label(self) -> &'static str {
        match self {
            Self::Overview => "Course Overview",
            Self::Curriculum => "Curriculum",
            Self::Assignments => "Assignments",
            Self::Publish => "Pricing & Publish",
        }
    }

    /// The following step, or `None` on the last one.
    pub fn next(self) -> Option<Self> {
        Self::from_number(self.to_number() + 1).ok()
    }

    /// The preceding step, or `None` on the first one.
    pub fn previous(self) -> Option<Self> {
        Self::from_number(self.to_number().saturating_sub(1)).ok()
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Step {} ({})", self.to_number(), self.label())
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate the draft against the rules of a single step.
pub fn validate_step(draft: &CourseDraft, step: WizardStep) -> Result<(), CoreError> {
    match step {
        WizardStep::Overview => validate_overview(draft),
        WizardStep::Curriculum => validate_curriculum(draft),
        // Assignments are optional.
        WizardStep::Assignments => Ok(()),
        WizardStep::Publish => validate_pricing(draft),
    }
}

/// Check whether the author may move forward out of `step`.
pub fn can_advance(draft: &CourseDraft, step: WizardStep) -> bool {
    validate_step(draft, step).is_ok()
}

/// Run every step rule that must hold before anything is persisted.
///
/// Steps are checked in order (overview, curriculum, pricing) and the first
/// failure is returned. The assignments step has no rules and is skipped.
pub fn validate_for_publish(draft: &CourseDraft) -> Result<(), CoreError> {
    validate_step(draft, WizardStep::Overview)?;
    validate_step(draft, WizardStep::Curriculum)?;
    validate_step(draft, WizardStep::Publish)
}

fn validate_overview(draft: &CourseDraft) -> Result<(), CoreError> {
    let mut missing = Vec::new();
    if draft.title().trim().is_empty() {
        missing.push("title");
    }
    if draft.category().is_none() {
        missing.push("category");
    }
    if draft.description().trim().is_empty() {
        missing.push("description");
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Please fill in the course {} before continuing",
            missing.join(", ")
        )))
    }
}

fn validate_curriculum(draft: &CourseDraft) -> Result<(), CoreError> {
    if draft.modules().is_empty() {
        return Err(CoreError::Validation(
            "Add at least one module to the curriculum".to_string(),
        ));
    }

    for (index, module) in draft.modules().iter().enumerate() {
        let number = index + 1;
        if module.title().trim().is_empty() {
            return Err(CoreError::Validation(format!(
                "Module {number} needs a title"
            )));
        }
        if module.lessons().is_empty() {
            return Err(CoreError::Validation(format!(
                "Module {number} ({}) needs at least one lesson",
                module.title()
            )));
        }
    }

    Ok(())
}

fn validate_pricing(draft: &CourseDraft) -> Result<(), CoreError> {
    if !draft.price().is_present() || !draft.duration_hours().is_present() {
        return Err(CoreError::Validation(
            "Set both the course price and duration before publishing".to_string(),
        ));
    }
    let price = draft.price().as_f64();
    if price < 0.0 {
        return Err(CoreError::Validation(format!(
            "Price must be zero or more, got {price}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Advisory checks
// ---------------------------------------------------------------------------

/// List live lessons that have no scheduled start yet.
///
/// Live lessons may be scheduled after publishing, so these never block
/// navigation or publishing; they are shown as warnings on the review step.
pub fn schedule_warnings(draft: &CourseDraft) -> Vec<String> {
    draft
        .modules()
        .iter()
        .enumerate()
        .flat_map(|(m, module)| {
            module
                .lessons()
                .iter()
                .enumerate()
                .filter(|(_, lesson)| lesson.is_live() && lesson.scheduled_at().is_none())
                .map(move |(l, lesson)| {
                    format!(
                        "Module {} lesson {} ({}) is live but has no scheduled time",
                        m + 1,
                        l + 1,
                        lesson.title()
                    )
                })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::Utc;

    use super::*;
    use crate::draft::{AssignmentDraft, Category, LessonDraft, ModuleDraft};

    fn overview_draft() -> CourseDraft {
        CourseDraft::new()
            .with_title("Intro to X")
            .with_category(Category::Business)
            .with_description("desc")
    }

    fn module_with_lesson(title: &str) -> ModuleDraft {
        ModuleDraft::new(title).with_lesson(LessonDraft::new("L1"))
    }

    // -- WizardStep --

    #[test]
    fn step_from_number_valid() {
        assert_eq!(WizardStep::from_number(1).unwrap(), WizardStep::Overview);
        assert_eq!(WizardStep::from_number(4).unwrap(), WizardStep::Publish);
    }

    #[test]
    fn step_from_number_invalid() {
        assert!(WizardStep::from_number(0).is_err());
        assert!(WizardStep::from_number(5).is_err());
    }

    #[test]
    fn step_to_number_roundtrip() {
        for n in MIN_STEP..=MAX_STEP {
            assert_eq!(WizardStep::from_number(n).unwrap().to_number(), n);
        }
        assert_eq!(WizardStep::ALL.len(), TOTAL_STEPS as usize);
    }

    #[test]
    fn step_next_and_previous_stop_at_edges() {
        assert_eq!(WizardStep::Overview.previous(), None);
        assert_eq!(WizardStep::Overview.next(), Some(WizardStep::Curriculum));
        assert_eq!(WizardStep::Publish.next(), None);
        assert_eq!(WizardStep::Publish.previous(), Some(WizardStep::Assignments));
    }

    // -- overview --

    #[test]
    fn overview_rejects_empty_title_regardless_of_other_fields() {
        let draft = overview_draft()
            .with_title("")
            .with_price(10u32)
            .with_module(module_with_lesson("M1"));
        assert_matches!(
            validate_step(&draft, WizardStep::Overview),
            Err(CoreError::Validation(msg)) if msg.contains("title")
        );
    }

    #[test]
    fn overview_rejects_whitespace_description() {
        let draft = overview_draft().with_description("   ");
        assert!(!can_advance(&draft, WizardStep::Overview));
    }

    #[test]
    fn overview_rejects_missing_category() {
        let mut draft = overview_draft();
        draft.set_category(None);
        assert_matches!(
            validate_step(&draft, WizardStep::Overview),
            Err(CoreError::Validation(msg)) if msg.contains("category")
        );
    }

    #[test]
    fn overview_accepts_complete_metadata() {
        assert!(validate_step(&overview_draft(), WizardStep::Overview).is_ok());
    }

    // -- curriculum --

    #[test]
    fn curriculum_rejects_no_modules() {
        assert!(validate_step(&overview_draft(), WizardStep::Curriculum).is_err());
    }

    #[test]
    fn curriculum_accepts_titled_modules_with_lessons() {
        let draft = overview_draft()
            .with_module(module_with_lesson("M1"))
            .with_module(module_with_lesson("M2"));
        assert!(validate_step(&draft, WizardStep::Curriculum).is_ok());
    }

    #[test]
    fn curriculum_names_the_module_without_lessons() {
        let draft = overview_draft()
            .with_module(
                ModuleDraft::new("First")
                    .with_lesson(LessonDraft::new("L1"))
                    .with_lesson(LessonDraft::new("L2")),
            )
            .with_module(ModuleDraft::new("Second"));

        assert_matches!(
            validate_step(&draft, WizardStep::Curriculum),
            Err(CoreError::Validation(msg)) if msg.contains("Module 2") && msg.contains("Second")
        );
    }

    #[test]
    fn curriculum_rejects_untitled_module() {
        let draft = overview_draft().with_module(module_with_lesson(" "));
        assert_matches!(
            validate_step(&draft, WizardStep::Curriculum),
            Err(CoreError::Validation(msg)) if msg.contains("Module 1 needs a title")
        );
    }

    // -- assignments --

    #[test]
    fn assignments_step_accepts_anything() {
        assert!(validate_step(&CourseDraft::new(), WizardStep::Assignments).is_ok());
        let draft = CourseDraft::new().with_assignment(AssignmentDraft::new(""));
        assert!(validate_step(&draft, WizardStep::Assignments).is_ok());
    }

    // -- pricing --

    #[test]
    fn pricing_rejects_missing_price_or_duration() {
        let no_price = overview_draft().with_duration_hours(5u32);
        let no_duration = overview_draft().with_price(10u32);
        assert!(validate_step(&no_price, WizardStep::Publish).is_err());
        assert!(validate_step(&no_duration, WizardStep::Publish).is_err());
    }

    #[test]
    fn pricing_accepts_free_course() {
        let draft = overview_draft().with_price("0").with_duration_hours("5");
        assert!(validate_step(&draft, WizardStep::Publish).is_ok());
    }

    #[test]
    fn pricing_coerces_non_numeric_input() {
        let draft = overview_draft().with_price("free").with_duration_hours("soon");
        assert!(validate_step(&draft, WizardStep::Publish).is_ok());
    }

    #[test]
    fn pricing_rejects_negative_price() {
        let draft = overview_draft().with_price("-1").with_duration_hours("5");
        assert_matches!(
            validate_step(&draft, WizardStep::Publish),
            Err(CoreError::Validation(msg)) if msg.contains("zero or more")
        );
    }

    // -- validate_for_publish --

    #[test]
    fn publish_check_reports_first_failing_step() {
        let draft = CourseDraft::new().with_price("1");
        assert_matches!(
            validate_for_publish(&draft),
            Err(CoreError::Validation(msg)) if msg.contains("title")
        );
    }

    #[test]
    fn publish_check_passes_complete_draft() {
        let draft = overview_draft()
            .with_module(module_with_lesson("M1"))
            .with_price(10u32)
            .with_duration_hours(5u32);
        assert!(validate_for_publish(&draft).is_ok());
    }

    // -- schedule_warnings --

    #[test]
    fn unscheduled_live_lesson_is_reported_but_not_blocking() {
        let draft = overview_draft().with_module(
            ModuleDraft::new("M1")
                .with_lesson(LessonDraft::new("Recorded"))
                .with_lesson(LessonDraft::new("Q&A").live(None))
                .with_lesson(LessonDraft::new("Kickoff").live(Some(Utc::now()))),
        );

        let warnings = schedule_warnings(&draft);

        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Module 1 lesson 2 (Q&A)"));
        assert!(validate_step(&draft, WizardStep::Curriculum).is_ok());
    }
}
