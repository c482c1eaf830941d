//! In-memory course draft assembled by the authoring wizard.
//!
//! A [`CourseDraft`] owns an ordered list of [`ModuleDraft`]s (each owning
//! its [`LessonDraft`]s) and an independent ordered list of
//! [`AssignmentDraft`]s. Nothing here performs I/O and no operation can
//! fail: index-based operations on a missing position return `None` and
//! leave the draft untouched.
//!
//! Sibling order is the authored order and becomes the persisted display
//! order, so removals always splice (`Vec::remove`) rather than swap.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Default point value for a new assignment.
pub const DEFAULT_ASSIGNMENT_POINTS: u32 = 100;

// ---------------------------------------------------------------------------
// Category / Level
// ---------------------------------------------------------------------------

/// Catalog category a course is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Hospitality,
    #[serde(rename = "Facilities Management", alias = "FacilitiesManagement")]
    FacilitiesManagement,
    Business,
    Technology,
}

impl Category {
    /// Every category, in catalog display order.
    pub const ALL: [Category; 4] = [
        Self::Hospitality,
        Self::FacilitiesManagement,
        Self::Business,
        Self::Technology,
    ];

    /// Display label, also used as the wire value.
    pub fn label(self) -> &'static str {
        match self {
            Self::Hospitality => "Hospitality",
            Self::FacilitiesManagement => "Facilities Management",
            Self::Business => "Business",
            Self::Technology => "Technology",
        }
    }

    /// Parse a display label (case-insensitive).
    pub fn from_label(s: &str) -> Result<Self, CoreError> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| {
                c.label().eq_ignore_ascii_case(wanted)
                    || c.label().replace(' ', "").eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid category '{s}'. Must be one of: Hospitality, \
                     Facilities Management, Business, Technology"
                ))
            })
    }
}

/// Difficulty level advertised for a course.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    pub fn label(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }

    /// Parse a display label (case-insensitive).
    pub fn from_label(s: &str) -> Result<Self, CoreError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            _ => Err(CoreError::Validation(format!(
                "Invalid level '{s}'. Must be one of: Beginner, Intermediate, Advanced"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// NumericInput
// ---------------------------------------------------------------------------

/// Raw text of a numeric form field.
///
/// Presence and value are separate questions: a field is present once the
/// author typed anything, while the numeric value coerces non-numeric text
/// to `0`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawNumeric", into = "String")]
pub struct NumericInput(String);

/// Accepts either a JSON string, a JSON number, or `null` for a numeric field.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumeric {
    Text(String),
    Number(serde_json::Number),
    Empty(()),
}

impl From<RawNumeric> for NumericInput {
    fn from(raw: RawNumeric) -> Self {
        match raw {
            RawNumeric::Text(s) => Self(s),
            RawNumeric::Number(n) => Self(n.to_string()),
            RawNumeric::Empty(()) => Self::default(),
        }
    }
}

impl From<NumericInput> for String {
    fn from(input: NumericInput) -> Self {
        input.0
    }
}

impl NumericInput {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The text exactly as entered.
    pub fn raw(&self) -> &str {
        &self.0
    }

    /// Whether the author entered anything at all.
    pub fn is_present(&self) -> bool {
        !self.0.trim().is_empty()
    }

    /// Decimal value; empty, non-numeric, or non-finite input yields `0.0`.
    pub fn as_f64(&self) -> f64 {
        self.0
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
    }

    /// Whole-number value, truncating fractions; negative or non-numeric
    /// input yields `0`.
    pub fn as_u32(&self) -> u32 {
        let value = self.as_f64();
        if value <= 0.0 {
            0
        } else {
            value.trunc() as u32
        }
    }
}

impl From<&str> for NumericInput {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NumericInput {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<u32> for NumericInput {
    fn from(n: u32) -> Self {
        Self(n.to_string())
    }
}

impl From<f64> for NumericInput {
    fn from(n: f64) -> Self {
        Self(n.to_string())
    }
}

impl std::fmt::Display for NumericInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Deserialize an optional field where a blank string means "not filled in".
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(value) => T::deserialize(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Like [`blank_as_none`], falling back to `T::default()`.
fn blank_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::de::DeserializeOwned + Default,
{
    blank_as_none(deserializer).map(Option::unwrap_or_default)
}

/// Blank optional text is stored as `None`.
fn non_blank(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

// ---------------------------------------------------------------------------
// LessonDraft
// ---------------------------------------------------------------------------

/// A single lesson inside a module.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LessonDraft {
    title: String,
    content: Option<String>,
    video_url: Option<String>,
    is_live: bool,
    #[serde(deserialize_with = "blank_as_none")]
    scheduled_at: Option<Timestamp>,
}

impl LessonDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.set_content(content);
        self
    }

    pub fn with_video_url(mut self, url: impl Into<String>) -> Self {
        self.set_video_url(url);
        self
    }

    /// Mark the lesson as a live session, optionally already scheduled.
    pub fn live(mut self, scheduled_at: Option<Timestamp>) -> Self {
        self.is_live = true;
        self.scheduled_at = scheduled_at;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn video_url(&self) -> Option<&str> {
        self.video_url.as_deref()
    }

    pub fn is_live(&self) -> bool {
        self.is_live
    }

    pub fn scheduled_at(&self) -> Option<Timestamp> {
        self.scheduled_at
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = non_blank(content.into());
    }

    pub fn set_video_url(&mut self, url: impl Into<String>) {
        self.video_url = non_blank(url.into());
    }

    pub fn set_is_live(&mut self, is_live: bool) {
        self.is_live = is_live;
    }

    pub fn set_scheduled_at(&mut self, scheduled_at: Option<Timestamp>) {
        self.scheduled_at = scheduled_at;
    }
}

// ---------------------------------------------------------------------------
// ModuleDraft
// ---------------------------------------------------------------------------

/// An ordered group of lessons.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModuleDraft {
    title: String,
    description: Option<String>,
    lessons: Vec<LessonDraft>,
}

impl ModuleDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.set_description(description);
        self
    }

    /// Append a lesson (builder form of [`add_lesson`](Self::add_lesson)).
    pub fn with_lesson(mut self, lesson: LessonDraft) -> Self {
        self.lessons.push(lesson);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn lessons(&self) -> &[LessonDraft] {
        &self.lessons
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = non_blank(description.into());
    }

    /// Append a lesson and return its index.
    pub fn add_lesson(&mut self, lesson: LessonDraft) -> usize {
        self.lessons.push(lesson);
        self.lessons.len() - 1
    }

    /// Remove the lesson at `index`, shifting later lessons up by one.
    pub fn remove_lesson(&mut self, index: usize) -> Option<LessonDraft> {
        (index < self.lessons.len()).then(|| self.lessons.remove(index))
    }

    pub fn lesson_mut(&mut self, index: usize) -> Option<&mut LessonDraft> {
        self.lessons.get_mut(index)
    }
}

// ---------------------------------------------------------------------------
// AssignmentDraft
// ---------------------------------------------------------------------------

/// A course-level assignment, independent of any module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssignmentDraft {
    title: String,
    description: Option<String>,
    points: u32,
}

impl Default for AssignmentDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: None,
            points: DEFAULT_ASSIGNMENT_POINTS,
        }
    }
}

impl AssignmentDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.set_description(description);
        self
    }

    pub fn with_points(mut self, points: u32) -> Self {
        self.points = points;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = non_blank(description.into());
    }

    pub fn set_points(&mut self, points: u32) {
        self.points = points;
    }
}

// ---------------------------------------------------------------------------
// CourseDraft
// ---------------------------------------------------------------------------

/// The root of the draft graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CourseDraft {
    title: String,
    description: String,
    #[serde(deserialize_with = "blank_as_none")]
    category: Option<Category>,
    price: NumericInput,
    #[serde(deserialize_with = "blank_as_default")]
    level: Level,
    duration_hours: NumericInput,
    image_url: Option<String>,
    image_alt_text: Option<String>,
    modules: Vec<ModuleDraft>,
    assignments: Vec<AssignmentDraft>,
}

/// Counts shown on the review step before publishing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DraftSummary {
    pub modules: usize,
    pub lessons: usize,
    pub live_lessons: usize,
    pub assignments: usize,
    pub total_points: u64,
}

impl CourseDraft {
    /// An empty draft, as created when the wizard opens.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.set_title(title);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.set_description(description);
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_price(mut self, price: impl Into<NumericInput>) -> Self {
        self.set_price(price);
        self
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn with_duration_hours(mut self, hours: impl Into<NumericInput>) -> Self {
        self.set_duration_hours(hours);
        self
    }

    pub fn with_image(mut self, url: impl Into<String>, alt_text: impl Into<String>) -> Self {
        self.set_image_url(url);
        self.set_image_alt_text(alt_text);
        self
    }

    pub fn with_module(mut self, module: ModuleDraft) -> Self {
        self.modules.push(module);
        self
    }

    pub fn with_assignment(mut self, assignment: AssignmentDraft) -> Self {
        self.assignments.push(assignment);
        self
    }

    // -- accessors --

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn price(&self) -> &NumericInput {
        &self.price
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn duration_hours(&self) -> &NumericInput {
        &self.duration_hours
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    pub fn image_alt_text(&self) -> Option<&str> {
        self.image_alt_text.as_deref()
    }

    pub fn modules(&self) -> &[ModuleDraft] {
        &self.modules
    }

    pub fn assignments(&self) -> &[AssignmentDraft] {
        &self.assignments
    }

    // -- field setters --

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_category(&mut self, category: Option<Category>) {
        self.category = category;
    }

    pub fn set_price(&mut self, price: impl Into<NumericInput>) {
        self.price = price.into();
    }

    pub fn set_level(&mut self, level: Level) {
        self.level = level;
    }

    pub fn set_duration_hours(&mut self, hours: impl Into<NumericInput>) {
        self.duration_hours = hours.into();
    }

    pub fn set_image_url(&mut self, url: impl Into<String>) {
        self.image_url = non_blank(url.into());
    }

    pub fn set_image_alt_text(&mut self, alt_text: impl Into<String>) {
        self.image_alt_text = non_blank(alt_text.into());
    }

    // -- modules --

    /// Append a module and return its index.
    pub fn add_module(&mut self, module: ModuleDraft) -> usize {
        self.modules.push(module);
        self.modules.len() - 1
    }

    /// Remove the module at `index` together with its lessons.
    pub fn remove_module(&mut self, index: usize) -> Option<ModuleDraft> {
        (index < self.modules.len()).then(|| self.modules.remove(index))
    }

    pub fn module_mut(&mut self, index: usize) -> Option<&mut ModuleDraft> {
        self.modules.get_mut(index)
    }

    // -- lessons --

    /// Append a lesson to the module at `module_index`, returning the
    /// lesson's index within that module.
    pub fn add_lesson(&mut self, module_index: usize, lesson: LessonDraft) -> Option<usize> {
        self.modules
            .get_mut(module_index)
            .map(|module| module.add_lesson(lesson))
    }

    pub fn remove_lesson(&mut self, module_index: usize, lesson_index: usize) -> Option<LessonDraft> {
        self.modules
            .get_mut(module_index)
            .and_then(|module| module.remove_lesson(lesson_index))
    }

    pub fn lesson_mut(&mut self, module_index: usize, lesson_index: usize) -> Option<&mut LessonDraft> {
        self.modules
            .get_mut(module_index)
            .and_then(|module| module.lesson_mut(lesson_index))
    }

    // -- assignments --

    /// Append an assignment and return its index.
    pub fn add_assignment(&mut self, assignment: AssignmentDraft) -> usize {
        self.assignments.push(assignment);
        self.assignments.len() - 1
    }

    pub fn remove_assignment(&mut self, index: usize) -> Option<AssignmentDraft> {
        (index < self.assignments.len()).then(|| self.assignments.remove(index))
    }

    pub fn assignment_mut(&mut self, index: usize) -> Option<&mut AssignmentDraft> {
        self.assignments.get_mut(index)
    }

    /// Totals for the review step.
    pub fn summary(&self) -> DraftSummary {
        let lessons = self.modules.iter().flat_map(|m| m.lessons.iter());
        DraftSummary {
            modules: self.modules.len(),
            lessons: lessons.clone().count(),
            live_lessons: lessons.filter(|l| l.is_live).count(),
            assignments: self.assignments.len(),
            total_points: self.assignments.iter().map(|a| u64::from(a.points)).sum(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(draft: &CourseDraft) -> Vec<&str> {
        draft.modules().iter().map(|m| m.title()).collect()
    }

    // -- Category / Level --

    #[test]
    fn category_labels_roundtrip() {
        for category in Category::ALL {
            assert_eq!(Category::from_label(category.label()).unwrap(), category);
        }
    }

    #[test]
    fn category_accepts_compact_label() {
        assert_eq!(
            Category::from_label("facilitiesmanagement").unwrap(),
            Category::FacilitiesManagement
        );
    }

    #[test]
    fn category_rejects_unknown() {
        assert!(Category::from_label("Cooking").is_err());
        assert!(Category::from_label("").is_err());
    }

    #[test]
    fn category_serializes_as_label() {
        let json = serde_json::to_value(Category::FacilitiesManagement).unwrap();
        assert_eq!(json, "Facilities Management");
    }

    #[test]
    fn level_defaults_to_beginner() {
        assert_eq!(Level::default(), Level::Beginner);
        assert_eq!(Level::from_label("ADVANCED").unwrap(), Level::Advanced);
        assert!(Level::from_label("expert").is_err());
    }

    // -- NumericInput --

    #[test]
    fn numeric_presence_ignores_whitespace() {
        assert!(!NumericInput::new("").is_present());
        assert!(!NumericInput::new("   ").is_present());
        assert!(NumericInput::new("0").is_present());
        assert!(NumericInput::new("abc").is_present());
    }

    #[test]
    fn numeric_non_numeric_coerces_to_zero() {
        assert_eq!(NumericInput::new("abc").as_f64(), 0.0);
        assert_eq!(NumericInput::new("abc").as_u32(), 0);
        assert_eq!(NumericInput::new("NaN").as_f64(), 0.0);
    }

    #[test]
    fn numeric_parses_decimal_and_truncates_whole() {
        let input = NumericInput::new(" 49.99 ");
        assert_eq!(input.as_f64(), 49.99);
        assert_eq!(input.as_u32(), 49);
        assert_eq!(NumericInput::new("-3").as_u32(), 0);
    }

    #[test]
    fn numeric_deserializes_from_number_string_or_null() {
        let n: NumericInput = serde_json::from_str("12.5").unwrap();
        assert_eq!(n.raw(), "12.5");
        let s: NumericInput = serde_json::from_str("\"7\"").unwrap();
        assert_eq!(s.raw(), "7");
        let null: NumericInput = serde_json::from_str("null").unwrap();
        assert!(!null.is_present());
    }

    // -- structural operations --

    #[test]
    fn remove_module_preserves_sibling_order() {
        let mut draft = CourseDraft::new()
            .with_module(ModuleDraft::new("A"))
            .with_module(ModuleDraft::new("B"))
            .with_module(ModuleDraft::new("C"))
            .with_module(ModuleDraft::new("D"));

        let removed = draft.remove_module(1).unwrap();

        assert_eq!(removed.title(), "B");
        assert_eq!(titles(&draft), ["A", "C", "D"]);
    }

    #[test]
    fn remove_module_out_of_range_is_noop() {
        let mut draft = CourseDraft::new().with_module(ModuleDraft::new("A"));
        assert!(draft.remove_module(5).is_none());
        assert_eq!(titles(&draft), ["A"]);
    }

    #[test]
    fn lessons_are_scoped_to_their_module() {
        let mut draft = CourseDraft::new()
            .with_module(ModuleDraft::new("A"))
            .with_module(ModuleDraft::new("B"));

        assert_eq!(draft.add_lesson(1, LessonDraft::new("L1")), Some(0));
        assert_eq!(draft.add_lesson(1, LessonDraft::new("L2")), Some(1));
        assert_eq!(draft.add_lesson(9, LessonDraft::new("lost")), None);

        assert!(draft.modules()[0].lessons().is_empty());
        assert_eq!(draft.modules()[1].lessons().len(), 2);
    }

    #[test]
    fn remove_lesson_preserves_order() {
        let mut draft = CourseDraft::new().with_module(
            ModuleDraft::new("A")
                .with_lesson(LessonDraft::new("L1"))
                .with_lesson(LessonDraft::new("L2"))
                .with_lesson(LessonDraft::new("L3")),
        );

        assert_eq!(draft.remove_lesson(0, 0).unwrap().title(), "L1");
        let remaining: Vec<_> = draft.modules()[0].lessons().iter().map(|l| l.title()).collect();
        assert_eq!(remaining, ["L2", "L3"]);
        assert!(draft.remove_lesson(0, 7).is_none());
        assert!(draft.remove_lesson(3, 0).is_none());
    }

    #[test]
    fn remove_assignment_preserves_order() {
        let mut draft = CourseDraft::new()
            .with_assignment(AssignmentDraft::new("A1"))
            .with_assignment(AssignmentDraft::new("A2"))
            .with_assignment(AssignmentDraft::new("A3"));

        draft.remove_assignment(0);

        let remaining: Vec<_> = draft.assignments().iter().map(|a| a.title()).collect();
        assert_eq!(remaining, ["A2", "A3"]);
    }

    #[test]
    fn field_setters_update_in_place() {
        let mut draft = CourseDraft::new();
        let idx = draft.add_module(ModuleDraft::new(""));
        draft.module_mut(idx).unwrap().set_title("Renamed");
        draft.add_lesson(idx, LessonDraft::new("L"));
        draft.lesson_mut(idx, 0).unwrap().set_is_live(true);
        let a = draft.add_assignment(AssignmentDraft::new("Essay"));
        draft.assignment_mut(a).unwrap().set_points(40);

        assert_eq!(draft.modules()[0].title(), "Renamed");
        assert!(draft.modules()[0].lessons()[0].is_live());
        assert_eq!(draft.assignments()[0].points(), 40);
    }

    #[test]
    fn blank_optional_text_is_cleared() {
        let mut lesson = LessonDraft::new("L").with_video_url("https://v.example/1");
        lesson.set_video_url("  ");
        assert_eq!(lesson.video_url(), None);
    }

    #[test]
    fn assignment_defaults_to_one_hundred_points() {
        assert_eq!(AssignmentDraft::new("Quiz").points(), DEFAULT_ASSIGNMENT_POINTS);
        let parsed: AssignmentDraft = serde_json::from_str(r#"{"title":"Quiz"}"#).unwrap();
        assert_eq!(parsed.points(), 100);
    }

    // -- summary --

    #[test]
    fn summary_counts_every_entity() {
        let draft = CourseDraft::new()
            .with_module(
                ModuleDraft::new("A")
                    .with_lesson(LessonDraft::new("L1"))
                    .with_lesson(LessonDraft::new("L2").live(None)),
            )
            .with_module(ModuleDraft::new("B").with_lesson(LessonDraft::new("L3")))
            .with_assignment(AssignmentDraft::new("A1"))
            .with_assignment(AssignmentDraft::new("A2").with_points(50));

        let summary = draft.summary();

        assert_eq!(summary.modules, 2);
        assert_eq!(summary.lessons, 3);
        assert_eq!(summary.live_lessons, 1);
        assert_eq!(summary.assignments, 2);
        assert_eq!(summary.total_points, 150);
    }

    // -- serde --

    #[test]
    fn draft_deserializes_from_camel_case_json() {
        let json = r#"{
            "title": "Intro to X",
            "description": "desc",
            "category": "Business",
            "price": 10,
            "durationHours": "5",
            "imageUrl": "https://img.example/x.png",
            "modules": [
                { "title": "M1", "lessons": [ { "title": "L1", "isLive": false } ] }
            ]
        }"#;

        let draft: CourseDraft = serde_json::from_str(json).unwrap();

        assert_eq!(draft.title(), "Intro to X");
        assert_eq!(draft.category(), Some(Category::Business));
        assert_eq!(draft.price().as_f64(), 10.0);
        assert_eq!(draft.duration_hours().as_u32(), 5);
        assert_eq!(draft.level(), Level::Beginner);
        assert_eq!(draft.modules()[0].lessons()[0].title(), "L1");
        assert!(draft.assignments().is_empty());
    }

    #[test]
    fn blank_form_values_deserialize_as_unset() {
        let json = r#"{
            "title": "T",
            "category": "",
            "level": " ",
            "modules": [
                { "title": "M1", "lessons": [ { "title": "Live", "isLive": true, "scheduledAt": "" } ] }
            ]
        }"#;

        let draft: CourseDraft = serde_json::from_str(json).unwrap();

        assert_eq!(draft.category(), None);
        assert_eq!(draft.level(), Level::Beginner);
        assert_eq!(draft.modules()[0].lessons()[0].scheduled_at(), None);
    }

    #[test]
    fn filled_schedule_and_level_still_parse() {
        let json = r#"{
            "category": null,
            "level": "Advanced",
            "modules": [
                { "lessons": [ { "scheduledAt": "2026-03-01T10:00:00Z" } ] }
            ]
        }"#;

        let draft: CourseDraft = serde_json::from_str(json).unwrap();

        assert_eq!(draft.category(), None);
        assert_eq!(draft.level(), Level::Advanced);
        assert!(draft.modules()[0].lessons()[0].scheduled_at().is_some());
        assert!(serde_json::from_str::<CourseDraft>(r#"{"category":"Cooking"}"#).is_err());
    }
}
