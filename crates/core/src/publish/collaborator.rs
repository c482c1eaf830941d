//! Contract between the publisher and the course persistence API.
//!
//! The publisher only depends on [`CourseCollaborator`] and
//! [`ActorProvider`]; the HTTP implementation lives in `academy-client`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::draft::{AssignmentDraft, Category, CourseDraft, LessonDraft, Level, ModuleDraft};
use crate::types::{EntityId, Timestamp};

// ---------------------------------------------------------------------------
// Actor
// ---------------------------------------------------------------------------

/// The signed-in author a course is published under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub id: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub verified: bool,
}

/// Source of the currently authenticated actor.
pub trait ActorProvider: Send + Sync {
    /// `None` when nobody is signed in.
    fn current_actor(&self) -> Option<Actor>;
}

/// An [`ActorProvider`] that always returns the same answer.
#[derive(Debug, Clone, Default)]
pub struct StaticActorProvider {
    actor: Option<Actor>,
}

impl StaticActorProvider {
    pub fn new(actor: Actor) -> Self {
        Self { actor: Some(actor) }
    }

    /// A provider with nobody signed in.
    pub fn signed_out() -> Self {
        Self { actor: None }
    }
}

impl ActorProvider for StaticActorProvider {
    fn current_actor(&self) -> Option<Actor> {
        self.actor.clone()
    }
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// Instructor card embedded in the course document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructorInfo {
    pub name: String,
    pub avatar_url: Option<String>,
    pub verified: bool,
}

/// Body of the create-course request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoursePayload {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub price: f64,
    pub level: Level,
    pub duration: u32,
    pub image_url: Option<String>,
    pub image_hint: Option<String>,
    pub instructor: InstructorInfo,
}

impl CoursePayload {
    /// Build the course body from a validated draft.
    ///
    /// Returns `None` when the draft has no category; the overview validator
    /// rejects such drafts before this is reached.
    pub fn from_draft(draft: &CourseDraft, actor: &Actor) -> Option<Self> {
        Some(Self {
            title: draft.title().trim().to_string(),
            description: draft.description().trim().to_string(),
            category: draft.category()?,
            price: draft.price().as_f64(),
            level: draft.level(),
            duration: draft.duration_hours().as_u32(),
            image_url: draft.image_url().map(str::to_string),
            image_hint: draft.image_alt_text().map(str::to_string),
            instructor: InstructorInfo {
                name: actor.display_name.clone(),
                avatar_url: actor.avatar_url.clone(),
                verified: actor.verified,
            },
        })
    }
}

/// Body of the create-module request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModulePayload {
    pub title: String,
    pub description: Option<String>,
}

impl From<&ModuleDraft> for ModulePayload {
    fn from(module: &ModuleDraft) -> Self {
        Self {
            title: module.title().trim().to_string(),
            description: module.description().map(str::to_string),
        }
    }
}

/// Body of the create-lesson request (the module id travels separately).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonPayload {
    pub title: String,
    pub content: Option<String>,
    pub video_url: Option<String>,
    pub is_live: bool,
    pub scheduled_at: Option<Timestamp>,
}

impl From<&LessonDraft> for LessonPayload {
    fn from(lesson: &LessonDraft) -> Self {
        Self {
            title: lesson.title().to_string(),
            content: lesson.content().map(str::to_string),
            video_url: lesson.video_url().map(str::to_string),
            is_live: lesson.is_live(),
            scheduled_at: lesson.scheduled_at(),
        }
    }
}

/// Body of the create-assignment request (the course id travels separately).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentPayload {
    pub title: String,
    pub description: Option<String>,
    pub points: u32,
}

impl From<&AssignmentDraft> for AssignmentPayload {
    fn from(assignment: &AssignmentDraft) -> Self {
        Self {
            title: assignment.title().to_string(),
            description: assignment.description().map(str::to_string),
            points: assignment.points(),
        }
    }
}

/// Identifier returned by every create call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Created {
    #[serde(rename = "_id")]
    pub id: EntityId,
}

// ---------------------------------------------------------------------------
// Collaborator
// ---------------------------------------------------------------------------

/// A create call failed (transport error or non-success response).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct CollaboratorError {
    /// HTTP status when the server answered, `None` for transport failures.
    pub status: Option<u16>,
    pub message: String,
}

impl CollaboratorError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }
}

/// Persistence API for courses and their content.
///
/// Every call is a non-idempotent create that is durable once it returns
/// `Ok`; no transaction spans several calls.
#[async_trait]
pub trait CourseCollaborator: Send + Sync {
    async fn create_course(&self, course: &CoursePayload) -> Result<Created, CollaboratorError>;

    async fn create_module(
        &self,
        course_id: &str,
        module: &ModulePayload,
    ) -> Result<Created, CollaboratorError>;

    async fn create_lesson(
        &self,
        course_id: &str,
        module_id: &str,
        lesson: &LessonPayload,
    ) -> Result<Created, CollaboratorError>;

    async fn create_assignment(
        &self,
        course_id: &str,
        assignment: &AssignmentPayload,
    ) -> Result<Created, CollaboratorError>;
}
