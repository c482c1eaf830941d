//! Sequential publish run over a [`PublishPlan`].

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use super::collaborator::{
    ActorProvider, AssignmentPayload, CollaboratorError, CourseCollaborator, CoursePayload,
    Created, LessonPayload, ModulePayload,
};
use super::plan::{PublishPlan, PublishTask};
use crate::draft::CourseDraft;
use crate::types::EntityId;
use crate::validation;

/// Default path the author is sent to after a successful publish.
pub const DEFAULT_REDIRECT_PATH: &str = "/instructor/courses";

/// Default pause between the completion message and the redirect.
pub const DEFAULT_REDIRECT_DELAY: Duration = Duration::from_millis(1500);

// ---------------------------------------------------------------------------
// Stages
// ---------------------------------------------------------------------------

/// Progress points reported while a publish run is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishStage {
    CreatingCourse,
    /// `number` is 1-based.
    UploadingModule { number: usize, title: String },
    UploadingAssignments { count: usize },
    Completed,
}

impl PublishStage {
    /// Human-readable progress message.
    pub fn label(&self) -> String {
        match self {
            Self::CreatingCourse => "Creating course...".to_string(),
            Self::UploadingModule { number, title } => {
                format!("Uploading Module {number}: {title}")
            }
            Self::UploadingAssignments { count } => format!("Uploading {count} assignment(s)..."),
            Self::Completed => "Course published successfully!".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Entities already created when a publish run stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialPublish {
    /// The course that now exists without its full content.
    pub course_id: EntityId,
    /// Successful create requests, the course included.
    pub created: usize,
}

/// Ids of everything a successful run created, in draft order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReport {
    pub publish_id: Uuid,
    pub course_id: EntityId,
    pub module_ids: Vec<EntityId>,
    /// One inner list per module.
    pub lesson_ids: Vec<Vec<EntityId>>,
    pub assignment_ids: Vec<EntityId>,
    pub requests_issued: usize,
}

/// Where to send the author once publishing finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectConfig {
    pub path: String,
    pub delay: Duration,
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_REDIRECT_PATH.to_string(),
            delay: DEFAULT_REDIRECT_DELAY,
        }
    }
}

/// Why a publish run did not complete.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PublishError {
    /// The draft failed a step rule; nothing was sent.
    #[error("{0}")]
    Validation(String),

    /// Nobody is signed in; nothing was sent.
    #[error("You must be signed in to publish a course")]
    Unauthenticated,

    /// A create request failed and the run stopped there.
    #[error("Failed to create {task}: {source}")]
    Persistence {
        task: PublishTask,
        source: CollaboratorError,
        /// Requests sent, the failing one included.
        requests_issued: usize,
        /// Set when the course was created before the failure.
        partial: Option<PartialPublish>,
    },

    /// The plan referenced a parent that was never created.
    #[error("Internal publish error: {0}")]
    Internal(String),
}

impl PublishError {
    /// Number of create requests sent before the run stopped.
    pub fn requests_issued(&self) -> usize {
        match self {
            Self::Persistence {
                requests_issued, ..
            } => *requests_issued,
            _ => 0,
        }
    }

    /// Entities left behind by a failed run, if any.
    pub fn partial(&self) -> Option<&PartialPublish> {
        match self {
            Self::Persistence { partial, .. } => partial.as_ref(),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Publisher
// ---------------------------------------------------------------------------

/// Ids resolved so far during a run.
#[derive(Default)]
struct Resolved {
    course_id: Option<EntityId>,
    module_ids: Vec<EntityId>,
    lesson_ids: Vec<Vec<EntityId>>,
    assignment_ids: Vec<EntityId>,
    created: usize,
}

impl Resolved {
    fn course_id(&self) -> Result<&str, PublishError> {
        self.course_id
            .as_deref()
            .ok_or_else(|| PublishError::Internal("course was not created first".to_string()))
    }

    fn module_id(&self, module: usize) -> Result<&str, PublishError> {
        self.module_ids
            .get(module)
            .map(String::as_str)
            .ok_or_else(|| {
                PublishError::Internal(format!("module {} was not created first", module + 1))
            })
    }

    fn record(&mut self, task: PublishTask, created: Created) {
        self.created += 1;
        match task {
            PublishTask::CreateCourse => self.course_id = Some(created.id),
            PublishTask::CreateModule { .. } => {
                self.module_ids.push(created.id);
                self.lesson_ids.push(Vec::new());
            }
            PublishTask::CreateLesson { module, .. } => {
                if let Some(lessons) = self.lesson_ids.get_mut(module) {
                    lessons.push(created.id);
                }
            }
            PublishTask::CreateAssignment { .. } => self.assignment_ids.push(created.id),
        }
    }

    fn partial(&self) -> Option<PartialPublish> {
        self.course_id.clone().map(|course_id| PartialPublish {
            course_id,
            created: self.created,
        })
    }
}

/// Persists drafts through a [`CourseCollaborator`].
#[derive(Clone)]
pub struct Publisher {
    collaborator: Arc<dyn CourseCollaborator>,
    actors: Arc<dyn ActorProvider>,
}

impl Publisher {
    pub fn new(collaborator: Arc<dyn CourseCollaborator>, actors: Arc<dyn ActorProvider>) -> Self {
        Self {
            collaborator,
            actors,
        }
    }

    /// Publish `draft`, reporting each [`PublishStage`] to `on_stage`.
    ///
    /// Requests are sent strictly one after another in [`PublishPlan`]
    /// order. The first failure ends the run; nothing is retried and
    /// nothing already created is removed.
    #[tracing::instrument(skip_all, fields(publish_id = tracing::field::Empty, title = %draft.title()))]
    pub async fn publish<F>(
        &self,
        draft: &CourseDraft,
        mut on_stage: F,
    ) -> Result<PublishReport, PublishError>
    where
        F: FnMut(&PublishStage),
    {
        let publish_id = Uuid::new_v4();
        tracing::Span::current().record("publish_id", tracing::field::display(publish_id));

        validation::validate_for_publish(draft).map_err(|e| {
            tracing::warn!(error = %e, "Draft rejected before publishing");
            PublishError::Validation(e.reason().to_string())
        })?;

        let actor = self.actors.current_actor().ok_or_else(|| {
            tracing::warn!("Publish attempted without a signed-in actor");
            PublishError::Unauthenticated
        })?;

        let course = CoursePayload::from_draft(draft, &actor).ok_or_else(|| {
            PublishError::Validation("Please fill in the course category".to_string())
        })?;

        let plan = PublishPlan::from_draft(draft);
        tracing::info!(
            requests = plan.len(),
            modules = draft.modules().len(),
            assignments = draft.assignments().len(),
            actor_id = %actor.id,
            "Publishing course",
        );

        let mut resolved = Resolved::default();
        let mut issued = 0;

        for task in plan.iter() {
            if let Some(stage) = stage_before(task, draft) {
                on_stage(&stage);
            }

            issued += 1;
            match self.run_task(task, draft, &course, &resolved).await {
                Ok(created) => {
                    tracing::debug!(%task, id = %created.id, "Created");
                    resolved.record(task, created);
                }
                Err(PublishError::Persistence { source, .. }) => {
                    let partial = resolved.partial();
                    tracing::error!(
                        %task,
                        error = %source,
                        requests_issued = issued,
                        course_id = partial.as_ref().map(|p| p.course_id.as_str()),
                        "Publish stopped; already-created entities are left in place",
                    );
                    return Err(PublishError::Persistence {
                        task,
                        source,
                        requests_issued: issued,
                        partial,
                    });
                }
                Err(other) => return Err(other),
            }
        }

        on_stage(&PublishStage::Completed);

        let course_id = resolved.course_id()?.to_string();
        tracing::info!(course_id = %course_id, requests = issued, "Course published");

        Ok(PublishReport {
            publish_id,
            course_id,
            module_ids: resolved.module_ids,
            lesson_ids: resolved.lesson_ids,
            assignment_ids: resolved.assignment_ids,
            requests_issued: issued,
        })
    }

    /// Issue the single request behind `task`.
    async fn run_task(
        &self,
        task: PublishTask,
        draft: &CourseDraft,
        course: &CoursePayload,
        resolved: &Resolved,
    ) -> Result<Created, PublishError> {
        let persistence = |source: CollaboratorError| PublishError::Persistence {
            task,
            source,
            requests_issued: 0,
            partial: None,
        };

        let result = match task {
            PublishTask::CreateCourse => self.collaborator.create_course(course).await,
            PublishTask::CreateModule { module } => {
                let payload = ModulePayload::from(&draft.modules()[module]);
                self.collaborator
                    .create_module(resolved.course_id()?, &payload)
                    .await
            }
            PublishTask::CreateLesson { module, lesson } => {
                let payload = LessonPayload::from(&draft.modules()[module].lessons()[lesson]);
                self.collaborator
                    .create_lesson(resolved.course_id()?, resolved.module_id(module)?, &payload)
                    .await
            }
            PublishTask::CreateAssignment { assignment } => {
                let payload = AssignmentPayload::from(&draft.assignments()[assignment]);
                self.collaborator
                    .create_assignment(resolved.course_id()?, &payload)
                    .await
            }
        };
        result.map_err(persistence)
    }
}

/// The stage announced right before `task` is sent, if any.
fn stage_before(task: PublishTask, draft: &CourseDraft) -> Option<PublishStage> {
    match task {
        PublishTask::CreateCourse => Some(PublishStage::CreatingCourse),
        PublishTask::CreateModule { module } => Some(PublishStage::UploadingModule {
            number: module + 1,
            title: draft.modules()[module].title().to_string(),
        }),
        PublishTask::CreateAssignment { assignment: 0 } => {
            Some(PublishStage::UploadingAssignments {
                count: draft.assignments().len(),
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_stage_label_names_index_and_title() {
        let stage = PublishStage::UploadingModule {
            number: 2,
            title: "Food Safety".to_string(),
        };
        assert_eq!(stage.label(), "Uploading Module 2: Food Safety");
    }

    #[test]
    fn redirect_defaults() {
        let redirect = RedirectConfig::default();
        assert_eq!(redirect.path, DEFAULT_REDIRECT_PATH);
        assert_eq!(redirect.delay, DEFAULT_REDIRECT_DELAY);
    }

    #[test]
    fn persistence_error_reports_task_and_cause() {
        let err = PublishError::Persistence {
            task: PublishTask::CreateModule { module: 1 },
            source: CollaboratorError::with_status(500, "boom"),
            requests_issued: 3,
            partial: Some(PartialPublish {
                course_id: "c1".to_string(),
                created: 2,
            }),
        };

        assert_eq!(err.to_string(), "Failed to create module 2: boom");
        assert_eq!(err.requests_issued(), 3);
        assert_eq!(err.partial().unwrap().course_id, "c1");
    }

    #[test]
    fn pre_flight_errors_issue_no_requests() {
        assert_eq!(PublishError::Unauthenticated.requests_issued(), 0);
        assert!(PublishError::Validation("x".to_string()).partial().is_none());
    }
}
