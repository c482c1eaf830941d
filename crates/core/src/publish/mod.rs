//! Publication of a finished draft.
//!
//! A [`PublishPlan`] flattens the draft graph into the exact ordered list of
//! create requests, and the [`Publisher`] walks that list one request at a
//! time against a [`CourseCollaborator`]. There is no rollback: a failure
//! after the course was created leaves the already-created entities in
//! place and reports them through [`PartialPublish`].

mod collaborator;
mod orchestrator;
mod plan;

pub use collaborator::{
    Actor, ActorProvider, AssignmentPayload, CollaboratorError, CourseCollaborator, CoursePayload,
    Created, InstructorInfo, LessonPayload, ModulePayload, StaticActorProvider,
};
pub use orchestrator::{
    PartialPublish, PublishError, PublishReport, PublishStage, Publisher, RedirectConfig,
};
pub use plan::{PublishPlan, PublishTask};
