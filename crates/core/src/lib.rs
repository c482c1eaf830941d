//! Course-authoring domain logic.
//!
//! Holds the in-memory course draft, the per-step validators that gate the
//! authoring wizard, the wizard state machine itself, and the publication
//! orchestrator that turns a finished draft into persisted entities through
//! a [`publish::CourseCollaborator`].

pub mod draft;
pub mod error;
pub mod publish;
pub mod types;
pub mod validation;
pub mod wizard;
