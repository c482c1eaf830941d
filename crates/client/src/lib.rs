//! HTTP client for the course API.
//!
//! [`api::CourseApi`] implements
//! [`CourseCollaborator`](academy_core::publish::CourseCollaborator) over
//! the JSON endpoints the publisher needs: course creation, module and
//! lesson content, and assignments.

pub mod api;

pub use api::{CourseApi, CourseApiError};
