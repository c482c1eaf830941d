//! REST client for the course persistence endpoints.
//!
//! Wraps the course API (course creation, module/lesson content, and
//! assignments) using [`reqwest`]. Every endpoint is a non-idempotent
//! create; this client never retries.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use academy_core::publish::{
    AssignmentPayload, CollaboratorError, CourseCollaborator, CoursePayload, Created,
    LessonPayload, ModulePayload,
};

/// Content envelope `type` for modules.
const CONTENT_TYPE_MODULE: &str = "module";

/// Content envelope `type` for lessons.
const CONTENT_TYPE_LESSON: &str = "lesson";

/// Content envelope `type` for assignments.
const CONTENT_TYPE_ASSIGNMENT: &str = "assignment";

/// HTTP client for one course API deployment.
#[derive(Clone)]
pub struct CourseApi {
    client: reqwest::Client,
    api_url: String,
    bearer_token: Option<String>,
}

/// Errors from the course REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum CourseApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("Course API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Error message from the body, or the raw body.
        body: String,
    },

    /// A create call succeeded but the response carried no `_id`.
    #[error("Course API response is missing the created `_id`")]
    MissingId,
}

impl From<CourseApiError> for CollaboratorError {
    fn from(err: CourseApiError) -> Self {
        match &err {
            CourseApiError::ApiError { status, .. } => {
                CollaboratorError::with_status(*status, err.to_string())
            }
            _ => CollaboratorError::new(err.to_string()),
        }
    }
}

/// `{ "type": ..., "data": ... }` body used by the content endpoints.
#[derive(Serialize)]
struct Envelope<T: Serialize> {
    r#type: &'static str,
    data: T,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LessonData<'a> {
    module_id: &'a str,
    #[serde(flatten)]
    lesson: &'a LessonPayload,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AssignmentData<'a> {
    course_id: &'a str,
    #[serde(flatten)]
    assignment: &'a AssignmentPayload,
}

impl CourseApi {
    /// Create a client for the API rooted at `api_url`, e.g.
    /// `http://localhost:3000/api`.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            bearer_token: None,
        }
    }

    /// Create a client whose requests give up after `timeout`.
    pub fn with_timeout(
        api_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, CourseApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, api_url))
    }

    /// Send `Authorization: Bearer <token>` with every request.
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// `POST /courses`.
    pub async fn post_course(&self, course: &CoursePayload) -> Result<Created, CourseApiError> {
        self.post("courses", course).await
    }

    /// `POST /courses/{course_id}/content` with a module envelope.
    pub async fn post_module(
        &self,
        course_id: &str,
        module: &ModulePayload,
    ) -> Result<Created, CourseApiError> {
        let body = Envelope {
            r#type: CONTENT_TYPE_MODULE,
            data: module,
        };
        self.post(&format!("courses/{course_id}/content"), &body).await
    }

    /// `POST /courses/{course_id}/content` with a lesson envelope.
    pub async fn post_lesson(
        &self,
        course_id: &str,
        module_id: &str,
        lesson: &LessonPayload,
    ) -> Result<Created, CourseApiError> {
        let body = Envelope {
            r#type: CONTENT_TYPE_LESSON,
            data: LessonData { module_id, lesson },
        };
        self.post(&format!("courses/{course_id}/content"), &body).await
    }

    /// `POST /assignments` with an assignment envelope.
    pub async fn post_assignment(
        &self,
        course_id: &str,
        assignment: &AssignmentPayload,
    ) -> Result<Created, CourseApiError> {
        let body = Envelope {
            r#type: CONTENT_TYPE_ASSIGNMENT,
            data: AssignmentData {
                course_id,
                assignment,
            },
        };
        self.post("assignments", &body).await
    }

    // ---- private helpers ----

    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Created, CourseApiError> {
        let url = format!("{}/{path}", self.api_url);
        tracing::debug!(url = %url, "POST");

        let mut request = self.client.post(&url).json(body);
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        Self::parse_created(response).await
    }

    /// Ensure the response has a success status code. On failure the
    /// body's `error` / `message` field is preferred over the raw text.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, CourseApiError> {
        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(CourseApiError::ApiError {
                status: status.as_u16(),
                body: error_message(&text),
            });
        }
        Ok(response)
    }

    /// Read the `_id` of the created document.
    async fn parse_created(response: reqwest::Response) -> Result<Created, CourseApiError> {
        let response = Self::ensure_success(response).await?;
        let value = response.json::<serde_json::Value>().await?;
        value
            .get("_id")
            .and_then(|id| match id {
                serde_json::Value::String(s) => Some(s.clone()),
                serde_json::Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .map(|id| Created { id })
            .ok_or(CourseApiError::MissingId)
    }
}

/// Pull a human-readable message out of an error body.
fn error_message(text: &str) -> String {
    serde_json::from_str::<serde_json::Value>(text)
        .ok()
        .and_then(|v| {
            ["error", "message"]
                .iter()
                .find_map(|key| v.get(*key).and_then(|m| m.as_str()).map(str::to_string))
        })
        .unwrap_or_else(|| text.to_string())
}

#[async_trait]
impl CourseCollaborator for CourseApi {
    async fn create_course(&self, course: &CoursePayload) -> Result<Created, CollaboratorError> {
        Ok(self.post_course(course).await?)
    }

    async fn create_module(
        &self,
        course_id: &str,
        module: &ModulePayload,
    ) -> Result<Created, CollaboratorError> {
        Ok(self.post_module(course_id, module).await?)
    }

    async fn create_lesson(
        &self,
        course_id: &str,
        module_id: &str,
        lesson: &LessonPayload,
    ) -> Result<Created, CollaboratorError> {
        Ok(self.post_lesson(course_id, module_id, lesson).await?)
    }

    async fn create_assignment(
        &self,
        course_id: &str,
        assignment: &AssignmentPayload,
    ) -> Result<Created, CollaboratorError> {
        Ok(self.post_assignment(course_id, assignment).await?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
