use std::time::Duration;

use academy_core::publish::{Actor, RedirectConfig};

/// Default course API base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";

/// Default per-request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Error raised when an environment variable holds an unusable value.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Studio configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development except the
/// actor, which stays `None` (signed out) unless `ACADEMY_ACTOR_ID` is set.
#[derive(Debug, Clone)]
pub struct StudioConfig {
    /// Course API base URL.
    pub api_url: String,
    /// Bearer token sent to the course API.
    pub api_token: Option<String>,
    /// Per-request timeout.
    pub request_timeout: Duration,
    /// Post-publish redirect target and delay.
    pub redirect: RedirectConfig,
    /// Author publishing the course.
    pub actor: Option<Actor>,
}

impl StudioConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                        | Default                      |
    /// |--------------------------------|------------------------------|
    /// | `ACADEMY_API_URL`              | `http://localhost:3000/api`  |
    /// | `ACADEMY_API_TOKEN`            | --                           |
    /// | `ACADEMY_REQUEST_TIMEOUT_SECS` | `30`                         |
    /// | `ACADEMY_REDIRECT_PATH`        | `/instructor/courses`        |
    /// | `ACADEMY_REDIRECT_DELAY_MS`    | `1500`                       |
    /// | `ACADEMY_ACTOR_ID`             | --                           |
    /// | `ACADEMY_ACTOR_NAME`           | value of `ACADEMY_ACTOR_ID`  |
    /// | `ACADEMY_ACTOR_AVATAR_URL`     | --                           |
    /// | `ACADEMY_ACTOR_VERIFIED`       | `false`                      |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_url = var("ACADEMY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.into());
        let api_token = var("ACADEMY_API_TOKEN");

        let request_timeout = Duration::from_secs(parse_or(
            var("ACADEMY_REQUEST_TIMEOUT_SECS"),
            "ACADEMY_REQUEST_TIMEOUT_SECS",
            "a whole number of seconds",
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?);

        let defaults = RedirectConfig::default();
        let redirect = RedirectConfig {
            path: var("ACADEMY_REDIRECT_PATH").unwrap_or(defaults.path),
            delay: Duration::from_millis(parse_or(
                var("ACADEMY_REDIRECT_DELAY_MS"),
                "ACADEMY_REDIRECT_DELAY_MS",
                "a whole number of milliseconds",
                defaults.delay.as_millis() as u64,
            )?),
        };

        let actor = match var("ACADEMY_ACTOR_ID") {
            Some(id) => Some(Actor {
                display_name: var("ACADEMY_ACTOR_NAME").unwrap_or_else(|| id.clone()),
                avatar_url: var("ACADEMY_ACTOR_AVATAR_URL"),
                verified: parse_or(
                    var("ACADEMY_ACTOR_VERIFIED"),
                    "ACADEMY_ACTOR_VERIFIED",
                    "true or false",
                    false,
                )?,
                id,
            }),
            None => None,
        };

        Ok(Self {
            api_url,
            api_token,
            request_timeout,
            redirect,
            actor,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    raw: Option<String>,
    var: &'static str,
    expected: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            var,
            expected,
            value,
        }),
    }
}
