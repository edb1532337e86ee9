//! Test data and credentials.
//!
//! Fixture values are static for a whole run: [`TestData`] comes from the
//! event registration JSON file and [`Credentials`] from the environment.
//! Both are read-only once a scenario starts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::result::{StepError, StepResult};

/// Environment variable holding the sign-in username
pub const USERNAME_ENV: &str = "EVENTS_HUB_USERNAME";

/// Environment variable holding the sign-in password
pub const PASSWORD_ENV: &str = "EVENTS_HUB_PASSWORD";

/// Environment variable pointing at the test data JSON file
pub const TEST_DATA_ENV: &str = "EVENTS_HUB_TEST_DATA";

/// Default event title when no fixture file is configured
pub const DEFAULT_EVENT_TITLE: &str = "Adobe Express Creative Jam";

/// Static fixture values for the event registration scenarios
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestData {
    /// Default event title
    pub event_title: String,
}

impl Default for TestData {
    fn default() -> Self {
        Self {
            event_title: DEFAULT_EVENT_TITLE.to_string(),
        }
    }
}

impl TestData {
    /// Parse test data from JSON text
    pub fn from_json(json: &str) -> StepResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load test data from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> StepResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Load from the file named by [`TEST_DATA_ENV`], or fall back to defaults
    pub fn from_env() -> StepResult<Self> {
        match std::env::var_os(TEST_DATA_ENV) {
            Some(path) => Self::from_path(path),
            None => Ok(Self::default()),
        }
    }
}

/// Sign-in credentials for one run
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Create credentials
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Read credentials from [`USERNAME_ENV`] and [`PASSWORD_ENV`]
    pub fn from_env() -> StepResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> StepResult<Self> {
        let read = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| StepError::config(format!("{key} is not set")))
        };
        Ok(Self::new(read(USERNAME_ENV)?, read(PASSWORD_ENV)?))
    }

    /// Username (the account email)
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Password
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
