use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

use crate::error::BilledError;

/// Kind of account signed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserType {
    Employee,
    Admin,
}

/// Signed-in user, as stored under the `user` key of the browser session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Session {
    #[serde(rename = "type")]
    pub user_type: UserType,
    #[serde(default)]
    #[validate(email(message = "Session email must be a valid address"))]
    pub email: Option<String>,
    /// Bearer token forwarded to the backend when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jwt: Option<String>,
}

impl Session {
    pub fn employee(email: impl Into<String>) -> Self {
        Self {
            user_type: UserType::Employee,
            email: Some(email.into()),
            jwt: None,
        }
    }

    /// Parse and validate a JSON session document.
    pub fn from_json(json: &str) -> Result<Self, BilledError> {
        let session: Session = serde_json::from_str(json)
            .map_err(|e| BilledError::InvalidSession(format!("Malformed session: {}", e)))?;
        session.validate()?;
        Ok(session)
    }

    pub fn from_file(path: &Path) -> Result<Self, BilledError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Email sent with uploads; empty when the session has none.
    pub fn email_or_empty(&self) -> &str {
        self.email.as_deref().unwrap_or("")
    }
}
