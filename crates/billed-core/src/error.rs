//! Error types module
//!
//! `BilledError` covers the failures the client can raise on its own side:
//! rejected receipts, unreadable sessions and bad configuration. Remote store
//! failures live in the store crate.

/// Alert shown when a receipt with a disallowed extension is selected.
pub const REJECTED_FILE_ALERT: &str = "fichier non accepté";

/// Inline hint rendered next to the file input after a rejection.
pub const REJECTED_FILE_HINT: &str = "Veuillez sélectionner un fichier au format jpg, jpeg ou png";

#[derive(Debug, thiserror::Error)]
pub enum BilledError {
    #[error("Rejected receipt '{file_name}': extension '{extension}' is not allowed")]
    RejectedExtension {
        file_name: String,
        extension: String,
    },

    #[error("Invalid session: {0}")]
    InvalidSession(String),

    #[error("Invalid bill status: {0}")]
    InvalidStatus(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<validator::ValidationErrors> for BilledError {
    fn from(err: validator::ValidationErrors) -> Self {
        BilledError::InvalidSession(format!("Validation error: {}", err))
    }
}

impl BilledError {
    /// Machine-readable error code (e.g., "REJECTED_EXTENSION")
    pub fn error_code(&self) -> &'static str {
        match self {
            BilledError::RejectedExtension { .. } => "REJECTED_EXTENSION",
            BilledError::InvalidSession(_) => "INVALID_SESSION",
            BilledError::InvalidStatus(_) => "INVALID_STATUS",
            BilledError::Config(_) => "CONFIG_ERROR",
            BilledError::Json(_) => "JSON_ERROR",
            BilledError::Io(_) => "IO_ERROR",
        }
    }

    /// Message shown to the user. Only receipt rejections have a fixed
    /// French literal; everything else falls back to the display text.
    pub fn client_message(&self) -> String {
        match self {
            BilledError::RejectedExtension { .. } => REJECTED_FILE_ALERT.to_string(),
            other => other.to_string(),
        }
    }
}
