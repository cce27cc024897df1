//! Bill store abstraction trait
//!
//! This module defines the contract every store backend implements, along
//! with the payloads exchanged through it.

use async_trait::async_trait;
use billed_core::{Bill, ReceiptFile};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Store operation errors
///
/// The display text is what the bill list renders when loading fails, so a
/// rejected request reads `Erreur 404`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Erreur {status}")]
    Status { status: u16, body: String },

    #[error("Erreur de connexion: {0}")]
    Transport(String),

    #[error("Erreur de lecture de la réponse: {0}")]
    Decode(String),

    #[error("Erreur de requête: {0}")]
    InvalidPayload(String),
}

impl StoreError {
    pub fn status(status: u16) -> Self {
        StoreError::Status {
            status,
            body: String::new(),
        }
    }

    /// HTTP status code carried by the error, if the backend answered.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            StoreError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Multipart body of an upload: the receipt and the uploader's email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadForm {
    pub file: ReceiptFile,
    pub email: String,
}

/// Request header hints forwarded with a payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestHeaders {
    /// Leave the content type to the transport (required for multipart).
    pub no_content_type: bool,
}

/// Payload of `create`: receipt upload that opens a draft bill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePayload {
    pub data: UploadForm,
    pub headers: RequestHeaders,
}

impl CreatePayload {
    pub fn upload(file: ReceiptFile, email: impl Into<String>) -> Self {
        Self {
            data: UploadForm {
                file,
                email: email.into(),
            },
            headers: RequestHeaders {
                no_content_type: true,
            },
        }
    }
}

/// Answer to a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub file_url: String,
    /// Identifier of the draft bill created by the upload.
    pub key: String,
}

/// Payload of `update`: serialized bill and the identifier it replaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePayload {
    /// JSON document of the bill.
    pub data: String,
    pub selector: String,
}

impl UpdatePayload {
    pub fn for_bill(bill: &Bill, selector: impl Into<String>) -> Result<Self, serde_json::Error> {
        Ok(Self {
            data: serde_json::to_string(bill)?,
            selector: selector.into(),
        })
    }
}

/// Bill store abstraction trait
///
/// All backends (HTTP, in-memory) implement this trait so the controllers
/// never depend on a transport.
#[async_trait]
pub trait BillStore: Send + Sync {
    /// Every bill visible to the session, in backend order.
    async fn list(&self) -> StoreResult<Vec<Bill>>;

    /// Upload a receipt and open a draft bill for it.
    async fn create(&self, payload: CreatePayload) -> StoreResult<UploadResponse>;

    /// Replace the bill identified by `selector`. The response body is
    /// backend specific.
    async fn update(&self, payload: UpdatePayload) -> StoreResult<serde_json::Value>;
}
