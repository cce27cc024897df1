//! HTTP backend for the bill store.
//!
//! Binds the store contract to the REST backend: `GET /bills`,
//! `POST /bills` (multipart) and `PATCH /bills/{id}` (JSON). Requests carry
//! `Authorization: Bearer {jwt}` when the session has a token.

use anyhow::{Context, Result};
use async_trait::async_trait;
use billed_core::{Bill, ClientConfig, Session};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::traits::{BillStore, CreatePayload, StoreError, StoreResult, UpdatePayload, UploadResponse};

/// HTTP client for the bills collection.
#[derive(Clone, Debug)]
pub struct HttpBillStore {
    client: Client,
    base_url: String,
    jwt: Option<String>,
}

impl HttpBillStore {
    pub fn new(base_url: &str, timeout: Duration, jwt: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            jwt,
        })
    }

    /// Create a store from the client configuration, authenticated as `session`.
    pub fn from_config(config: &ClientConfig, session: &Session) -> Result<Self> {
        Self::new(
            &config.api_url,
            Duration::from_secs(config.timeout_secs),
            session.jwt.clone(),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn apply_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.jwt {
            Some(token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> StoreResult<Response> {
        let response = self
            .apply_auth(request)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(status = %status, body = %body, "Bill store request failed");
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> StoreResult<T> {
        response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }
}

#[async_trait]
impl BillStore for HttpBillStore {
    async fn list(&self) -> StoreResult<Vec<Bill>> {
        let url = self.build_url("/bills");
        tracing::debug!(url = %url, "Listing bills");

        let response = self.send(self.client.get(&url)).await?;
        Self::read_json(response).await
    }

    async fn create(&self, payload: CreatePayload) -> StoreResult<UploadResponse> {
        if !payload.headers.no_content_type {
            return Err(StoreError::InvalidPayload(
                "receipt uploads must leave the content type to the multipart encoder".to_string(),
            ));
        }

        let url = self.build_url("/bills");
        let file = payload.data.file;
        tracing::debug!(
            url = %url,
            file_name = %file.name,
            size = file.bytes.len(),
            "Uploading receipt"
        );

        let part = reqwest::multipart::Part::bytes(file.bytes.to_vec())
            .file_name(file.name.clone())
            .mime_str(&file.content_type)
            .map_err(|e| StoreError::InvalidPayload(format!("Invalid content type: {}", e)))?;
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("email", payload.data.email);

        let response = self.send(self.client.post(&url).multipart(form)).await?;
        Self::read_json(response).await
    }

    async fn update(&self, payload: UpdatePayload) -> StoreResult<serde_json::Value> {
        if payload.selector.is_empty() {
            tracing::warn!("Updating bill without an id, request targets the collection path");
        }
        let url = self.build_url(&format!("/bills/{}", payload.selector));
        tracing::debug!(url = %url, "Updating bill");

        let request = self
            .client
            .patch(&url)
            .header("Content-Type", "application/json")
            .body(payload.data);
        let response = self.send(request).await?;

        let body = response
            .text()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        if body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| StoreError::Decode(e.to_string()))
    }
}
