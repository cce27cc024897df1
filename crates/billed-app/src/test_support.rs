//! Scripted store double shared by the controller tests.

use async_trait::async_trait;
use billed_core::{Bill, Session};
use billed_store::{BillStore, CreatePayload, StoreError, StoreResult, UpdatePayload, UploadResponse};
use std::sync::Mutex;

pub fn employee() -> Session {
    Session::employee("test@example.com")
}

/// Store answering from canned results and recording every call.
pub struct ScriptedStore {
    pub list_result: Result<Vec<Bill>, u16>,
    pub create_result: Result<UploadResponse, u16>,
    pub update_result: Result<serde_json::Value, u16>,
    pub list_calls: Mutex<usize>,
    pub creates: Mutex<Vec<CreatePayload>>,
    pub updates: Mutex<Vec<UpdatePayload>>,
}

impl Default for ScriptedStore {
    fn default() -> Self {
        Self {
            list_result: Ok(Vec::new()),
            create_result: Ok(UploadResponse {
                file_url: "http://example.com/file".to_string(),
                key: "123".to_string(),
            }),
            update_result: Ok(serde_json::json!({})),
            list_calls: Mutex::new(0),
            creates: Mutex::new(Vec::new()),
            updates: Mutex::new(Vec::new()),
        }
    }
}

impl ScriptedStore {
    pub fn create_count(&self) -> usize {
        self.creates.lock().unwrap().len()
    }

    pub fn update_count(&self) -> usize {
        self.updates.lock().unwrap().len()
    }
}

#[async_trait]
impl BillStore for ScriptedStore {
    async fn list(&self) -> StoreResult<Vec<Bill>> {
        *self.list_calls.lock().unwrap() += 1;
        self.list_result.clone().map_err(StoreError::status)
    }

    async fn create(&self, payload: CreatePayload) -> StoreResult<UploadResponse> {
        self.creates.lock().unwrap().push(payload);
        self.create_result.clone().map_err(StoreError::status)
    }

    async fn update(&self, payload: UpdatePayload) -> StoreResult<serde_json::Value> {
        self.updates.lock().unwrap().push(payload);
        self.update_result.clone().map_err(StoreError::status)
    }
}
