//! In-process bill store.
//!
//! Keeps bills in insertion order and receipts by key. Serves as a real
//! backend for controller tests and for embedders running without a server.

use async_trait::async_trait;
use billed_core::{Bill, ReceiptFile};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::traits::{BillStore, CreatePayload, StoreError, StoreResult, UpdatePayload, UploadResponse};

struct Inner {
    bills: Vec<Bill>,
    receipts: HashMap<String, ReceiptFile>,
}

/// Thread-safe in-memory store. Clones share the same collection.
#[derive(Clone)]
pub struct MemoryBillStore {
    inner: Arc<RwLock<Inner>>,
    receipt_base_url: String,
}

impl MemoryBillStore {
    pub fn new(receipt_base_url: impl Into<String>) -> Self {
        Self::with_bills(receipt_base_url, Vec::new())
    }

    /// Store pre-populated with `bills`. Bills without an id get one.
    pub fn with_bills(receipt_base_url: impl Into<String>, bills: Vec<Bill>) -> Self {
        let bills = bills
            .into_iter()
            .map(|mut bill| {
                if bill.id.is_none() {
                    bill.id = Some(Uuid::new_v4().to_string());
                }
                bill
            })
            .collect();
        let receipt_base_url: String = receipt_base_url.into();

        Self {
            inner: Arc::new(RwLock::new(Inner {
                bills,
                receipts: HashMap::new(),
            })),
            receipt_base_url: receipt_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Snapshot of the stored bills.
    pub async fn bills(&self) -> Vec<Bill> {
        self.inner.read().await.bills.clone()
    }

    pub async fn receipt(&self, key: &str) -> Option<ReceiptFile> {
        self.inner.read().await.receipts.get(key).cloned()
    }
}

#[async_trait]
impl BillStore for MemoryBillStore {
    async fn list(&self) -> StoreResult<Vec<Bill>> {
        Ok(self.bills().await)
    }

    async fn create(&self, payload: CreatePayload) -> StoreResult<UploadResponse> {
        let key = Uuid::new_v4().to_string();
        let file = payload.data.file;
        let file_url = format!("{}/{}/{}", self.receipt_base_url, key, file.name);

        let draft = Bill {
            id: Some(key.clone()),
            email: payload.data.email,
            file_url: file_url.clone(),
            file_name: file.name.clone(),
            ..Default::default()
        };

        let mut inner = self.inner.write().await;
        inner.bills.push(draft);
        inner.receipts.insert(key.clone(), file);
        tracing::debug!(key = %key, "Stored receipt");

        Ok(UploadResponse { file_url, key })
    }

    async fn update(&self, payload: UpdatePayload) -> StoreResult<serde_json::Value> {
        let mut bill: Bill = serde_json::from_str(&payload.data)
            .map_err(|e| StoreError::InvalidPayload(format!("Malformed bill: {}", e)))?;
        bill.id = Some(payload.selector.clone());

        let mut inner = self.inner.write().await;
        let slot = inner
            .bills
            .iter_mut()
            .find(|existing| existing.id.as_deref() == Some(payload.selector.as_str()))
            .ok_or_else(|| StoreError::Status {
                status: 404,
                body: format!("Bill {} not found", payload.selector),
            })?;
        *slot = bill.clone();

        serde_json::to_value(&bill).map_err(|e| StoreError::Decode(e.to_string()))
    }
}
