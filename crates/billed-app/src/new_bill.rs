//! New-bill controller.
//!
//! A draft moves `Empty -> Uploaded -> Submitted`. Choosing a receipt uploads
//! it and opens a draft bill on the backend; submitting the form completes
//! that bill. There is no compensation when the second step fails: the
//! uploaded draft stays on the backend.
//!
//! The draft lock is never held across a store call. Two overlapping uploads
//! both complete and the one resolving last owns the draft. Once submitted,
//! the draft keeps its identifier: later uploads still reach the store but
//! do not reopen it.

use billed_core::{
    validate_receipt_extension, Bill, BillForm, ReceiptFile, Route, Session,
    ALLOWED_RECEIPT_EXTENSIONS,
};
use billed_store::{BillStore, CreatePayload, UpdatePayload};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::intent::Intent;

/// Where the draft stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DraftState {
    /// No receipt accepted yet.
    #[default]
    Empty,
    Uploaded {
        bill_id: String,
        file_url: String,
        file_name: String,
    },
    /// Full record persisted; terminal.
    Submitted {
        bill_id: String,
        file_url: String,
        file_name: String,
    },
}

impl DraftState {
    pub fn bill_id(&self) -> Option<&str> {
        match self {
            DraftState::Empty => None,
            DraftState::Uploaded { bill_id, .. } | DraftState::Submitted { bill_id, .. } => {
                Some(bill_id)
            }
        }
    }
}

/// Controller behind the new-bill form.
pub struct NewBillController {
    store: Arc<dyn BillStore>,
    session: Session,
    allowed_extensions: Vec<String>,
    draft: Mutex<DraftState>,
}

impl NewBillController {
    pub fn new(store: Arc<dyn BillStore>, session: Session) -> Self {
        let allowed_extensions = ALLOWED_RECEIPT_EXTENSIONS
            .iter()
            .map(|ext| ext.to_string())
            .collect();
        Self::with_extensions(store, session, allowed_extensions)
    }

    pub fn with_extensions(
        store: Arc<dyn BillStore>,
        session: Session,
        allowed_extensions: Vec<String>,
    ) -> Self {
        Self {
            store,
            session,
            allowed_extensions,
            draft: Mutex::new(DraftState::Empty),
        }
    }

    pub async fn draft(&self) -> DraftState {
        self.draft.lock().await.clone()
    }

    /// Receipt selected. Rejected extensions raise an alert without touching
    /// the store; accepted ones are uploaded with the session email.
    pub async fn handle_change_file(&self, file: ReceiptFile) -> Intent {
        if let Err(e) = validate_receipt_extension(&file.name, &self.allowed_extensions) {
            tracing::info!(error = %e, code = e.error_code(), "Receipt rejected");
            return Intent::Alert(e.client_message());
        }

        let file_name = file.name.clone();
        let payload = CreatePayload::upload(file, self.session.email_or_empty());

        match self.store.create(payload).await {
            Ok(response) => {
                tracing::info!(
                    bill_id = %response.key,
                    file_name = %file_name,
                    "Receipt uploaded"
                );
                let mut draft = self.draft.lock().await;
                if let DraftState::Submitted { bill_id, .. } = &*draft {
                    tracing::warn!(
                        bill_id = %bill_id,
                        orphan_key = %response.key,
                        "Receipt uploaded after submission, draft left as submitted"
                    );
                } else {
                    *draft = DraftState::Uploaded {
                        bill_id: response.key,
                        file_url: response.file_url,
                        file_name,
                    };
                }
            }
            Err(e) => {
                tracing::error!(error = %e, file_name = %file_name, "Receipt upload failed");
            }
        }
        Intent::Stay
    }

    /// Full record for the current form values. File fields come from the
    /// uploaded (or already submitted) draft and are empty when nothing was
    /// uploaded.
    pub async fn build_bill(&self, form: &BillForm) -> Bill {
        let draft = self.draft.lock().await;
        let (file_url, file_name) = match &*draft {
            DraftState::Uploaded {
                file_url,
                file_name,
                ..
            }
            | DraftState::Submitted {
                file_url,
                file_name,
                ..
            } => (file_url.as_str(), file_name.as_str()),
            _ => ("", ""),
        };
        form.to_bill(self.session.email_or_empty(), file_url, file_name)
    }

    /// Form submitted: builds the bill with status `pending` and sends it.
    pub async fn handle_submit(&self, form: &BillForm) -> Intent {
        let bill = self.build_bill(form).await;
        self.update_bill(&bill).await
    }

    /// Persist `bill` under the draft identifier. Success leads back to the
    /// bill list; failure is logged and the form stays open.
    pub async fn update_bill(&self, bill: &Bill) -> Intent {
        let bill_id = self
            .draft
            .lock()
            .await
            .bill_id()
            .unwrap_or_default()
            .to_string();

        let payload = match UpdatePayload::for_bill(bill, bill_id.clone()) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize bill");
                return Intent::Stay;
            }
        };

        match self.store.update(payload).await {
            Ok(_) => {
                tracing::info!(bill_id = %bill_id, "Bill submitted");
                *self.draft.lock().await = DraftState::Submitted {
                    bill_id,
                    file_url: bill.file_url.clone(),
                    file_name: bill.file_name.clone(),
                };
                Intent::Navigate(Route::Bills)
            }
            Err(e) => {
                tracing::error!(error = %e, bill_id = %bill_id, "Bill update failed");
                Intent::Stay
            }
        }
    }
}
