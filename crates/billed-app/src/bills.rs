//! Bill list controller.

use billed_core::{format_date, format_status, sort_by_date_desc, Bill, BillStatus, Route, Session};
use billed_store::{BillStore, StoreError};
use serde::Serialize;
use std::sync::Arc;

use crate::intent::Intent;

/// Eye icon of a bill row; carries the receipt URL (`data-bill-url`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EyeIcon {
    pub bill_url: String,
}

impl EyeIcon {
    pub fn new(bill_url: impl Into<String>) -> Self {
        Self {
            bill_url: bill_url.into(),
        }
    }
}

/// One rendered line of the bill list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillRow {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub bill_type: String,
    pub name: String,
    /// Raw date, the ordering key.
    pub date: String,
    /// French display date, or the raw date when it does not parse.
    pub display_date: String,
    pub amount: i64,
    pub status: BillStatus,
    pub status_label: &'static str,
    pub file_url: String,
}

impl BillRow {
    fn from_bill(bill: Bill) -> Self {
        let display_date = match format_date(&bill.date) {
            Ok(formatted) => formatted,
            Err(e) => {
                tracing::warn!(
                    bill_id = ?bill.id,
                    date = %bill.date,
                    error = %e,
                    "Corrupted bill date, displaying it unformatted"
                );
                bill.date.clone()
            }
        };

        Self {
            id: bill.id,
            bill_type: bill.bill_type,
            name: bill.name,
            date: bill.date,
            display_date,
            amount: bill.amount,
            status: bill.status,
            status_label: format_status(bill.status),
            file_url: bill.file_url,
        }
    }

    pub fn eye_icon(&self) -> EyeIcon {
        EyeIcon::new(self.file_url.clone())
    }
}

/// Controller behind the employee's bill list.
pub struct BillsController {
    store: Option<Arc<dyn BillStore>>,
    session: Session,
}

impl BillsController {
    /// `store` is `None` when no backend is configured; the list is then empty.
    pub fn new(store: Option<Arc<dyn BillStore>>, session: Session) -> Self {
        Self { store, session }
    }

    pub fn handle_click_new_bill(&self) -> Intent {
        Intent::Navigate(Route::NewBill)
    }

    /// Open the receipt preview. The image takes half the modal width.
    pub fn handle_click_icon_eye(&self, icon: &EyeIcon, modal_width: u32) -> Intent {
        Intent::ShowReceipt {
            url: icon.bill_url.clone(),
            width: modal_width / 2,
        }
    }

    /// Fetch bills and turn them into rows, latest date first.
    pub async fn get_bills(&self) -> Result<Vec<BillRow>, StoreError> {
        let Some(store) = &self.store else {
            return Ok(Vec::new());
        };

        let mut bills = store.list().await?;
        sort_by_date_desc(&mut bills);
        tracing::debug!(
            user = self.session.email_or_empty(),
            count = bills.len(),
            "Loaded bills"
        );

        Ok(bills.into_iter().map(BillRow::from_bill).collect())
    }

    /// Load the list view: rows on success, an error page (`Erreur 404`, ...)
    /// when the store rejects.
    pub async fn list(&self) -> Intent {
        match self.get_bills().await {
            Ok(rows) => Intent::RenderBills(rows),
            Err(e) => {
                tracing::error!(error = %e, "Failed to load bills");
                Intent::RenderError(e.to_string())
            }
        }
    }
}
