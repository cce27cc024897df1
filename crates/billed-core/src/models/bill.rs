use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BilledError;

/// Review status of a bill
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    #[default]
    Pending,
    Accepted,
    Refused,
}

impl BillStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillStatus::Pending => "pending",
            BillStatus::Accepted => "accepted",
            BillStatus::Refused => "refused",
        }
    }
}

impl fmt::Display for BillStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BillStatus {
    type Err = BilledError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BillStatus::Pending),
            "accepted" => Ok(BillStatus::Accepted),
            "refused" => Ok(BillStatus::Refused),
            other => Err(BilledError::InvalidStatus(other.to_string())),
        }
    }
}

/// Expense-report line item as stored by the backend.
///
/// Field order matches the JSON document sent on update. `id` is only
/// present on records read back from the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "type", default)]
    pub bill_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub amount: i64,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub vat: String,
    #[serde(default)]
    pub pct: i64,
    #[serde(default)]
    pub commentary: String,
    #[serde(default)]
    pub file_url: String,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub status: BillStatus,
}

impl Bill {
    /// A record that only carries the uploaded receipt, as the backend holds
    /// it between the upload and the form submission.
    pub fn is_draft(&self) -> bool {
        self.name.is_empty() && self.date.is_empty() && !self.file_url.is_empty()
    }
}
