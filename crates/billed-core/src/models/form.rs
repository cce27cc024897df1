use bytes::Bytes;

use super::bill::{Bill, BillStatus};

/// Percentage applied when the `pct` field is left empty.
pub const DEFAULT_PCT: i64 = 20;

/// Raw values of the new-bill form, keyed like the inputs' test hooks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BillForm {
    /// `expense-type`
    pub expense_type: String,
    /// `expense-name`
    pub expense_name: String,
    pub amount: String,
    /// `datepicker`
    pub date: String,
    pub vat: String,
    pub pct: String,
    pub commentary: String,
}

impl BillForm {
    /// Build the full record submitted on form validation. The status is
    /// always `pending`; `amount` and `pct` become integers.
    pub fn to_bill(&self, email: &str, file_url: &str, file_name: &str) -> Bill {
        Bill {
            id: None,
            email: email.to_string(),
            bill_type: self.expense_type.clone(),
            name: self.expense_name.clone(),
            amount: parse_int(&self.amount).unwrap_or(0),
            date: self.date.clone(),
            vat: self.vat.clone(),
            pct: parse_int(&self.pct)
                .filter(|pct| *pct != 0)
                .unwrap_or(DEFAULT_PCT),
            commentary: self.commentary.clone(),
            file_url: file_url.to_string(),
            file_name: file_name.to_string(),
            status: BillStatus::Pending,
        }
    }
}

/// Leading-integer parse: skips surrounding whitespace, accepts a sign and
/// stops at the first non-digit ("50.5" -> 50, "12abc" -> 12, "abc" -> None).
/// Values past the `i64` range clamp to its bounds.
pub fn parse_int(input: &str) -> Option<i64> {
    let trimmed = input.trim();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let digits = &digits[..end];
    let parsed = if negative {
        format!("-{}", digits).parse::<i64>()
    } else {
        digits.parse::<i64>()
    };
    match parsed {
        Ok(value) => Some(value),
        Err(_) => {
            let bound = if negative { i64::MIN } else { i64::MAX };
            tracing::warn!(input = %input, clamped = bound, "Integer out of range, clamping");
            Some(bound)
        }
    }
}

/// Receipt selected in the file input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl ReceiptFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Build a receipt guessing the content type from the file name.
    pub fn with_guessed_type(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        let name = name.into();
        let content_type = guess_content_type(&name).to_string();
        Self::new(name, content_type, bytes)
    }
}

fn guess_content_type(name: &str) -> &'static str {
    match name.rsplit('.').next().map(|ext| ext.to_ascii_lowercase()) {
        Some(ext) if ext == "jpg" || ext == "jpeg" => "image/jpeg",
        Some(ext) if ext == "png" => "image/png",
        Some(ext) if ext == "pdf" => "application/pdf",
        Some(ext) if ext == "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}
