//! Validation modules

pub mod receipt;

pub use receipt::{validate_receipt_extension, ALLOWED_RECEIPT_EXTENSIONS};
