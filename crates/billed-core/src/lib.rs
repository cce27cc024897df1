//! Billed Core Library
//!
//! This crate provides the domain models, routes, receipt validation, display
//! helpers, error types and configuration shared by the Billed store, the
//! controllers and the command-line adapter.

pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod routes;
pub mod validation;

// Re-export commonly used types
pub use config::ClientConfig;
pub use display::{format_date, format_status, sort_by_date_desc};
pub use error::BilledError;
pub use models::{Bill, BillForm, BillStatus, ReceiptFile, Session, UserType};
pub use routes::Route;
pub use validation::{validate_receipt_extension, ALLOWED_RECEIPT_EXTENSIONS};
