//! Data models for the client
//!
//! Each sub-module represents one feature area: stored bills, the signed-in
//! session and the raw inputs of the new-bill form.

mod bill;
mod form;
mod session;

pub use bill::*;
pub use form::*;
pub use session::*;
