//! Bill list and new-bill controllers.
//!
//! Controllers take typed inputs (receipt metadata, form values, icon data)
//! and return an [`Intent`]. An [`Adapter`] owned by the surrounding UI
//! applies intents: navigation, receipt preview, alerts and rendering.

pub mod bills;
pub mod intent;
pub mod new_bill;

#[cfg(test)]
mod test_support;

pub use bills::{BillRow, BillsController, EyeIcon};
pub use intent::{Adapter, Intent};
pub use new_bill::{DraftState, NewBillController};
