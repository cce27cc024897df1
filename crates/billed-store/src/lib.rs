//! Remote bill store for the Billed client.
//!
//! Controllers only see the [`BillStore`] trait: `list`, `create` and
//! `update` against the bill collection. Two backends implement it:
//! [`HttpBillStore`] talks to the REST backend and [`MemoryBillStore`] keeps
//! everything in process.

pub mod http;
pub mod memory;
pub mod traits;

pub use http::HttpBillStore;
pub use memory::MemoryBillStore;
pub use traits::{
    BillStore, CreatePayload, RequestHeaders, StoreError, StoreResult, UpdatePayload, UploadForm,
    UploadResponse,
};
