//! Bulk entry of schedule line items from CSV.

mod loader;

pub use loader::{LineItemLoader, LineItemLoaderError, LineItemRecord, LoadSummary};
