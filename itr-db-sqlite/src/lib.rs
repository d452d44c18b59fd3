//! SQLite backend for the shared key-value store.

pub mod factory;
pub mod repository;

pub use factory::SqliteStoreFactory;
pub use repository::SqliteStore;
