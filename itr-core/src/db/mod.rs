pub mod factory;
pub mod keys;
pub mod memory;
pub mod store;

pub use factory::{StoreConfig, StoreFactory, StoreRegistry};
pub use memory::{MemoryStore, MemoryStoreFactory};
pub use store::{KeyValueStore, StoreError};
