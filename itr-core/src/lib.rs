pub mod aggregation;
pub mod calculations;
pub mod db;
pub mod forms;
pub mod input;
pub mod models;

pub use aggregation::{AggregationReader, IncomeSnapshot};
pub use db::store::{KeyValueStore, StoreError};
pub use models::*;
