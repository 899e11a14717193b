//! Persistence adapters for the car store.
//!
//! The store only talks to [`CarPersistence`]; the JSON file is one
//! implementation and can be replaced without touching handlers.

pub mod json_file_store;

use async_trait::async_trait;
use models::Car;

use crate::errors::ServiceError;

pub use json_file_store::JsonFileStorage;

/// Write-through persistence for the full car collection.
#[async_trait]
pub trait CarPersistence: Send + Sync {
    /// Read the persisted collection. Absent storage yields an empty list.
    async fn load(&self) -> Result<Vec<Car>, ServiceError>;
    /// Replace the persisted collection with `cars`.
    async fn save(&self, cars: &[Car]) -> Result<(), ServiceError>;
}
