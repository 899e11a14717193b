//! Service layer: the car record store and its persistence adapters.
//! - `cars` owns the in-memory collection and the id allocator.
//! - `storage` writes the collection through to durable storage.

pub mod errors;
pub mod cars;
pub mod storage;

pub use cars::{CarStore, UpdateOutcome};
pub use storage::{CarPersistence, JsonFileStorage};
