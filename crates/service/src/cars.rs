//! The car record store.
//!
//! `CarStore` owns the collection and the id allocator behind one mutex.
//! Every operation, reads included, holds the guard for its whole duration,
//! persistence call included, so writes to the backing file never interleave.

use std::sync::Arc;

use models::{Car, CarId, CarInput};
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::errors::ServiceError;
use crate::storage::CarPersistence;

const FIRST_ID: CarId = 1;

/// Result of an update: complete payloads echo the stored record back.
#[derive(Clone, Debug, PartialEq)]
pub enum UpdateOutcome {
    Full(Car),
    Partial,
}

/// In-memory state guarded by the store's lock.
#[derive(Debug)]
struct CarCollection {
    cars: Vec<Car>,
    next_id: CarId,
}

impl CarCollection {
    fn from_loaded(cars: Vec<Car>) -> Result<Self, ServiceError> {
        let next_id = match cars.iter().map(|c| c.id).max() {
            None => FIRST_ID,
            Some(max) => max
                .checked_add(1)
                .ok_or_else(|| ServiceError::Corrupt(format!("id {max} leaves no ids to assign")))?,
        };
        Ok(Self { cars, next_id })
    }

    fn position(&self, id: CarId) -> Result<usize, ServiceError> {
        self.cars.iter().position(|c| c.id == id).ok_or(ServiceError::NotFound(id))
    }
}

pub struct CarStore {
    inner: Mutex<CarCollection>,
    persistence: Arc<dyn CarPersistence>,
}

impl CarStore {
    /// Load the persisted collection once and build the store around it.
    pub async fn open(persistence: Arc<dyn CarPersistence>) -> Result<Arc<Self>, ServiceError> {
        let collection = CarCollection::from_loaded(persistence.load().await?)?;
        info!(count = collection.cars.len(), next_id = collection.next_id, "car store ready");
        Ok(Arc::new(Self { inner: Mutex::new(collection), persistence }))
    }

    /// Snapshot of all cars in insertion order.
    pub async fn list(&self) -> Vec<Car> {
        self.inner.lock().await.cars.clone()
    }

    pub async fn get(&self, id: CarId) -> Result<Car, ServiceError> {
        let state = self.inner.lock().await;
        let idx = state.position(id)?;
        Ok(state.cars[idx].clone())
    }

    /// Append a car under the next id. A failed save leaves the car in memory.
    pub async fn create(&self, input: CarInput) -> Result<Car, ServiceError> {
        let mut state = self.inner.lock().await;
        // the id after this one must exist too, so u64::MAX is never handed out
        let next_id = state.next_id.checked_add(1).ok_or(ServiceError::IdsExhausted)?;
        let car = input.into_car(state.next_id);
        state.next_id = next_id;
        state.cars.push(car.clone());
        self.persist(&state.cars).await?;
        info!(id = car.id, "car created");
        Ok(car)
    }

    /// Overwrite every field of car `id` with the payload.
    pub async fn update(&self, id: CarId, input: CarInput) -> Result<UpdateOutcome, ServiceError> {
        let mut state = self.inner.lock().await;
        let idx = state.position(id)?;
        let complete = input.is_complete();
        state.cars[idx] = input.into_car(id);
        self.persist(&state.cars).await?;
        info!(id, complete, "car updated");
        if complete {
            Ok(UpdateOutcome::Full(state.cars[idx].clone()))
        } else {
            Ok(UpdateOutcome::Partial)
        }
    }

    pub async fn delete(&self, id: CarId) -> Result<(), ServiceError> {
        let mut state = self.inner.lock().await;
        let idx = state.position(id)?;
        state.cars.remove(idx);
        self.persist(&state.cars).await?;
        info!(id, "car deleted");
        Ok(())
    }

    /// Drop every car and restart ids at 1.
    pub async fn clear(&self) -> Result<(), ServiceError> {
        let mut state = self.inner.lock().await;
        state.cars.clear();
        state.next_id = FIRST_ID;
        self.persist(&state.cars).await?;
        info!("all cars deleted");
        Ok(())
    }

    async fn persist(&self, cars: &[Car]) -> Result<(), ServiceError> {
        self.persistence.save(cars).await.map_err(|e| {
            // memory keeps the mutation; disk may now lag behind
            error!(error = %e, count = cars.len(), "failed to persist cars");
            e
        })
    }
}
