use std::{io::ErrorKind, path::{Path, PathBuf}};

use async_trait::async_trait;
use models::Car;
use tokio::fs;
use tracing::{debug, info};

use super::CarPersistence;
use crate::errors::ServiceError;

/// Backing file holding the whole collection as one JSON array.
///
/// Every save rewrites the file from scratch; there is no journal and no
/// atomic rename.
#[derive(Clone, Debug)]
pub struct JsonFileStorage {
    file_path: PathBuf,
}

impl JsonFileStorage {
    /// Point the adapter at `path`, creating its parent directory if needed.
    /// The file itself is only written by the first save.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Self, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(ServiceError::storage)?;
        }
        Ok(Self { file_path })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

#[async_trait]
impl CarPersistence for JsonFileStorage {
    async fn load(&self) -> Result<Vec<Car>, ServiceError> {
        let bytes = match fs::read(&self.file_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %self.file_path.display(), "data file missing; starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(ServiceError::storage(e)),
        };
        // `null` is what an encoder writes for a collection that was never filled
        let cars: Option<Vec<Car>> =
            serde_json::from_slice(&bytes).map_err(|e| ServiceError::Corrupt(e.to_string()))?;
        let cars = cars.unwrap_or_default();
        info!(path = %self.file_path.display(), count = cars.len(), "loaded cars");
        Ok(cars)
    }

    async fn save(&self, cars: &[Car]) -> Result<(), ServiceError> {
        let mut data = serde_json::to_vec(cars).map_err(ServiceError::storage)?;
        data.push(b'\n');
        fs::write(&self.file_path, data).await.map_err(ServiceError::storage)?;
        debug!(path = %self.file_path.display(), count = cars.len(), "saved cars");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn tmp_path() -> PathBuf {
        std::env::temp_dir().join(format!("car_store_{}", Uuid::new_v4())).join("cars.json")
    }

    fn car(id: u64, brand: &str) -> Car {
        Car { id, brand: brand.into(), model: "M".into(), mileage: 1.5, owners_count: 2 }
    }

    #[tokio::test]
    async fn missing_file_loads_empty_without_creating_it() -> Result<(), anyhow::Error> {
        let path = tmp_path();
        let storage = JsonFileStorage::new(&path).await?;
        assert!(storage.load().await?.is_empty());
        assert!(!path.exists());
        Ok(())
    }

    #[tokio::test]
    async fn save_then_load_round_trips() -> Result<(), anyhow::Error> {
        let path = tmp_path();
        let storage = JsonFileStorage::new(&path).await?;
        assert_eq!(storage.path(), path.as_path());
        let cars = vec![car(3, "Lada"), car(1, "Volvo")];
        storage.save(&cars).await?;

        let reloaded = JsonFileStorage::new(&path).await?.load().await?;
        assert_eq!(reloaded, cars);

        let raw = tokio::fs::read_to_string(&path).await?;
        assert!(raw.starts_with('['));
        assert!(raw.ends_with('\n'));
        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn null_file_is_empty_collection() -> Result<(), anyhow::Error> {
        let path = tmp_path();
        let storage = JsonFileStorage::new(&path).await?;
        tokio::fs::write(&path, b"null\n").await?;
        assert!(storage.load().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn corrupt_or_empty_file_is_an_error() -> Result<(), anyhow::Error> {
        let path = tmp_path();
        let storage = JsonFileStorage::new(&path).await?;

        tokio::fs::write(&path, b"{ broken").await?;
        assert!(matches!(storage.load().await, Err(ServiceError::Corrupt(_))));

        tokio::fs::write(&path, b"").await?;
        assert!(matches!(storage.load().await, Err(ServiceError::Corrupt(_))));
        Ok(())
    }

    #[tokio::test]
    async fn save_into_missing_directory_fails() -> Result<(), anyhow::Error> {
        let dir = std::env::temp_dir().join(format!("car_store_{}", Uuid::new_v4()));
        let storage = JsonFileStorage::new(dir.join("cars.json")).await?;
        tokio::fs::remove_dir_all(&dir).await?;
        assert!(matches!(storage.save(&[car(1, "Kia")]).await, Err(ServiceError::Storage(_))));
        Ok(())
    }
}
