use std::sync::Arc;

use axum::Router;
use configs::AppConfig;
use service::{CarStore, JsonFileStorage};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Read `config.toml` (or `CONFIG_PATH`); any problem is an invalid configuration.
pub fn load_config() -> Result<AppConfig, StartupError> {
    load_config_from(&configs::config_path())
}

pub fn load_config_from(path: &str) -> Result<AppConfig, StartupError> {
    AppConfig::load_and_validate_from(path).map_err(|e| StartupError::InvalidConfig(format!("{path}: {e}")))
}

/// Open the backing file and load the store. Any load failure is fatal.
pub async fn build_store(cfg: &AppConfig) -> Result<Arc<CarStore>, StartupError> {
    let storage = JsonFileStorage::new(&cfg.storage.data_file).await?;
    let store = CarStore::open(Arc::new(storage)).await?;
    Ok(store)
}

/// Router over a ready store; used by `run` and by the integration tests.
pub fn build_app(store: Arc<CarStore>) -> Router {
    routes::build_router(store, build_cors())
}

/// Public entry: load state, bind the configured address and serve until the task is dropped.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let store = build_store(&cfg).await?;
    let app = build_app(store);

    let addr = cfg.server.bind_addr();
    let listener = TcpListener::bind(&addr).await.map_err(StartupError::Bind)?;
    info!(%addr, data_file = %cfg.storage.data_file, "car registry listening");
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tmp_file(ext: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("cars_startup_{}.{ext}", uuid::Uuid::new_v4()));
        std::fs::write(&path, content).expect("write temp file");
        path
    }

    #[test]
    fn bad_config_is_invalid_config_error() {
        let path = tmp_file("toml", "[server]\nport = 0\n");
        let err = load_config_from(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, StartupError::InvalidConfig(_)));
        assert!(err.to_string().starts_with("invalid configuration: "));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn unparseable_config_is_invalid_config_error() {
        let path = tmp_file("toml", "[server\nport = ");
        assert!(matches!(load_config_from(path.to_str().unwrap()), Err(StartupError::InvalidConfig(_))));
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn corrupt_data_file_is_storage_error() {
        let path = tmp_file("json", "[{ not cars");
        let mut cfg = AppConfig::default();
        cfg.storage.data_file = path.to_string_lossy().into_owned();
        assert!(matches!(build_store(&cfg).await, Err(StartupError::Storage(_))));
        let _ = std::fs::remove_file(&path);
    }
}
