use models::CarId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("car {0} not found")]
    NotFound(CarId),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("corrupt data file: {0}")]
    Corrupt(String),
    #[error("no car ids left to assign")]
    IdsExhausted,
}

impl ServiceError {
    pub fn storage(e: impl std::fmt::Display) -> Self { Self::Storage(e.to_string()) }
}
