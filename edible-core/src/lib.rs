pub mod identity;
pub mod inventory;
pub mod repository;

pub use identity::AdminCredentials;
pub use inventory::DecrementStatus;
pub use repository::{CatalogBackend, OrderRepository, SettingsRepository};

/// Failure talking to the hosted backend.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Backend unreachable: {0}")]
    Transport(String),
    #[error("Backend rejected request: {0}")]
    Rejected(String),
    #[error("Unexpected backend payload: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for BackendError {
    fn from(err: serde_json::Error) -> Self {
        BackendError::Decode(err.to_string())
    }
}

pub type BackendResult<T> = Result<T, BackendError>;
