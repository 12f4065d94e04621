use edible_core::BackendError;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::time::Duration;
use tracing::info;

#[derive(Clone)]
pub struct DbClient {
    pub pool: Pool<Postgres>,
}

impl DbClient {
    pub async fn new(connection_string: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(connection_string)
            .await?;

        info!("Connected to backend database");
        Ok(Self { pool })
    }
}

/// Maps driver errors onto the backend taxonomy: the database refusing a
/// statement is a rejection, a value we cannot read is a decode failure,
/// everything else is transport.
pub(crate) fn backend_error(err: sqlx::Error) -> BackendError {
    match err {
        sqlx::Error::Database(db) => BackendError::Rejected(db.to_string()),
        sqlx::Error::RowNotFound => BackendError::Rejected("no matching row".to_string()),
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) | sqlx::Error::ColumnNotFound(_) => {
            BackendError::Decode(err.to_string())
        }
        other => BackendError::Transport(other.to_string()),
    }
}
