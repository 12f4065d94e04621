use async_trait::async_trait;
use edible_core::{BackendError, BackendResult, SettingsRepository};
use edible_shared::SubmissionSetting;
use sqlx::PgPool;

use crate::database::backend_error;

/// The `settings` table holds a single row.
pub struct StoreSettingsRepository {
    pool: PgPool,
}

impl StoreSettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsRepository for StoreSettingsRepository {
    async fn get_submission_setting(&self) -> BackendResult<SubmissionSetting> {
        let enabled: Option<bool> =
            sqlx::query_scalar("SELECT submit_enabled FROM settings ORDER BY id LIMIT 1")
                .fetch_one(&self.pool)
                .await
                .map_err(backend_error)?;

        Ok(SubmissionSetting {
            submit_enabled: enabled.unwrap_or(true),
        })
    }

    async fn set_submission_setting(&self, enabled: bool) -> BackendResult<()> {
        let result = sqlx::query(
            "UPDATE settings SET submit_enabled = $1 WHERE id = (SELECT id FROM settings ORDER BY id LIMIT 1)",
        )
        .bind(enabled)
        .execute(&self.pool)
        .await
        .map_err(backend_error)?;

        if result.rows_affected() == 0 {
            return Err(BackendError::Rejected("settings row missing".to_string()));
        }
        Ok(())
    }
}
