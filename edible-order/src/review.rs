use std::sync::Arc;

use edible_core::{BackendError, OrderRepository, SettingsRepository};
use edible_shared::PersistedOrder;
use tracing::{error, info, warn};

use crate::notice::Notice;
use crate::report::{compute_grand_total, export_report, OrderReport};

#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    #[error("Could not load orders: {0}")]
    Fetch(#[source] BackendError),
    #[error("Could not read submission setting: {0}")]
    Setting(#[source] BackendError),
    #[error("Could not update submission setting: {0}")]
    Toggle(#[source] BackendError),
}

/// Admin view over persisted orders and the submission switch.
pub struct AdminDashboard {
    orders_repo: Arc<dyn OrderRepository>,
    settings: Arc<dyn SettingsRepository>,
    orders: Vec<PersistedOrder>,
    submit_enabled: bool,
    notices: Vec<Notice>,
}

impl AdminDashboard {
    pub fn new(orders_repo: Arc<dyn OrderRepository>, settings: Arc<dyn SettingsRepository>) -> Self {
        Self {
            orders_repo,
            settings,
            orders: Vec::new(),
            submit_enabled: true,
            notices: Vec::new(),
        }
    }

    /// Loads orders and the switch; failures become notices.
    pub async fn load(&mut self) {
        let _ = self.fetch_orders().await;
        let _ = self.fetch_submit_setting().await;
    }

    /// Replaces the order list. On failure the previous list stays shown.
    pub async fn fetch_orders(&mut self) -> Result<&[PersistedOrder], ReviewError> {
        match self.orders_repo.list_orders().await {
            Ok(mut orders) => {
                orders.sort_by_key(|order| order.id);
                info!("Loaded {} orders", orders.len());
                self.orders = orders;
                Ok(&self.orders)
            }
            Err(e) => {
                error!("Error fetching orders: {}", e);
                let err = ReviewError::Fetch(e);
                self.notices.push(Notice::error(err.to_string()));
                Err(err)
            }
        }
    }

    pub async fn fetch_submit_setting(&mut self) -> Result<bool, ReviewError> {
        match self.settings.get_submission_setting().await {
            Ok(setting) => {
                self.submit_enabled = setting.submit_enabled;
                Ok(self.submit_enabled)
            }
            Err(e) => {
                warn!("Error fetching submission setting: {}", e);
                let err = ReviewError::Setting(e);
                self.notices.push(Notice::warning(err.to_string()));
                Err(err)
            }
        }
    }

    /// Flips the switch optimistically, then persists it. If the write
    /// fails the local value is reconciled with what the backend actually
    /// holds, falling back to the previous value when that read fails too.
    pub async fn toggle_submissions(&mut self) -> Result<bool, ReviewError> {
        let previous = self.submit_enabled;
        let target = !previous;
        self.submit_enabled = target;

        match self.settings.set_submission_setting(target).await {
            Ok(()) => {
                info!("Submissions {}", if target { "enabled" } else { "disabled" });
                Ok(target)
            }
            Err(e) => {
                error!("Error updating submission setting: {}", e);
                self.submit_enabled = match self.settings.get_submission_setting().await {
                    Ok(setting) => setting.submit_enabled,
                    Err(_) => previous,
                };
                let err = ReviewError::Toggle(e);
                self.notices.push(Notice::error(err.to_string()));
                Err(err)
            }
        }
    }

    pub fn orders(&self) -> &[PersistedOrder] {
        &self.orders
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    pub fn grand_total(&self) -> i64 {
        compute_grand_total(&self.orders)
    }

    pub fn export_report(&self) -> OrderReport {
        export_report(&self.orders)
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}
