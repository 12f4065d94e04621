use async_trait::async_trait;
use edible_shared::{NewOrderRecord, PersistedOrder, Product, SubmissionSetting};

use crate::inventory::DecrementStatus;
use crate::BackendResult;

/// Product catalog and stock procedures owned by the hosted backend
#[async_trait]
pub trait CatalogBackend: Send + Sync {
    /// `get_sellable_products()`
    async fn list_sellable_products(&self) -> BackendResult<Vec<Product>>;

    /// `process_order_decrement(product, quantity)`. The backend answers with
    /// a status string; a transport failure is an `Err`, a refused decrement
    /// is an `Ok` carrying a failure status.
    async fn decrement_stock(
        &self,
        product_name: &str,
        quantity: u32,
    ) -> BackendResult<DecrementStatus>;
}

/// Order table access
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Inserts one order and returns the stored row with its assigned id.
    async fn insert_order(&self, record: &NewOrderRecord) -> BackendResult<PersistedOrder>;

    /// All orders, ascending by id.
    async fn list_orders(&self) -> BackendResult<Vec<PersistedOrder>>;
}

/// Remote config accessor for the global submission switch
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn get_submission_setting(&self) -> BackendResult<SubmissionSetting>;

    async fn set_submission_setting(&self, enabled: bool) -> BackendResult<()>;
}
