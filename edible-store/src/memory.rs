use std::collections::{HashSet, VecDeque};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use edible_core::{
    BackendError, BackendResult, CatalogBackend, DecrementStatus, OrderRepository,
    SettingsRepository,
};
use edible_shared::{decode_items, NewOrderRecord, PersistedOrder, Product, SubmissionSetting};
use tracing::debug;

/// Most recent calls kept per log; older entries are dropped.
pub const CALL_LOG_LIMIT: usize = 256;

/// In-process stand-in for the hosted backend.
///
/// Mirrors the stored procedures closely enough for local runs and tests:
/// decrements refuse to go below zero, orders get sequential ids, items are
/// kept encoded as the backend keeps them. Recent calls are recorded and
/// each operation can be made to fail.
#[derive(Default)]
pub struct MemoryBackend {
    state: Mutex<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    products: Vec<Product>,
    orders: Vec<StoredOrder>,
    inserted: VecDeque<NewOrderRecord>,
    decrements: VecDeque<(String, u32)>,
    submit_enabled: Option<bool>,
    failures: Failures,
}

#[derive(Default)]
struct Failures {
    catalog_reads: bool,
    inserts: bool,
    order_reads: bool,
    setting_reads: bool,
    setting_writes: bool,
    decrements: HashSet<String>,
}

struct StoredOrder {
    id: i64,
    record: NewOrderRecord,
    created_at: chrono::DateTime<Utc>,
}

fn record<T>(log: &mut VecDeque<T>, entry: T) {
    if log.len() == CALL_LOG_LIMIT {
        log.pop_front();
    }
    log.push_back(entry);
}

impl StoredOrder {
    fn to_persisted(&self) -> BackendResult<PersistedOrder> {
        let record = &self.record;
        Ok(PersistedOrder {
            id: self.id,
            name: record.name.clone(),
            phone: record.phone.clone(),
            delivery_method: record.delivery_method,
            address: Some(record.address.clone()),
            notes: Some(record.notes.clone()),
            items: decode_items(serde_json::Value::String(record.items.clone()))?,
            total_price: Some(record.total_price),
            created_at: Some(self.created_at),
        })
    }
}

impl MemoryBackend {
    pub fn with_products(products: Vec<Product>) -> Self {
        let backend = Self::default();
        backend.lock().products = products;
        backend
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn set_available(&self, product_name: &str, available: i64) {
        let mut state = self.lock();
        if let Some(product) = state.products.iter_mut().find(|p| p.name == product_name) {
            product.effective_quantity_available = available;
        }
    }

    pub fn set_submit_enabled(&self, enabled: bool) {
        self.lock().submit_enabled = Some(enabled);
    }

    pub fn submit_enabled(&self) -> bool {
        self.lock().submit_enabled.unwrap_or(true)
    }

    pub fn fail_catalog_reads(&self, fail: bool) {
        self.lock().failures.catalog_reads = fail;
    }

    pub fn fail_inserts(&self, fail: bool) {
        self.lock().failures.inserts = fail;
    }

    pub fn fail_order_reads(&self, fail: bool) {
        self.lock().failures.order_reads = fail;
    }

    pub fn fail_setting_reads(&self, fail: bool) {
        self.lock().failures.setting_reads = fail;
    }

    pub fn fail_setting_writes(&self, fail: bool) {
        self.lock().failures.setting_writes = fail;
    }

    /// Makes every decrement for `product_name` fail at the transport level.
    pub fn fail_decrement_for(&self, product_name: &str) {
        self.lock().failures.decrements.insert(product_name.to_string());
    }

    /// Recent records passed to `insert_order`, including rejected ones.
    pub fn inserted_orders(&self) -> Vec<NewOrderRecord> {
        self.lock().inserted.iter().cloned().collect()
    }

    /// `(product, quantity)` for recent decrement calls, in call order
    pub fn decrement_calls(&self) -> Vec<(String, u32)> {
        self.lock().decrements.iter().cloned().collect()
    }
}

#[async_trait]
impl CatalogBackend for MemoryBackend {
    async fn list_sellable_products(&self) -> BackendResult<Vec<Product>> {
        let state = self.lock();
        if state.failures.catalog_reads {
            return Err(BackendError::Transport("catalog unavailable".to_string()));
        }
        Ok(state.products.clone())
    }

    async fn decrement_stock(
        &self,
        product_name: &str,
        quantity: u32,
    ) -> BackendResult<DecrementStatus> {
        let mut state = self.lock();
        record(&mut state.decrements, (product_name.to_string(), quantity));

        if state.failures.decrements.contains(product_name) {
            return Err(BackendError::Transport(format!(
                "decrement for {} timed out",
                product_name
            )));
        }

        let Some(product) = state.products.iter_mut().find(|p| p.name == product_name) else {
            return Ok(DecrementStatus::new(format!("ERROR: product {} not found", product_name)));
        };

        if !product.has_stock_for(quantity) {
            return Ok(DecrementStatus::new(format!(
                "ERROR: insufficient stock for {}",
                product_name
            )));
        }

        product.effective_quantity_available -= i64::from(quantity);
        debug!(
            "Stock for {} now {}",
            product_name, product.effective_quantity_available
        );
        Ok(DecrementStatus::new("SUCCESS"))
    }
}

#[async_trait]
impl OrderRepository for MemoryBackend {
    async fn insert_order(&self, new_order: &NewOrderRecord) -> BackendResult<PersistedOrder> {
        let mut state = self.lock();
        record(&mut state.inserted, new_order.clone());

        if state.failures.inserts {
            return Err(BackendError::Rejected("insert rejected".to_string()));
        }

        let id = state.orders.last().map(|o| o.id + 1).unwrap_or(1);
        let stored = StoredOrder {
            id,
            record: new_order.clone(),
            created_at: Utc::now(),
        };
        let persisted = stored.to_persisted()?;
        state.orders.push(stored);
        Ok(persisted)
    }

    async fn list_orders(&self) -> BackendResult<Vec<PersistedOrder>> {
        let state = self.lock();
        if state.failures.order_reads {
            return Err(BackendError::Transport("orders unavailable".to_string()));
        }
        state.orders.iter().map(StoredOrder::to_persisted).collect()
    }
}

#[async_trait]
impl SettingsRepository for MemoryBackend {
    async fn get_submission_setting(&self) -> BackendResult<SubmissionSetting> {
        let state = self.lock();
        if state.failures.setting_reads {
            return Err(BackendError::Transport("settings unavailable".to_string()));
        }
        Ok(SubmissionSetting {
            submit_enabled: state.submit_enabled.unwrap_or(true),
        })
    }

    async fn set_submission_setting(&self, enabled: bool) -> BackendResult<()> {
        let mut state = self.lock();
        if state.failures.setting_writes {
            return Err(BackendError::Rejected("settings update rejected".to_string()));
        }
        state.submit_enabled = Some(enabled);
        Ok(())
    }
}
