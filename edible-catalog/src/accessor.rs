use std::sync::Arc;

use edible_core::{BackendError, CatalogBackend};
use edible_shared::Product;
use tracing::{debug, warn};

use crate::inventory::CatalogSnapshot;

#[derive(Debug, thiserror::Error)]
#[error("Could not load products: {0}")]
pub struct FetchError(#[from] pub BackendError);

/// Product Catalog Accessor. Holds the latest snapshot; the last successful
/// or failed fetch always wins.
pub struct ProductCatalog {
    backend: Arc<dyn CatalogBackend>,
    snapshot: CatalogSnapshot,
}

impl ProductCatalog {
    pub fn new(backend: Arc<dyn CatalogBackend>) -> Self {
        Self {
            backend,
            snapshot: CatalogSnapshot::empty(),
        }
    }

    /// Plain read of the sellable product list. No side effects.
    pub async fn fetch_products(&self) -> Result<Vec<Product>, FetchError> {
        let products = self.backend.list_sellable_products().await?;
        debug!("Fetched {} sellable products", products.len());
        Ok(products)
    }

    /// Re-fetches and swaps the snapshot. On failure the snapshot becomes
    /// empty so selection is unusable, and the error is handed back for the
    /// caller to surface.
    pub async fn refresh(&mut self) -> Result<&CatalogSnapshot, FetchError> {
        match self.fetch_products().await {
            Ok(products) => {
                self.snapshot = CatalogSnapshot::new(products);
                Ok(&self.snapshot)
            }
            Err(e) => {
                warn!("Catalog fetch failed, continuing with empty catalog: {}", e);
                self.snapshot = CatalogSnapshot::empty();
                Err(e)
            }
        }
    }

    pub fn snapshot(&self) -> &CatalogSnapshot {
        &self.snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use edible_core::{BackendResult, DecrementStatus};
    use std::sync::atomic::{AtomicBool, Ordering};

    struct StubBackend {
        products: Vec<Product>,
        down: AtomicBool,
    }

    #[async_trait]
    impl CatalogBackend for StubBackend {
        async fn list_sellable_products(&self) -> BackendResult<Vec<Product>> {
            if self.down.load(Ordering::SeqCst) {
                return Err(BackendError::Transport("connection refused".into()));
            }
            Ok(self.products.clone())
        }

        async fn decrement_stock(&self, _: &str, _: u32) -> BackendResult<DecrementStatus> {
            Ok(DecrementStatus::new("success"))
        }
    }

    fn stub() -> Arc<StubBackend> {
        Arc::new(StubBackend {
            products: vec![
                Product::new("Cow Leg", None, 4),
                Product::new("Half slot Beef", Some(3750), 12),
            ],
            down: AtomicBool::new(false),
        })
    }

    #[tokio::test]
    async fn test_fetch_is_idempotent() {
        let catalog = ProductCatalog::new(stub());
        let first = catalog.fetch_products().await.unwrap();
        let second = catalog.fetch_products().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_failed_refresh_leaves_empty_catalog() {
        let backend = stub();
        let mut catalog = ProductCatalog::new(backend.clone());

        catalog.refresh().await.unwrap();
        assert_eq!(catalog.snapshot().products().len(), 2);

        backend.down.store(true, Ordering::SeqCst);
        assert!(catalog.refresh().await.is_err());
        assert!(catalog.snapshot().is_empty());
    }
}
