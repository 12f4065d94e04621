use async_trait::async_trait;
use edible_core::{BackendError, BackendResult, CatalogBackend, DecrementStatus};
use edible_shared::Product;
use sqlx::PgPool;

use crate::database::backend_error;

/// Calls the catalog's stored procedures on the hosted Postgres.
pub struct StoreCatalogRepository {
    pool: PgPool,
}

impl StoreCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    name: String,
    price: Option<i64>,
    effective_quantity_available: Option<i64>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            name: row.name,
            price: row.price,
            effective_quantity_available: row.effective_quantity_available.unwrap_or(0).max(0),
        }
    }
}

/// The decrement procedure takes an `int4`. A larger quantity is refused
/// rather than clamped, so it surfaces as a failed decrement for that line.
fn procedure_quantity(quantity: u32) -> BackendResult<i32> {
    i32::try_from(quantity).map_err(|_| {
        BackendError::Rejected(format!("quantity {} exceeds decrement limit", quantity))
    })
}

#[async_trait]
impl CatalogBackend for StoreCatalogRepository {
    async fn list_sellable_products(&self) -> BackendResult<Vec<Product>> {
        let rows: Vec<ProductRow> = sqlx::query_as(
            "SELECT name, price::BIGINT AS price, effective_quantity_available::BIGINT AS effective_quantity_available FROM get_sellable_products()",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(backend_error)?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn decrement_stock(
        &self,
        product_name: &str,
        quantity: u32,
    ) -> BackendResult<DecrementStatus> {
        let status: Option<String> =
            sqlx::query_scalar("SELECT process_order_decrement($1, $2)::TEXT")
                .bind(product_name)
                .bind(procedure_quantity(quantity)?)
                .fetch_one(&self.pool)
                .await
                .map_err(backend_error)?;

        Ok(DecrementStatus::new(status.unwrap_or_default()))
    }
}
