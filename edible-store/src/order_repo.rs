use async_trait::async_trait;
use chrono::{DateTime, Utc};
use edible_core::{BackendError, BackendResult, OrderRepository};
use edible_shared::{decode_items, NewOrderRecord, PersistedOrder};
use sqlx::PgPool;

use crate::database::backend_error;

pub struct StoreOrderRepository {
    pool: PgPool,
}

impl StoreOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const ORDER_COLUMNS: &str = r#"id::BIGINT AS id, name, phone, "deliveryMethod" AS delivery_method, address, notes, items::TEXT AS items, total_price::BIGINT AS total_price, created_at::TIMESTAMPTZ AS created_at"#;

// Internal struct for type-safe querying
#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i64,
    name: Option<String>,
    phone: Option<String>,
    delivery_method: Option<String>,
    address: Option<String>,
    notes: Option<String>,
    items: Option<String>,
    total_price: Option<i64>,
    created_at: Option<DateTime<Utc>>,
}

impl TryFrom<OrderRow> for PersistedOrder {
    type Error = BackendError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        // The column may hold a JSON array or a JSON string wrapping one.
        let items = match row.items {
            Some(text) => decode_items(serde_json::from_str(&text)?)?,
            None => Vec::new(),
        };
        let delivery_method = row
            .delivery_method
            .as_deref()
            .unwrap_or("pickup")
            .parse()
            .map_err(|e: edible_shared::UnknownDeliveryMethod| BackendError::Decode(e.to_string()))?;

        Ok(PersistedOrder {
            id: row.id,
            name: row.name.unwrap_or_default(),
            phone: row.phone.unwrap_or_default(),
            delivery_method,
            address: row.address,
            notes: row.notes,
            items,
            total_price: row.total_price,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl OrderRepository for StoreOrderRepository {
    async fn insert_order(&self, record: &NewOrderRecord) -> BackendResult<PersistedOrder> {
        let sql = format!(
            r#"
            INSERT INTO orders (name, phone, "deliveryMethod", address, notes, items, total_price)
            VALUES ($1, $2, $3, $4, $5, $6::JSONB, $7)
            RETURNING {ORDER_COLUMNS}
            "#
        );

        let row: OrderRow = sqlx::query_as(&sql)
            .bind(&record.name)
            .bind(&record.phone)
            .bind(record.delivery_method.as_str())
            .bind(&record.address)
            .bind(&record.notes)
            .bind(&record.items)
            .bind(record.total_price)
            .fetch_one(&self.pool)
            .await
            .map_err(backend_error)?;

        tracing::debug!("Inserted order {}", row.id);
        row.try_into()
    }

    async fn list_orders(&self) -> BackendResult<Vec<PersistedOrder>> {
        let sql = format!("SELECT {ORDER_COLUMNS} FROM orders ORDER BY id ASC");

        let rows: Vec<OrderRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(backend_error)?;

        rows.into_iter().map(PersistedOrder::try_from).collect()
    }
}
