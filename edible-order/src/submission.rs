use std::fmt;
use std::sync::Arc;

use edible_catalog::{CatalogSnapshot, InventoryError, ProductCatalog};
use edible_core::{BackendError, CatalogBackend, OrderRepository};
use edible_shared::{Masked, NewOrderRecord, OrderLineItem};
use serde::Serialize;
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::confirmation::{Confirmation, VendorDetails};
use crate::models::OrderDraft;
use crate::notice::Notice;

/// Where a submission is, or where it stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionState {
    Idle,
    Validating,
    CheckingStock,
    Persisting,
    DecrementingInventory,
    RefreshingCatalog,
    Done,
    Failed,
    PartialFailure,
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Why the submit action never entered the workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GateRejection {
    #[error("Order submissions are currently closed")]
    SubmissionsDisabled,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing product selection")]
    MissingProductSelection { line: usize },
    #[error("missing customer name")]
    MissingName,
    #[error("missing phone number")]
    MissingPhone,
    #[error("missing delivery address")]
    MissingAddress,
}

/// Advisory stock check failed against the in-memory snapshot.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Not enough stock for {product}")]
pub struct StockError {
    pub product: String,
    #[source]
    pub cause: InventoryError,
}

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("Could not encode line items: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("Order could not be saved: {0}")]
    Backend(#[from] BackendError),
}

/// A single decrement that did not apply after the order was saved.
/// Collected per item; never aborts the loop and never undoes the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("Inventory not updated for {product} x{quantity}: {reason}")]
pub struct InventoryDecrementError {
    pub product: String,
    pub quantity: u32,
    pub reason: String,
}

impl InventoryDecrementError {
    pub fn notice(&self) -> Notice {
        Notice::critical(format!(
            "Order saved but inventory not updated for {}. Please contact support.",
            self.product
        ))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Rejected(#[from] GateRejection),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Stock(#[from] StockError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl SubmissionError {
    /// Rejections happen before the state machine starts.
    pub fn state(&self) -> SubmissionState {
        match self {
            SubmissionError::Rejected(_) => SubmissionState::Idle,
            _ => SubmissionState::Failed,
        }
    }
}

// ============================================================================
// Outcome
// ============================================================================

/// Result of a submission that saved an order.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionOutcome {
    /// `Done`, or `PartialFailure` when any decrement did not apply
    pub state: SubmissionState,
    pub confirmation: Confirmation,
    pub inventory_failures: Vec<InventoryDecrementError>,
    pub notices: Vec<Notice>,
}

impl SubmissionOutcome {
    pub fn is_partial_failure(&self) -> bool {
        self.state == SubmissionState::PartialFailure
    }
}

// ============================================================================
// Workflow
// ============================================================================

/// Validates, re-checks stock, saves the order, then decrements stock item
/// by item.
///
/// The decrement loop is best effort. The backend gives no transaction
/// spanning the insert and the decrements, so a saved order is never
/// rolled back because inventory failed to update; each failure is
/// reported for a human to reconcile.
pub struct SubmissionWorkflow {
    stock: Arc<dyn CatalogBackend>,
    orders: Arc<dyn OrderRepository>,
    vendor: VendorDetails,
}

impl SubmissionWorkflow {
    pub fn new(
        stock: Arc<dyn CatalogBackend>,
        orders: Arc<dyn OrderRepository>,
        vendor: VendorDetails,
    ) -> Self {
        Self { stock, orders, vendor }
    }

    /// Runs the workflow. On success `draft` is replaced with a fresh one;
    /// on failure it is left untouched for the customer to correct.
    pub async fn submit(
        &self,
        draft: &mut OrderDraft,
        catalog: &mut ProductCatalog,
    ) -> Result<SubmissionOutcome, SubmissionError> {
        let span = info_span!("order_submission", submission_id = %Uuid::new_v4());
        self.run(draft, catalog).instrument(span).await
    }

    async fn run(
        &self,
        draft: &mut OrderDraft,
        catalog: &mut ProductCatalog,
    ) -> Result<SubmissionOutcome, SubmissionError> {
        let mut state = SubmissionState::Idle;

        advance(&mut state, SubmissionState::Validating);
        if let Err(e) = validate(draft) {
            advance(&mut state, SubmissionState::Failed);
            return Err(e.into());
        }

        advance(&mut state, SubmissionState::CheckingStock);
        if let Err(e) = check_stock(draft.items(), catalog.snapshot()) {
            warn!("Stock pre-check failed for {}", e.product);
            advance(&mut state, SubmissionState::Failed);
            return Err(e.into());
        }

        advance(&mut state, SubmissionState::Persisting);
        let total_price = draft.compute_total();
        let order_id = match self.persist(draft, total_price).await {
            Ok(id) => id,
            Err(e) => {
                error!("Order insert failed: {}", e);
                advance(&mut state, SubmissionState::Failed);
                return Err(e.into());
            }
        };
        info!(
            order_id,
            total_price,
            phone = %Masked(&draft.phone),
            "Order saved"
        );

        advance(&mut state, SubmissionState::DecrementingInventory);
        let inventory_failures = self.decrement_all(draft.items()).await;
        let mut notices: Vec<Notice> = inventory_failures
            .iter()
            .map(InventoryDecrementError::notice)
            .collect();
        let outcome_state = if inventory_failures.is_empty() {
            SubmissionState::Done
        } else {
            SubmissionState::PartialFailure
        };

        // Runs whatever happened above so the UI shows the new stock levels.
        advance(&mut state, SubmissionState::RefreshingCatalog);
        if let Err(e) = catalog.refresh().await {
            notices.push(Notice::warning(format!("Product list could not be refreshed: {}", e)));
        }

        let confirmation = Confirmation::new(order_id, draft, total_price, &self.vendor);
        *draft = OrderDraft::new();
        advance(&mut state, outcome_state);

        if outcome_state == SubmissionState::Done {
            notices.insert(0, Notice::info(format!("Order {} received", confirmation.reference)));
        }

        Ok(SubmissionOutcome {
            state: outcome_state,
            confirmation,
            inventory_failures,
            notices,
        })
    }

    async fn persist(&self, draft: &OrderDraft, total_price: i64) -> Result<i64, PersistenceError> {
        let record = NewOrderRecord {
            name: draft.name.clone(),
            phone: draft.phone.clone(),
            delivery_method: draft.delivery_method,
            address: draft.address.clone(),
            notes: draft.notes.clone(),
            items: NewOrderRecord::encode_items(draft.items())?,
            total_price,
        };
        let stored = self.orders.insert_order(&record).await?;
        Ok(stored.id)
    }

    /// One decrement per line item, strictly in order. A failure is recorded
    /// and the loop moves on to the next item.
    async fn decrement_all(&self, items: &[OrderLineItem]) -> Vec<InventoryDecrementError> {
        let mut failures = Vec::new();

        for item in items {
            let reason = match self.stock.decrement_stock(&item.product, item.quantity).await {
                Ok(status) if status.is_success() => {
                    debug!("Decremented {} x{}", item.product, item.quantity);
                    continue;
                }
                Ok(status) => status.as_str().to_string(),
                Err(e) => e.to_string(),
            };

            error!(
                "Inventory decrement failed for {} x{}: {}",
                item.product, item.quantity, reason
            );
            failures.push(InventoryDecrementError {
                product: item.product.clone(),
                quantity: item.quantity,
                reason,
            });
        }

        failures
    }
}

fn advance(state: &mut SubmissionState, next: SubmissionState) {
    debug!("Submission {} -> {}", state, next);
    *state = next;
}

fn validate(draft: &OrderDraft) -> Result<(), ValidationError> {
    if let Some(line) = draft.items().iter().position(|item| !item.is_selected()) {
        return Err(ValidationError::MissingProductSelection { line });
    }
    if draft.name.trim().is_empty() {
        return Err(ValidationError::MissingName);
    }
    if draft.phone.trim().is_empty() {
        return Err(ValidationError::MissingPhone);
    }
    if draft.requires_address() && draft.address.trim().is_empty() {
        return Err(ValidationError::MissingAddress);
    }
    Ok(())
}

/// First line whose quantity exceeds the snapshot's availability wins.
fn check_stock(items: &[OrderLineItem], snapshot: &CatalogSnapshot) -> Result<(), StockError> {
    for item in items {
        snapshot
            .check_stock(&item.product, item.quantity)
            .map_err(|cause| StockError {
                product: cause.product().to_string(),
                cause,
            })?;
    }
    Ok(())
}
