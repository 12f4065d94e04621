use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use edible_order::{
    Confirmation, DraftField, InventoryDecrementError, ItemField, Notice, OrderForm,
    SubmissionState,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{error::AppError, state::AppState};

// ============================================================================
// Request/Response Types
// ============================================================================

/// The order form as posted by the storefront. Fields are raw form input;
/// prices are never taken from the client.
#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(rename = "deliveryMethod", default)]
    pub delivery_method: Option<String>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub items: Vec<LineRequest>,
}

#[derive(Debug, Deserialize)]
pub struct LineRequest {
    #[serde(rename = "type", default)]
    pub product: String,
    #[serde(default)]
    pub quantity: Value,
}

impl LineRequest {
    /// Quantity as the text a number input would hold
    fn quantity_text(&self) -> String {
        match &self.quantity {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => String::new(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PlaceOrderResponse {
    pub state: SubmissionState,
    pub confirmation: Confirmation,
    pub inventory_failures: Vec<InventoryDecrementError>,
    pub notices: Vec<Notice>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/orders", post(place_order))
}

// ============================================================================
// Handlers
// ============================================================================

async fn place_order(
    State(state): State<AppState>,
    Json(req): Json<PlaceOrderRequest>,
) -> Result<(StatusCode, Json<PlaceOrderResponse>), AppError> {
    let mut form = state.order_form();
    form.mount().await;
    fill_form(&mut form, &req)?;

    let outcome = form.submit().await?;

    Ok((
        StatusCode::CREATED,
        Json(PlaceOrderResponse {
            state: outcome.state,
            confirmation: outcome.confirmation,
            inventory_failures: outcome.inventory_failures,
            notices: form.take_notices(),
        }),
    ))
}

/// Replays the posted form through the draft operations so prices and
/// quantities go through the same rules as interactive edits.
fn fill_form(form: &mut OrderForm, req: &PlaceOrderRequest) -> Result<(), AppError> {
    form.set_field(DraftField::Name, &req.name)?;
    form.set_field(DraftField::Phone, &req.phone)?;
    if let Some(method) = &req.delivery_method {
        form.set_field(DraftField::DeliveryMethod, method)?;
    }
    form.set_field(DraftField::Address, &req.address)?;
    form.set_field(DraftField::Notes, &req.notes)?;

    for (index, line) in req.items.iter().enumerate() {
        if index > 0 {
            form.add_item();
        }
        form.set_item_field(index, ItemField::Type, &line.product);
        form.set_item_field(index, ItemField::Quantity, &line.quantity_text());
    }
    Ok(())
}
