use axum::{extract::State, routing::get, Json, Router};
use edible_catalog::ProductOption;
use edible_order::{Notice, SubmitControl};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    pub products: Vec<ProductOption>,
    pub submit_control: SubmitControl,
    pub notices: Vec<Notice>,
}

#[derive(Debug, Serialize)]
pub struct SubmissionSettingResponse {
    pub submit_enabled: bool,
    pub submit_control: SubmitControl,
    pub notices: Vec<Notice>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/products", get(list_products))
        .route("/v1/settings/submissions", get(get_submission_setting))
}

/// Catalog as the order form sees it on mount. A failed fetch yields an
/// empty list plus a warning rather than an error.
async fn list_products(State(state): State<AppState>) -> Json<ProductsResponse> {
    let mut form = state.order_form();
    form.mount().await;

    Json(ProductsResponse {
        products: form.options_for(0),
        submit_control: form.submit_control(),
        notices: form.take_notices(),
    })
}

async fn get_submission_setting(State(state): State<AppState>) -> Json<SubmissionSettingResponse> {
    let mut form = state.order_form();
    form.load_submit_setting().await;
    let submit_control = form.submit_control();

    Json(SubmissionSettingResponse {
        submit_enabled: submit_control == SubmitControl::Enabled,
        submit_control,
        notices: form.take_notices(),
    })
}
