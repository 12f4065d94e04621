use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use edible_order::{Notice, OrderReport};
use edible_shared::PersistedOrder;
use serde::Serialize;

use crate::{error::AppError, state::AppState};

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct OrdersResponse {
    pub orders: Vec<PersistedOrder>,
    pub grand_total: i64,
    pub submit_enabled: bool,
    pub notices: Vec<Notice>,
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub submit_enabled: bool,
    pub notices: Vec<Notice>,
}

/// Routes behind the admin token
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/admin/orders", get(list_orders))
        .route("/v1/admin/orders/report", get(get_report))
        .route("/v1/admin/orders/report.csv", get(download_report))
        .route(
            "/v1/admin/settings/submissions/toggle",
            post(toggle_submissions),
        )
}

// ============================================================================
// Handlers
// ============================================================================

async fn list_orders(State(state): State<AppState>) -> Result<Json<OrdersResponse>, AppError> {
    let mut dashboard = state.dashboard();
    dashboard.fetch_orders().await?;
    // A failed read keeps the default and leaves a notice.
    let _ = dashboard.fetch_submit_setting().await;

    Ok(Json(OrdersResponse {
        orders: dashboard.orders().to_vec(),
        grand_total: dashboard.grand_total(),
        submit_enabled: dashboard.submit_enabled(),
        notices: dashboard.take_notices(),
    }))
}

/// Flips order submissions. The current value is read first so the flip is
/// relative to what the backend holds; when the write fails the response
/// carries the reconciled value with a 502.
async fn toggle_submissions(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ToggleResponse>), AppError> {
    let mut dashboard = state.dashboard();
    dashboard.fetch_submit_setting().await?;

    let status = match dashboard.toggle_submissions().await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::BAD_GATEWAY,
    };

    Ok((
        status,
        Json(ToggleResponse {
            submit_enabled: dashboard.submit_enabled(),
            notices: dashboard.take_notices(),
        }),
    ))
}

async fn load_report(state: &AppState) -> Result<OrderReport, AppError> {
    let mut dashboard = state.dashboard();
    dashboard.fetch_orders().await?;
    Ok(dashboard.export_report())
}

async fn get_report(State(state): State<AppState>) -> Result<Json<OrderReport>, AppError> {
    Ok(Json(load_report(&state).await?))
}

async fn download_report(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let report = load_report(&state).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"orders.csv\"",
            ),
        ],
        report.to_csv(),
    ))
}
