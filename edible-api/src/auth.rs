use axum::{extract::State, routing::post, Json, Router};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppError,
    middleware::auth::{AdminClaims, ADMIN_ROLE},
    state::AppState,
};

#[derive(Debug, Deserialize)]
struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Debug, Serialize)]
struct AuthResponse {
    token: String,
    expires_in: u64,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/admin/login", post(login_admin))
}

/// Logout is client-side: the dashboard drops the token.
async fn login_admin(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    if !state.admin.verify(&req.username, &req.password) {
        return Err(AppError::AuthenticationError("Invalid credentials".to_string()));
    }

    let claims = AdminClaims {
        sub: req.username,
        role: ADMIN_ROLE.to_owned(),
        exp: (Utc::now() + Duration::seconds(state.auth.expiration as i64)).timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.auth.secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(format!("Token encoding failed: {}", e)))?;

    tracing::info!("Admin {} logged in", claims.sub);
    Ok(Json(AuthResponse {
        token,
        expires_in: state.auth.expiration,
    }))
}
