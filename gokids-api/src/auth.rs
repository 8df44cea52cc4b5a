use axum::{extract::State, routing::post, Json, Router};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::middleware::auth::{ParentClaims, PARENT_ROLE};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct TokenRequest {
    user_id: i64,
}

#[derive(Debug, Serialize)]
struct TokenResponse {
    token: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/auth/token", post(issue_token))
}

/// Stand-in for the external identity provider: issues a session token for
/// a known parent id.
async fn issue_token(
    State(state): State<AppState>,
    Json(req): Json<TokenRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    state
        .parents
        .get_parent(req.user_id)
        .await?
        .ok_or_else(|| AppError::NotFoundError(format!("Unknown parent: {}", req.user_id)))?;

    let claims = ParentClaims {
        sub: req.user_id.to_string(),
        role: PARENT_ROLE.to_owned(),
        exp: (Utc::now() + Duration::seconds(state.auth.expiration as i64)).timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.auth.secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(format!("Token encoding failed: {}", e)))?;

    Ok(Json(TokenResponse { token }))
}
