use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use gokids_core::identity::SessionContext;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

pub const PARENT_ROLE: &str = "PARENT";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ParentClaims {
    /// Parent user id, as issued by the identity provider.
    pub sub: String,
    pub role: String,
    pub exp: usize,
}

/// Validates the Bearer token and injects the authenticated
/// [`SessionContext`] into request extensions. Every protected handler
/// reads the parent id from there and nowhere else.
pub async fn parent_auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token_data = decode::<ParentClaims>(
        token,
        &DecodingKey::from_secret(state.auth.secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| StatusCode::UNAUTHORIZED)?;

    if token_data.claims.role != PARENT_ROLE {
        return Err(StatusCode::FORBIDDEN);
    }

    let user_id: i64 = token_data
        .claims
        .sub
        .parse()
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    req.extensions_mut().insert(SessionContext::new(user_id));

    Ok(next.run(req).await)
}
