use axum::{extract::State, Extension, Json};
use gokids_core::identity::SessionContext;
use gokids_core::parent::{AddressPair, Parent};

use crate::error::AppError;
use crate::state::AppState;

/// GET /v1/me
/// The session parent's profile, including the current ride-credit balance.
pub async fn get_me(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
) -> Result<Json<Parent>, AppError> {
    let parent = state
        .parents
        .get_parent(session.user_id)
        .await?
        .ok_or_else(|| AppError::NotFoundError("User not found".to_string()))?;

    Ok(Json(parent))
}

/// GET /v1/me/addresses
pub async fn get_my_addresses(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
) -> Result<Json<AddressPair>, AppError> {
    let parent = state
        .parents
        .get_parent(session.user_id)
        .await?
        .ok_or_else(|| AppError::NotFoundError("User not found".to_string()))?;

    Ok(Json(parent.addresses()))
}
