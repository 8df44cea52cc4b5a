use axum::{extract::State, Extension, Json};
use gokids_booking::Ride;
use gokids_core::identity::SessionContext;

use crate::error::AppError;
use crate::state::AppState;

/// GET /v1/rides
/// Confirmed schedules for the session's parent, newest first.
pub async fn list_rides(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
) -> Result<Json<Vec<Ride>>, AppError> {
    let rides = state.rides.list_rides(session.user_id).await?;
    Ok(Json(rides))
}
