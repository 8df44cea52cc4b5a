use axum::{extract::State, http::StatusCode, Extension, Json};
use chrono::Utc;
use gokids_booking::{Confirmed, Overview};
use gokids_core::identity::SessionContext;
use gokids_shared::models::events::RideConfirmedEvent;

use crate::error::AppError;
use crate::state::AppState;

/// GET /v1/schedule/overview
/// Draft and current balance side by side, as the confirmation screen shows
/// them.
pub async fn get_overview(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
) -> Result<Json<Overview>, AppError> {
    let overview = state.confirmation.overview(&session).await?;
    Ok(Json(overview))
}

/// POST /v1/schedule/confirm
/// Finalizes the draft: debits the ledger, records the ride, clears the
/// draft. 402 sends the client to the wallet.
pub async fn confirm_schedule(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
) -> Result<(StatusCode, Json<Confirmed>), AppError> {
    let confirmed = state.confirmation.confirm(&session).await?;

    let event = RideConfirmedEvent {
        ride_id: confirmed.ride.id,
        user_id: session.user_id,
        total_rides: confirmed.ride.total_rides,
        remaining_credits: confirmed.remaining_credits,
        confirmed_at: Utc::now().timestamp(),
    };
    tracing::info!(event = ?event, "ride confirmed");

    Ok((StatusCode::CREATED, Json(confirmed)))
}
