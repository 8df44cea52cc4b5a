use axum::{extract::State, Extension, Json};
use chrono::Utc;
use gokids_booking::CreditPackage;
use gokids_core::identity::SessionContext;
use gokids_shared::models::events::CreditsToppedUpEvent;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TopUpRequest {
    /// Package id, which is also the number of rides it grants.
    pub rides: i32,
}

#[derive(Debug, Serialize)]
pub struct TopUpResponse {
    pub rides_added: i32,
    pub available_rides: i32,
}

/// GET /v1/wallet/packages
pub async fn list_packages(
    State(state): State<AppState>,
) -> Result<Json<Vec<CreditPackage>>, AppError> {
    Ok(Json(state.wallet.packages().to_vec()))
}

/// POST /v1/wallet/topup
/// Credits the ledger after the payment provider reports success.
pub async fn top_up(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Json(req): Json<TopUpRequest>,
) -> Result<Json<TopUpResponse>, AppError> {
    let new_balance = state.wallet.apply_top_up(&session, req.rides).await?;

    let event = CreditsToppedUpEvent {
        user_id: session.user_id,
        rides_added: req.rides,
        new_balance,
        topped_up_at: Utc::now().timestamp(),
    };
    tracing::info!(event = ?event, "wallet topped up");

    Ok(Json(TopUpResponse {
        rides_added: req.rides,
        available_rides: new_balance,
    }))
}
