use axum::{
    extract::{Path, State},
    Json,
};
use gokids_fleet::{Driver, Vehicle};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

/// GET /v1/vehicles
/// The bookable fleet, each vehicle with its assigned driver.
pub async fn list_vehicles(State(state): State<AppState>) -> Result<Json<Vec<Vehicle>>, AppError> {
    let vehicles = state.vehicles.list_vehicles().await?;
    Ok(Json(vehicles))
}

/// GET /v1/drivers/{id}
pub async fn get_driver(
    State(state): State<AppState>,
    Path(driver_id): Path<Uuid>,
) -> Result<Json<Driver>, AppError> {
    let driver = state
        .vehicles
        .get_driver(driver_id)
        .await?
        .ok_or_else(|| AppError::NotFoundError(format!("Driver not found: {}", driver_id)))?;

    Ok(Json(driver))
}
