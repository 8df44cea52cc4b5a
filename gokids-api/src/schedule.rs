use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{NaiveDate, NaiveTime, Utc};
use gokids_core::identity::SessionContext;
use gokids_schedule::{AddressKind, CalendarWindow, Period, ScheduleBuilder, ScheduleDraft};
use gokids_shared::models::events::DraftSavedEvent;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SaveDraftRequest {
    pub vehicle_id: Uuid,
    pub dates: Vec<DateSelectionRequest>,
    #[serde(default)]
    pub use_alternative_home_address: bool,
    #[serde(default)]
    pub alternative_home_address: Option<String>,
    #[serde(default)]
    pub use_alternative_class_address: bool,
    #[serde(default)]
    pub alternative_class_address: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DateSelectionRequest {
    pub date: NaiveDate,
    /// "HH:MM" or "HH:MM:SS"; absent means no morning pickup.
    pub morning: Option<String>,
    pub afternoon: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DraftSavedResponse {
    pub total_rides: u32,
    pub draft: ScheduleDraft,
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    /// First visible date; defaults to today. Paging passes `next_start` or
    /// `prev_start` back in.
    pub start: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    pub start: NaiveDate,
    pub days: u32,
    pub dates: Vec<NaiveDate>,
    pub next_start: NaiveDate,
    pub prev_start: NaiveDate,
}

fn parse_pickup_time(raw: &str) -> Result<NaiveTime, AppError> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|_| AppError::ValidationError(format!("Invalid pickup time: {}", raw)))
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /v1/schedule/calendar
/// The rolling date-picker window. Paging moves by whole-window increments.
pub async fn calendar_window(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Json<CalendarResponse> {
    let start = query.start.unwrap_or_else(|| Utc::now().date_naive());
    let window = CalendarWindow::new(start, state.schedule_window_days);

    Json(CalendarResponse {
        start: window.start(),
        days: window.len(),
        dates: window.dates(),
        next_start: window.next().start(),
        prev_start: window.prev().start(),
    })
}

/// PUT /v1/schedule/draft
/// The builder's hand-off: validates the assembled schedule server-side and
/// stores it as the session's draft, overwriting any previous one.
pub async fn save_draft(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Json(req): Json<SaveDraftRequest>,
) -> Result<Json<DraftSavedResponse>, AppError> {
    let parent = state
        .parents
        .get_parent(session.user_id)
        .await?
        .ok_or_else(|| AppError::NotFoundError("User not found".to_string()))?;

    let vehicle = state
        .vehicles
        .get_vehicle(req.vehicle_id)
        .await?
        .ok_or_else(|| {
            AppError::ValidationError(format!("Unknown vehicle: {}", req.vehicle_id))
        })?;

    let mut builder = ScheduleBuilder::new(
        parent.home_address.expose().clone(),
        parent.class_address.expose().clone(),
    );
    builder.select_vehicle(vehicle);

    for selection in &req.dates {
        if builder.is_selected(selection.date) {
            return Err(AppError::ValidationError(format!(
                "Duplicate date: {}",
                selection.date
            )));
        }
        builder.toggle_date(selection.date);
        if let Some(raw) = &selection.morning {
            builder.set_pickup_slot(selection.date, Period::Morning, Some(parse_pickup_time(raw)?))?;
        }
        if let Some(raw) = &selection.afternoon {
            builder.set_pickup_slot(
                selection.date,
                Period::Afternoon,
                Some(parse_pickup_time(raw)?),
            )?;
        }
    }

    builder.set_address_override(
        AddressKind::Home,
        req.use_alternative_home_address,
        req.alternative_home_address.unwrap_or_default(),
    );
    builder.set_address_override(
        AddressKind::Class,
        req.use_alternative_class_address,
        req.alternative_class_address.unwrap_or_default(),
    );

    let draft = builder.build()?;
    state.drafts.save(session.user_id, &draft).await?;

    let event = DraftSavedEvent {
        user_id: session.user_id,
        vehicle_id: draft.vehicle.id,
        total_rides: draft.total_rides,
        saved_at: Utc::now().timestamp(),
    };
    tracing::info!(event = ?event, "draft saved");

    Ok(Json(DraftSavedResponse {
        total_rides: draft.total_rides,
        draft,
    }))
}

/// GET /v1/schedule/draft
pub async fn get_draft(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
) -> Result<Json<ScheduleDraft>, AppError> {
    let draft = state
        .drafts
        .load(session.user_id)
        .await?
        .ok_or_else(|| AppError::NotFoundError("No schedule draft found".to_string()))?;

    Ok(Json(draft))
}

/// DELETE /v1/schedule/draft
/// Discard the draft (the "go back and start over" path).
pub async fn delete_draft(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
) -> Result<StatusCode, AppError> {
    state.drafts.clear(session.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
