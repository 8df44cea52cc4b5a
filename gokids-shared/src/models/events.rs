//! Telemetry event payloads emitted by the scheduling workflow. These are
//! logged as structured tracing fields at the API edge.

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct DraftSavedEvent {
    pub user_id: i64,
    pub vehicle_id: uuid::Uuid,
    pub total_rides: u32,
    pub saved_at: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct RideConfirmedEvent {
    pub ride_id: i64,
    pub user_id: i64,
    pub total_rides: i32,
    pub remaining_credits: i32,
    pub confirmed_at: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct CreditsToppedUpEvent {
    pub user_id: i64,
    pub rides_added: i32,
    pub new_balance: i32,
    pub topped_up_at: i64,
}
