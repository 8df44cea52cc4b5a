use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A driver as presented to parents: identity, rating and a short bio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Driver {
    pub id: Uuid,
    pub name: String,
    pub rating: f64,
    pub bio: String,
    pub image_url: Option<String>,
}

/// A bookable vehicle with its assigned driver. Read-only inside the
/// scheduling workflow; the fleet itself is managed elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: Uuid,
    pub name: String,
    pub seats: i32,
    /// Display price label, e.g. "2.50€ / ride".
    pub price: String,
    pub driver: Driver,
}
