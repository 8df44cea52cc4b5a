use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gokids_shared::pii::Masked;
use serde::{Deserialize, Serialize};

use crate::RepoError;

/// A parent account. The `available_rides` field is the ride-credit ledger
/// balance: confirmed schedules consume it, wallet top-ups replenish it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parent {
    pub user_id: i64,
    pub name: String,
    pub age: i32,
    pub child_name: Masked<String>,
    pub child_age: i32,
    pub home_address: Masked<String>,
    pub class_address: Masked<String>,
    pub note: f64,
    pub image_url: Option<String>,
    pub available_rides: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Home/class address pair as stored on the profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressPair {
    pub home: Masked<String>,
    pub class: Masked<String>,
}

impl Parent {
    pub fn addresses(&self) -> AddressPair {
        AddressPair {
            home: self.home_address.clone(),
            class: self.class_address.clone(),
        }
    }
}

/// Read access to parent profiles.
#[async_trait]
pub trait ParentRepository: Send + Sync {
    async fn get_parent(&self, user_id: i64) -> Result<Option<Parent>, RepoError>;
}
