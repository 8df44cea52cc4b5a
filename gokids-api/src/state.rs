use std::sync::Arc;

use async_trait::async_trait;
use gokids_booking::repository::{LedgerRepository, RideRepository};
use gokids_booking::{ConfirmationService, TopUpService};
use gokids_core::parent::ParentRepository;
use gokids_core::RepoError;
use gokids_fleet::VehicleRepository;
use gokids_schedule::DraftStore;
use gokids_store::RedisStore;

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub expiration: u64,
}

/// Per-IP request throttling. Fail-open callers treat an `Err` as allowed.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    async fn check(&self, key: &str, limit: i64, window_seconds: i64) -> Result<bool, RepoError>;
}

#[async_trait]
impl RateLimiter for RedisStore {
    async fn check(&self, key: &str, limit: i64, window_seconds: i64) -> Result<bool, RepoError> {
        Ok(self.check_rate_limit(key, limit, window_seconds).await?)
    }
}

#[derive(Clone)]
pub struct AppState {
    pub parents: Arc<dyn ParentRepository>,
    pub ledger: Arc<dyn LedgerRepository>,
    pub vehicles: Arc<dyn VehicleRepository>,
    pub rides: Arc<dyn RideRepository>,
    pub drafts: Arc<dyn DraftStore>,
    pub confirmation: Arc<ConfirmationService>,
    pub wallet: Arc<TopUpService>,
    pub rate_limiter: Arc<dyn RateLimiter>,
    pub auth: AuthConfig,
    pub rate_limit_per_minute: i64,
    pub schedule_window_days: u32,
}
