use async_trait::async_trait;
use gokids_core::RepoError;

use crate::models::{NewRide, Ride};

/// Result of a conditional ledger debit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebitOutcome {
    /// The balance covered the debit and was decremented in one statement.
    Applied { new_balance: i32 },
    /// The balance was below the requested amount; nothing was written.
    Insufficient { available: i32 },
}

/// The per-parent ride-credit ledger. Debit and credit are single
/// conditional statements so a concurrent top-up can never lose an update.
#[async_trait]
pub trait LedgerRepository: Send + Sync {
    async fn fetch_balance(&self, user_id: i64) -> Result<Option<i32>, RepoError>;

    async fn debit(&self, user_id: i64, amount: i32) -> Result<DebitOutcome, RepoError>;

    async fn credit(&self, user_id: i64, amount: i32) -> Result<i32, RepoError>;
}

/// Persisted ride records.
#[async_trait]
pub trait RideRepository: Send + Sync {
    async fn insert_ride(&self, ride: &NewRide) -> Result<Ride, RepoError>;

    async fn list_rides(&self, user_id: i64) -> Result<Vec<Ride>, RepoError>;
}
