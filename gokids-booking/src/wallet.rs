use std::sync::Arc;

use gokids_core::identity::SessionContext;
use gokids_core::RepoError;
use serde::{Deserialize, Serialize};

use crate::repository::LedgerRepository;

/// A purchasable bundle of ride credits. The package id doubles as the
/// number of rides granted, matching the checkout line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditPackage {
    pub rides: i32,
    pub price_cents: i64,
    pub description: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TopUpError {
    #[error("Unknown ride package: {0}")]
    UnknownPackage(i32),

    #[error("Ride credit update failed")]
    LedgerUpdateFailed(#[source] RepoError),
}

/// Applies wallet top-ups to the ride-credit ledger. The checkout itself is
/// handled by the external payment provider; this runs after it reports
/// success.
pub struct TopUpService {
    ledger: Arc<dyn LedgerRepository>,
    packages: Vec<CreditPackage>,
}

impl TopUpService {
    pub fn new(ledger: Arc<dyn LedgerRepository>, packages: Vec<CreditPackage>) -> Self {
        Self { ledger, packages }
    }

    pub fn packages(&self) -> &[CreditPackage] {
        &self.packages
    }

    pub fn package(&self, rides: i32) -> Option<&CreditPackage> {
        self.packages.iter().find(|p| p.rides == rides)
    }

    /// Credits the ledger with the package's ride count. Returns the new
    /// balance.
    pub async fn apply_top_up(
        &self,
        session: &SessionContext,
        package_rides: i32,
    ) -> Result<i32, TopUpError> {
        let package = self
            .package(package_rides)
            .ok_or(TopUpError::UnknownPackage(package_rides))?;

        let new_balance = self
            .ledger
            .credit(session.user_id, package.rides)
            .await
            .map_err(TopUpError::LedgerUpdateFailed)?;

        tracing::info!(
            user_id = session.user_id,
            rides_added = package.rides,
            new_balance,
            "ride credits topped up"
        );
        Ok(new_balance)
    }
}

/// Default packages offered when configuration does not override them:
/// 10 rides for 50€, 25 rides for 80€.
pub fn default_packages() -> Vec<CreditPackage> {
    vec![
        CreditPackage {
            rides: 10,
            price_cents: 5000,
            description: "10 Rides Package".to_string(),
        },
        CreditPackage {
            rides: 25,
            price_cents: 8000,
            description: "25 Rides Package".to_string(),
        },
    ]
}
