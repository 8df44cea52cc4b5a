use std::sync::Arc;

use gokids_core::identity::SessionContext;
use gokids_core::RepoError;
use gokids_schedule::{DraftStore, ScheduleDraft};

use crate::models::{NewRide, Ride};
use crate::repository::{DebitOutcome, LedgerRepository, RideRepository};

#[derive(Debug, thiserror::Error)]
pub enum ConfirmError {
    /// No draft in the transient store; the caller returns to the builder.
    #[error("No schedule draft found")]
    DraftMissing,

    /// The stored draft does not satisfy its own invariants.
    #[error("Schedule draft is invalid: {0}")]
    InvalidDraft(String),

    /// Balance below the draft's ride count; the caller goes to the wallet.
    /// No remote mutation has occurred.
    #[error("Not enough ride credits: {available} available, {required} required")]
    InsufficientCredit { available: i32, required: i32 },

    /// The ledger debit itself failed. The draft is kept for retry.
    #[error("Ride credit update failed")]
    LedgerUpdateFailed(#[source] RepoError),

    /// The ride insert failed after the ledger was debited. A compensating
    /// credit is attempted; `compensated` records whether it landed. When it
    /// did not, credits were spent with no ride to show for them.
    #[error("Ride could not be recorded (credits restored: {compensated})")]
    RideInsertFailed {
        #[source]
        source: RepoError,
        compensated: bool,
    },
}

/// Draft plus current balance, as shown on the overview screen.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Overview {
    pub draft: ScheduleDraft,
    pub available_rides: i32,
    pub required_rides: u32,
}

/// Outcome of a successful confirmation.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Confirmed {
    pub ride: Ride,
    pub remaining_credits: i32,
}

/// Finalizes a draft into a persisted [`Ride`]: validates the credit
/// balance, debits the ledger, inserts the ride and clears the draft.
pub struct ConfirmationService {
    drafts: Arc<dyn DraftStore>,
    ledger: Arc<dyn LedgerRepository>,
    rides: Arc<dyn RideRepository>,
}

impl ConfirmationService {
    pub fn new(
        drafts: Arc<dyn DraftStore>,
        ledger: Arc<dyn LedgerRepository>,
        rides: Arc<dyn RideRepository>,
    ) -> Self {
        Self {
            drafts,
            ledger,
            rides,
        }
    }

    /// Reads the session's draft, failing with [`ConfirmError::DraftMissing`]
    /// when there is none.
    pub async fn load_draft(&self, session: &SessionContext) -> Result<ScheduleDraft, ConfirmError> {
        self.drafts
            .load(session.user_id)
            .await
            .map_err(ConfirmError::LedgerUpdateFailed)?
            .ok_or(ConfirmError::DraftMissing)
    }

    pub async fn available_rides(&self, session: &SessionContext) -> Result<i32, ConfirmError> {
        self.ledger
            .fetch_balance(session.user_id)
            .await
            .map_err(ConfirmError::LedgerUpdateFailed)?
            .ok_or_else(|| ConfirmError::InvalidDraft(format!("unknown user {}", session.user_id)))
    }

    /// Draft and balance together, for the overview screen.
    pub async fn overview(&self, session: &SessionContext) -> Result<Overview, ConfirmError> {
        let draft = self.load_draft(session).await?;
        let available_rides = self.available_rides(session).await?;
        Ok(Overview {
            required_rides: draft.total_rides,
            draft,
            available_rides,
        })
    }

    /// Confirms the session's draft.
    ///
    /// The debit is a single conditional statement, so an insufficient
    /// balance rejects without any write and a concurrent top-up cannot be
    /// lost. If the ride insert fails after the debit, a compensating credit
    /// restores the balance; only when that also fails does the ledger stay
    /// decremented with no ride recorded.
    pub async fn confirm(&self, session: &SessionContext) -> Result<Confirmed, ConfirmError> {
        let draft = self.load_draft(session).await?;

        if draft.total_rides != draft.counted_rides() {
            return Err(ConfirmError::InvalidDraft(
                "total_rides does not match pickup slots".to_string(),
            ));
        }
        let required = draft.total_rides as i32;
        if required == 0 {
            return Err(ConfirmError::InvalidDraft(
                "draft has no pickup slots".to_string(),
            ));
        }

        let remaining_credits = match self
            .ledger
            .debit(session.user_id, required)
            .await
            .map_err(ConfirmError::LedgerUpdateFailed)?
        {
            DebitOutcome::Insufficient { available } => {
                tracing::info!(
                    user_id = session.user_id,
                    available,
                    required,
                    "confirmation rejected: not enough ride credits"
                );
                return Err(ConfirmError::InsufficientCredit {
                    available,
                    required,
                });
            }
            DebitOutcome::Applied { new_balance } => {
                tracing::debug!(
                    user_id = session.user_id,
                    required,
                    new_balance,
                    "ride credits debited"
                );
                new_balance
            }
        };

        let new_ride = NewRide::from_draft(session.user_id, &draft);
        let ride = match self.rides.insert_ride(&new_ride).await {
            Ok(ride) => ride,
            Err(source) => {
                let compensated = match self.ledger.credit(session.user_id, required).await {
                    Ok(_) => true,
                    Err(credit_err) => {
                        tracing::error!(
                            user_id = session.user_id,
                            required,
                            error = %credit_err,
                            "compensating credit failed; ledger debited with no ride recorded"
                        );
                        false
                    }
                };
                return Err(ConfirmError::RideInsertFailed {
                    source,
                    compensated,
                });
            }
        };

        // The draft has served its purpose; a failed delete only means the
        // next save overwrites it.
        if let Err(e) = self.drafts.clear(session.user_id).await {
            tracing::warn!(user_id = session.user_id, error = %e, "failed to clear confirmed draft");
        }

        tracing::info!(
            user_id = session.user_id,
            ride_id = ride.id,
            total_rides = ride.total_rides,
            remaining_credits,
            "schedule confirmed"
        );
        Ok(Confirmed {
            ride,
            remaining_credits,
        })
    }
}
