use async_trait::async_trait;
use gokids_core::RepoError;

use crate::draft::ScheduleDraft;

/// Transient, session-scoped storage for the draft hand-off between the
/// builder and the confirmation step. One draft per parent; saving
/// overwrites, confirmation clears.
#[async_trait]
pub trait DraftStore: Send + Sync {
    async fn save(&self, user_id: i64, draft: &ScheduleDraft) -> Result<(), RepoError>;

    async fn load(&self, user_id: i64) -> Result<Option<ScheduleDraft>, RepoError>;

    async fn clear(&self, user_id: i64) -> Result<(), RepoError>;
}
