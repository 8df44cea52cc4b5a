use async_trait::async_trait;
use gokids_core::RepoError;
use gokids_schedule::{DraftStore, ScheduleDraft};
use redis::{AsyncCommands, RedisResult};
use tracing::debug;

/// Redis-backed transient storage: one draft key per parent plus the per-IP
/// rate-limit counters.
#[derive(Clone)]
pub struct RedisStore {
    client: redis::Client,
    draft_ttl_seconds: u64,
}

impl RedisStore {
    pub async fn new(connection_string: &str, draft_ttl_seconds: u64) -> Result<Self, redis::RedisError> {
        let client = redis::Client::open(connection_string)?;
        Ok(Self {
            client,
            draft_ttl_seconds,
        })
    }

    fn draft_key(user_id: i64) -> String {
        format!("draft:{}", user_id)
    }

    pub async fn check_rate_limit(
        &self,
        key: &str,
        limit: i64,
        window_seconds: i64,
    ) -> RedisResult<bool> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let (count,): (i64,) = redis::pipe()
            .atomic()
            .incr(key, 1)
            .expire(key, window_seconds)
            .ignore()
            .query_async(&mut conn)
            .await?;

        Ok(count <= limit)
    }
}

#[async_trait]
impl DraftStore for RedisStore {
    async fn save(&self, user_id: i64, draft: &ScheduleDraft) -> Result<(), RepoError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let payload = serde_json::to_string(draft)?;
        conn.set_ex::<_, _, ()>(Self::draft_key(user_id), payload, self.draft_ttl_seconds)
            .await?;
        debug!(user_id, "draft saved");
        Ok(())
    }

    async fn load(&self, user_id: i64) -> Result<Option<ScheduleDraft>, RepoError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let payload: Option<String> = conn.get(Self::draft_key(user_id)).await?;
        match payload {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn clear(&self, user_id: i64) -> Result<(), RepoError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.del::<_, ()>(Self::draft_key(user_id)).await?;
        debug!(user_id, "draft cleared");
        Ok(())
    }
}
