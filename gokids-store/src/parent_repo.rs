use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gokids_booking::repository::{DebitOutcome, LedgerRepository};
use gokids_core::parent::{Parent, ParentRepository};
use gokids_core::RepoError;
use sqlx::PgPool;

/// Parent profiles and the ride-credit ledger, both backed by the users
/// table.
#[derive(Clone)]
pub struct PgParentRepository {
    pool: PgPool,
}

impl PgParentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ParentRow {
    user_id: i64,
    name: String,
    age: i32,
    child_name: String,
    child_age: i32,
    home_address: String,
    class_address: String,
    note: f64,
    image_url: Option<String>,
    available_rides: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ParentRow> for Parent {
    fn from(row: ParentRow) -> Self {
        Parent {
            user_id: row.user_id,
            name: row.name,
            age: row.age,
            child_name: row.child_name.into(),
            child_age: row.child_age,
            home_address: row.home_address.into(),
            class_address: row.class_address.into(),
            note: row.note,
            image_url: row.image_url,
            available_rides: row.available_rides,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl ParentRepository for PgParentRepository {
    async fn get_parent(&self, user_id: i64) -> Result<Option<Parent>, RepoError> {
        let row = sqlx::query_as::<_, ParentRow>(
            "SELECT user_id, name, age, child_name, child_age, home_address, class_address, \
             note, image_url, available_rides, created_at, updated_at \
             FROM users WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Parent::from))
    }
}

#[async_trait]
impl LedgerRepository for PgParentRepository {
    async fn fetch_balance(&self, user_id: i64) -> Result<Option<i32>, RepoError> {
        let balance = sqlx::query_scalar::<_, i32>(
            "SELECT available_rides FROM users WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(balance)
    }

    async fn debit(&self, user_id: i64, amount: i32) -> Result<DebitOutcome, RepoError> {
        // Conditional single-statement decrement: a balance below `amount`
        // matches no row and nothing is written.
        let new_balance = sqlx::query_scalar::<_, i32>(
            "UPDATE users SET available_rides = available_rides - $2, updated_at = NOW() \
             WHERE user_id = $1 AND available_rides >= $2 \
             RETURNING available_rides",
        )
        .bind(user_id)
        .bind(amount)
        .fetch_optional(&self.pool)
        .await?;

        match new_balance {
            Some(new_balance) => Ok(DebitOutcome::Applied { new_balance }),
            None => {
                let available = self
                    .fetch_balance(user_id)
                    .await?
                    .ok_or_else(|| format!("user {} not found", user_id))?;
                Ok(DebitOutcome::Insufficient { available })
            }
        }
    }

    async fn credit(&self, user_id: i64, amount: i32) -> Result<i32, RepoError> {
        let new_balance = sqlx::query_scalar::<_, i32>(
            "UPDATE users SET available_rides = available_rides + $2, updated_at = NOW() \
             WHERE user_id = $1 \
             RETURNING available_rides",
        )
        .bind(user_id)
        .bind(amount)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| format!("user {} not found", user_id))?;

        Ok(new_balance)
    }
}
