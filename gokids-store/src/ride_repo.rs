use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gokids_booking::repository::RideRepository;
use gokids_booking::{NewRide, Ride, RideDate};
use gokids_core::RepoError;
use sqlx::PgPool;

#[derive(Clone)]
pub struct PgRideRepository {
    pool: PgPool,
}

impl PgRideRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct RideRow {
    id: i64,
    user_id: i64,
    vehicle_name: String,
    seats: i32,
    price: String,
    dates: serde_json::Value,
    pickup_address: String,
    drop_address: String,
    driver_name: String,
    total_rides: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl RideRow {
    fn into_ride(self) -> Result<Ride, RepoError> {
        let dates: Vec<RideDate> = serde_json::from_value(self.dates)?;
        Ok(Ride {
            id: self.id,
            user_id: self.user_id,
            vehicle_name: self.vehicle_name,
            seats: self.seats,
            price: self.price,
            dates,
            pickup_address: self.pickup_address,
            drop_address: self.drop_address,
            driver_name: self.driver_name,
            total_rides: self.total_rides,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const RIDE_COLUMNS: &str = "id, user_id, vehicle_name, seats, price, dates, \
    pickup_address, drop_address, driver_name, total_rides, created_at, updated_at";

#[async_trait]
impl RideRepository for PgRideRepository {
    async fn insert_ride(&self, ride: &NewRide) -> Result<Ride, RepoError> {
        let dates = serde_json::to_value(&ride.dates)?;

        let row = sqlx::query_as::<_, RideRow>(&format!(
            "INSERT INTO rides (user_id, vehicle_name, seats, price, dates, \
             pickup_address, drop_address, driver_name, total_rides) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {}",
            RIDE_COLUMNS
        ))
        .bind(ride.user_id)
        .bind(&ride.vehicle_name)
        .bind(ride.seats)
        .bind(&ride.price)
        .bind(dates)
        .bind(&ride.pickup_address)
        .bind(&ride.drop_address)
        .bind(&ride.driver_name)
        .bind(ride.total_rides)
        .fetch_one(&self.pool)
        .await?;

        row.into_ride()
    }

    async fn list_rides(&self, user_id: i64) -> Result<Vec<Ride>, RepoError> {
        let rows = sqlx::query_as::<_, RideRow>(&format!(
            "SELECT {} FROM rides WHERE user_id = $1 ORDER BY created_at DESC",
            RIDE_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(RideRow::into_ride).collect()
    }
}
