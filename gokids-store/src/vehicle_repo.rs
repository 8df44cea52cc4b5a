use async_trait::async_trait;
use gokids_core::RepoError;
use gokids_fleet::{Driver, Vehicle, VehicleRepository};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct PgVehicleRepository {
    pool: PgPool,
}

impl PgVehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct VehicleRow {
    id: Uuid,
    name: String,
    seats: i32,
    price: String,
    driver_id: Uuid,
    driver_name: String,
    driver_rating: f64,
    driver_bio: String,
    driver_image_url: Option<String>,
}

impl From<VehicleRow> for Vehicle {
    fn from(row: VehicleRow) -> Self {
        Vehicle {
            id: row.id,
            name: row.name,
            seats: row.seats,
            price: row.price,
            driver: Driver {
                id: row.driver_id,
                name: row.driver_name,
                rating: row.driver_rating,
                bio: row.driver_bio,
                image_url: row.driver_image_url,
            },
        }
    }
}

#[derive(sqlx::FromRow)]
struct DriverRow {
    id: Uuid,
    name: String,
    rating: f64,
    bio: String,
    image_url: Option<String>,
}

const VEHICLE_SELECT: &str = "SELECT v.id, v.name, v.seats, v.price, \
    d.id AS driver_id, d.name AS driver_name, d.rating AS driver_rating, \
    d.bio AS driver_bio, d.image_url AS driver_image_url \
    FROM vehicles v JOIN drivers d ON v.driver_id = d.id";

#[async_trait]
impl VehicleRepository for PgVehicleRepository {
    async fn list_vehicles(&self) -> Result<Vec<Vehicle>, RepoError> {
        let rows = sqlx::query_as::<_, VehicleRow>(VEHICLE_SELECT)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Vehicle::from).collect())
    }

    async fn get_vehicle(&self, id: Uuid) -> Result<Option<Vehicle>, RepoError> {
        let row = sqlx::query_as::<_, VehicleRow>(&format!("{} WHERE v.id = $1", VEHICLE_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Vehicle::from))
    }

    async fn get_driver(&self, id: Uuid) -> Result<Option<Driver>, RepoError> {
        let row = sqlx::query_as::<_, DriverRow>(
            "SELECT id, name, rating, bio, image_url FROM drivers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|d| Driver {
            id: d.id,
            name: d.name,
            rating: d.rating,
            bio: d.bio,
            image_url: d.image_url,
        }))
    }
}
