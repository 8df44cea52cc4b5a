use async_trait::async_trait;
use gokids_core::RepoError;
use uuid::Uuid;

use crate::vehicle::{Driver, Vehicle};

/// Read access to the vehicle catalog.
#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn list_vehicles(&self) -> Result<Vec<Vehicle>, RepoError>;

    async fn get_vehicle(&self, id: Uuid) -> Result<Option<Vehicle>, RepoError>;

    async fn get_driver(&self, id: Uuid) -> Result<Option<Driver>, RepoError>;
}
