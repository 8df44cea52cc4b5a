pub mod repository;
pub mod vehicle;

pub use repository::VehicleRepository;
pub use vehicle::{Driver, Vehicle};
