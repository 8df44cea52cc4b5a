pub mod app_config;
pub mod database;
pub mod parent_repo;
pub mod redis_store;
pub mod ride_repo;
pub mod vehicle_repo;

pub use database::DbClient;
pub use parent_repo::PgParentRepository;
pub use redis_store::RedisStore;
pub use ride_repo::PgRideRepository;
pub use vehicle_repo::PgVehicleRepository;
