use std::net::SocketAddr;
use std::sync::Arc;

use gokids_api::{
    app,
    state::{AppState, AuthConfig},
};
use gokids_booking::{ConfirmationService, TopUpService};
use gokids_store::{DbClient, PgParentRepository, PgRideRepository, PgVehicleRepository, RedisStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "gokids_api=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = gokids_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting GoKids API on port {}", config.server.port);

    let db = DbClient::new(&config.database.url)
        .await
        .expect("Failed to connect to Postgres");
    db.migrate().await.expect("Failed to run migrations");

    let redis = RedisStore::new(&config.redis.url, config.business_rules.draft_ttl_seconds)
        .await
        .expect("Failed to connect to Redis");
    let redis = Arc::new(redis);

    let parent_repo = PgParentRepository::new(db.pool.clone());
    let parents = Arc::new(parent_repo.clone());
    let ledger = Arc::new(parent_repo);
    let vehicles = Arc::new(PgVehicleRepository::new(db.pool.clone()));
    let rides = Arc::new(PgRideRepository::new(db.pool.clone()));

    let confirmation = Arc::new(ConfirmationService::new(
        redis.clone(),
        ledger.clone(),
        rides.clone(),
    ));
    let wallet = Arc::new(TopUpService::new(
        ledger.clone(),
        config.business_rules.credit_packages(),
    ));

    let app_state = AppState {
        parents,
        ledger,
        vehicles,
        rides,
        drafts: redis.clone(),
        confirmation,
        wallet,
        rate_limiter: redis,
        auth: AuthConfig {
            secret: config.auth.jwt_secret.clone(),
            expiration: config.auth.jwt_expiration_seconds,
        },
        rate_limit_per_minute: config.business_rules.rate_limit_per_minute,
        schedule_window_days: config.business_rules.schedule_window_days,
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Server error");
}
