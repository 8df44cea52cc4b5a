use std::net::SocketAddr;

use axum::{
    extract::State,
    http::Method,
    response::IntoResponse,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod error;
pub mod middleware;
pub mod overview;
pub mod rides;
pub mod schedule;
pub mod state;
pub mod users;
pub mod vehicles;
pub mod wallet;

pub use state::AppState;

use crate::middleware::auth::parent_auth_middleware;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::USER_AGENT,
        ]);

    let protected = Router::new()
        .route("/v1/me", get(users::get_me))
        .route("/v1/me/addresses", get(users::get_my_addresses))
        .route("/v1/vehicles", get(vehicles::list_vehicles))
        .route("/v1/drivers/{id}", get(vehicles::get_driver))
        .route("/v1/schedule/calendar", get(schedule::calendar_window))
        .route(
            "/v1/schedule/draft",
            put(schedule::save_draft)
                .get(schedule::get_draft)
                .delete(schedule::delete_draft),
        )
        .route("/v1/schedule/overview", get(overview::get_overview))
        .route("/v1/schedule/confirm", post(overview::confirm_schedule))
        .route("/v1/rides", get(rides::list_rides))
        .route("/v1/wallet/packages", get(wallet::list_packages))
        .route("/v1/wallet/topup", post(wallet::top_up))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            parent_auth_middleware,
        ));

    Router::new()
        .merge(auth::routes())
        .merge(protected)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .with_state(state)
}

/// Per-IP throttle backed by Redis. Requests without connect info (and Redis
/// errors) pass through.
async fn rate_limit_middleware(
    State(state): State<AppState>,
    req: axum::extract::Request,
    next: axum::middleware::Next,
) -> Result<impl IntoResponse, impl IntoResponse> {
    let addr = req
        .extensions()
        .get::<axum::extract::ConnectInfo<SocketAddr>>()
        .map(|info| info.0);

    let Some(addr) = addr else {
        return Ok(next.run(req).await);
    };

    let key = format!("ratelimit:{}", addr.ip());
    match state
        .rate_limiter
        .check(&key, state.rate_limit_per_minute, 60)
        .await
    {
        Ok(true) => Ok(next.run(req).await),
        Ok(false) => Err((
            axum::http::StatusCode::TOO_MANY_REQUESTS,
            "Rate limit exceeded",
        )),
        Err(_) => Ok(next.run(req).await), // Fail open
    }
}
