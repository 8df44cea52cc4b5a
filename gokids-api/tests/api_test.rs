use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use gokids_api::middleware::auth::{ParentClaims, PARENT_ROLE};
use gokids_api::state::{AppState, AuthConfig, RateLimiter};
use gokids_api::app;
use gokids_booking::repository::{DebitOutcome, LedgerRepository, RideRepository};
use gokids_booking::{default_packages, ConfirmationService, NewRide, Ride, TopUpService};
use gokids_core::parent::{Parent, ParentRepository};
use gokids_core::RepoError;
use gokids_fleet::{Driver, Vehicle, VehicleRepository};
use gokids_schedule::{DraftStore, ScheduleDraft};
use gokids_shared::pii::Masked;
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

const SECRET: &str = "test-secret";
const USER_ID: i64 = 1;

// ----------------------------------------------------------------------------
// In-memory backends
// ----------------------------------------------------------------------------

struct MemoryBackend {
    parent: Mutex<Parent>,
    vehicles: Vec<Vehicle>,
    rides: Mutex<Vec<Ride>>,
    draft: Mutex<Option<ScheduleDraft>>,
}

impl MemoryBackend {
    fn new(balance: i32) -> Self {
        let now = Utc::now();
        Self {
            parent: Mutex::new(Parent {
                user_id: USER_ID,
                name: "Jordan Weber".to_string(),
                age: 38,
                child_name: Masked::from("Emma".to_string()),
                child_age: 7,
                home_address: Masked::from("Hauptstrasse 12".to_string()),
                class_address: Masked::from("Schulweg 3".to_string()),
                note: 4.8,
                image_url: None,
                available_rides: balance,
                created_at: now,
                updated_at: now,
            }),
            vehicles: vec![Vehicle {
                id: Uuid::new_v4(),
                name: "Kids Van".to_string(),
                seats: 6,
                price: "2.50€ / ride".to_string(),
                driver: Driver {
                    id: Uuid::new_v4(),
                    name: "Maria".to_string(),
                    rating: 4.9,
                    bio: "Ten years of school runs.".to_string(),
                    image_url: None,
                },
            }],
            rides: Mutex::new(Vec::new()),
            draft: Mutex::new(None),
        }
    }
}

#[async_trait]
impl ParentRepository for MemoryBackend {
    async fn get_parent(&self, user_id: i64) -> Result<Option<Parent>, RepoError> {
        if user_id == USER_ID {
            Ok(Some(self.parent.lock().unwrap().clone()))
        } else {
            Ok(None)
        }
    }
}

#[async_trait]
impl LedgerRepository for MemoryBackend {
    async fn fetch_balance(&self, _user_id: i64) -> Result<Option<i32>, RepoError> {
        Ok(Some(self.parent.lock().unwrap().available_rides))
    }

    async fn debit(&self, _user_id: i64, amount: i32) -> Result<DebitOutcome, RepoError> {
        let mut parent = self.parent.lock().unwrap();
        if parent.available_rides < amount {
            return Ok(DebitOutcome::Insufficient {
                available: parent.available_rides,
            });
        }
        parent.available_rides -= amount;
        Ok(DebitOutcome::Applied {
            new_balance: parent.available_rides,
        })
    }

    async fn credit(&self, _user_id: i64, amount: i32) -> Result<i32, RepoError> {
        let mut parent = self.parent.lock().unwrap();
        parent.available_rides += amount;
        Ok(parent.available_rides)
    }
}

#[async_trait]
impl VehicleRepository for MemoryBackend {
    async fn list_vehicles(&self) -> Result<Vec<Vehicle>, RepoError> {
        Ok(self.vehicles.clone())
    }

    async fn get_vehicle(&self, vehicle_id: Uuid) -> Result<Option<Vehicle>, RepoError> {
        Ok(self.vehicles.iter().find(|v| v.id == vehicle_id).cloned())
    }

    async fn get_driver(&self, driver_id: Uuid) -> Result<Option<Driver>, RepoError> {
        Ok(self
            .vehicles
            .iter()
            .map(|v| v.driver.clone())
            .find(|d| d.id == driver_id))
    }
}

#[async_trait]
impl RideRepository for MemoryBackend {
    async fn insert_ride(&self, ride: &NewRide) -> Result<Ride, RepoError> {
        let mut rides = self.rides.lock().unwrap();
        let now = Utc::now();
        let persisted = Ride {
            id: rides.len() as i64 + 1,
            user_id: ride.user_id,
            vehicle_name: ride.vehicle_name.clone(),
            seats: ride.seats,
            price: ride.price.clone(),
            dates: ride.dates.clone(),
            pickup_address: ride.pickup_address.clone(),
            drop_address: ride.drop_address.clone(),
            driver_name: ride.driver_name.clone(),
            total_rides: ride.total_rides,
            created_at: now,
            updated_at: now,
        };
        rides.push(persisted.clone());
        Ok(persisted)
    }

    async fn list_rides(&self, user_id: i64) -> Result<Vec<Ride>, RepoError> {
        Ok(self
            .rides
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl DraftStore for MemoryBackend {
    async fn save(&self, _user_id: i64, draft: &ScheduleDraft) -> Result<(), RepoError> {
        *self.draft.lock().unwrap() = Some(draft.clone());
        Ok(())
    }

    async fn load(&self, _user_id: i64) -> Result<Option<ScheduleDraft>, RepoError> {
        Ok(self.draft.lock().unwrap().clone())
    }

    async fn clear(&self, _user_id: i64) -> Result<(), RepoError> {
        *self.draft.lock().unwrap() = None;
        Ok(())
    }
}

struct AllowAll;

#[async_trait]
impl RateLimiter for AllowAll {
    async fn check(&self, _key: &str, _limit: i64, _window_seconds: i64) -> Result<bool, RepoError> {
        Ok(true)
    }
}

// ----------------------------------------------------------------------------
// Harness
// ----------------------------------------------------------------------------

struct TestApp {
    router: Router,
    backend: Arc<MemoryBackend>,
}

fn test_app(balance: i32) -> TestApp {
    let backend = Arc::new(MemoryBackend::new(balance));

    let confirmation = Arc::new(ConfirmationService::new(
        backend.clone(),
        backend.clone(),
        backend.clone(),
    ));
    let wallet = Arc::new(TopUpService::new(backend.clone(), default_packages()));

    let state = AppState {
        parents: backend.clone(),
        ledger: backend.clone(),
        vehicles: backend.clone(),
        rides: backend.clone(),
        drafts: backend.clone(),
        confirmation,
        wallet,
        rate_limiter: Arc::new(AllowAll),
        auth: AuthConfig {
            secret: SECRET.to_string(),
            expiration: 3600,
        },
        rate_limit_per_minute: 1000,
        schedule_window_days: 14,
    };

    TestApp {
        router: app(state),
        backend,
    }
}

fn token_with_role(role: &str) -> String {
    let claims = ParentClaims {
        sub: USER_ID.to_string(),
        role: role.to_string(),
        exp: (Utc::now() + Duration::hours(1)).timestamp() as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

fn token() -> String {
    token_with_role(PARENT_ROLE)
}

fn request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token()))
        .header(header::CONTENT_TYPE, "application/json");
    match body {
        Some(v) => builder.body(Body::from(v.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn json_body(resp: axum::response::Response) -> Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn draft_payload(vehicle_id: Uuid) -> Value {
    json!({
        "vehicle_id": vehicle_id,
        "dates": [
            { "date": "2024-03-04", "morning": "07:30", "afternoon": "15:30" },
            { "date": "2024-03-05", "morning": "08:00" }
        ]
    })
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[tokio::test]
async fn protected_routes_reject_missing_token() {
    let t = test_app(5);
    let resp = t
        .router
        .oneshot(
            Request::builder()
                .uri("/v1/me")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wrong_role_is_forbidden() {
    let t = test_app(5);
    let resp = t
        .router
        .oneshot(
            Request::builder()
                .uri("/v1/me")
                .header(
                    header::AUTHORIZATION,
                    format!("Bearer {}", token_with_role("DRIVER")),
                )
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn me_returns_profile_with_balance() {
    let t = test_app(7);
    let resp = t
        .router
        .oneshot(request(Method::GET, "/v1/me", None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["available_rides"], 7);
    assert_eq!(body["name"], "Jordan Weber");
}

#[tokio::test]
async fn draft_roundtrip_and_confirm_happy_path() {
    let t = test_app(5);
    let vehicle_id = t.backend.vehicles[0].id;

    // Save the draft.
    let resp = t
        .router
        .clone()
        .oneshot(request(
            Method::PUT,
            "/v1/schedule/draft",
            Some(draft_payload(vehicle_id)),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["total_rides"], 3);

    // Overview pairs draft with balance.
    let resp = t
        .router
        .clone()
        .oneshot(request(Method::GET, "/v1/schedule/overview", None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["available_rides"], 5);
    assert_eq!(body["required_rides"], 3);

    // Confirm debits and records the ride.
    let resp = t
        .router
        .clone()
        .oneshot(request(Method::POST, "/v1/schedule/confirm", None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = json_body(resp).await;
    assert_eq!(body["remaining_credits"], 2);
    assert_eq!(body["ride"]["total_rides"], 3);
    assert_eq!(body["ride"]["vehicle_name"], "Kids Van");

    // History now shows the confirmed schedule.
    let resp = t
        .router
        .clone()
        .oneshot(request(Method::GET, "/v1/rides", None))
        .await
        .unwrap();
    let body = json_body(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    // The draft was consumed.
    let resp = t
        .router
        .oneshot(request(Method::GET, "/v1/schedule/draft", None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn insufficient_credit_returns_402_and_keeps_draft() {
    let t = test_app(2);
    let vehicle_id = t.backend.vehicles[0].id;

    let resp = t
        .router
        .clone()
        .oneshot(request(
            Method::PUT,
            "/v1/schedule/draft",
            Some(draft_payload(vehicle_id)),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = t
        .router
        .clone()
        .oneshot(request(Method::POST, "/v1/schedule/confirm", None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::PAYMENT_REQUIRED);

    // No writes happened: balance intact, draft survives for retry.
    assert_eq!(t.backend.parent.lock().unwrap().available_rides, 2);
    let resp = t
        .router
        .oneshot(request(Method::GET, "/v1/schedule/draft", None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn confirm_without_draft_is_404() {
    let t = test_app(5);
    let resp = t
        .router
        .oneshot(request(Method::POST, "/v1/schedule/confirm", None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_draft_discards_it() {
    let t = test_app(5);
    let vehicle_id = t.backend.vehicles[0].id;

    t.router
        .clone()
        .oneshot(request(
            Method::PUT,
            "/v1/schedule/draft",
            Some(draft_payload(vehicle_id)),
        ))
        .await
        .unwrap();

    let resp = t
        .router
        .clone()
        .oneshot(request(Method::DELETE, "/v1/schedule/draft", None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(t.backend.draft.lock().unwrap().is_none());
}

#[tokio::test]
async fn malformed_pickup_time_is_rejected() {
    let t = test_app(5);
    let vehicle_id = t.backend.vehicles[0].id;

    let resp = t
        .router
        .oneshot(request(
            Method::PUT,
            "/v1/schedule/draft",
            Some(json!({
                "vehicle_id": vehicle_id,
                "dates": [ { "date": "2024-03-04", "morning": "half past seven" } ]
            })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_vehicle_is_rejected() {
    let t = test_app(5);
    let resp = t
        .router
        .oneshot(request(
            Method::PUT,
            "/v1/schedule/draft",
            Some(draft_payload(Uuid::new_v4())),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn wallet_packages_and_top_up() {
    let t = test_app(2);

    let resp = t
        .router
        .clone()
        .oneshot(request(Method::GET, "/v1/wallet/packages", None))
        .await
        .unwrap();
    let body = json_body(resp).await;
    let packages = body.as_array().unwrap();
    assert_eq!(packages.len(), 2);
    assert_eq!(packages[0]["rides"], 10);
    assert_eq!(packages[0]["price_cents"], 5000);

    let resp = t
        .router
        .clone()
        .oneshot(request(
            Method::POST,
            "/v1/wallet/topup",
            Some(json!({ "rides": 10 })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["available_rides"], 12);

    // Unknown package leaves the balance untouched.
    let resp = t
        .router
        .oneshot(request(
            Method::POST,
            "/v1/wallet/topup",
            Some(json!({ "rides": 7 })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(t.backend.parent.lock().unwrap().available_rides, 12);
}

#[tokio::test]
async fn vehicles_and_driver_lookup() {
    let t = test_app(5);
    let driver_id = t.backend.vehicles[0].driver.id;

    let resp = t
        .router
        .clone()
        .oneshot(request(Method::GET, "/v1/vehicles", None))
        .await
        .unwrap();
    let body = json_body(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let resp = t
        .router
        .clone()
        .oneshot(request(Method::GET, &format!("/v1/drivers/{}", driver_id), None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["name"], "Maria");

    let resp = t
        .router
        .oneshot(request(
            Method::GET,
            &format!("/v1/drivers/{}", Uuid::new_v4()),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn calendar_window_pages_by_whole_windows() {
    let t = test_app(5);

    let resp = t
        .router
        .oneshot(request(
            Method::GET,
            "/v1/schedule/calendar?start=2024-03-04",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["days"], 14);
    assert_eq!(body["dates"].as_array().unwrap().len(), 14);
    assert_eq!(body["dates"][0], "2024-03-04");
    assert_eq!(body["next_start"], "2024-03-18");
    assert_eq!(body["prev_start"], "2024-02-19");
}

#[tokio::test]
async fn token_issuance_then_protected_access() {
    let t = test_app(5);

    let resp = t
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/v1/auth/token")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({ "user_id": USER_ID }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    let issued = body["token"].as_str().unwrap().to_string();

    let resp = t
        .router
        .oneshot(
            Request::builder()
                .uri("/v1/me")
                .header(header::AUTHORIZATION, format!("Bearer {}", issued))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}
