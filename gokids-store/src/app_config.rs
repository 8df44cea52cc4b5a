use gokids_booking::CreditPackage;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub auth: AuthConfig,
    pub business_rules: BusinessRules,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BusinessRules {
    /// Length of the visible date-picker window, in days.
    #[serde(default = "default_window_days")]
    pub schedule_window_days: u32,
    /// How long an unconfirmed draft survives in the transient store.
    pub draft_ttl_seconds: u64,
    pub rate_limit_per_minute: i64,
    pub credit_packages: Vec<CreditPackageRule>,
}

fn default_window_days() -> u32 {
    14
}

#[derive(Debug, Deserialize, Clone)]
pub struct CreditPackageRule {
    pub rides: i32,
    pub price_cents: i64,
    pub description: String,
}

impl BusinessRules {
    pub fn credit_packages(&self) -> Vec<CreditPackage> {
        if self.credit_packages.is_empty() {
            return gokids_booking::default_packages();
        }
        self.credit_packages
            .iter()
            .map(|p| CreditPackage {
                rides: p.rides,
                price_cents: p.price_cents,
                description: p.description.clone(),
            })
            .collect()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_expiration_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RedisConfig {
    pub url: String,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Environment-specific overrides are optional.
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in.
            .add_source(config::File::with_name("config/local").required(false))
            // GOKIDS__SERVER__PORT=8080 style environment overrides.
            .add_source(config::Environment::with_prefix("GOKIDS").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
