use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};
use uuid::Uuid;

/// Service configuration, loaded from the environment with logged defaults.
pub struct Config {
    pub port: u16,
    pub currency: String,
    /// Base URL of the customer-facing app, used to build the gateway's
    /// result URLs.
    pub app_url: String,
    pub gateway_url: String,
    pub gateway_entity: String,
    pub gateway_username: String,
    pub gateway_password: String,
    pub narrative: String,
    /// Optional fixed identity for single-user demo deployments. Production
    /// wires a real identity provider instead.
    pub demo_user: Option<Uuid>,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("LOYALTY_PORT", "8080"),
            currency: try_load("LOYALTY_CURRENCY", "GBP"),
            app_url: try_load("APP_URL", "http://localhost:5173"),
            gateway_url: try_load("GATEWAY_URL", "https://try.access.worldpay.com"),
            gateway_entity: try_load("GATEWAY_MERCHANT_ENTITY", "default"),
            gateway_username: try_load("GATEWAY_USERNAME", ""),
            gateway_password: try_load("GATEWAY_PASSWORD", ""),
            narrative: try_load("LOYALTY_NARRATIVE", "Cafe order"),
            demo_user: env::var("DEMO_USER")
                .ok()
                .and_then(|raw| match raw.parse() {
                    Ok(id) => Some(id),
                    Err(e) => {
                        warn!("Invalid DEMO_USER value: {e}");
                        None
                    }
                }),
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}
