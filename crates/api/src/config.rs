use std::time::Duration;

use petcare_core::adoption::HoldPolicy;

use crate::auth::jwt::JwtConfig;
use crate::payments::PaymentConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long to wait for background tasks after the server stops (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Upper bound on a single adoption store call in milliseconds (default: `5000`).
    pub store_timeout_ms: u64,
    /// When a pet stops being listed (default: `on_submit`).
    pub hold_policy: HoldPolicy,
    /// Availability reconciliation interval in seconds; `0` disables the job
    /// (default: `300`).
    pub reconcile_interval_secs: u64,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Payment provider configuration.
    pub payment: PaymentConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                    |
    /// |--------------------------|----------------------------|
    /// | `HOST`                   | `0.0.0.0`                  |
    /// | `PORT`                   | `5000`                     |
    /// | `CORS_ORIGINS`           | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`  | `30`                       |
    /// | `STORE_TIMEOUT_MS`       | `5000`                     |
    /// | `ADOPTION_HOLD_POLICY`   | `on_submit`                |
    /// | `RECONCILE_INTERVAL_SECS`| `300`                      |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let store_timeout_ms: u64 = std::env::var("STORE_TIMEOUT_MS")
            .unwrap_or_else(|_| "5000".into())
            .parse()
            .expect("STORE_TIMEOUT_MS must be a valid u64");

        let hold_policy: HoldPolicy = std::env::var("ADOPTION_HOLD_POLICY")
            .unwrap_or_else(|_| HoldPolicy::default().as_str().into())
            .parse()
            .unwrap_or_else(|e| panic!("ADOPTION_HOLD_POLICY: {e}"));

        let reconcile_interval_secs: u64 = std::env::var("RECONCILE_INTERVAL_SECS")
            .unwrap_or_else(|_| "300".into())
            .parse()
            .expect("RECONCILE_INTERVAL_SECS must be a valid u64");

        let jwt = JwtConfig::from_env();
        let payment = PaymentConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            store_timeout_ms,
            hold_policy,
            reconcile_interval_secs,
            jwt,
            payment,
        }
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}
