//! Payment provider integration.
//!
//! - [`stripe`] -- the production [`PaymentProvider`] backed by Stripe's
//!   payment intents API.
//!
//! [`PaymentProvider`]: petcare_core::payments::PaymentProvider

pub mod stripe;

/// Default provider API base URL.
const DEFAULT_API_BASE: &str = "https://api.stripe.com";

/// Default settlement currency (ISO 4217, lowercase as the provider expects).
const DEFAULT_CURRENCY: &str = "usd";

/// Payment provider configuration.
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    /// Secret API key. Empty disables intent creation.
    pub secret_key: String,
    /// Provider API base URL, overridable for a local mock.
    pub api_base: String,
    /// Currency for every intent.
    pub currency: String,
}

impl PaymentConfig {
    /// Load payment configuration from environment variables.
    ///
    /// | Env Var             | Default                  |
    /// |---------------------|--------------------------|
    /// | `STRIPE_SECRET_KEY` | empty (payments disabled)|
    /// | `STRIPE_API_BASE`   | `https://api.stripe.com` |
    /// | `PAYMENT_CURRENCY`  | `usd`                    |
    pub fn from_env() -> Self {
        let secret_key = std::env::var("STRIPE_SECRET_KEY").unwrap_or_default();
        if secret_key.is_empty() {
            tracing::warn!("STRIPE_SECRET_KEY not set, payment intents will fail");
        }

        let api_base = std::env::var("STRIPE_API_BASE")
            .unwrap_or_else(|_| DEFAULT_API_BASE.into())
            .trim_end_matches('/')
            .to_string();

        let currency = std::env::var("PAYMENT_CURRENCY")
            .unwrap_or_else(|_| DEFAULT_CURRENCY.into())
            .trim()
            .to_lowercase();

        Self {
            secret_key,
            api_base,
            currency,
        }
    }
}
