//! Payment intent seam.
//!
//! Payment processing is delegated to an external provider. The platform
//! only converts a price to minor units, asks the provider for an intent, and
//! hands the returned client secret to the browser.

use async_trait::async_trait;

/// Largest price accepted for a single payment intent, in major units.
pub const MAX_PRICE: f64 = 1_000_000.0;

/// A provider-side payment intent.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
    pub amount_cents: i64,
    pub currency: String,
}

#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Payment provider request failed: {0}")]
    Provider(String),

    #[error("Payment provider returned an unexpected response: {0}")]
    UnexpectedResponse(String),
}

/// Creates payment intents with an external payment provider.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    async fn create_intent(
        &self,
        amount_cents: i64,
        currency: &str,
    ) -> Result<PaymentIntent, PaymentError>;
}

/// Convert a decimal price to integer minor units, rounding half away from
/// zero.
///
/// # Examples
///
/// ```
/// use petcare_core::payments::to_minor_units;
/// assert_eq!(to_minor_units(12.5).unwrap(), 1250);
/// assert_eq!(to_minor_units(19.99).unwrap(), 1999);
/// assert!(to_minor_units(0.0).is_err());
/// ```
pub fn to_minor_units(price: f64) -> Result<i64, PaymentError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(PaymentError::InvalidAmount(format!(
            "price must be a positive number, got {price}"
        )));
    }
    if price > MAX_PRICE {
        return Err(PaymentError::InvalidAmount(format!(
            "price must not exceed {MAX_PRICE}"
        )));
    }
    let cents = (price * 100.0).round() as i64;
    if cents < 1 {
        return Err(PaymentError::InvalidAmount(format!(
            "price {price} is below the smallest currency unit"
        )));
    }
    Ok(cents)
}
