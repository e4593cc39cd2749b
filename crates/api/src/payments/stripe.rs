//! Stripe payment intents client.

use async_trait::async_trait;
use petcare_core::payments::{PaymentError, PaymentIntent, PaymentProvider};
use serde::Deserialize;

use super::PaymentConfig;

/// The subset of Stripe's payment intent object we read back.
#[derive(Debug, Deserialize)]
struct IntentResponse {
    id: String,
    client_secret: Option<String>,
}

/// Creates payment intents through `POST {api_base}/v1/payment_intents`.
#[derive(Clone)]
pub struct StripeProvider {
    client: reqwest::Client,
    api_base: String,
    secret_key: String,
}

impl StripeProvider {
    pub fn new(config: &PaymentConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            secret_key: config.secret_key.clone(),
        }
    }
}

#[async_trait]
impl PaymentProvider for StripeProvider {
    async fn create_intent(
        &self,
        amount_cents: i64,
        currency: &str,
    ) -> Result<PaymentIntent, PaymentError> {
        if self.secret_key.is_empty() {
            return Err(PaymentError::Provider("payment provider is not configured".into()));
        }

        let url = format!("{}/v1/payment_intents", self.api_base);
        let params = [
            ("amount", amount_cents.to_string()),
            ("currency", currency.to_string()),
            ("payment_method_types[]", "card".to_string()),
        ];

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.secret_key)
            .form(&params)
            .send()
            .await
            .map_err(|e| PaymentError::Provider(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, body = %body, "Payment intent request rejected");
            return Err(PaymentError::Provider(format!("provider returned {status}")));
        }

        let intent: IntentResponse = response
            .json()
            .await
            .map_err(|e| PaymentError::UnexpectedResponse(e.to_string()))?;
        let client_secret = intent
            .client_secret
            .ok_or_else(|| PaymentError::UnexpectedResponse("missing client_secret".into()))?;

        tracing::info!(intent_id = %intent.id, amount_cents, "Payment intent created");

        Ok(PaymentIntent {
            id: intent.id,
            client_secret,
            amount_cents,
            currency: currency.to_string(),
        })
    }
}
