//! Minimal Stripe Checkout client and webhook signature verification.
//!
//! Talks to the Stripe REST API directly over `reqwest` with form-encoded
//! bodies. Only the two calls the donation flow needs are implemented:
//! creating a Checkout Session and verifying `Stripe-Signature` headers on
//! incoming webhook events.

use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Stripe configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct StripeConfig {
    /// Secret API key (`sk_...`).
    pub secret_key: String,
    /// Webhook signing secret (`whsec_...`).
    pub webhook_secret: String,
    /// URL the customer is redirected to after a successful payment.
    pub success_url: String,
    /// URL the customer is redirected to after cancelling.
    pub cancel_url: String,
    /// Stripe API base URL. Overridable so tests can point at a mock server.
    pub api_base: String,
}

impl StripeConfig {
    /// Load Stripe configuration from environment variables.
    ///
    /// | Env Var                 | Required | Default                                  |
    /// |-------------------------|----------|------------------------------------------|
    /// | `STRIPE_SECRET_KEY`     | **yes**  | --                                       |
    /// | `STRIPE_WEBHOOK_SECRET` | **yes**  | --                                       |
    /// | `STRIPE_SUCCESS_URL`    | no       | `http://localhost:5173/donation/success` |
    /// | `STRIPE_CANCEL_URL`     | no       | `http://localhost:5173/donation/cancel`  |
    /// | `STRIPE_API_BASE`       | no       | `https://api.stripe.com`                 |
    ///
    /// # Panics
    ///
    /// Panics if a required variable is not set.
    pub fn from_env() -> Self {
        let secret_key = std::env::var("STRIPE_SECRET_KEY")
            .expect("STRIPE_SECRET_KEY must be set in the environment");
        let webhook_secret = std::env::var("STRIPE_WEBHOOK_SECRET")
            .expect("STRIPE_WEBHOOK_SECRET must be set in the environment");
        let success_url = std::env::var("STRIPE_SUCCESS_URL")
            .unwrap_or_else(|_| "http://localhost:5173/donation/success".into());
        let cancel_url = std::env::var("STRIPE_CANCEL_URL")
            .unwrap_or_else(|_| "http://localhost:5173/donation/cancel".into());
        let api_base =
            std::env::var("STRIPE_API_BASE").unwrap_or_else(|_| "https://api.stripe.com".into());

        Self {
            secret_key,
            webhook_secret,
            success_url,
            cancel_url,
            api_base,
        }
    }
}

/// Errors produced by Stripe API calls and webhook verification.
#[derive(Debug, thiserror::Error)]
pub enum StripeError {
    #[error("stripe request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("stripe returned an error: {0}")]
    Api(String),

    #[error("invalid webhook signature")]
    InvalidSignature,

    #[error("malformed signature header")]
    MalformedHeader,
}

/// A created Checkout Session, as returned by the Stripe API.
#[derive(Debug, Deserialize)]
pub struct CheckoutSession {
    /// Stripe session id (`cs_...`).
    pub id: String,
    /// Hosted payment page URL the client should redirect to.
    pub url: String,
}

/// Thin client over the Stripe Checkout Sessions API.
pub struct StripeClient {
    http: reqwest::Client,
    config: StripeConfig,
}

impl StripeClient {
    pub fn new(config: StripeConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Create a Checkout Session for a one-time or recurring donation.
    ///
    /// `mode` is `"payment"` for one-time donations or `"subscription"` for
    /// monthly ones. The session id is stored locally so the completion
    /// webhook can be matched back to the pending donation record.
    pub async fn create_checkout_session(
        &self,
        amount_cents: i64,
        mode: &str,
        tier_name: &str,
    ) -> Result<CheckoutSession, StripeError> {
        let amount = amount_cents.to_string();
        let product_name = format!("Sephirots {tier_name} Donation");

        let mut form: Vec<(&str, &str)> = vec![
            ("mode", mode),
            ("success_url", &self.config.success_url),
            ("cancel_url", &self.config.cancel_url),
            ("line_items[0][quantity]", "1"),
            ("line_items[0][price_data][currency]", "usd"),
            ("line_items[0][price_data][unit_amount]", &amount),
            ("line_items[0][price_data][product_data][name]", &product_name),
        ];
        if mode == "subscription" {
            form.push(("line_items[0][price_data][recurring][interval]", "month"));
        }

        let response = self
            .http
            .post(format!("{}/v1/checkout/sessions", self.config.api_base))
            .basic_auth(&self.config.secret_key, None::<&str>)
            .form(&form)
            .send()
            .await?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StripeError::Api(body));
        }

        Ok(response.json::<CheckoutSession>().await?)
    }

    /// Verify a `Stripe-Signature` header against the raw webhook payload.
    ///
    /// The header carries `t=<timestamp>,v1=<hex hmac>` pairs; the signed
    /// content is `"{timestamp}.{payload}"` keyed with the webhook secret.
    pub fn verify_webhook_signature(
        &self,
        payload: &[u8],
        signature_header: &str,
    ) -> Result<(), StripeError> {
        let mut timestamp: Option<&str> = None;
        let mut signatures: Vec<&str> = Vec::new();

        for part in signature_header.split(',') {
            match part.trim().split_once('=') {
                Some(("t", value)) => timestamp = Some(value),
                Some(("v1", value)) => signatures.push(value),
                _ => {}
            }
        }

        let timestamp = timestamp.ok_or(StripeError::MalformedHeader)?;
        if signatures.is_empty() {
            return Err(StripeError::MalformedHeader);
        }

        let mut mac = HmacSha256::new_from_slice(self.config.webhook_secret.as_bytes())
            .map_err(|_| StripeError::MalformedHeader)?;
        mac.update(timestamp.as_bytes());
        mac.update(b".");
        mac.update(payload);
        let expected = hex::encode(mac.finalize().into_bytes());

        if signatures.iter().any(|sig| *sig == expected) {
            Ok(())
        } else {
            Err(StripeError::InvalidSignature)
        }
    }
}

/// The subset of a webhook event the donation flow cares about.
#[derive(Debug, Deserialize)]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: WebhookEventData,
}

#[derive(Debug, Deserialize)]
pub struct WebhookEventData {
    pub object: WebhookSession,
}

#[derive(Debug, Deserialize)]
pub struct WebhookSession {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn test_client() -> StripeClient {
        StripeClient::new(StripeConfig {
            secret_key: "sk_test_123".into(),
            webhook_secret: "whsec_test".into(),
            success_url: "http://localhost/success".into(),
            cancel_url: "http://localhost/cancel".into(),
            api_base: "http://localhost:12111".into(),
        })
    }

    fn sign(secret: &str, timestamp: &str, payload: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(timestamp.as_bytes());
        mac.update(b".");
        mac.update(payload);
        hex::encode(mac.finalize().into_bytes())
    }

    #[test]
    fn valid_signature_accepted() {
        let client = test_client();
        let payload = br#"{"type":"checkout.session.completed"}"#;
        let sig = sign("whsec_test", "1700000000", payload);
        let header = format!("t=1700000000,v1={sig}");
        assert!(client.verify_webhook_signature(payload, &header).is_ok());
    }

    #[test]
    fn tampered_payload_rejected() {
        let client = test_client();
        let payload = br#"{"type":"checkout.session.completed"}"#;
        let sig = sign("whsec_test", "1700000000", payload);
        let header = format!("t=1700000000,v1={sig}");
        let result = client.verify_webhook_signature(b"{\"type\":\"evil\"}", &header);
        assert_matches!(result, Err(StripeError::InvalidSignature));
    }

    #[test]
    fn missing_timestamp_rejected() {
        let client = test_client();
        let result = client.verify_webhook_signature(b"{}", "v1=deadbeef");
        assert_matches!(result, Err(StripeError::MalformedHeader));
    }
}
