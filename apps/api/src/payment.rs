//! Stripe adapter — the single point of entry for all payment-processor calls.
//!
//! Two responsibilities: creating payment intents for the fixed upgrade price,
//! and verifying webhook signatures so the premium flag can only be flipped by
//! a confirmation that actually came from the processor. The success redirect
//! is never trusted.

use hmac::{Hmac, Mac};
use reqwest::Client;
use serde::Deserialize;
use sha2::Sha256;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

const STRIPE_API_URL: &str = "https://api.stripe.com/v1";

/// Fixed upgrade price: ₹49 in paisa.
pub const UPGRADE_AMOUNT: u32 = 4900;
pub const UPGRADE_CURRENCY: &str = "inr";

/// Maximum allowed age of a webhook signature timestamp, in seconds.
const SIGNATURE_TOLERANCE_SECS: i64 = 300;

#[derive(Debug, Error)]
pub enum StripeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Stripe API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

#[derive(Debug, Error, PartialEq)]
pub enum SignatureError {
    #[error("Malformed signature header")]
    MalformedHeader,

    #[error("Signature timestamp outside tolerance")]
    Expired,

    #[error("Signature mismatch")]
    Mismatch,
}

#[derive(Debug, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
}

#[derive(Debug, Deserialize)]
struct StripeApiError {
    error: StripeApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct StripeApiErrorBody {
    message: String,
}

/// Webhook event payload, narrowed to the fields this service reads.
#[derive(Debug, Deserialize)]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: WebhookEventData,
}

#[derive(Debug, Deserialize)]
pub struct WebhookEventData {
    pub object: WebhookObject,
}

#[derive(Debug, Deserialize)]
pub struct WebhookObject {
    #[serde(default)]
    pub metadata: WebhookMetadata,
}

#[derive(Debug, Default, Deserialize)]
pub struct WebhookMetadata {
    pub account_id: Option<Uuid>,
}

#[derive(Clone)]
pub struct StripeClient {
    client: Client,
    secret_key: String,
}

impl StripeClient {
    pub fn new(secret_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            secret_key,
        }
    }

    /// Creates a payment intent for the fixed upgrade amount, tagging it with
    /// the paying account so the webhook can attribute the confirmation.
    pub async fn create_payment_intent(
        &self,
        account_id: Uuid,
    ) -> Result<PaymentIntent, StripeError> {
        let params = [
            ("amount", UPGRADE_AMOUNT.to_string()),
            ("currency", UPGRADE_CURRENCY.to_string()),
            ("metadata[account_id]", account_id.to_string()),
        ];

        let response = self
            .client
            .post(format!("{STRIPE_API_URL}/payment_intents"))
            .bearer_auth(&self.secret_key)
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<StripeApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(StripeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let intent: PaymentIntent = response.json().await?;
        debug!("Created payment intent {}", intent.id);
        Ok(intent)
    }
}

/// Verifies a `Stripe-Signature` header (`t=<unix>,v1=<hex>`) against the raw
/// request body. The signed payload is `"{t}.{body}"`, HMAC-SHA256 with the
/// endpoint's webhook secret; comparison happens inside `Mac::verify_slice`.
pub fn verify_webhook_signature(
    payload: &[u8],
    signature_header: &str,
    webhook_secret: &str,
    now_unix: i64,
) -> Result<(), SignatureError> {
    let mut timestamp: Option<i64> = None;
    let mut candidate: Option<Vec<u8>> = None;

    for part in signature_header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", v)) => timestamp = v.parse().ok(),
            Some(("v1", v)) => candidate = hex::decode(v).ok(),
            _ => {}
        }
    }

    let timestamp = timestamp.ok_or(SignatureError::MalformedHeader)?;
    let candidate = candidate.ok_or(SignatureError::MalformedHeader)?;

    if (now_unix - timestamp).abs() > SIGNATURE_TOLERANCE_SECS {
        return Err(SignatureError::Expired);
    }

    let mut mac = Hmac::<Sha256>::new_from_slice(webhook_secret.as_bytes())
        .map_err(|_| SignatureError::MalformedHeader)?;
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    mac.verify_slice(&candidate)
        .map_err(|_| SignatureError::Mismatch)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "whsec_test_secret";

    fn sign(payload: &[u8], timestamp: i64, secret: &str) -> String {
        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(format!("{timestamp}.").as_bytes());
        mac.update(payload);
        let sig = hex::encode(mac.finalize().into_bytes());
        format!("t={timestamp},v1={sig}")
    }

    #[test]
    fn test_valid_signature_verifies() {
        let payload = br#"{"type":"payment_intent.succeeded"}"#;
        let header = sign(payload, 1_700_000_000, SECRET);
        assert!(verify_webhook_signature(payload, &header, SECRET, 1_700_000_000).is_ok());
    }

    #[test]
    fn test_tampered_payload_fails() {
        let header = sign(b"original", 1_700_000_000, SECRET);
        let result = verify_webhook_signature(b"tampered", &header, SECRET, 1_700_000_000);
        assert_eq!(result.unwrap_err(), SignatureError::Mismatch);
    }

    #[test]
    fn test_wrong_secret_fails() {
        let payload = b"payload";
        let header = sign(payload, 1_700_000_000, "whsec_other");
        let result = verify_webhook_signature(payload, &header, SECRET, 1_700_000_000);
        assert_eq!(result.unwrap_err(), SignatureError::Mismatch);
    }

    #[test]
    fn test_stale_timestamp_fails() {
        let payload = b"payload";
        let header = sign(payload, 1_700_000_000, SECRET);
        let result =
            verify_webhook_signature(payload, &header, SECRET, 1_700_000_000 + 301);
        assert_eq!(result.unwrap_err(), SignatureError::Expired);
    }

    #[test]
    fn test_malformed_header_fails() {
        for header in ["", "t=abc,v1=zz", "v1=deadbeef", "t=1700000000"] {
            let result = verify_webhook_signature(b"p", header, SECRET, 1_700_000_000);
            assert_eq!(result.unwrap_err(), SignatureError::MalformedHeader);
        }
    }

    #[test]
    fn test_event_payload_deserializes() {
        let event: WebhookEvent = serde_json::from_str(
            r#"{
                "type": "payment_intent.succeeded",
                "data": {
                    "object": {
                        "metadata": {"account_id": "7f1b6f3e-9a07-4b43-a7a6-2a1c2a4ab0aa"}
                    }
                }
            }"#,
        )
        .unwrap();
        assert_eq!(event.event_type, "payment_intent.succeeded");
        assert!(event.data.object.metadata.account_id.is_some());
    }

    #[test]
    fn test_event_without_metadata_deserializes() {
        let event: WebhookEvent =
            serde_json::from_str(r#"{"type":"charge.refunded","data":{"object":{}}}"#).unwrap();
        assert!(event.data.object.metadata.account_id.is_none());
    }
}
