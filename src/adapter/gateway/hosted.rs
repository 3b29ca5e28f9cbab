use crate::{
    domain::{CheckoutError, LoyaltyError},
    port::{PaymentGateway, PaymentSession, PaymentSessionRequest},
};
use async_trait::async_trait;
use serde_json::{Value, json};

/// Client for a hosted-payment-pages gateway.
///
/// The gateway hosts the card form; this client only creates a session for
/// an amount in minor units and hands back the page URL. Card data never
/// touches this process.
pub struct HostedPaymentGateway {
    client: reqwest::Client,
    base_url: String,
    merchant_entity: String,
    username: String,
    password: String,
    narrative: String,
}

impl HostedPaymentGateway {
    pub fn new(
        base_url: String,
        merchant_entity: String,
        username: String,
        password: String,
        narrative: String,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            merchant_entity,
            username,
            password,
            narrative,
        }
    }

    fn session_failed(detail: impl Into<String>) -> LoyaltyError {
        LoyaltyError::Checkout(CheckoutError::PaymentSessionCreationFailed(detail.into()))
    }
}

#[async_trait]
impl PaymentGateway for HostedPaymentGateway {
    async fn create_hosted_session(
        &self,
        request: PaymentSessionRequest,
    ) -> Result<PaymentSession, LoyaltyError> {
        let body = json!({
            "transactionReference": request.transaction_reference,
            "merchant": { "entity": self.merchant_entity },
            "narrative": { "line1": self.narrative },
            "value": {
                "currency": request.currency,
                "amount": request.amount_minor,
            },
            "resultURLs": {
                "successURL": request.return_urls.success,
                "failureURL": request.return_urls.failure,
                "cancelURL": request.return_urls.cancel,
                "pendingURL": request.return_urls.pending,
                "errorURL": request.return_urls.error,
            },
        });

        let response = self
            .client
            .post(format!("{}/payment_pages", self.base_url))
            .basic_auth(&self.username, Some(&self.password))
            .json(&body)
            .send()
            .await
            .map_err(|e| Self::session_failed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(Self::session_failed(format!("{}: {}", status, detail)));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| Self::session_failed(e.to_string()))?;

        // The page URL has moved between response versions; accept any of
        // the shapes the gateway has used.
        let payment_url = payload
            .get("url")
            .or_else(|| payload.pointer("/_links/hpp:redirect/href"))
            .or_else(|| payload.pointer("/_links/redirect/href"))
            .and_then(Value::as_str)
            .ok_or_else(|| Self::session_failed("no payment URL in gateway response"))?;

        Ok(PaymentSession {
            payment_url: payment_url.to_string(),
            transaction_reference: request.transaction_reference,
        })
    }
}
