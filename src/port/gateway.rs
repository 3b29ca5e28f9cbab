use crate::domain::LoyaltyError;
use async_trait::async_trait;
use uuid::Uuid;

/// Where the gateway sends the user after the hosted page, one URL per
/// outcome. All of them land on the payment redirect route with the order id
/// attached.
#[derive(Debug, Clone)]
pub struct ReturnUrls {
    pub success: String,
    pub failure: String,
    pub cancel: String,
    pub pending: String,
    pub error: String,
}

impl ReturnUrls {
    pub fn for_order(app_url: &str, order_id: Uuid) -> Self {
        let base = app_url.trim_end_matches('/');
        let url = |outcome: &str| format!("{}/payment/{}?order={}", base, outcome, order_id);
        Self {
            success: url("success"),
            failure: url("failure"),
            cancel: url("cancel"),
            pending: url("pending"),
            error: url("error"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PaymentSessionRequest {
    pub order_id: Uuid,
    pub amount_minor: u64,
    pub currency: String,
    pub transaction_reference: String,
    pub return_urls: ReturnUrls,
}

/// Reference to a gateway-hosted checkout page. The core never sees card
/// data, only the redirect URL and the reference it can later correlate
/// webhooks with.
#[derive(Debug, Clone)]
pub struct PaymentSession {
    pub payment_url: String,
    pub transaction_reference: String,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_hosted_session(
        &self,
        request: PaymentSessionRequest,
    ) -> Result<PaymentSession, LoyaltyError>;
}
