use crate::{
    domain::{CheckoutError, LoyaltyError},
    port::{PaymentGateway, PaymentSession, PaymentSessionRequest},
};
use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// Scriptable gateway double. Succeeds by default, returning a fake hosted
/// page URL; can be told to fail to exercise the compensating-rollback path.
pub struct MockPaymentGateway {
    fail: AtomicBool,
    requests: Mutex<Vec<PaymentSessionRequest>>,
}

impl MockPaymentGateway {
    pub fn new() -> Self {
        Self {
            fail: AtomicBool::new(false),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Every session request seen so far, in order.
    pub fn requests(&self) -> Vec<PaymentSessionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockPaymentGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_hosted_session(
        &self,
        request: PaymentSessionRequest,
    ) -> Result<PaymentSession, LoyaltyError> {
        self.requests.lock().unwrap().push(request.clone());

        if self.fail.load(Ordering::SeqCst) {
            return Err(LoyaltyError::Checkout(
                CheckoutError::PaymentSessionCreationFailed("gateway unavailable".to_string()),
            ));
        }

        Ok(PaymentSession {
            payment_url: format!("https://pay.example/{}", request.transaction_reference),
            transaction_reference: request.transaction_reference,
        })
    }
}
