use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::domain::{CheckoutError, LoyaltyError};

/// HTTP-facing wrapper mapping core failures onto status codes.
pub struct AppError(pub LoyaltyError);

impl From<LoyaltyError> for AppError {
    fn from(e: LoyaltyError) -> Self {
        Self(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            LoyaltyError::Checkout(e) => match e {
                CheckoutError::EmptyCart
                | CheckoutError::NotesTooLong(_)
                | CheckoutError::InvalidTransactionReference => StatusCode::BAD_REQUEST,
                CheckoutError::NotAuthenticated => StatusCode::UNAUTHORIZED,
                CheckoutError::AccessDenied => StatusCode::FORBIDDEN,
                CheckoutError::OrderNotFound => StatusCode::NOT_FOUND,
                CheckoutError::PaymentSessionCreationFailed(_) => StatusCode::BAD_GATEWAY,
            },
            // Stale ledger snapshot: the caller should re-fetch and retry.
            LoyaltyError::Reward(_) => StatusCode::CONFLICT,
            LoyaltyError::Scan(_) => StatusCode::BAD_REQUEST,
            LoyaltyError::Engine(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
