use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// State-conflict failures raised by the reward state machine. Each one means
/// the caller validated against a ledger snapshot that no longer holds; the
/// remedy is to re-fetch and possibly retry once, never to force the write.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum RewardError {
    #[error("A reward is already pending - redeem it before earning more stamps")]
    RewardAlreadyPending,
    #[error("No pending reward to redeem")]
    NoRewardToRedeem,
    #[error("Ledger already holds the maximum number of stamps")]
    AlreadyAtMax,
    #[error("Stamp count must be positive")]
    InvalidStampCount,
}

#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum EngineError {
    #[error("Mailbox error: {0}")]
    MailboxError(String),
    #[error("No events produced by command handler")]
    NoEvents,
    #[error("State transition failed - event could not be applied")]
    StateTransitionFailed,
    #[error("Store error: {0}")]
    StoreError(String),
}

/// Failures of the order submission and settlement paths.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum CheckoutError {
    #[error("Cart is empty")]
    EmptyCart,
    #[error("Order notes exceed {0} characters")]
    NotesTooLong(usize),
    #[error("Not authenticated")]
    NotAuthenticated,
    #[error("Order does not belong to user")]
    AccessDenied,
    #[error("Order not found")]
    OrderNotFound,
    #[error("Malformed transaction reference")]
    InvalidTransactionReference,
    #[error("Failed to create hosted payment session: {0}")]
    PaymentSessionCreationFailed(String),
}

#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum ScanError {
    #[error("Identifier is not a valid scan payload")]
    InvalidIdentifierFormat,
}

#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum LoyaltyError {
    Reward(RewardError),
    Engine(EngineError),
    Checkout(CheckoutError),
    Scan(ScanError),
}

impl Display for LoyaltyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LoyaltyError::Reward(e) => e.fmt(f),
            LoyaltyError::Engine(e) => e.fmt(f),
            LoyaltyError::Checkout(e) => e.fmt(f),
            LoyaltyError::Scan(e) => e.fmt(f),
        }
    }
}

impl From<RewardError> for LoyaltyError {
    fn from(e: RewardError) -> Self {
        LoyaltyError::Reward(e)
    }
}

impl From<EngineError> for LoyaltyError {
    fn from(e: EngineError) -> Self {
        LoyaltyError::Engine(e)
    }
}

impl From<CheckoutError> for LoyaltyError {
    fn from(e: CheckoutError) -> Self {
        LoyaltyError::Checkout(e)
    }
}

impl From<ScanError> for LoyaltyError {
    fn from(e: ScanError) -> Self {
        LoyaltyError::Scan(e)
    }
}
