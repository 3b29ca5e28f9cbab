use crate::domain::*;
use crate::port::TransactionLog;
use async_trait::async_trait;
use std::sync::Arc;

/// Context provided to event callbacks
pub struct CallbackContext {
    /// The transaction log - for infrastructure callbacks that need to read back
    pub log: Arc<dyn TransactionLog + Send + Sync>,
    /// The persisted event envelope (includes sequence number, timestamp, etc.)
    pub envelope: EventEnvelope,
}

/// Infrastructure callbacks invoked after events are persisted
///
/// Implementations can maintain indices, markers, or other infrastructure
/// concerns. These are called by the Engine after successful event
/// persistence, before the event is applied to state.
#[async_trait]
pub trait EventCallback: Send + Sync {
    /// Called after a StampEarned event is persisted
    async fn on_stamp_earned(
        &self,
        event: &StampEarned,
        ctx: &CallbackContext,
    ) -> Result<(), LoyaltyError> {
        let _ = (event, ctx);
        Ok(())
    }

    /// Called after a RewardEarned event is persisted
    async fn on_reward_earned(
        &self,
        event: &RewardEarned,
        ctx: &CallbackContext,
    ) -> Result<(), LoyaltyError> {
        let _ = (event, ctx);
        Ok(())
    }

    /// Called after a RewardRedeemed event is persisted
    async fn on_reward_redeemed(
        &self,
        event: &RewardRedeemed,
        ctx: &CallbackContext,
    ) -> Result<(), LoyaltyError> {
        let _ = (event, ctx);
        Ok(())
    }
}
