use crate::domain::*;
use crate::port::{CallbackContext, EventCallback, OrderStore};
use async_trait::async_trait;
use std::sync::Arc;

/// Callback adapter: flips the order's rewards-processed marker as soon as a
/// reward event carrying that order id is persisted.
///
/// This bridges EventCallback (engine concern) to the OrderStore marker
/// (infrastructure port). Setting the marker at persistence time means a
/// redelivered settlement callback for the same order short-circuits before
/// it ever reaches the state machine.
pub struct RewardsProcessedCallback {
    orders: Arc<dyn OrderStore>,
}

impl RewardsProcessedCallback {
    pub fn new(orders: Arc<dyn OrderStore>) -> Self {
        Self { orders }
    }

    async fn mark(&self, ctx: &CallbackContext) -> Result<(), LoyaltyError> {
        if let Some(order_id) = ctx.envelope.order_id {
            self.orders.mark_rewards_processed(order_id).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl EventCallback for RewardsProcessedCallback {
    async fn on_stamp_earned(
        &self,
        _event: &StampEarned,
        ctx: &CallbackContext,
    ) -> Result<(), LoyaltyError> {
        self.mark(ctx).await
    }

    async fn on_reward_earned(
        &self,
        _event: &RewardEarned,
        ctx: &CallbackContext,
    ) -> Result<(), LoyaltyError> {
        self.mark(ctx).await
    }

    async fn on_reward_redeemed(
        &self,
        _event: &RewardRedeemed,
        ctx: &CallbackContext,
    ) -> Result<(), LoyaltyError> {
        self.mark(ctx).await
    }
}
