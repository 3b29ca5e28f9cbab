use crate::{
    domain::{LedgerState, LoyaltyError, Redeem, RewardError, RewardEvent, RewardRedeemed},
    port::CommandHandler,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
impl CommandHandler for Redeem {
    type Resource = ();
    type Entity = ();

    async fn load(&self, _stale_state: &LedgerState) -> Result<Self::Resource, LoyaltyError> {
        Ok(())
    }

    fn validate(
        &self,
        state: &LedgerState,
        _resource: &Self::Resource,
    ) -> Result<Self::Entity, LoyaltyError> {
        if !state.reward_pending() {
            return Err(LoyaltyError::Reward(RewardError::NoRewardToRedeem));
        }

        Ok(())
    }

    fn emit(
        &self,
        _state: &LedgerState,
        _entity: &Self::Entity,
        _resource: &Self::Resource,
        _timestamp: DateTime<Utc>,
    ) -> Result<Vec<RewardEvent>, LoyaltyError> {
        Ok(vec![RewardEvent::RewardRedeemed(RewardRedeemed {
            user_id: self.user_id,
        })])
    }

    async fn effect(
        &self,
        _previous_state: &LedgerState,
        _state: &LedgerState,
        _resource: &Self::Resource,
        _entity: &Self::Entity,
        _timestamp: DateTime<Utc>,
    ) -> Result<(), LoyaltyError> {
        Ok(())
    }
}
