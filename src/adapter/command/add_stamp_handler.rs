use crate::{
    domain::{
        AddStamp, LedgerState, LoyaltyError, REWARD_THRESHOLD, RewardEarned, RewardError,
        RewardEvent, StampEarned,
    },
    port::CommandHandler,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
impl CommandHandler for AddStamp {
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
        if state.reward_pending() {
            return Err(LoyaltyError::Reward(RewardError::RewardAlreadyPending));
        }

        // An accruing ledger at or above the threshold should be unreachable
        // (conversion resets it), but a scan must never push one further.
        if state.stamps() >= REWARD_THRESHOLD {
            return Err(LoyaltyError::Reward(RewardError::AlreadyAtMax));
        }

        Ok(())
    }

    fn emit(
        &self,
        state: &LedgerState,
        _entity: &Self::Entity,
        _resource: &Self::Resource,
        _timestamp: DateTime<Utc>,
    ) -> Result<Vec<RewardEvent>, LoyaltyError> {
        let mut events = vec![RewardEvent::StampEarned(StampEarned {
            user_id: self.user_id,
            amount: 1,
        })];

        if state.stamps() + 1 >= REWARD_THRESHOLD {
            events.push(RewardEvent::RewardEarned(RewardEarned {
                user_id: self.user_id,
            }));
        }

        Ok(events)
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
