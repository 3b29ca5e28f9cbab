use crate::{
    domain::{
        ApplyStamps, LedgerState, LoyaltyError, REWARD_THRESHOLD, RewardEarned, RewardError,
        RewardEvent, StampEarned,
    },
    port::CommandHandler,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
impl CommandHandler for ApplyStamps {
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
        if self.count == 0 {
            return Err(LoyaltyError::Reward(RewardError::InvalidStampCount));
        }

        // Stamp earning is blocked outright while a reward is outstanding,
        // the caller must surface this rather than drop the stamps.
        if state.reward_pending() {
            return Err(LoyaltyError::Reward(RewardError::RewardAlreadyPending));
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
            amount: self.count,
        })];

        // A single order can cross the threshold in one call, the conversion
        // must not pass through an intermediate persisted state.
        if state.stamps() + self.count >= REWARD_THRESHOLD {
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
