mod reward_earned_handler;
mod reward_redeemed_handler;
mod stamp_earned_handler;

use crate::{
    domain::{EventEnvelope, LedgerState, RewardEvent},
    port::EventHandler,
};

impl EventEnvelope {
    /// Apply the wrapped event to the state, dispatching to its handler.
    pub fn apply(&self, state: &LedgerState) -> Option<LedgerState> {
        match &self.event {
            RewardEvent::StampEarned(event) => event.apply(state),
            RewardEvent::RewardEarned(event) => event.apply(state),
            RewardEvent::RewardRedeemed(event) => event.apply(state),
        }
    }
}
