use crate::{
    domain::{AccruingLedger, LedgerState, RewardRedeemed},
    port::EventHandler,
};

impl EventHandler for RewardRedeemed {
    fn apply(&self, state: &LedgerState) -> Option<LedgerState> {
        match state {
            LedgerState::RewardPending(_) => Some(LedgerState::Accruing(AccruingLedger {
                stamps: 0,
                updated_at: chrono::Utc::now(),
            })),
            LedgerState::Accruing(_) => None,
        }
    }
}
