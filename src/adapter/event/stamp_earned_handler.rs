use crate::{
    domain::{
        AccruingLedger, LedgerState, PendingLedger, REWARD_THRESHOLD, StampEarned,
    },
    port::EventHandler,
};

impl EventHandler for StampEarned {
    fn apply(&self, state: &LedgerState) -> Option<LedgerState> {
        match state {
            LedgerState::Accruing(ledger) => {
                let stamps = ledger.stamps + self.amount;
                if stamps >= REWARD_THRESHOLD {
                    // Conversion rides on the stamp credit itself: one state
                    // write, stamps reset to zero at the same moment.
                    Some(LedgerState::RewardPending(PendingLedger {
                        updated_at: chrono::Utc::now(),
                    }))
                } else {
                    Some(LedgerState::Accruing(AccruingLedger {
                        stamps,
                        updated_at: chrono::Utc::now(),
                    }))
                }
            }
            // Stamp earning is invalid while a reward is outstanding.
            LedgerState::RewardPending(_) => None,
        }
    }
}
