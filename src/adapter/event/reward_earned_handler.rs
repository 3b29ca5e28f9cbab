use crate::{
    domain::{LedgerState, RewardEarned},
    port::EventHandler,
};

impl EventHandler for RewardEarned {
    fn apply(&self, state: &LedgerState) -> Option<LedgerState> {
        match state {
            // Audit marker: the preceding stamp event already performed the
            // conversion, so the ledger must be pending by the time this
            // applies. Anything else is an ordering fault.
            LedgerState::RewardPending(_) => Some(state.clone()),
            LedgerState::Accruing(_) => None,
        }
    }
}
