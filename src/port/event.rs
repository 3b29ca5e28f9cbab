use crate::domain::LedgerState;

/// EventHandler is responsible for applying an event to the ledger state.
///
/// EventHandler#apply is a pure function, can't be async because it should
/// NEVER be side-effectful (even if its not async, it should not have any
/// side-effects). Returning `None` means the event is not applicable to the
/// given state, which the engine surfaces as a failed transition.
pub trait EventHandler: Send {
    /// Apply the event to the state. This will run after the event is
    /// emitted and persisted.
    fn apply(&self, state: &LedgerState) -> Option<LedgerState>;
}
