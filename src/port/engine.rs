use crate::domain::{
    CommandMetadata, Directive, EventEnvelope, LedgerState, LoyaltyError, RewardCommand,
};
use async_trait::async_trait;

/// Engine orchestrates command processing with exclusive state access
///
/// Responsibilities:
/// - Global ordering via sequence numbers
/// - Deduplication via CommandMetadata (idempotent at-least-once)
/// - Event persistence via the transaction log
/// - Exclusive access to current state (serialized by the owning ledger actor)
#[async_trait]
pub trait Engine {
    type Context;

    /// Process a command with ordering and delivery guarantees
    ///
    /// The engine orchestrates:
    /// 1. processor.load(cmd, stale_state) -> returns Validate function
    /// 2. validate_fn(actual_state) -> returns Directive (events + effects)
    /// 3. Persist every event to the log (handles idempotency & sequence assignment)
    /// 4. Apply fresh events to state (functional)
    /// 5. Execute effects
    ///
    /// Returns the persisted envelopes and the new state - the caller is
    /// responsible for updating its state and last-applied sequence.
    async fn process_command(
        &self,
        command: RewardCommand,
        metadata: CommandMetadata,
        context: &Self::Context,
    ) -> Result<(Vec<EventEnvelope>, LedgerState), LoyaltyError>;

    /// Get the command processor/loader
    fn processor(&self) -> &dyn Processor;
}

/// Processor dispatches commands to handlers
#[async_trait]
pub trait Processor: Send + Sync {
    /// Load command with stale state
    ///
    /// This can be slow and uses potentially stale state.
    /// Returns a ValidateFn that will be called later with actual state.
    async fn load(
        &self,
        command: RewardCommand,
        stale_state: &LedgerState,
    ) -> Result<Box<dyn ValidateFn>, LoyaltyError>;
}

/// The Validate function returned by Processor::load
///
/// This function is called with exclusive access to actual state and must be FAST.
pub trait ValidateFn: Send {
    /// Validate against actual state and return directive
    ///
    /// This must be FAST - no async, no I/O, just business logic.
    /// Takes actual state, returns events and effects.
    /// Sequence numbers are assigned by the log during persistence.
    fn apply(&self, actual_state: &LedgerState) -> Result<Directive, LoyaltyError>;
}

/// An effect to execute after event persistence
#[async_trait]
pub trait EffectFn: Send + Sync {
    async fn execute(&self, new_state: &LedgerState) -> Result<(), LoyaltyError>;
}
