use crate::{
    domain::{
        CommandMetadata, EngineError, EventEnvelope, EventMetadata, LedgerState, LoyaltyError,
        RewardCommand, RewardEvent,
    },
    port::{CallbackContext, Engine, EventCallback, Processor, TransactionLog},
};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

/// Context for the Engine containing current state and log position
pub struct EngineContext {
    /// The transaction log for persisting events
    pub log: Arc<dyn TransactionLog + Send + Sync>,
    /// Current state of the ledger
    pub current_state: LedgerState,
    /// Highest sequence number already applied to `current_state`. Envelopes
    /// at or below it are duplicates and must not be applied again.
    pub last_sequence: u64,
}

/// The reward engine: one command in, zero-or-more persisted events and the
/// resulting ledger state out.
pub struct RewardEngine {
    processor: Arc<dyn Processor>,
    /// User-provided callbacks (optional, for infrastructure concerns)
    callbacks: Vec<Arc<dyn EventCallback>>,
}

impl RewardEngine {
    pub fn new(processor: Arc<dyn Processor>) -> Self {
        Self {
            processor,
            callbacks: Vec::new(),
        }
    }

    /// Add a callback to be invoked after each event is persisted.
    pub fn with_callback(mut self, callback: Arc<dyn EventCallback>) -> Self {
        self.callbacks.push(callback);
        self
    }

    async fn invoke_callbacks(
        &self,
        envelope: &EventEnvelope,
        context: &EngineContext,
    ) -> Result<(), LoyaltyError> {
        let callback_ctx = CallbackContext {
            log: context.log.clone(),
            envelope: envelope.clone(),
        };

        for callback in &self.callbacks {
            match &envelope.event {
                RewardEvent::StampEarned(event) => {
                    callback.on_stamp_earned(event, &callback_ctx).await?;
                }
                RewardEvent::RewardEarned(event) => {
                    callback.on_reward_earned(event, &callback_ctx).await?;
                }
                RewardEvent::RewardRedeemed(event) => {
                    callback.on_reward_redeemed(event, &callback_ctx).await?;
                }
            }
        }

        Ok(())
    }
}

#[async_trait]
impl Engine for RewardEngine {
    type Context = EngineContext;

    /// Process a command by orchestrating the following steps:
    /// 1. Async load phase (can query external state, uses a snapshot)
    /// 2. Validation phase (business rules against current state)
    /// 3. Persist every directive event to the log (per-event dedup key,
    ///    atomic sequence assignment; duplicates return their original
    ///    envelope)
    /// 4. Apply fresh events to state (functional - skips envelopes already
    ///    reflected in `context.last_sequence`)
    /// 5. Execute effects (with new state)
    ///
    /// INFRASTRUCTURE CONTRACT (caller's responsibility):
    /// - Caller MUST serialize calls per ledger (the ledger actor's mailbox)
    /// - Caller MUST update its state and last-applied sequence atomically
    ///   after a successful call
    ///
    /// This separation keeps the engine pure (stateless business logic)
    /// while pushing ordering guarantees to infrastructure (LedgerActor).
    async fn process_command(
        &self,
        command: RewardCommand,
        metadata: CommandMetadata,
        context: &Self::Context,
    ) -> Result<(Vec<EventEnvelope>, LedgerState), LoyaltyError> {
        // 1. Load phase: query dependencies with a snapshot of the state.
        //    Caller's serialization ensures the state can't move under us.
        let stale_state = context.current_state.clone();
        let validate_fn = self.processor.load(command.clone(), &stale_state).await?;

        // 2. Validation phase: apply business rules to CURRENT state.
        let directive = validate_fn.apply(&context.current_state)?;

        if directive.events.is_empty() {
            return Err(LoyaltyError::Engine(EngineError::NoEvents));
        }

        // 3 & 4. Persist and apply each event in emission order. A command
        //    may emit more than one event (stamp credit plus conversion);
        //    each gets its own deduplication key derived from the command's,
        //    so a redelivered command finds every one of its events already
        //    logged and applies none of them twice.
        let mut envelopes = Vec::with_capacity(directive.events.len());
        let mut state = context.current_state.clone();
        let mut applied_up_to = context.last_sequence;

        for event in directive.events {
            let event_metadata = EventMetadata {
                user_id: command.user_id(),
                order_id: command.order_id(),
                admin_id: command.admin_id(),
                deduplication_key: metadata.deduplication_key.for_event(event.kind()),
                timestamp: Utc::now(),
            };

            let envelope = context.log.append(event, event_metadata).await?;

            self.invoke_callbacks(&envelope, context).await?;

            if envelope.sequence_nr > applied_up_to {
                state = envelope
                    .apply(&state)
                    .ok_or(LoyaltyError::Engine(EngineError::StateTransitionFailed))?;
                applied_up_to = envelope.sequence_nr;
            }

            envelopes.push(envelope);
        }

        // 5. Effects: execute side effects with the new state
        for effect in directive.effects {
            effect.execute(&state).await?;
        }

        Ok((envelopes, state))
    }

    fn processor(&self) -> &dyn Processor {
        self.processor.as_ref()
    }
}
