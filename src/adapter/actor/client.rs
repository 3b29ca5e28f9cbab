use crate::{
    adapter::{CommandProcessor, EngineContext, RewardEngine, RewardsProcessedCallback},
    domain::{CommandMetadata, LedgerState, LoyaltyError, RewardCommand},
    port::{Engine, LedgerStore, OrderStore, TransactionLog},
};
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use std::sync::Arc;
use uuid::Uuid;

/// Messages that can be sent to a LedgerActor
pub enum LedgerActorMessage {
    ProcessCommand(
        RewardCommand,
        CommandMetadata,
        RpcReplyPort<Result<LedgerState, LoyaltyError>>,
    ),
    GetState(RpcReplyPort<LedgerState>),
}

pub struct LedgerActorArguments {
    pub user_id: Uuid,
    pub log: Arc<dyn TransactionLog + Send + Sync>,
    pub ledgers: Arc<dyn LedgerStore>,
    pub orders: Arc<dyn OrderStore>,
}

pub struct LedgerActorState {
    pub user_id: Uuid,
    pub ledger: LedgerState,
    pub engine: Arc<RewardEngine>,
    pub log: Arc<dyn TransactionLog + Send + Sync>,
    pub ledgers: Arc<dyn LedgerStore>,
    /// Last applied sequence number (global log sequence, not per-user)
    /// Used to guarantee events are applied in order and to skip
    /// at-least-once redeliveries.
    pub last_sequence: u64,
}

/// LedgerActor owns a single user's reward ledger.
///
/// Every mutation for a user flows through this one mailbox, which is what
/// makes the ledger read-modify-write safe against concurrent stamp-earning
/// paths (a staff scan and a payment webhook landing at the same moment).
pub struct LedgerActor;

impl Actor for LedgerActor {
    type Msg = LedgerActorMessage;
    type State = LedgerActorState;
    type Arguments = LedgerActorArguments;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        args: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        tracing::info!("LedgerActor starting for user {}", args.user_id);

        let processor = Arc::new(CommandProcessor::new());
        let processed_callback = Arc::new(RewardsProcessedCallback::new(args.orders.clone()));
        let engine = Arc::new(RewardEngine::new(processor).with_callback(processed_callback));

        // The row is written through on every mutation, so it already
        // reflects everything in the log. Seeding last_sequence with the
        // log's current position makes any redelivered envelope a no-op.
        let row = args.ledgers.fetch_or_create(args.user_id).await?;
        let ledger = LedgerState::from_row(&row);
        let last_sequence = args.log.highest_sequence().await?.unwrap_or(0);

        Ok(LedgerActorState {
            user_id: args.user_id,
            ledger,
            engine,
            log: args.log,
            ledgers: args.ledgers,
            last_sequence,
        })
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            LedgerActorMessage::ProcessCommand(command, metadata, reply) => {
                // This actor provides the ordering guarantee: we hold
                // &mut state, so exactly one command validates, persists and
                // applies at a time for this user. If validation or
                // persistence fails, state is unchanged.
                let context = EngineContext {
                    log: state.log.clone(),
                    current_state: state.ledger.clone(),
                    last_sequence: state.last_sequence,
                };

                match state
                    .engine
                    .process_command(command, metadata, &context)
                    .await
                {
                    Ok((envelopes, new_state)) => {
                        let newest = envelopes
                            .iter()
                            .map(|e| e.sequence_nr)
                            .max()
                            .unwrap_or(state.last_sequence);

                        if newest > state.last_sequence {
                            // Fresh events: write the row through, then
                            // update in-memory state atomically.
                            if let Err(e) = state
                                .ledgers
                                .save(state.user_id, new_state.to_row())
                                .await
                            {
                                tracing::error!(
                                    "Failed to persist ledger for user {}: {}",
                                    state.user_id,
                                    e
                                );
                                let _ = reply.send(Err(e));
                                return Ok(());
                            }

                            state.ledger = new_state;
                            state.last_sequence = newest;

                            tracing::debug!(
                                "User {} ledger advanced to seq={}",
                                state.user_id,
                                newest
                            );
                        } else {
                            // Every envelope was a redelivery - already
                            // applied, nothing to persist.
                            tracing::debug!(
                                "User {} skipping duplicate delivery (seq<={})",
                                state.user_id,
                                state.last_sequence
                            );
                        }

                        let _ = reply.send(Ok(state.ledger.clone()));
                    }
                    Err(e) => {
                        // Validation or persistence failed - state unchanged
                        tracing::warn!(
                            "User {} failed to process command: {}",
                            state.user_id,
                            e
                        );
                        let _ = reply.send(Err(e));
                    }
                }
            }

            LedgerActorMessage::GetState(reply) => {
                let _ = reply.send(state.ledger.clone());
            }
        }

        Ok(())
    }
}

/// Type alias for LedgerActor reference
pub type LedgerActorRef = ActorRef<LedgerActorMessage>;
