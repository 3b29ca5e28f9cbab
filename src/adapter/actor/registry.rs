use crate::adapter::{LedgerActorArguments, LedgerActorMessage};
use crate::domain::{CommandMetadata, EngineError, LedgerState, LoyaltyError, RewardCommand};
use crate::port::{LedgerStore, OrderStore, TransactionLog};
use ractor::{Actor, ActorRef, rpc::CallResult};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

type LedgerActorRef = ActorRef<LedgerActorMessage>;

/// LedgerRegistry spawns and routes to per-user ledger actors.
///
/// Routing goes through ractor's global registry rather than a local map:
/// a named actor is a singleton, so two concurrent callers asking for the
/// same user end up at the same mailbox and their mutations serialize.
#[derive(Clone)]
pub struct LedgerRegistry {
    /// Users we've touched (for shutdown only, not for routing)
    seen_users: Arc<Mutex<HashSet<Uuid>>>,
    log: Arc<dyn TransactionLog + Send + Sync>,
    ledgers: Arc<dyn LedgerStore>,
    orders: Arc<dyn OrderStore>,
    /// Namespace prefix for actor names (for test isolation)
    namespace: String,
}

impl LedgerRegistry {
    pub fn new(
        log: Arc<dyn TransactionLog + Send + Sync>,
        ledgers: Arc<dyn LedgerStore>,
        orders: Arc<dyn OrderStore>,
    ) -> Self {
        Self {
            seen_users: Arc::new(Mutex::new(HashSet::new())),
            log,
            ledgers,
            orders,
            namespace: String::new(),
        }
    }

    /// Create a registry with a custom namespace for test isolation.
    ///
    /// ## Warning: This is NOT MEANT FOR PRODUCTION USE. Only for testing purposes.
    pub fn with_namespace(
        log: Arc<dyn TransactionLog + Send + Sync>,
        ledgers: Arc<dyn LedgerStore>,
        orders: Arc<dyn OrderStore>,
        namespace: String,
    ) -> Self {
        Self {
            seen_users: Arc::new(Mutex::new(HashSet::new())),
            log,
            ledgers,
            orders,
            namespace,
        }
    }

    fn actor_name(&self, user_id: Uuid) -> String {
        if self.namespace.is_empty() {
            format!("ledger-{}", user_id)
        } else {
            format!("{}-ledger-{}", self.namespace, user_id)
        }
    }

    /// Get or spawn the user's ledger actor using ractor's global registry.
    pub async fn get_or_spawn(&self, user_id: Uuid) -> Result<LedgerActorRef, LoyaltyError> {
        let actor_name = self.actor_name(user_id);

        // Fast path: check the global registry
        if let Some(actor_ref) = ActorRef::<LedgerActorMessage>::where_is(actor_name.clone()) {
            return Ok(actor_ref);
        }

        // Slow path: spawn with a global name. A concurrent caller might
        // win the race, which is fine - the name is a singleton, so we fall
        // back to looking it up again.
        let args = LedgerActorArguments {
            user_id,
            log: self.log.clone(),
            ledgers: self.ledgers.clone(),
            orders: self.orders.clone(),
        };

        match Actor::spawn(Some(actor_name.clone()), super::client::LedgerActor, args).await {
            Ok((actor_ref, _handle)) => Ok(actor_ref),
            Err(e) => {
                if let Some(actor_ref) = ActorRef::<LedgerActorMessage>::where_is(actor_name) {
                    Ok(actor_ref)
                } else {
                    Err(LoyaltyError::Engine(EngineError::MailboxError(format!(
                        "Failed to spawn or find ledger actor: {:?}",
                        e
                    ))))
                }
            }
        }
    }

    /// Process a command on the owning user's actor.
    pub async fn process_command(
        &self,
        command: RewardCommand,
        metadata: CommandMetadata,
    ) -> Result<LedgerState, LoyaltyError> {
        let user_id = command.user_id();
        self.seen_users.lock().unwrap().insert(user_id);

        let actor_ref = self.get_or_spawn(user_id).await?;

        match actor_ref
            .call(
                |reply| LedgerActorMessage::ProcessCommand(command, metadata, reply),
                Some(std::time::Duration::from_millis(500)),
            )
            .await
        {
            Ok(CallResult::Success(result)) => result,
            Ok(CallResult::Timeout) => Err(LoyaltyError::Engine(EngineError::MailboxError(
                "Actor call timeout".to_string(),
            ))),
            Ok(CallResult::SenderError) => Err(LoyaltyError::Engine(EngineError::MailboxError(
                "Actor sender error".to_string(),
            ))),
            Err(e) => Err(LoyaltyError::Engine(EngineError::MailboxError(format!(
                "Failed to send command to ledger actor: {:?}",
                e
            )))),
        }
    }

    /// Current ledger state for a user, spawning (and lazily creating the
    /// row for) the actor if needed. Absence of a ledger is not an error.
    pub async fn get_state(&self, user_id: Uuid) -> Result<LedgerState, LoyaltyError> {
        self.seen_users.lock().unwrap().insert(user_id);

        let actor_ref = self.get_or_spawn(user_id).await?;

        match actor_ref
            .call(
                LedgerActorMessage::GetState,
                Some(std::time::Duration::from_millis(100)),
            )
            .await
        {
            Ok(CallResult::Success(state)) => Ok(state),
            Ok(CallResult::Timeout) => Err(LoyaltyError::Engine(EngineError::MailboxError(
                "Actor call timeout".to_string(),
            ))),
            Ok(CallResult::SenderError) => Err(LoyaltyError::Engine(EngineError::MailboxError(
                "Actor sender error".to_string(),
            ))),
            Err(e) => Err(LoyaltyError::Engine(EngineError::MailboxError(format!(
                "Failed to get state from ledger actor: {:?}",
                e
            )))),
        }
    }

    /// Shutdown every ledger actor this registry has touched.
    pub async fn shutdown_all(&self) {
        let user_ids: Vec<Uuid> = {
            let users = self.seen_users.lock().unwrap();
            users.iter().copied().collect()
        };

        for user_id in user_ids {
            let actor_name = self.actor_name(user_id);
            if let Some(actor_ref) = ActorRef::<LedgerActorMessage>::where_is(actor_name) {
                actor_ref.stop(None);
            }
        }

        self.seen_users.lock().unwrap().clear();
    }
}
