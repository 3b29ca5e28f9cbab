use crate::domain::{LedgerState, LoyaltyError, RewardEvent};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait CommandHandler {
    type Resource;
    type Entity;

    /// Load resources required to process the command
    ///
    /// This runs CONCURRENTLY with potentially stale state (fast-moving state is OK).
    /// Can be slow - do DB queries, HTTP calls, etc.
    async fn load(&self, stale_state: &LedgerState) -> Result<Self::Resource, LoyaltyError>;

    /// Validate command against ACTUAL state
    ///
    /// This runs with EXCLUSIVE ACCESS to actual state - MUST BE FAST!
    /// No async, no I/O, just pure business logic.
    fn validate(
        &self,
        actual_state: &LedgerState,
        resource: &Self::Resource,
    ) -> Result<Self::Entity, LoyaltyError>;

    /// Emit events from validated entity
    ///
    /// MUST BE FAST - no async, no I/O.
    /// Just creates events from the validated entity.
    /// Returns a Vec to support multiple events per command.
    fn emit(
        &self,
        state: &LedgerState,
        entity: &Self::Entity,
        resource: &Self::Resource,
        timestamp: DateTime<Utc>,
    ) -> Result<Vec<RewardEvent>, LoyaltyError>;

    /// Execute side effects after events are persisted
    ///
    /// Can be slow - happens after persistence and state update
    async fn effect(
        &self,
        previous_state: &LedgerState,
        state: &LedgerState,
        resource: &Self::Resource,
        entity: &Self::Entity,
        timestamp: DateTime<Utc>,
    ) -> Result<(), LoyaltyError>;
}
