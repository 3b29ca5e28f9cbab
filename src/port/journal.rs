use crate::domain::{EventEnvelope, EventMetadata, LoyaltyError, RewardEvent};
use async_trait::async_trait;
use uuid::Uuid;

/// The append-only reward transaction log. Entries are never mutated or
/// deleted; they are the audit trail and the feed for the leaderboard read
/// model.
#[async_trait]
pub trait TransactionLog {
    /// Append an event to the log
    ///
    /// The log constructs the EventEnvelope by:
    /// - Assigning the next sequence number atomically
    /// - Adding the provided metadata
    /// - Wrapping the event
    ///
    /// Returns the complete EventEnvelope with assigned sequence number.
    /// Idempotent via deduplication_key - returns the existing envelope if
    /// duplicate.
    async fn append(
        &self,
        event: RewardEvent,
        metadata: EventMetadata,
    ) -> Result<EventEnvelope, LoyaltyError>;

    /// Replay events starting from a sequence number
    /// Returns events in order
    async fn replay(&self, from_sequence: Option<u64>) -> Result<Vec<EventEnvelope>, LoyaltyError>;

    /// Get the highest sequence number (current position in the log)
    async fn highest_sequence(&self) -> Result<Option<u64>, LoyaltyError>;

    /// Find events recorded against a specific order
    async fn find_by_order(&self, order_id: Uuid) -> Result<Vec<EventEnvelope>, LoyaltyError>;
}
