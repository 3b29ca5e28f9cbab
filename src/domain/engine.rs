use crate::{domain::RewardEvent, port::EffectFn};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct DeduplicationKey(String);

impl DeduplicationKey {
    pub fn new(identifier: String) -> Self {
        Self(identifier)
    }

    /// Derive the per-event key from a command-level key by suffixing the
    /// event kind. A command that emits several events (stamp credit plus
    /// conversion) gets one log entry per kind, which is exactly the
    /// at-most-once-per-(order, type) constraint the reconciler relies on.
    pub fn for_event(&self, kind: &str) -> DeduplicationKey {
        DeduplicationKey(format!("{}:{}", self.0, kind))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Envelope wrapping a reward event with ordering metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Global sequence number for ordering guarantees
    pub sequence_nr: u64,
    /// The domain event
    pub event: RewardEvent,
    /// When the event was processed
    pub timestamp: DateTime<Utc>,
    /// Ledger owner
    pub user_id: Uuid,
    /// Order that caused the mutation, if any
    pub order_id: Option<Uuid>,
    /// Staff member who performed a manual scan, if any
    pub admin_id: Option<Uuid>,
    /// Deduplication key from the command source
    pub deduplication_key: DeduplicationKey,
}

/// Metadata about the command for deduplication
///
/// The key identifies the command instance across redeliveries:
/// - order settlement: "order:{order_id}"
/// - staff scan: "scan:{admin}:{random}"
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct CommandMetadata {
    pub deduplication_key: DeduplicationKey,
}

/// Directive contains events to persist and effects to execute
pub struct Directive {
    /// Events to persist to the transaction log (without sequence numbers yet)
    pub events: Vec<RewardEvent>,
    /// Effects to execute after persistence (async, can be slow)
    pub effects: Vec<Box<dyn EffectFn>>,
}
