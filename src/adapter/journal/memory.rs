use crate::{
    domain::{DeduplicationKey, EventEnvelope, EventMetadata, LoyaltyError, RewardEvent},
    port::TransactionLog,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

struct LogData {
    events: Vec<Arc<EventEnvelope>>,
    deduplication_index: HashMap<DeduplicationKey, Arc<EventEnvelope>>,
    order_index: HashMap<Uuid, Vec<Arc<EventEnvelope>>>,
    sequence_counter: u64,
}

/// In-memory transaction log implementation
pub struct InMemoryTransactionLog {
    data: Arc<RwLock<LogData>>,
}

impl InMemoryTransactionLog {
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LogData {
                events: Vec::new(),
                deduplication_index: HashMap::new(),
                order_index: HashMap::new(),
                sequence_counter: 0,
            })),
        }
    }
}

#[async_trait]
impl TransactionLog for InMemoryTransactionLog {
    async fn append(
        &self,
        event: RewardEvent,
        metadata: EventMetadata,
    ) -> Result<EventEnvelope, LoyaltyError> {
        let deduplication_key = metadata.deduplication_key;

        let mut data = self.data.write().await;

        if let Some(existing) = data.deduplication_index.get(&deduplication_key) {
            return Ok((**existing).clone());
        }

        data.sequence_counter += 1;
        let sequence_nr = data.sequence_counter;

        let envelope = Arc::new(EventEnvelope {
            sequence_nr,
            event,
            timestamp: metadata.timestamp,
            user_id: metadata.user_id,
            order_id: metadata.order_id,
            admin_id: metadata.admin_id,
            deduplication_key: deduplication_key.clone(),
        });

        data.events.push(envelope.clone());
        data.deduplication_index
            .insert(deduplication_key, envelope.clone());
        if let Some(order_id) = metadata.order_id {
            data.order_index
                .entry(order_id)
                .or_insert_with(Vec::new)
                .push(envelope.clone());
        }

        Ok((*envelope).clone())
    }

    async fn replay(&self, from_sequence: Option<u64>) -> Result<Vec<EventEnvelope>, LoyaltyError> {
        let data = self.data.read().await;
        let from = from_sequence.unwrap_or(0);

        Ok(data
            .events
            .iter()
            .filter(|e| e.sequence_nr >= from)
            .map(|arc| (**arc).clone())
            .collect())
    }

    async fn highest_sequence(&self) -> Result<Option<u64>, LoyaltyError> {
        let data = self.data.read().await;
        if data.sequence_counter == 0 {
            Ok(None)
        } else {
            Ok(Some(data.sequence_counter))
        }
    }

    async fn find_by_order(&self, order_id: Uuid) -> Result<Vec<EventEnvelope>, LoyaltyError> {
        let data = self.data.read().await;
        Ok(data
            .order_index
            .get(&order_id)
            .map(|arcs| arcs.iter().map(|arc| (**arc).clone()).collect())
            .unwrap_or_default())
    }
}

impl Default for InMemoryTransactionLog {
    fn default() -> Self {
        Self::new()
    }
}
