use crate::{
    domain::{LedgerRow, LoyaltyError},
    port::LedgerStore,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory ledger rows
///
/// For production, use a database-backed implementation with row-level
/// update semantics.
pub struct InMemoryLedgerStore {
    rows: Arc<RwLock<HashMap<Uuid, LedgerRow>>>,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self {
            rows: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryLedgerStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedgerStore {
    async fn fetch_or_create(&self, user_id: Uuid) -> Result<LedgerRow, LoyaltyError> {
        let mut rows = self.rows.write().await;
        let row = rows
            .entry(user_id)
            .or_insert_with(|| LedgerRow::fresh(chrono::Utc::now()));
        Ok(row.clone())
    }

    async fn save(&self, user_id: Uuid, row: LedgerRow) -> Result<(), LoyaltyError> {
        let mut rows = self.rows.write().await;
        rows.insert(user_id, row);
        Ok(())
    }
}
