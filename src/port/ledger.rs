use crate::domain::{LedgerRow, LoyaltyError};
use async_trait::async_trait;
use uuid::Uuid;

/// Persistent per-user ledger rows.
///
/// Lookup-or-create semantics: a user with no row yet is not an error, the
/// store inserts zeroed defaults on first access. Rows are mutated only
/// through the reward state machine and never deleted.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Fetch the user's row, creating a zeroed one if absent.
    async fn fetch_or_create(&self, user_id: Uuid) -> Result<LedgerRow, LoyaltyError>;

    /// Write the user's row back.
    async fn save(&self, user_id: Uuid, row: LedgerRow) -> Result<(), LoyaltyError>;
}
