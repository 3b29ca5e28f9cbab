use crate::adapter::LedgerRegistry;
use crate::domain::{
    AddStamp, CommandMetadata, DeduplicationKey, LedgerState, LoyaltyError, Redeem, RewardCommand,
    parse_scan_payload,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// What the staff terminal shows after a scan or an action.
#[derive(Debug, Clone, Serialize)]
pub struct LedgerView {
    pub user_id: Uuid,
    pub stamps: u32,
    pub pending_reward: bool,
    pub updated_at: DateTime<Utc>,
}

impl LedgerView {
    fn from_state(user_id: Uuid, state: &LedgerState) -> Self {
        Self {
            user_id,
            stamps: state.stamps(),
            pending_reward: state.reward_pending(),
            updated_at: state.updated_at(),
        }
    }
}

/// The staff-facing side of the loyalty program: scan a customer's QR code,
/// add a stamp for a purchased drink, or redeem their free one.
///
/// Drives the same state machine as checkout and the reconciler; the only
/// difference is the audit trail carries the acting staff member.
pub struct StaffTerminal {
    registry: LedgerRegistry,
}

impl StaffTerminal {
    pub fn new(registry: LedgerRegistry) -> Self {
        Self { registry }
    }

    /// Look up a customer by scanned payload. A malformed payload fails
    /// before any ledger lookup; a valid one creates the ledger if this is
    /// the customer's first interaction.
    pub async fn scan(&self, payload: &str) -> Result<LedgerView, LoyaltyError> {
        let user_id = parse_scan_payload(payload)?;
        let state = self.registry.get_state(user_id).await?;
        Ok(LedgerView::from_state(user_id, &state))
    }

    /// Credit one stamp for a drink bought over the counter.
    pub async fn add_stamp(
        &self,
        user_id: Uuid,
        admin_id: Option<Uuid>,
    ) -> Result<LedgerView, LoyaltyError> {
        let command = RewardCommand::AddStamp(AddStamp { user_id, admin_id });
        let state = self
            .registry
            .process_command(command, Self::scan_metadata("scan", admin_id))
            .await?;
        Ok(LedgerView::from_state(user_id, &state))
    }

    /// Redeem the customer's pending free drink.
    pub async fn redeem(
        &self,
        user_id: Uuid,
        admin_id: Option<Uuid>,
    ) -> Result<LedgerView, LoyaltyError> {
        let command = RewardCommand::Redeem(Redeem {
            user_id,
            order_id: None,
            admin_id,
        });
        let state = self
            .registry
            .process_command(command, Self::scan_metadata("redeem", admin_id))
            .await?;
        Ok(LedgerView::from_state(user_id, &state))
    }

    /// Each physical scan is its own command instance: unlike order
    /// settlement there is nothing to correlate retries by, so the key is
    /// simply unique.
    fn scan_metadata(action: &str, admin_id: Option<Uuid>) -> CommandMetadata {
        let actor = admin_id.map(|id| id.to_string()).unwrap_or_default();
        CommandMetadata {
            deduplication_key: DeduplicationKey::new(format!(
                "{}:{}:{}",
                action,
                actor,
                Uuid::new_v4()
            )),
        }
    }
}
