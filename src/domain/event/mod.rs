use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The append-only transaction log records one of these per ledger mutation.
/// The serialized tags double as the transaction `type` column feeding the
/// leaderboard read model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RewardEvent {
    StampEarned(StampEarned),
    RewardEarned(RewardEarned),
    RewardRedeemed(RewardRedeemed),
}

impl RewardEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            RewardEvent::StampEarned(_) => "stamp_earned",
            RewardEvent::RewardEarned(_) => "reward_earned",
            RewardEvent::RewardRedeemed(_) => "reward_redeemed",
        }
    }

    /// Stamp count for stamp events, always one for reward events.
    pub fn amount(&self) -> u32 {
        match self {
            RewardEvent::StampEarned(event) => event.amount,
            RewardEvent::RewardEarned(_) => 1,
            RewardEvent::RewardRedeemed(_) => 1,
        }
    }

    pub fn user_id(&self) -> Uuid {
        match self {
            RewardEvent::StampEarned(event) => event.user_id,
            RewardEvent::RewardEarned(event) => event.user_id,
            RewardEvent::RewardRedeemed(event) => event.user_id,
        }
    }
}

/// `amount` stamps were credited to the user's ledger. Applying this event
/// performs the threshold conversion when the ledger crosses it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StampEarned {
    pub user_id: Uuid,
    pub amount: u32,
}

/// The ledger converted to a pending reward. Audit record only: the state
/// transition itself rides on the stamp event that crossed the threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardEarned {
    pub user_id: Uuid,
}

/// The outstanding reward was consumed and the ledger returned to accruing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardRedeemed {
    pub user_id: Uuid,
}
