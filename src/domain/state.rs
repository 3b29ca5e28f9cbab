use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stamps required before a ledger converts into a pending reward.
pub const REWARD_THRESHOLD: u32 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LedgerState {
    Accruing(AccruingLedger),
    RewardPending(PendingLedger),
}

/// Accruing ledger - stamp count only, always below the threshold
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccruingLedger {
    pub stamps: u32,
    pub updated_at: DateTime<Utc>,
}

/// Pending-reward ledger - carries no stamp count at all. Stamps reset to
/// zero at the moment of conversion, so "pending implies zero stamps" holds
/// by construction rather than by discipline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingLedger {
    pub updated_at: DateTime<Utc>,
}

impl LedgerState {
    /// A freshly created ledger: no stamps, no pending reward.
    pub fn fresh(now: DateTime<Utc>) -> Self {
        LedgerState::Accruing(AccruingLedger {
            stamps: 0,
            updated_at: now,
        })
    }

    pub fn stamps(&self) -> u32 {
        match self {
            LedgerState::Accruing(ledger) => ledger.stamps,
            LedgerState::RewardPending(_) => 0,
        }
    }

    pub fn reward_pending(&self) -> bool {
        matches!(self, LedgerState::RewardPending(_))
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        match self {
            LedgerState::Accruing(ledger) => ledger.updated_at,
            LedgerState::RewardPending(ledger) => ledger.updated_at,
        }
    }

    /// Rebuild the state from a stored row. A pending row's stamp count is
    /// ignored: the store writes zero there and the pending variant does not
    /// represent stamps.
    pub fn from_row(row: &LedgerRow) -> Self {
        if row.pending_reward {
            LedgerState::RewardPending(PendingLedger {
                updated_at: row.updated_at,
            })
        } else {
            LedgerState::Accruing(AccruingLedger {
                stamps: row.stamps,
                updated_at: row.updated_at,
            })
        }
    }

    pub fn to_row(&self) -> LedgerRow {
        match self {
            LedgerState::Accruing(ledger) => LedgerRow {
                stamps: ledger.stamps,
                pending_reward: false,
                updated_at: ledger.updated_at,
            },
            LedgerState::RewardPending(ledger) => LedgerRow {
                stamps: 0,
                pending_reward: true,
                updated_at: ledger.updated_at,
            },
        }
    }
}

/// Stored shape of a ledger, one row per user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerRow {
    pub stamps: u32,
    pub pending_reward: bool,
    pub updated_at: DateTime<Utc>,
}

impl LedgerRow {
    pub fn fresh(now: DateTime<Utc>) -> Self {
        Self {
            stamps: 0,
            pending_reward: false,
            updated_at: now,
        }
    }
}
