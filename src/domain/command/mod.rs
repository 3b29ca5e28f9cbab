use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A reward command is a single requested mutation of one user's ledger.
///
/// Every path that touches a ledger - the staff terminal, in-store checkout
/// and the payment reconciler - expresses its intent as one of these three
/// commands, so the threshold and redemption rules live in exactly one place.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RewardCommand {
    ApplyStamps(ApplyStamps),
    AddStamp(AddStamp),
    Redeem(Redeem),
}

impl RewardCommand {
    pub fn user_id(&self) -> Uuid {
        match self {
            RewardCommand::ApplyStamps(cmd) => cmd.user_id,
            RewardCommand::AddStamp(cmd) => cmd.user_id,
            RewardCommand::Redeem(cmd) => cmd.user_id,
        }
    }

    pub fn order_id(&self) -> Option<Uuid> {
        match self {
            RewardCommand::ApplyStamps(cmd) => cmd.order_id,
            RewardCommand::AddStamp(_) => None,
            RewardCommand::Redeem(cmd) => cmd.order_id,
        }
    }

    pub fn admin_id(&self) -> Option<Uuid> {
        match self {
            RewardCommand::ApplyStamps(_) => None,
            RewardCommand::AddStamp(cmd) => cmd.admin_id,
            RewardCommand::Redeem(cmd) => cmd.admin_id,
        }
    }
}

/// Credit one stamp per eligible drink on a settled order.
///
/// Only valid while the ledger is accruing: a user holding an unredeemed
/// reward cannot earn more stamps, and the caller is told so rather than the
/// stamps being silently dropped. Crossing the threshold converts the ledger
/// to a pending reward in the same mutation, even when a single order carries
/// enough drinks to convert in one call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyStamps {
    pub user_id: Uuid,
    pub count: u32,
    pub order_id: Option<Uuid>,
}

/// Staff-terminal variant of [`ApplyStamps`] with a count of one.
///
/// Carries the scanning staff member for the audit trail, and keeps an extra
/// at-the-maximum guard: a ledger sitting at the threshold while still
/// accruing should be unreachable, but a scan must never push it further.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddStamp {
    pub user_id: Uuid,
    pub admin_id: Option<Uuid>,
}

/// Consume the user's single outstanding free-drink reward.
///
/// Only valid while a reward is pending. Redemption happens at most once per
/// reward: the ledger returns to accruing with zero stamps. `order_id` is set
/// when the reward paid for a line item of an order, `admin_id` when staff
/// redeemed it over the counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Redeem {
    pub user_id: Uuid,
    pub order_id: Option<Uuid>,
    pub admin_id: Option<Uuid>,
}
