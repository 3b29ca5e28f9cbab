use crate::context::{accruing, pending};
use loyalty::domain::{RewardEarned, RewardRedeemed};
use loyalty::port::EventHandler;
use uuid::Uuid;

#[test]
fn test_redemption_returns_to_accruing_at_zero() {
    let event = RewardRedeemed {
        user_id: Uuid::new_v4(),
    };

    let state = event.apply(&pending()).unwrap();
    assert_eq!(state.stamps(), 0);
    assert!(!state.reward_pending());
}

#[test]
fn test_redemption_not_applicable_while_accruing() {
    let event = RewardRedeemed {
        user_id: Uuid::new_v4(),
    };

    assert!(event.apply(&accruing(5)).is_none());
}

#[test]
fn test_reward_earned_is_an_audit_marker() {
    let event = RewardEarned {
        user_id: Uuid::new_v4(),
    };

    // Applies as identity on a pending ledger, refuses anything else
    let state = event.apply(&pending()).unwrap();
    assert!(state.reward_pending());
    assert!(event.apply(&accruing(9)).is_none());
}
