use crate::context::{accruing, pending};
use loyalty::domain::StampEarned;
use loyalty::port::EventHandler;
use uuid::Uuid;

fn event(amount: u32) -> StampEarned {
    StampEarned {
        user_id: Uuid::new_v4(),
        amount,
    }
}

#[test]
fn test_adds_stamps_below_threshold() {
    let state = event(3).apply(&accruing(4)).unwrap();
    assert_eq!(state.stamps(), 7);
    assert!(!state.reward_pending());
}

#[test]
fn test_converts_at_threshold() {
    let state = event(1).apply(&accruing(9)).unwrap();
    assert_eq!(state.stamps(), 0);
    assert!(state.reward_pending());
}

#[test]
fn test_converts_past_threshold_in_one_event() {
    let state = event(10).apply(&accruing(0)).unwrap();
    assert!(state.reward_pending());
}

#[test]
fn test_not_applicable_while_pending() {
    assert!(event(1).apply(&pending()).is_none());
}
