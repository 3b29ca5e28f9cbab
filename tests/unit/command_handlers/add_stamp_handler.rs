use crate::context::{accruing, pending};
use loyalty::domain::{AddStamp, LoyaltyError, RewardError, RewardEvent};
use loyalty::port::CommandHandler;
use uuid::Uuid;

fn command() -> AddStamp {
    AddStamp {
        user_id: Uuid::new_v4(),
        admin_id: Some(Uuid::new_v4()),
    }
}

#[tokio::test]
async fn test_single_stamp_below_threshold() {
    let cmd = command();
    let state = accruing(4);

    let resource = cmd.load(&state).await.unwrap();
    let entity = cmd.validate(&state, &resource).unwrap();
    let events = cmd
        .emit(&state, &entity, &resource, chrono::Utc::now())
        .unwrap();

    assert_eq!(events.len(), 1);
    assert!(matches!(&events[0], RewardEvent::StampEarned(e) if e.amount == 1));
}

#[tokio::test]
async fn test_ninth_to_tenth_stamp_converts() {
    let cmd = command();
    let state = accruing(9);

    let resource = cmd.load(&state).await.unwrap();
    let entity = cmd.validate(&state, &resource).unwrap();
    let events = cmd
        .emit(&state, &entity, &resource, chrono::Utc::now())
        .unwrap();

    assert_eq!(events.len(), 2);
    assert!(matches!(events[1], RewardEvent::RewardEarned(_)));
}

#[tokio::test]
async fn test_rejects_while_reward_pending() {
    let cmd = command();
    let state = pending();

    let resource = cmd.load(&state).await.unwrap();
    let result = cmd.validate(&state, &resource);

    assert!(matches!(
        result,
        Err(LoyaltyError::Reward(RewardError::RewardAlreadyPending))
    ));
}

#[tokio::test]
async fn test_guard_against_accruing_at_maximum() {
    // Unreachable through normal flows (conversion resets the count), but
    // the guard is kept so a scan can never stack an eleventh stamp.
    let cmd = command();
    let state = accruing(10);

    let resource = cmd.load(&state).await.unwrap();
    let result = cmd.validate(&state, &resource);

    assert!(matches!(
        result,
        Err(LoyaltyError::Reward(RewardError::AlreadyAtMax))
    ));
}
