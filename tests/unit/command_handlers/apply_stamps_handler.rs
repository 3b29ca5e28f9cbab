use crate::context::{accruing, pending};
use loyalty::domain::{ApplyStamps, LoyaltyError, RewardError, RewardEvent};
use loyalty::port::CommandHandler;
use uuid::Uuid;

fn command(count: u32) -> ApplyStamps {
    ApplyStamps {
        user_id: Uuid::new_v4(),
        count,
        order_id: None,
    }
}

#[tokio::test]
async fn test_emits_single_stamp_event_below_threshold() {
    let cmd = command(2);
    let state = accruing(3);

    let resource = cmd.load(&state).await.unwrap();
    let entity = cmd.validate(&state, &resource).unwrap();
    let events = cmd
        .emit(&state, &entity, &resource, chrono::Utc::now())
        .unwrap();

    assert_eq!(events.len(), 1);
    match &events[0] {
        RewardEvent::StampEarned(e) => {
            assert_eq!(e.user_id, cmd.user_id);
            assert_eq!(e.amount, 2);
        }
        _ => panic!("Expected StampEarned event"),
    }
}

#[tokio::test]
async fn test_emits_conversion_pair_at_threshold() {
    let cmd = command(2);
    let state = accruing(8);

    let resource = cmd.load(&state).await.unwrap();
    let entity = cmd.validate(&state, &resource).unwrap();
    let events = cmd
        .emit(&state, &entity, &resource, chrono::Utc::now())
        .unwrap();

    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], RewardEvent::StampEarned(_)));
    assert!(matches!(events[1], RewardEvent::RewardEarned(_)));
}

#[tokio::test]
async fn test_rejects_while_reward_pending() {
    let cmd = command(1);
    let state = pending();

    let resource = cmd.load(&state).await.unwrap();
    let result = cmd.validate(&state, &resource);

    assert!(matches!(
        result,
        Err(LoyaltyError::Reward(RewardError::RewardAlreadyPending))
    ));
}

#[tokio::test]
async fn test_rejects_zero_count() {
    let cmd = command(0);
    let state = accruing(0);

    let resource = cmd.load(&state).await.unwrap();
    let result = cmd.validate(&state, &resource);

    assert!(matches!(
        result,
        Err(LoyaltyError::Reward(RewardError::InvalidStampCount))
    ));
}
