use crate::context::{accruing, pending};
use loyalty::domain::{LoyaltyError, Redeem, RewardError, RewardEvent};
use loyalty::port::CommandHandler;
use uuid::Uuid;

fn command() -> Redeem {
    Redeem {
        user_id: Uuid::new_v4(),
        order_id: Some(Uuid::new_v4()),
        admin_id: None,
    }
}

#[tokio::test]
async fn test_redeems_pending_reward() {
    let cmd = command();
    let state = pending();

    let resource = cmd.load(&state).await.unwrap();
    let entity = cmd.validate(&state, &resource).unwrap();
    let events = cmd
        .emit(&state, &entity, &resource, chrono::Utc::now())
        .unwrap();

    assert_eq!(events.len(), 1);
    assert!(matches!(&events[0], RewardEvent::RewardRedeemed(e) if e.user_id == cmd.user_id));
}

#[tokio::test]
async fn test_rejects_without_pending_reward() {
    let cmd = command();

    for state in [accruing(0), accruing(9)] {
        let resource = cmd.load(&state).await.unwrap();
        let result = cmd.validate(&state, &resource);
        assert!(matches!(
            result,
            Err(LoyaltyError::Reward(RewardError::NoRewardToRedeem))
        ));
    }
}
