use crate::context::*;
use loyalty::domain::{LoyaltyError, RewardError};

#[tokio::test]
async fn test_stamps_accumulate_below_threshold() {
    let ctx = TestContext::new().await;

    ctx.process(apply_stamps(ctx.user_id, 3, None)).await.unwrap();
    ctx.process(apply_stamps(ctx.user_id, 2, None)).await.unwrap();

    assert_eq!(ctx.stamps().await, 5);
    assert!(!ctx.pending_reward().await);
    assert_eq!(
        ctx.transaction_kinds().await,
        vec!["stamp_earned", "stamp_earned"]
    );
}

#[tokio::test]
async fn test_threshold_conversion_at_ten() {
    let ctx = TestContext::new().await;
    ctx.seed_ledger(9, false).await;

    ctx.process(apply_stamps(ctx.user_id, 1, None)).await.unwrap();

    let ledger = ctx.ledger().await;
    assert_eq!(ledger.stamps(), 0);
    assert!(ledger.reward_pending());

    let kinds = ctx.transaction_kinds().await;
    assert_eq!(kinds, vec!["stamp_earned", "reward_earned"]);

    let transactions = ctx.transactions().await;
    assert_eq!(transactions[0].event.amount(), 1);
    assert_eq!(transactions[1].event.amount(), 1);
}

#[tokio::test]
async fn test_conversion_in_one_call_from_zero() {
    // Ten stamps in a single order must convert directly, with no
    // intermediate persisted state at ten-while-accruing.
    let ctx = TestContext::new().await;

    ctx.process(apply_stamps(ctx.user_id, 10, None)).await.unwrap();

    let ledger = ctx.ledger().await;
    assert_eq!(ledger.stamps(), 0);
    assert!(ledger.reward_pending());
    assert_eq!(
        ctx.transaction_kinds().await,
        vec!["stamp_earned", "reward_earned"]
    );
}

#[tokio::test]
async fn test_earning_blocked_while_reward_pending() {
    let ctx = TestContext::new().await;
    ctx.seed_ledger(0, true).await;

    let result = ctx.process(apply_stamps(ctx.user_id, 1, None)).await;

    assert!(matches!(
        result,
        Err(LoyaltyError::Reward(RewardError::RewardAlreadyPending))
    ));

    // No state change, no transaction logged
    assert!(ctx.pending_reward().await);
    assert!(ctx.transactions().await.is_empty());
}

#[tokio::test]
async fn test_redeem_pending_reward() {
    let ctx = TestContext::new().await;
    ctx.seed_ledger(0, true).await;

    ctx.process(redeem(ctx.user_id)).await.unwrap();

    let ledger = ctx.ledger().await;
    assert_eq!(ledger.stamps(), 0);
    assert!(!ledger.reward_pending());
    assert_eq!(ctx.transaction_kinds().await, vec!["reward_redeemed"]);
}

#[tokio::test]
async fn test_redeem_without_pending_reward_fails() {
    let ctx = TestContext::new().await;
    ctx.seed_ledger(4, false).await;

    let result = ctx.process(redeem(ctx.user_id)).await;

    assert!(matches!(
        result,
        Err(LoyaltyError::Reward(RewardError::NoRewardToRedeem))
    ));
    assert_eq!(ctx.stamps().await, 4);
    assert!(ctx.transactions().await.is_empty());
}

#[tokio::test]
async fn test_earning_resumes_after_redemption() {
    let ctx = TestContext::new().await;
    ctx.seed_ledger(0, true).await;

    assert_fails!(ctx, add_stamp(ctx.user_id));
    assert_succeeds!(ctx, redeem(ctx.user_id));
    assert_succeeds!(ctx, add_stamp(ctx.user_id));

    assert_eq!(ctx.stamps().await, 1);
    assert!(!ctx.pending_reward().await);
}

#[tokio::test]
async fn test_zero_stamp_credit_rejected() {
    let ctx = TestContext::new().await;

    let result = ctx.process(apply_stamps(ctx.user_id, 0, None)).await;

    assert!(matches!(
        result,
        Err(LoyaltyError::Reward(RewardError::InvalidStampCount))
    ));
}

#[tokio::test]
async fn test_pending_row_round_trips_with_zero_stamps() {
    // The stored row for a pending ledger always carries zero stamps,
    // whatever it claimed before conversion.
    let ctx = TestContext::new().await;
    ctx.seed_ledger(9, false).await;

    ctx.process(add_stamp(ctx.user_id)).await.unwrap();

    let row = ctx
        .services
        .ledgers
        .fetch_or_create(ctx.user_id)
        .await
        .unwrap();
    assert_eq!(row.stamps, 0);
    assert!(row.pending_reward);
}
