use crate::context::*;
use loyalty::domain::{LoyaltyError, ScanError, parse_scan_payload};
use uuid::Uuid;

#[test]
fn test_parse_prefixed_payload() {
    let id = Uuid::new_v4();
    let parsed = parse_scan_payload(&format!("cafe:{}", id)).unwrap();
    assert_eq!(parsed, id);
}

#[test]
fn test_parse_bare_uuid() {
    let id = Uuid::new_v4();
    assert_eq!(parse_scan_payload(&id.to_string()).unwrap(), id);
}

#[test]
fn test_malformed_payloads_rejected() {
    for payload in ["not-a-uuid", "cafe:not-a-uuid", "", "cafe:"] {
        assert!(matches!(
            parse_scan_payload(payload),
            Err(ScanError::InvalidIdentifierFormat)
        ));
    }
}

#[tokio::test]
async fn test_scan_malformed_identifier_touches_nothing() {
    let ctx = TestContext::new().await;

    let result = ctx.terminal.scan("not-a-uuid").await;

    assert!(matches!(
        result,
        Err(LoyaltyError::Scan(ScanError::InvalidIdentifierFormat))
    ));
    // Parsing failed before any lookup, so no ledger was created
    assert!(ctx.transactions().await.is_empty());
}

#[tokio::test]
async fn test_scan_creates_ledger_on_first_lookup() {
    let ctx = TestContext::new().await;

    let view = ctx
        .terminal
        .scan(&format!("cafe:{}", ctx.user_id))
        .await
        .unwrap();

    assert_eq!(view.user_id, ctx.user_id);
    assert_eq!(view.stamps, 0);
    assert!(!view.pending_reward);
}

#[tokio::test]
async fn test_staff_stamp_and_redeem_cycle() {
    let ctx = TestContext::new().await;
    ctx.seed_ledger(8, false).await;
    let admin = Uuid::new_v4();

    let view = ctx.terminal.add_stamp(ctx.user_id, Some(admin)).await.unwrap();
    assert_eq!(view.stamps, 9);
    assert!(!view.pending_reward);

    let view = ctx.terminal.add_stamp(ctx.user_id, Some(admin)).await.unwrap();
    assert_eq!(view.stamps, 0);
    assert!(view.pending_reward);

    // Further stamps are refused until the reward is redeemed
    let refused = ctx.terminal.add_stamp(ctx.user_id, Some(admin)).await;
    assert!(refused.is_err());

    let view = ctx.terminal.redeem(ctx.user_id, Some(admin)).await.unwrap();
    assert_eq!(view.stamps, 0);
    assert!(!view.pending_reward);

    // The audit trail records the acting staff member
    let transactions = ctx.transactions().await;
    assert!(transactions.iter().all(|t| t.admin_id == Some(admin)));
}
