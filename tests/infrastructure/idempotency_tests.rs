use loyalty::adapter::InMemoryTransactionLog;
use loyalty::domain::*;
use loyalty::port::TransactionLog;
use std::sync::Arc;
use uuid::Uuid;

fn metadata(user_id: Uuid, order_id: Option<Uuid>, key: &str) -> EventMetadata {
    EventMetadata {
        user_id,
        order_id,
        admin_id: None,
        deduplication_key: DeduplicationKey::new(key.to_string()),
        timestamp: chrono::Utc::now(),
    }
}

fn stamp_event(user_id: Uuid, amount: u32) -> RewardEvent {
    RewardEvent::StampEarned(StampEarned { user_id, amount })
}

#[tokio::test]
async fn test_duplicate_deduplication_key_returns_existing_event() {
    let log: Arc<dyn TransactionLog + Send + Sync> = Arc::new(InMemoryTransactionLog::new());
    let user = Uuid::new_v4();

    let envelope1 = log
        .append(stamp_event(user, 2), metadata(user, None, "order:a:stamp_earned"))
        .await
        .unwrap();

    // Different amount, but the key matches: the original wins
    let envelope2 = log
        .append(stamp_event(user, 5), metadata(user, None, "order:a:stamp_earned"))
        .await
        .unwrap();

    assert_eq!(envelope1.sequence_nr, envelope2.sequence_nr);
    assert_eq!(envelope2.event.amount(), 2);

    let events = log.replay(None).await.unwrap();
    assert_eq!(events.len(), 1);
}

#[tokio::test]
async fn test_same_order_different_kinds_both_logged() {
    let log: Arc<dyn TransactionLog + Send + Sync> = Arc::new(InMemoryTransactionLog::new());
    let user = Uuid::new_v4();
    let order = Uuid::new_v4();

    let base = DeduplicationKey::new(format!("order:{}", order));

    log.append(
        stamp_event(user, 10),
        metadata(user, Some(order), base.for_event("stamp_earned").as_str()),
    )
    .await
    .unwrap();

    log.append(
        RewardEvent::RewardEarned(RewardEarned { user_id: user }),
        metadata(user, Some(order), base.for_event("reward_earned").as_str()),
    )
    .await
    .unwrap();

    let events = log.replay(None).await.unwrap();
    assert_eq!(events.len(), 2);

    let by_order = log.find_by_order(order).await.unwrap();
    assert_eq!(by_order.len(), 2);
}

#[tokio::test]
async fn test_concurrent_appends_with_different_keys() {
    let log: Arc<dyn TransactionLog + Send + Sync> = Arc::new(InMemoryTransactionLog::new());
    let user = Uuid::new_v4();

    let handles: Vec<_> = (1..=10)
        .map(|i| {
            let log = log.clone();
            tokio::spawn(async move {
                log.append(stamp_event(user, 1), metadata(user, None, &format!("scan:{}", i)))
                    .await
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let events = log.replay(None).await.unwrap();
    assert_eq!(events.len(), 10);

    // All sequence numbers should be unique
    let mut seq_numbers: Vec<_> = events.iter().map(|e| e.sequence_nr).collect();
    seq_numbers.sort();
    assert_eq!(seq_numbers, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
}

#[test]
fn test_event_key_derivation() {
    let base = DeduplicationKey::new("order:abc".to_string());
    assert_eq!(base.for_event("stamp_earned").as_str(), "order:abc:stamp_earned");
    assert_eq!(
        base.for_event("reward_earned").as_str(),
        "order:abc:reward_earned"
    );
    assert_ne!(base.for_event("stamp_earned"), base.for_event("reward_earned"));
}
