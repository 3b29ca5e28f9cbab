use crate::context::*;
use loyalty::domain::{
    CheckoutError, LoyaltyError, OrderStatus, PaymentMethod, PaymentStatus,
};
use loyalty::service::{CheckoutOutcome, RewardOutcome};

#[tokio::test]
async fn test_in_store_order_with_two_drinks_converts_ledger() {
    // A user at eight stamps buys two drinks in-store: the ledger converts
    // and both the stamp credit and the conversion are logged against the
    // order.
    let ctx = TestContext::new().await;
    ctx.seed_ledger(8, false).await;

    let mut cart = cart_with(&[
        ("Latte", "£3.50", Some("Coffee")),
        ("Chai", "£3.20", Some("Tea")),
    ]);

    let outcome = ctx
        .checkout
        .submit(Some(&ctx.user()), &mut cart, PaymentMethod::InStore)
        .await
        .unwrap();

    let CheckoutOutcome::Submitted { order, rewards } = outcome else {
        panic!("Expected an immediately submitted order");
    };

    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.payment_status, PaymentStatus::InStore);
    assert!(cart.is_empty(), "In-store checkout clears the cart");
    assert_eq!(
        rewards,
        RewardOutcome::StampsEarned {
            count: 2,
            reward_unlocked: true
        }
    );

    let ledger = ctx.ledger().await;
    assert_eq!(ledger.stamps(), 0);
    assert!(ledger.reward_pending());

    let transactions = ctx.transactions().await;
    assert_eq!(
        ctx.transaction_kinds().await,
        vec!["stamp_earned", "reward_earned"]
    );
    assert_eq!(transactions[0].event.amount(), 2);
    assert!(transactions.iter().all(|t| t.order_id == Some(order.id)));

    // Rewards settled at submission, so a stray webhook later is a no-op
    let stored = ctx.services.orders.get_order(order.id).await.unwrap().unwrap();
    assert!(stored.rewards_processed);
}

#[tokio::test]
async fn test_empty_cart_rejected_before_any_write() {
    let ctx = TestContext::new().await;
    let mut cart = loyalty::domain::CartSession::new();

    let result = ctx
        .checkout
        .submit(Some(&ctx.user()), &mut cart, PaymentMethod::InStore)
        .await;

    assert!(matches!(
        result,
        Err(LoyaltyError::Checkout(CheckoutError::EmptyCart))
    ));
}

#[tokio::test]
async fn test_oversized_notes_rejected() {
    let ctx = TestContext::new().await;
    let mut cart = cart_with(&[("Latte", "£3.50", Some("Coffee"))]);
    cart.set_notes("x".repeat(501));

    let result = ctx
        .checkout
        .submit(Some(&ctx.user()), &mut cart, PaymentMethod::InStore)
        .await;

    assert!(matches!(
        result,
        Err(LoyaltyError::Checkout(CheckoutError::NotesTooLong(500)))
    ));
}

#[tokio::test]
async fn test_unauthenticated_checkout_rejected() {
    let ctx = TestContext::new().await;
    let mut cart = cart_with(&[("Latte", "£3.50", Some("Coffee"))]);

    let result = ctx
        .checkout
        .submit(None, &mut cart, PaymentMethod::InStore)
        .await;

    assert!(matches!(
        result,
        Err(LoyaltyError::Checkout(CheckoutError::NotAuthenticated))
    ));
}

#[tokio::test]
async fn test_online_checkout_defers_rewards_and_keeps_cart() {
    let ctx = TestContext::new().await;
    ctx.seed_ledger(3, false).await;

    let mut cart = cart_with(&[("Latte", "£3.50", Some("Coffee"))]);

    let outcome = ctx
        .checkout
        .submit(Some(&ctx.user()), &mut cart, PaymentMethod::Online)
        .await
        .unwrap();

    let CheckoutOutcome::RedirectToPayment {
        order,
        payment_url,
        transaction_reference,
    } = outcome
    else {
        panic!("Expected a redirect to the hosted page");
    };

    assert!(payment_url.contains(&transaction_reference));
    assert!(!cart.is_empty(), "Cart survives until payment confirms");

    // No reward effect yet
    assert_eq!(ctx.stamps().await, 3);
    assert!(ctx.transactions().await.is_empty());

    let stored = ctx.services.orders.get_order(order.id).await.unwrap().unwrap();
    assert_eq!(stored.status, OrderStatus::AwaitingPayment);
    assert_eq!(stored.payment_status, PaymentStatus::Pending);
    assert_eq!(stored.payment_reference.as_deref(), Some(transaction_reference.as_str()));

    // The gateway was asked for the total in minor units
    let requests = ctx.gateway.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].amount_minor, 350);
    assert_eq!(requests[0].currency, "GBP");
}

#[tokio::test]
async fn test_gateway_failure_rolls_the_order_back() {
    let ctx = TestContext::new().await;
    ctx.gateway.set_failing(true);

    let mut cart = cart_with(&[("Latte", "£3.50", Some("Coffee"))]);

    let result = ctx
        .checkout
        .submit(Some(&ctx.user()), &mut cart, PaymentMethod::Online)
        .await;

    assert!(matches!(
        result,
        Err(LoyaltyError::Checkout(
            CheckoutError::PaymentSessionCreationFailed(_)
        ))
    ));

    // Compensating deletes: nothing is left awaiting a payment that can
    // never arrive
    let order_id = ctx.gateway.requests()[0].order_id;
    assert!(ctx.services.orders.get_order(order_id).await.unwrap().is_none());
    assert!(
        ctx.services
            .orders
            .get_order_items(order_id)
            .await
            .unwrap()
            .is_empty()
    );

    // The user retries from their intact cart
    assert!(!cart.is_empty());
}

#[tokio::test]
async fn test_order_items_snapshot_category_and_reward() {
    let ctx = TestContext::new().await;
    ctx.seed_ledger(0, true).await;

    let mut cart = cart_with(&[
        ("Brownie", "£2.40", Some("Side")),
        ("Latte", "£3.50", Some("Coffee")),
    ]);
    cart.apply_reward();

    let outcome = ctx
        .checkout
        .submit(Some(&ctx.user()), &mut cart, PaymentMethod::Online)
        .await
        .unwrap();

    let CheckoutOutcome::RedirectToPayment { order, .. } = outcome else {
        panic!("Expected a redirect to the hosted page");
    };

    let items = ctx.services.orders.get_order_items(order.id).await.unwrap();
    assert_eq!(items.len(), 2);

    let latte = items.iter().find(|i| i.product_name == "Latte").unwrap();
    assert!(latte.reward_applied);
    assert_eq!(latte.price, 0.0);
    assert_eq!(latte.category.as_deref(), Some("Coffee"));

    let brownie = items.iter().find(|i| i.product_name == "Brownie").unwrap();
    assert!(!brownie.reward_applied);
    assert_eq!(brownie.category.as_deref(), Some("Side"));
}
