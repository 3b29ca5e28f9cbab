use crate::context::cart_with;
use loyalty::domain::{CartSession, parse_price_label};

#[test]
fn test_price_label_parsing() {
    assert_eq!(parse_price_label("£3.50"), 3.5);
    // Composite size labels take the first numeric token
    assert_eq!(parse_price_label("£3.5 / £4.2"), 3.5);
    assert_eq!(parse_price_label("3.5"), 3.5);
    assert_eq!(parse_price_label("Market price"), 0.0);
}

#[test]
fn test_add_merges_matching_lines() {
    let mut cart = CartSession::new();
    cart.add_item("Flat White", "£3.50", Some("Coffee"));
    cart.add_item("Flat White", "£3.50", Some("Coffee"));
    cart.add_item("Flat White", "£4.20", Some("Coffee"));

    // Same name at a different price is its own line
    assert_eq!(cart.items().len(), 2);
    assert_eq!(cart.items()[0].quantity, 2);
    assert_eq!(cart.items()[1].quantity, 1);
    assert_eq!(cart.count(), 3);
}

#[test]
fn test_set_quantity_zero_removes_line() {
    let mut cart = cart_with(&[("Mocha", "£3.80", Some("Coffee"))]);
    let id = cart.items()[0].id.clone();

    cart.set_quantity(&id, 3);
    assert_eq!(cart.items()[0].quantity, 3);

    cart.set_quantity(&id, 0);
    assert!(cart.is_empty());
}

#[test]
fn test_total_sums_lines() {
    let mut cart = cart_with(&[
        ("Latte", "£3.50", Some("Coffee")),
        ("Brownie", "£2.40", Some("Side")),
    ]);
    let latte = cart.items()[0].id.clone();
    cart.set_quantity(&latte, 2);

    assert!((cart.total() - 9.4).abs() < 1e-9);
}

#[test]
fn test_reward_applies_to_first_eligible_line() {
    let mut cart = cart_with(&[
        ("Chips", "£2.50", Some("Side")),
        ("Latte", "£3.50", Some("Coffee")),
        ("Espresso", "£2.20", Some("Coffee")),
    ]);

    assert!(cart.apply_reward());

    // The side is skipped; the first Coffee line is zeroed
    let items = cart.items();
    assert!(!items[0].reward_applied);
    assert!(items[1].reward_applied);
    assert_eq!(items[1].unit_price(), 0.0);
    assert!(!items[2].reward_applied);
    assert!((cart.total() - 4.7).abs() < 1e-9);
}

#[test]
fn test_apply_reward_is_idempotent() {
    let mut cart = cart_with(&[("Latte", "£3.50", Some("Coffee"))]);

    assert!(cart.apply_reward());
    assert!(!cart.apply_reward());

    assert_eq!(cart.items().iter().filter(|i| i.reward_applied).count(), 1);
}

#[test]
fn test_apply_reward_without_eligible_items() {
    let mut cart = cart_with(&[("Brownie", "£2.40", Some("Side"))]);
    assert!(!cart.apply_reward());
    assert!(!cart.reward_applied());

    let mut empty = CartSession::new();
    assert!(!empty.apply_reward());
}

#[test]
fn test_eligible_units_counts_quantities() {
    let mut cart = cart_with(&[
        ("Latte", "£3.50", Some("Coffee")),
        ("Tea", "£2.80", Some("Tea")),
        ("Brownie", "£2.40", Some("Side")),
        ("Water", "£1.00", None),
    ]);
    let latte = cart.items()[0].id.clone();
    cart.set_quantity(&latte, 2);

    assert_eq!(cart.eligible_units(), 3);
}

#[test]
fn test_clear_resets_everything() {
    let mut cart = cart_with(&[("Latte", "£3.50", Some("Coffee"))]);
    cart.set_notes("oat milk please".to_string());
    cart.apply_reward();

    cart.clear();

    assert!(cart.is_empty());
    assert_eq!(cart.notes(), "");
    assert!(!cart.reward_applied());
}

#[test]
fn test_hydrate_recovers_reward_flag() {
    let mut cart = cart_with(&[("Latte", "£3.50", Some("Coffee"))]);
    cart.apply_reward();

    let rehydrated = CartSession::hydrate(cart.items().to_vec(), "notes".to_string());
    assert!(rehydrated.reward_applied());
}
