use crate::adapter::LedgerRegistry;
use crate::domain::{
    ApplyStamps, CartSession, CheckoutError, CommandMetadata, DeduplicationKey, LoyaltyError,
    MAX_NOTES_LEN, NewOrder, Order, OrderItem, OrderStatus, OrderUpdate, PaymentMethod,
    PaymentStatus, Redeem, RewardCommand, is_eligible, minor_units, transaction_reference,
};
use crate::port::{OrderStore, PaymentGateway, PaymentSessionRequest, ReturnUrls, UserProfile};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct CheckoutSettings {
    pub currency: String,
    pub app_url: String,
}

/// What happened to the ledger when an order settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewardOutcome {
    Redeemed,
    StampsEarned { count: u32, reward_unlocked: bool },
    /// Nothing to do: no eligible items, or the ledger moved since the
    /// order was assembled (stale-snapshot conflict, logged and tolerated).
    Skipped,
}

/// Result of a submitted order.
pub enum CheckoutOutcome {
    /// In-store payment: the order is placed and reward effects are already
    /// committed; the cart has been cleared.
    Submitted { order: Order, rewards: RewardOutcome },
    /// Online payment: the order awaits payment on the hosted page. The
    /// cart is intentionally NOT cleared and no reward effects have run -
    /// both wait for the payment outcome.
    RedirectToPayment {
        order: Order,
        payment_url: String,
        transaction_reference: String,
    },
}

/// Orchestrates order submission across both payment paths.
pub struct CheckoutService {
    registry: LedgerRegistry,
    orders: Arc<dyn OrderStore>,
    gateway: Arc<dyn PaymentGateway>,
    settings: CheckoutSettings,
}

impl CheckoutService {
    pub fn new(
        registry: LedgerRegistry,
        orders: Arc<dyn OrderStore>,
        gateway: Arc<dyn PaymentGateway>,
        settings: CheckoutSettings,
    ) -> Self {
        Self {
            registry,
            orders,
            gateway,
            settings,
        }
    }

    /// Submit the cart as an order.
    ///
    /// Preconditions are checked before any write: an authenticated user, a
    /// non-empty cart, notes within bounds. The order row is created first
    /// (it owns the id everything else hangs off), then the line-item
    /// snapshots. In-store payment settles rewards immediately; online
    /// payment defers them to the reconciler and hands back the hosted page
    /// URL. A gateway failure rolls the order back with compensating deletes
    /// so the user can retry from the cart.
    pub async fn submit(
        &self,
        user: Option<&UserProfile>,
        cart: &mut CartSession,
        payment_method: PaymentMethod,
    ) -> Result<CheckoutOutcome, LoyaltyError> {
        let user = user.ok_or(LoyaltyError::Checkout(CheckoutError::NotAuthenticated))?;

        if cart.is_empty() {
            return Err(LoyaltyError::Checkout(CheckoutError::EmptyCart));
        }
        if cart.notes().chars().count() > MAX_NOTES_LEN {
            return Err(LoyaltyError::Checkout(CheckoutError::NotesTooLong(
                MAX_NOTES_LEN,
            )));
        }

        let (status, payment_status) = match payment_method {
            PaymentMethod::InStore => (OrderStatus::Pending, PaymentStatus::InStore),
            PaymentMethod::Online => (OrderStatus::AwaitingPayment, PaymentStatus::Pending),
        };

        let order = self
            .orders
            .create_order(NewOrder {
                user_id: user.id,
                status,
                total: cart.total(),
                notes: cart.notes().to_string(),
                payment_method,
                payment_status,
            })
            .await?;

        let items: Vec<OrderItem> = cart
            .items()
            .iter()
            .map(|item| OrderItem {
                order_id: order.id,
                product_name: item.name.clone(),
                quantity: item.quantity,
                price: item.unit_price(),
                category: item.category.clone(),
                reward_applied: item.reward_applied,
            })
            .collect();

        if let Err(e) = self.orders.create_order_items(order.id, items.clone()).await {
            let _ = self.orders.delete_order(order.id).await;
            return Err(e);
        }

        match payment_method {
            PaymentMethod::InStore => {
                let rewards =
                    apply_order_rewards(&self.registry, user.id, order.id, &items).await?;
                cart.clear();
                tracing::info!(order_id = %order.id, user_id = %user.id, "In-store order placed");
                Ok(CheckoutOutcome::Submitted { order, rewards })
            }
            PaymentMethod::Online => {
                let reference = transaction_reference(order.id, chrono::Utc::now());
                let request = PaymentSessionRequest {
                    order_id: order.id,
                    amount_minor: minor_units(order.total),
                    currency: self.settings.currency.clone(),
                    transaction_reference: reference.clone(),
                    return_urls: ReturnUrls::for_order(&self.settings.app_url, order.id),
                };

                match self.gateway.create_hosted_session(request).await {
                    Ok(session) => {
                        self.orders
                            .update_order(
                                order.id,
                                OrderUpdate {
                                    status: Some(OrderStatus::AwaitingPayment),
                                    payment_status: Some(PaymentStatus::Pending),
                                    payment_reference: Some(reference.clone()),
                                },
                            )
                            .await?;

                        tracing::info!(
                            order_id = %order.id,
                            reference = %reference,
                            "Hosted payment session created"
                        );

                        Ok(CheckoutOutcome::RedirectToPayment {
                            order,
                            payment_url: session.payment_url,
                            transaction_reference: session.transaction_reference,
                        })
                    }
                    Err(e) => {
                        // Compensating rollback: the order must not linger in
                        // awaiting_payment with no session to pay it.
                        tracing::error!(
                            order_id = %order.id,
                            user_id = %user.id,
                            "Payment session creation failed, rolling back order: {}",
                            e
                        );
                        if let Err(del) = self.orders.delete_order_items(order.id).await {
                            tracing::error!(order_id = %order.id, "Rollback of order items failed: {}", del);
                        }
                        if let Err(del) = self.orders.delete_order(order.id).await {
                            tracing::error!(order_id = %order.id, "Rollback of order failed: {}", del);
                        }
                        Err(e)
                    }
                }
            }
        }
    }
}

/// The reward-effect step shared by in-store checkout and the payment
/// reconciler.
///
/// Eligibility is reconstructed from the order's line-item snapshots: a line
/// flagged as reward-applied plus a pending ledger means redemption,
/// otherwise an accruing ledger earns one stamp per eligible unit. The
/// deduplication key is derived from the order id, so redelivery of the same
/// settlement can never double-credit.
///
/// A stale-snapshot conflict (the ledger moved between the order being
/// assembled and settling) is logged and reported as `Skipped` rather than
/// failing the order.
pub async fn apply_order_rewards(
    registry: &LedgerRegistry,
    user_id: Uuid,
    order_id: Uuid,
    items: &[OrderItem],
) -> Result<RewardOutcome, LoyaltyError> {
    let snapshot = registry.get_state(user_id).await?;
    let reward_line = items.iter().any(|item| item.reward_applied);

    let command = if reward_line && snapshot.reward_pending() {
        RewardCommand::Redeem(Redeem {
            user_id,
            order_id: Some(order_id),
            admin_id: None,
        })
    } else if !snapshot.reward_pending() {
        let count: u32 = items
            .iter()
            .filter(|item| is_eligible(item.category.as_deref()))
            .map(|item| item.quantity)
            .sum();

        if count == 0 {
            return Ok(RewardOutcome::Skipped);
        }

        RewardCommand::ApplyStamps(ApplyStamps {
            user_id,
            count,
            order_id: Some(order_id),
        })
    } else {
        // Pending reward but nothing in the order consumed it: earning is
        // blocked, and there is nothing to redeem against.
        return Ok(RewardOutcome::Skipped);
    };

    let metadata = CommandMetadata {
        deduplication_key: DeduplicationKey::new(format!("order:{}", order_id)),
    };

    let redeeming = matches!(command, RewardCommand::Redeem(_));
    let count = match &command {
        RewardCommand::ApplyStamps(cmd) => cmd.count,
        _ => 0,
    };

    match registry.process_command(command, metadata).await {
        Ok(state) => Ok(if redeeming {
            RewardOutcome::Redeemed
        } else {
            RewardOutcome::StampsEarned {
                count,
                reward_unlocked: state.reward_pending(),
            }
        }),
        Err(LoyaltyError::Reward(conflict)) => {
            tracing::warn!(
                %user_id,
                %order_id,
                "Reward effect skipped on stale ledger snapshot: {}",
                conflict
            );
            Ok(RewardOutcome::Skipped)
        }
        Err(e) => Err(e),
    }
}
