use crate::adapter::LedgerRegistry;
use crate::domain::{
    CheckoutError, GatewayEvent, LoyaltyError, OrderUpdate, PaymentStatus, RedirectOutcome,
    map_gateway_event, map_redirect_outcome, parse_transaction_reference,
};
use crate::port::{OrderStore, UserProfile};
use crate::service::checkout::{RewardOutcome, apply_order_rewards};
use std::sync::Arc;
use uuid::Uuid;

/// Result of reconciling one payment notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Payment confirmed and reward effects committed (or deliberately
    /// skipped, see [`RewardOutcome`]).
    RewardsApplied(RewardOutcome),
    /// Reward effects for this order were committed earlier; this delivery
    /// was a duplicate and changed nothing.
    AlreadyProcessed,
    /// The order's stored payment state does not confirm a successful
    /// authorization; no reward effect was attempted.
    PaymentNotConfirmed,
    /// Status recorded; the outcome was not a success so there is nothing
    /// to settle.
    StatusRecorded,
    /// The reference did not match any order. Acknowledged and logged.
    UnknownOrder,
}

/// Settles payment outcomes arriving from the gateway, by webhook or by
/// user-facing redirect.
///
/// Both paths converge on the same settlement step, and both must tolerate
/// duplicate and out-of-order delivery: the reward effect for an order
/// happens at most once, everything after that is a no-op success.
pub struct Reconciler {
    registry: LedgerRegistry,
    orders: Arc<dyn OrderStore>,
}

impl Reconciler {
    pub fn new(registry: LedgerRegistry, orders: Arc<dyn OrderStore>) -> Self {
        Self {
            registry,
            orders,
        }
    }

    /// Handle a gateway webhook notification. Server-side and authoritative:
    /// this is the path that must work even when the user never returns from
    /// the hosted page.
    pub async fn handle_webhook(
        &self,
        event: &GatewayEvent,
    ) -> Result<ReconcileOutcome, LoyaltyError> {
        let prefix = parse_transaction_reference(&event.transaction_reference).ok_or(
            LoyaltyError::Checkout(CheckoutError::InvalidTransactionReference),
        )?;

        let Some(order) = self.orders.find_by_id_prefix(prefix).await? else {
            tracing::warn!(
                reference = %event.transaction_reference,
                event_id = %event.event_id,
                "Webhook for unknown order"
            );
            return Ok(ReconcileOutcome::UnknownOrder);
        };

        let (payment_status, order_status) = map_gateway_event(&event.event_type, &order);

        tracing::info!(
            order_id = %order.id,
            event_type = %event.event_type,
            ?payment_status,
            "Webhook received"
        );

        self.orders
            .update_order(
                order.id,
                OrderUpdate {
                    status: Some(order_status),
                    payment_status: Some(payment_status.clone()),
                    payment_reference: None,
                },
            )
            .await?;

        if !matches!(
            payment_status,
            PaymentStatus::Authorized | PaymentStatus::Completed | PaymentStatus::Settled
        ) {
            return Ok(ReconcileOutcome::StatusRecorded);
        }

        self.settle_rewards(order.id).await
    }

    /// Handle the user-facing payment redirect. Non-authoritative cousin of
    /// the webhook: it records the reported outcome and, for a success,
    /// runs the same settlement - which re-verifies against the store and
    /// is a no-op if the webhook got there first.
    pub async fn handle_redirect(
        &self,
        user: Option<&UserProfile>,
        outcome: RedirectOutcome,
        order_id: Uuid,
    ) -> Result<ReconcileOutcome, LoyaltyError> {
        let order = self
            .orders
            .get_order(order_id)
            .await?
            .ok_or(LoyaltyError::Checkout(CheckoutError::OrderNotFound))?;

        if let Some(user) = user {
            if order.user_id != user.id {
                return Err(LoyaltyError::Checkout(CheckoutError::AccessDenied));
            }
        }

        let (payment_status, order_status) = map_redirect_outcome(outcome);

        self.orders
            .update_order(
                order_id,
                OrderUpdate {
                    status: Some(order_status),
                    payment_status: Some(payment_status),
                    payment_reference: None,
                },
            )
            .await?;

        if outcome != RedirectOutcome::Success {
            return Ok(ReconcileOutcome::StatusRecorded);
        }

        // Settlement needs an authenticated owner; an anonymous landing on
        // the success page still records the status, the webhook will settle.
        if user.is_none() {
            tracing::warn!(%order_id, "Success redirect without a session, deferring to webhook");
            return Ok(ReconcileOutcome::StatusRecorded);
        }

        self.settle_rewards(order_id).await
    }

    /// The single settlement step: re-fetch the order, check the
    /// single-flight marker, confirm the stored payment state, then run the
    /// shared reward-effect step against the persisted line items.
    async fn settle_rewards(&self, order_id: Uuid) -> Result<ReconcileOutcome, LoyaltyError> {
        let order = self
            .orders
            .get_order(order_id)
            .await?
            .ok_or(LoyaltyError::Checkout(CheckoutError::OrderNotFound))?;

        if order.rewards_processed {
            tracing::debug!(%order_id, "Rewards already processed, duplicate delivery ignored");
            return Ok(ReconcileOutcome::AlreadyProcessed);
        }

        if !order.payment_confirmed() {
            tracing::warn!(
                %order_id,
                payment_status = ?order.payment_status,
                "Payment not confirmed, withholding reward effects"
            );
            return Ok(ReconcileOutcome::PaymentNotConfirmed);
        }

        let items = self.orders.get_order_items(order_id).await?;
        let outcome =
            apply_order_rewards(&self.registry, order.user_id, order_id, &items).await?;

        // Belt for the Skipped path: the event callback only marks orders
        // whose settlement actually persisted events.
        self.orders.mark_rewards_processed(order_id).await?;

        tracing::info!(%order_id, ?outcome, "Order settled");
        Ok(ReconcileOutcome::RewardsApplied(outcome))
    }
}
