use crate::domain::{LoyaltyError, NewOrder, Order, OrderItem, OrderUpdate};
use async_trait::async_trait;
use uuid::Uuid;

/// Order persistence. Creation of an order and its items are two calls;
/// callers compensate with the delete operations when the second half of a
/// flow fails, there is no cross-call transaction.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn create_order(&self, order: NewOrder) -> Result<Order, LoyaltyError>;

    async fn create_order_items(
        &self,
        order_id: Uuid,
        items: Vec<OrderItem>,
    ) -> Result<(), LoyaltyError>;

    async fn get_order(&self, order_id: Uuid) -> Result<Option<Order>, LoyaltyError>;

    async fn get_order_items(&self, order_id: Uuid) -> Result<Vec<OrderItem>, LoyaltyError>;

    async fn update_order(&self, order_id: Uuid, update: OrderUpdate) -> Result<(), LoyaltyError>;

    /// Compensating rollback only.
    async fn delete_order(&self, order_id: Uuid) -> Result<(), LoyaltyError>;

    /// Compensating rollback only.
    async fn delete_order_items(&self, order_id: Uuid) -> Result<(), LoyaltyError>;

    /// Find the order whose id starts with the given prefix, as recovered
    /// from a gateway transaction reference.
    async fn find_by_id_prefix(&self, prefix: &str) -> Result<Option<Order>, LoyaltyError>;

    /// Set the single-flight marker recording that reward effects for this
    /// order have been committed.
    async fn mark_rewards_processed(&self, order_id: Uuid) -> Result<(), LoyaltyError>;
}
