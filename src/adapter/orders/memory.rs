use crate::{
    domain::{LoyaltyError, NewOrder, Order, OrderItem, OrderUpdate},
    port::OrderStore,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

struct OrderData {
    orders: HashMap<Uuid, Order>,
    items: HashMap<Uuid, Vec<OrderItem>>,
}

/// In-memory order store
pub struct InMemoryOrderStore {
    data: Arc<RwLock<OrderData>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(OrderData {
                orders: HashMap::new(),
                items: HashMap::new(),
            })),
        }
    }
}

impl Default for InMemoryOrderStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn create_order(&self, order: NewOrder) -> Result<Order, LoyaltyError> {
        let mut data = self.data.write().await;

        let order = Order {
            id: Uuid::new_v4(),
            user_id: order.user_id,
            status: order.status,
            total: order.total,
            notes: order.notes,
            payment_method: order.payment_method,
            payment_status: order.payment_status,
            payment_reference: None,
            rewards_processed: false,
            created_at: chrono::Utc::now(),
        };

        data.orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn create_order_items(
        &self,
        order_id: Uuid,
        items: Vec<OrderItem>,
    ) -> Result<(), LoyaltyError> {
        let mut data = self.data.write().await;
        data.items.entry(order_id).or_default().extend(items);
        Ok(())
    }

    async fn get_order(&self, order_id: Uuid) -> Result<Option<Order>, LoyaltyError> {
        let data = self.data.read().await;
        Ok(data.orders.get(&order_id).cloned())
    }

    async fn get_order_items(&self, order_id: Uuid) -> Result<Vec<OrderItem>, LoyaltyError> {
        let data = self.data.read().await;
        Ok(data.items.get(&order_id).cloned().unwrap_or_default())
    }

    async fn update_order(&self, order_id: Uuid, update: OrderUpdate) -> Result<(), LoyaltyError> {
        let mut data = self.data.write().await;
        if let Some(order) = data.orders.get_mut(&order_id) {
            if let Some(status) = update.status {
                order.status = status;
            }
            if let Some(payment_status) = update.payment_status {
                order.payment_status = payment_status;
            }
            if let Some(reference) = update.payment_reference {
                order.payment_reference = Some(reference);
            }
        }
        Ok(())
    }

    async fn delete_order(&self, order_id: Uuid) -> Result<(), LoyaltyError> {
        let mut data = self.data.write().await;
        data.orders.remove(&order_id);
        Ok(())
    }

    async fn delete_order_items(&self, order_id: Uuid) -> Result<(), LoyaltyError> {
        let mut data = self.data.write().await;
        data.items.remove(&order_id);
        Ok(())
    }

    async fn find_by_id_prefix(&self, prefix: &str) -> Result<Option<Order>, LoyaltyError> {
        let data = self.data.read().await;
        Ok(data
            .orders
            .values()
            .find(|order| order.id.to_string().starts_with(prefix))
            .cloned())
    }

    async fn mark_rewards_processed(&self, order_id: Uuid) -> Result<(), LoyaltyError> {
        let mut data = self.data.write().await;
        if let Some(order) = data.orders.get_mut(&order_id) {
            order.rewards_processed = true;
        }
        Ok(())
    }
}
