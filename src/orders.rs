use async_trait::async_trait;
use uuid::Uuid;

use crate::error::GatewayError;
use crate::models::{AuthUser, CartItem, NewOrder, OrderItem, OrderStatus, ShippingAddress};

/// Hands finished orders to whatever backend persists them.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Persists a pending order. `idempotency_key` names one logical
    /// submission and stays the same across retries of it, so the backend
    /// can deduplicate.
    async fn submit_order(
        &self,
        idempotency_key: Uuid,
        order: &NewOrder,
    ) -> Result<(), GatewayError>;
}

/// Assembles the order record for a cart about to be submitted. The total
/// is computed from the lines themselves.
pub fn build_order(user: &AuthUser, items: &[CartItem], address: ShippingAddress) -> NewOrder {
    let items: Vec<OrderItem> = items.iter().map(OrderItem::from).collect();
    let total = order_total(&items);
    NewOrder {
        user_id: user.id,
        items,
        total,
        shipping_address: address,
        status: OrderStatus::Pending,
    }
}

fn order_total(items: &[OrderItem]) -> i64 {
    items.iter().fold(0i64, |sum, item| {
        sum.saturating_add(item.price.saturating_mul(i64::from(item.quantity)))
    })
}
