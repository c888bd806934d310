use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductCategory {
    #[serde(rename = "Drinks")]
    Drinks,
    #[serde(rename = "Coffee Beans")]
    Beans,
}

impl ProductCategory {
    pub fn label(&self) -> &'static str {
        match self {
            ProductCategory::Drinks => "Drinks",
            ProductCategory::Beans => "Coffee Beans",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub image: String,
    pub rating: f32,
    pub category: ProductCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    pub featured: bool,
}

impl Product {
    /// The slice of a product that travels into the cart.
    pub fn cart_entry(&self) -> CartEntry {
        CartEntry {
            id: self.id.clone(),
            name: self.name.clone(),
            price: self.price,
            image: self.image.clone(),
        }
    }
}

/// Curated bundle sold on the shop page. Display only, gift sets are not
/// added to the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiftSet {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub items: Vec<String>,
}

/// What a product contributes to a cart line: identity, display fields and
/// the unit price captured at add time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartEntry {
    pub id: String,
    pub name: String,
    pub price: i64,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: String,
    pub name: String,
    pub price: i64,
    pub image: String,
    pub quantity: u32,
    pub added_at: DateTime<Utc>,
}

/// Point-in-time view of the cart handed to subscribers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartSnapshot {
    pub items: Vec<CartItem>,
    pub total_items: u32,
    pub total_price: i64,
}

impl CartSnapshot {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_items: 0,
            total_price: 0,
        }
    }
}

/// Raw delivery details as typed into the checkout form.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingForm {
    pub full_name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub pincode: String,
}

/// Delivery details that passed validation. Serializes with the camelCase
/// keys the order store expects under `shipping_address`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub full_name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub pincode: String,
}

/// One line of a persisted order, the cart item reduced to what the store
/// keeps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: String,
    pub name: String,
    pub price: i64,
    pub quantity: u32,
}

impl From<&CartItem> for OrderItem {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            price: item.price,
            quantity: item.quantity,
        }
    }
}

/// Order lifecycle states. Checkout only ever creates `Pending`; the later
/// transitions belong to fulfillment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Paid,
    Shipped,
    Delivered,
    Cancelled,
}

/// The record handed to the order store on checkout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewOrder {
    pub user_id: Uuid,
    pub items: Vec<OrderItem>,
    pub total: i64,
    pub shipping_address: ShippingAddress,
    pub status: OrderStatus,
}

/// What the caller gets back once an order has been accepted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderConfirmation {
    pub total: i64,
    pub placed_at: DateTime<Utc>,
}

/// The signed-in identity checkout stamps onto orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
}

/// Sign-in input as typed into the account form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

/// Sign-up input as typed into the account form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
}
