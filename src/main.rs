use anyhow::Context;
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use coffeeverse_core::{
    AuthError, AuthProvider, CartStore, Catalog, Checkout, GatewayError, JsonCartFile,
    OrderGateway, StorefrontConfig,
    auth,
    models::{AuthUser, NewOrder, ShippingForm, SignInForm},
    validation::{SignInCredentials, SignUpCredentials},
};

/// Walks one storefront session end to end: browse the range, fill the
/// cart, sign in and place an order against an in-memory order store.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,coffeeverse_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = StorefrontConfig::from_env();
    let catalog = Catalog::new();

    let mut cart = match &config.cart_storage_path {
        Some(path) => {
            let file = JsonCartFile::new(path);
            tracing::info!(path = %file.path().display(), "cart persists between sessions");
            CartStore::with_storage(file)
        }
        None => CartStore::new(),
    };
    let mut cart_updates = cart.subscribe();

    for product in catalog.featured() {
        tracing::info!(
            id = %product.id,
            category = product.category.label(),
            price = product.price,
            "featured: {}",
            product.name
        );
    }

    let latte = catalog.get("latte").context("latte missing from range")?;
    let espresso = catalog.get("espresso").context("espresso missing from range")?;
    cart.add_item(latte.cart_entry(), 2);
    cart.add_item(espresso.cart_entry(), 1);

    let snapshot = cart_updates.borrow_and_update().clone();
    tracing::info!(
        items = snapshot.total_items,
        "cart total {}{}",
        config.currency_symbol,
        snapshot.total_price
    );

    let store = InMemoryOrderStore::default();
    let mut checkout = Checkout::new();
    let form = ShippingForm {
        full_name: "Asha Rao".into(),
        phone: "9876543210".into(),
        address: "12 Brigade Road, Ashok Nagar".into(),
        city: "Bengaluru".into(),
        pincode: "560001".into(),
    };

    // First attempt is signed out and must be turned away before any
    // persistence call.
    let mut provider = DemoAuthProvider::default();
    if let Err(err) = checkout
        .place_order(&mut cart, provider.current_user().as_ref(), &store, &form)
        .await
    {
        tracing::info!(%err, "checkout rejected");
    }

    auth::sign_in(
        &mut provider,
        &SignInForm {
            email: "asha@example.com".into(),
            password: "demo-password".into(),
        },
    )
    .await?;

    let confirmation = checkout
        .place_order(&mut cart, provider.current_user().as_ref(), &store, &form)
        .await?;
    tracing::info!(
        "order confirmed, {}{} paid, cart now holds {} items",
        config.currency_symbol,
        confirmation.total,
        cart.total_items()
    );

    Ok(())
}

/// Session-local stand-in for the real account backend.
#[derive(Default)]
struct DemoAuthProvider {
    user: Option<AuthUser>,
}

#[async_trait]
impl AuthProvider for DemoAuthProvider {
    fn current_user(&self) -> Option<AuthUser> {
        self.user.clone()
    }

    async fn sign_in(&mut self, credentials: &SignInCredentials) -> Result<AuthUser, AuthError> {
        let user = AuthUser {
            id: Uuid::new_v4(),
            email: credentials.email.clone(),
        };
        self.user = Some(user.clone());
        Ok(user)
    }

    async fn sign_up(&mut self, credentials: &SignUpCredentials) -> Result<AuthUser, AuthError> {
        let user = AuthUser {
            id: Uuid::new_v4(),
            email: credentials.email.clone(),
        };
        self.user = Some(user.clone());
        Ok(user)
    }

    async fn sign_out(&mut self) -> Result<(), AuthError> {
        self.user = None;
        Ok(())
    }
}

/// Order store that accepts everything and keeps it in memory.
#[derive(Default)]
struct InMemoryOrderStore {
    orders: Mutex<Vec<(Uuid, NewOrder)>>,
}

#[async_trait]
impl OrderGateway for InMemoryOrderStore {
    async fn submit_order(
        &self,
        idempotency_key: Uuid,
        order: &NewOrder,
    ) -> Result<(), GatewayError> {
        let mut orders = self.orders.lock().await;
        if orders.iter().all(|(key, _)| *key != idempotency_key) {
            orders.push((idempotency_key, order.clone()));
        }
        Ok(())
    }
}
