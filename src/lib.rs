//! Cart and checkout core for the CoffeeVerse storefront.
//!
//! Holds in-session cart state, validates checkout input and hands
//! confirmed orders to an external order store. Pages, styling and the
//! real auth and persistence backends live elsewhere; this crate defines
//! the contracts they plug into.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod models;
pub mod orders;
pub mod storage;
pub mod validation;

pub use auth::AuthProvider;
pub use cart::CartStore;
pub use catalog::{Catalog, ProductQuery};
pub use checkout::{Checkout, CheckoutPhase};
pub use config::StorefrontConfig;
pub use error::{AuthError, CheckoutError, CheckoutResult, GatewayError};
pub use orders::OrderGateway;
pub use storage::{CartStorage, JsonCartFile};
