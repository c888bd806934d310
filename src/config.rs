use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Where the cart is saved between sessions. Unset or empty disables
    /// cart persistence.
    pub cart_storage_path: Option<PathBuf>,
    pub currency_symbol: String,
}

impl StorefrontConfig {
    pub fn from_env() -> Self {
        let cart_storage_path = env::var("CART_STORAGE_PATH")
            .ok()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);
        let currency_symbol = env::var("CURRENCY_SYMBOL").unwrap_or_else(|_| "₹".to_string());
        Self {
            cart_storage_path,
            currency_symbol,
        }
    }
}
