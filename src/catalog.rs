use serde::Deserialize;

use crate::models::{GiftSet, Product, ProductCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSortBy {
    Name,
    Price,
    Rating,
}

/// Filters for browsing the range. Empty query returns everything in
/// authored order.
#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    pub q: Option<String>,
    pub category: Option<ProductCategory>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub sort_by: Option<ProductSortBy>,
    pub sort_order: Option<SortOrder>,
}

/// The full product range: menu drinks, shop beans and gift sets.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    gift_sets: Vec<GiftSet>,
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            products: product_range(),
            gift_sets: gift_set_range(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Drinks, the menu page.
    pub fn menu(&self) -> Vec<&Product> {
        self.by_category(ProductCategory::Drinks)
    }

    /// Beans, the shop page.
    pub fn shop(&self) -> Vec<&Product> {
        self.by_category(ProductCategory::Beans)
    }

    pub fn featured(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.featured).collect()
    }

    pub fn gift_sets(&self) -> &[GiftSet] {
        &self.gift_sets
    }

    /// Filtered, sorted view of the range. Text search matches name and
    /// description case-insensitively.
    pub fn search(&self, query: &ProductQuery) -> Vec<&Product> {
        let needle = query
            .q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);

        let mut matches: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| match &needle {
                Some(needle) => {
                    p.name.to_lowercase().contains(needle)
                        || p.description.to_lowercase().contains(needle)
                }
                None => true,
            })
            .filter(|p| query.category.is_none_or(|c| p.category == c))
            .filter(|p| query.min_price.is_none_or(|min| p.price >= min))
            .filter(|p| query.max_price.is_none_or(|max| p.price <= max))
            .collect();

        if let Some(sort_by) = query.sort_by {
            matches.sort_by(|a, b| {
                let ordering = match sort_by {
                    ProductSortBy::Name => a.name.cmp(&b.name),
                    ProductSortBy::Price => a.price.cmp(&b.price),
                    ProductSortBy::Rating => a.rating.total_cmp(&b.rating),
                };
                match query.sort_order.unwrap_or(SortOrder::Asc) {
                    SortOrder::Asc => ordering,
                    SortOrder::Desc => ordering.reverse(),
                }
            });
        }
        matches
    }

    fn by_category(&self, category: ProductCategory) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category == category)
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

fn drink(
    id: &str,
    name: &str,
    description: &str,
    price: i64,
    image: &str,
    rating: f32,
    featured: bool,
) -> Product {
    Product {
        id: id.to_owned(),
        name: name.to_owned(),
        description: description.to_owned(),
        price,
        image: format!("assets/{image}"),
        rating,
        category: ProductCategory::Drinks,
        weight: None,
        featured,
    }
}

fn beans(id: &str, name: &str, description: &str, price: i64, image: &str, rating: f32) -> Product {
    Product {
        id: id.to_owned(),
        name: name.to_owned(),
        description: description.to_owned(),
        price,
        image: format!("assets/{image}"),
        rating,
        category: ProductCategory::Beans,
        weight: Some("340g".to_owned()),
        featured: false,
    }
}

fn product_range() -> Vec<Product> {
    vec![
        drink(
            "cappuccino",
            "Classic Cappuccino",
            "Rich espresso topped with velvety steamed milk foam, creating the perfect balance of bold and creamy. A timeless Italian classic.",
            299,
            "coffee-cappuccino.jpg",
            4.9,
            true,
        ),
        drink(
            "espresso",
            "Double Espresso",
            "Intense and aromatic, our signature double shot delivers a pure coffee experience with a golden crema that speaks to quality.",
            199,
            "coffee-espresso.jpg",
            4.8,
            true,
        ),
        drink(
            "latte",
            "Caramel Latte",
            "Smooth espresso blended with steamed milk and rich caramel, topped with silky microfoam. Sweet indulgence in every sip.",
            349,
            "coffee-latte.jpg",
            4.9,
            true,
        ),
        drink(
            "mocha",
            "Belgian Mocha",
            "Premium Belgian chocolate meets robust espresso, crowned with fresh whipped cream and chocolate shavings. Pure decadence.",
            399,
            "coffee-mocha.jpg",
            4.9,
            false,
        ),
        drink(
            "americano",
            "Bold Americano",
            "Espresso diluted with hot water, delivering a clean and bold flavor. Simple, elegant, and always satisfying.",
            249,
            "coffee-americano.jpg",
            4.7,
            false,
        ),
        drink(
            "coldbrew",
            "Signature Cold Brew",
            "Steeped for 20 hours, our cold brew is smooth, naturally sweet, and refreshingly bold. The perfect pick-me-up.",
            279,
            "coffee-coldbrew.jpg",
            4.8,
            false,
        ),
        beans(
            "beans-signature",
            "Signature Blend Beans",
            "Our flagship blend with notes of chocolate, caramel, and subtle fruitiness. Medium roast, perfect for any brewing method.",
            1999,
            "coffee-cappuccino.jpg",
            4.9,
        ),
        beans(
            "beans-dark",
            "Midnight Roast",
            "Bold and intense dark roast with smoky undertones. Ideal for espresso lovers who crave depth.",
            2199,
            "coffee-espresso.jpg",
            4.8,
        ),
        beans(
            "beans-light",
            "Morning Light Roast",
            "Bright and citrusy light roast from Ethiopian highlands. A refreshing way to start your day.",
            2299,
            "coffee-latte.jpg",
            4.7,
        ),
        beans(
            "beans-decaf",
            "Decaf Delight",
            "All the flavor, none of the caffeine. Swiss water processed for a smooth, clean taste.",
            2099,
            "coffee-mocha.jpg",
            4.6,
        ),
    ]
}

fn gift_set_range() -> Vec<GiftSet> {
    vec![
        GiftSet {
            id: "gift-starter".to_owned(),
            name: "Coffee Starter Kit".to_owned(),
            description: "Perfect for beginners. Includes 3 signature blends and a brewing guide."
                .to_owned(),
            price: 4999,
            items: vec![
                "Signature Blend".to_owned(),
                "Morning Light".to_owned(),
                "Brewing Guide".to_owned(),
            ],
        },
        GiftSet {
            id: "gift-connoisseur".to_owned(),
            name: "Connoisseur Collection".to_owned(),
            description: "For the true coffee lover. 5 premium single-origin beans from around the world."
                .to_owned(),
            price: 7999,
            items: vec![
                "Ethiopian".to_owned(),
                "Colombian".to_owned(),
                "Sumatran".to_owned(),
                "Guatemalan".to_owned(),
                "Kenyan".to_owned(),
            ],
        },
        GiftSet {
            id: "gift-ultimate".to_owned(),
            name: "Ultimate Coffee Experience".to_owned(),
            description: "The complete package. Beans, gear, and an online class with our head roaster."
                .to_owned(),
            price: 15999,
            items: vec![
                "6 Premium Beans".to_owned(),
                "Pour-Over Kit".to_owned(),
                "Private Class".to_owned(),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_the_range_between_menu_and_shop() {
        let catalog = Catalog::new();
        assert_eq!(catalog.menu().len(), 6);
        assert_eq!(catalog.shop().len(), 4);
        assert_eq!(catalog.gift_sets().len(), 3);
        assert!(catalog.menu().iter().all(|p| p.category.label() == "Drinks"));
        assert!(catalog.shop().iter().all(|p| p.category.label() == "Coffee Beans"));
        assert!(catalog.shop().iter().all(|p| p.weight.as_deref() == Some("340g")));
    }

    #[test]
    fn featured_is_the_home_page_trio() {
        let catalog = Catalog::new();
        let ids: Vec<&str> = catalog.featured().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["cappuccino", "espresso", "latte"]);
    }

    #[test]
    fn looks_up_products_by_id() {
        let catalog = Catalog::new();
        assert_eq!(catalog.get("latte").unwrap().price, 349);
        assert!(catalog.get("chai").is_none());
    }

    #[test]
    fn search_matches_name_and_description() {
        let catalog = Catalog::new();
        let query = ProductQuery {
            q: Some("roast".into()),
            ..Default::default()
        };
        let ids: Vec<&str> = catalog.search(&query).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["beans-signature", "beans-dark", "beans-light"]);
    }

    #[test]
    fn search_filters_by_category_and_price() {
        let catalog = Catalog::new();
        let query = ProductQuery {
            category: Some(ProductCategory::Drinks),
            max_price: Some(250),
            ..Default::default()
        };
        let ids: Vec<&str> = catalog.search(&query).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["espresso", "americano"]);
    }

    #[test]
    fn search_sorts_by_price_descending() {
        let catalog = Catalog::new();
        let query = ProductQuery {
            category: Some(ProductCategory::Beans),
            sort_by: Some(ProductSortBy::Price),
            sort_order: Some(SortOrder::Desc),
            ..Default::default()
        };
        let prices: Vec<i64> = catalog.search(&query).iter().map(|p| p.price).collect();
        assert_eq!(prices, [2299, 2199, 2099, 1999]);
    }
}
