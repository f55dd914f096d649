use serde::{Deserialize, Serialize};

/// Stable identifier of a product in the remote catalog.
pub type ProductId = u64;

/// A single catalog entry as delivered by the product endpoint.
///
/// The wire shape is a flat JSON object:
///
/// ```json
/// {
///   "id": 1,
///   "title": "Fjallraven - Foldsack No. 1 Backpack",
///   "price": 109.95,
///   "description": "Your perfect pack for everyday use",
///   "category": "men's clothing",
///   "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
///   "rating": { "rate": 3.9, "count": 120 }
/// }
/// ```
///
/// `rating` is missing for some products; every rating filter treats such a
/// product as unrated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub category: String,
    pub price: f64,
    pub image: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
}

/// Customer rating attached to a product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

impl Product {
    /// Rating value, if the product has been rated.
    pub fn rate(&self) -> Option<f64> {
        self.rating.map(|r| r.rate)
    }

    /// Price formatted for display, e.g. `$109.95`.
    pub fn price_label(&self) -> String {
        format!("${}", self.price)
    }
}
