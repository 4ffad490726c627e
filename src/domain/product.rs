use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ImageUrl, Price, ProductId, ProductName};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: ProductName,
    pub price: Price,
    pub image: ImageUrl,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewProduct {
    pub name: ProductName,
    pub price: Price,
    pub image: ImageUrl,
    pub created_at: NaiveDateTime,
}

impl NewProduct {
    /// Creates a product stamped with the current UTC time.
    #[must_use]
    pub fn new(name: ProductName, price: Price, image: ImageUrl) -> Self {
        Self {
            name,
            price,
            image,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct UpdateProduct {
    pub name: ProductName,
    pub price: Price,
    pub image: ImageUrl,
}

/// Whitelisted orderings for product listings.
///
/// Unknown tokens degrade to [`ProductSort::Newest`] instead of erroring, so
/// the ordering clause is always one of these fixed variants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSort {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
}

impl ProductSort {
    pub fn as_str(self) -> &'static str {
        match self {
            ProductSort::Newest => "newest",
            ProductSort::PriceAsc => "price_asc",
            ProductSort::PriceDesc => "price_desc",
        }
    }
}

impl From<&str> for ProductSort {
    fn from(value: &str) -> Self {
        match value.trim() {
            "price_asc" => ProductSort::PriceAsc,
            "price_desc" => ProductSort::PriceDesc,
            _ => ProductSort::Newest,
        }
    }
}

impl std::fmt::Display for ProductSort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
