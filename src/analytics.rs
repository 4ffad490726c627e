//! Price distribution summary over the complete, unfiltered catalog.

use serde::Serialize;

use crate::domain::product::Product;
use crate::domain::types::Price;

/// Bucket labels paired with their inclusive upper bound in cents.
pub const PRICE_BUCKETS: [(&str, Option<i64>); 5] = [
    ("$0 - $50", Some(5_000)),
    ("$51 - $100", Some(10_000)),
    ("$101 - $200", Some(20_000)),
    ("$201 - $500", Some(50_000)),
    ("$500+", None),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketCount {
    pub name: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSummary {
    pub bucket_counts: Vec<BucketCount>,
    pub product_count: usize,
    pub total_value: f64,
    /// Zero for an empty catalog.
    pub average_price: f64,
}

fn bucket_index(price: Price) -> usize {
    PRICE_BUCKETS
        .iter()
        .position(|(_, upper)| upper.is_none_or(|upper| price.cents() <= upper))
        .unwrap_or(PRICE_BUCKETS.len() - 1)
}

/// Buckets prices and totals them exactly in cents.
pub fn summarize_prices(prices: impl IntoIterator<Item = Price>) -> PriceSummary {
    let mut counts = [0usize; PRICE_BUCKETS.len()];
    let mut total_cents: i128 = 0;
    let mut product_count = 0usize;

    for price in prices {
        counts[bucket_index(price)] += 1;
        total_cents += i128::from(price.cents());
        product_count += 1;
    }

    let total_value = total_cents as f64 / 100.0;
    let average_price = if product_count == 0 {
        0.0
    } else {
        total_value / product_count as f64
    };

    PriceSummary {
        bucket_counts: PRICE_BUCKETS
            .iter()
            .zip(counts)
            .map(|(&(name, _), count)| BucketCount { name, count })
            .collect(),
        product_count,
        total_value,
        average_price,
    }
}

pub fn summarize(products: &[Product]) -> PriceSummary {
    summarize_prices(products.iter().map(|product| product.price))
}
