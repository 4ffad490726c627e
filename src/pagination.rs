use serde::{Deserialize, Serialize};

/// Page size used by the catalog client.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 6;
/// Largest page a caller may request.
pub const MAX_ITEMS_PER_PAGE: usize = 100;

/// Pagination metadata derived from the filtered row count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_products: usize,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl PaginationMeta {
    /// `total_products` must be the count of the same filter that produced the page.
    pub fn new(total_products: usize, current_page: usize, per_page: usize) -> Self {
        let current_page = current_page.max(1);
        let total_pages = total_products.div_ceil(per_page.max(1));

        Self {
            current_page,
            total_pages,
            total_products,
            has_next_page: current_page < total_pages,
            has_prev_page: current_page > 1,
        }
    }

    /// Last valid page when `current_page` ran past the end of a non-empty result.
    pub fn clamped_page(&self) -> Option<usize> {
        (self.total_pages > 0 && self.current_page > self.total_pages).then_some(self.total_pages)
    }
}

#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, total: usize, current_page: usize, per_page: usize) -> Self {
        Self {
            items,
            pagination: PaginationMeta::new(total, current_page, per_page),
        }
    }
}
