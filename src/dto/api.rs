//! DTOs exposed by the product API endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::product::ProductSort;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, MAX_ITEMS_PER_PAGE, Paginated, PaginationMeta};

/// Uniform `{success, data?, pagination?, message?}` wrapper on every response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            pagination: None,
            message: None,
        }
    }

    /// Successful response whose `data` may be absent.
    pub fn maybe(data: Option<T>) -> Self {
        Self {
            success: true,
            data,
            pagination: None,
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            pagination: None,
            message: Some(message.into()),
        }
    }
}

impl<T> From<Paginated<T>> for ApiResponse<Vec<T>> {
    fn from(page: Paginated<T>) -> Self {
        Self {
            success: true,
            data: Some(page.items),
            pagination: Some(page.pagination),
            message: None,
        }
    }
}

/// Raw query string of `GET /api/products`. Values stay strings so that
/// garbage degrades to defaults instead of rejecting the request. The search
/// text is used verbatim.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ProductsQueryParams {
    pub search: Option<String>,
    pub sort: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Normalized listing request handed to the product service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductsQuery {
    pub search: String,
    pub sort: ProductSort,
    pub page: usize,
    pub limit: usize,
}

impl Default for ProductsQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort: ProductSort::Newest,
            page: 1,
            limit: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

fn parse_nonzero(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .filter(|value| *value != 0)
}

impl From<ProductsQueryParams> for ProductsQuery {
    fn from(params: ProductsQueryParams) -> Self {
        let page = parse_nonzero(params.page.as_deref())
            .map(|page| usize::try_from(page.max(1)).unwrap_or(1))
            .unwrap_or(1);
        let limit = parse_nonzero(params.limit.as_deref())
            .map(|limit| usize::try_from(limit.clamp(1, MAX_ITEMS_PER_PAGE as i64)).unwrap_or(1))
            .unwrap_or(DEFAULT_ITEMS_PER_PAGE);

        Self {
            search: params.search.unwrap_or_default(),
            sort: params
                .sort
                .as_deref()
                .map(ProductSort::from)
                .unwrap_or_default(),
            page,
            limit,
        }
    }
}
