//! Plain data held by the client store.

use serde::Serialize;
use serde_json::Value;

use crate::domain::product::{Product, ProductSort};
use crate::forms::FormError;
use crate::forms::product::{ProductForm, ProductPayload};
use crate::pagination::PaginationMeta;

/// The committed `{search, sort, page}` tuple that drives list fetches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryState {
    pub search_query: String,
    pub sort_option: ProductSort,
    pub current_page: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search_query: String::new(),
            sort_option: ProductSort::Newest,
            current_page: 1,
        }
    }
}

/// Query string of `GET /api/products`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QueryParams {
    pub search: String,
    pub sort: ProductSort,
    pub page: usize,
    pub limit: usize,
}

impl QueryParams {
    pub fn new(query: &QueryState, limit: usize) -> Self {
        Self {
            search: query.search_query.clone(),
            sort: query.sort_option,
            page: query.current_page,
            limit,
        }
    }
}

/// Form fields staged for a create or update, kept as typed text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ProductDraft {
    pub name: String,
    pub price: String,
    pub image: String,
}

impl ProductDraft {
    pub fn new(
        name: impl Into<String>,
        price: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
            image: image.into(),
        }
    }

    /// Runs the same checks the server applies to a product body.
    pub fn validate(&self) -> Result<ProductPayload, FormError> {
        ProductPayload::try_from(ProductForm {
            name: self.name.clone(),
            price: Some(Value::String(self.price.clone())),
            image: self.image.clone(),
        })
    }

    /// Applies the draft to `product`; fails without touching it when the
    /// draft is not a valid product.
    pub fn apply_to(&self, product: &mut Product) -> Result<(), FormError> {
        let payload = self.validate()?;
        product.name = payload.name;
        product.price = payload.price;
        product.image = payload.image;
        Ok(())
    }
}

impl From<&Product> for ProductDraft {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.to_string(),
            price: product.price.to_string(),
            image: product.image.to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Info,
    Error,
}

/// Transient message for the UI, drained by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

/// Snapshot of everything the UI renders.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientState {
    pub products: Vec<Product>,
    pub loading: bool,
    pub error: Option<String>,
    pub current_product: Option<Product>,
    pub form_data: ProductDraft,
    pub query: QueryState,
    pub pagination: PaginationMeta,
}

impl Default for ClientState {
    fn default() -> Self {
        Self {
            products: Vec::new(),
            loading: false,
            error: None,
            current_product: None,
            form_data: ProductDraft::default(),
            query: QueryState::default(),
            pagination: PaginationMeta {
                current_page: 1,
                total_pages: 1,
                ..PaginationMeta::default()
            },
        }
    }
}
