//! HTTP access to the product API.

use std::future::Future;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::config::ClientConfig;
use crate::client::error::{ClientError, ClientResult};
use crate::client::state::{ProductDraft, QueryParams};
use crate::domain::product::Product;
use crate::domain::types::ProductId;
use crate::dto::api::ApiResponse;
use crate::pagination::PaginationMeta;

/// One page of the product list as returned by the server.
#[derive(Clone, Debug, PartialEq)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub pagination: PaginationMeta,
}

/// Operations the store needs from the server.
pub trait ProductApi {
    fn list_products(
        &self,
        params: &QueryParams,
    ) -> impl Future<Output = ClientResult<ProductPage>> + Send;

    /// `Ok(None)` when the server has no such product.
    fn get_product(
        &self,
        id: ProductId,
    ) -> impl Future<Output = ClientResult<Option<Product>>> + Send;

    fn create_product(
        &self,
        draft: &ProductDraft,
    ) -> impl Future<Output = ClientResult<Product>> + Send;

    fn update_product(
        &self,
        id: ProductId,
        draft: &ProductDraft,
    ) -> impl Future<Output = ClientResult<Product>> + Send;

    fn delete_product(&self, id: ProductId) -> impl Future<Output = ClientResult<Product>> + Send;

    /// Every product, unpaginated.
    fn list_all_products(&self) -> impl Future<Output = ClientResult<Vec<Product>>> + Send;
}

/// [`ProductApi`] over `reqwest`.
#[derive(Clone, Debug)]
pub struct HttpProductApi {
    client: Client,
    base_url: String,
}

impl HttpProductApi {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{path}", self.base_url)
    }

    fn product_url(&self, id: ProductId) -> String {
        self.url(&format!("/products/{id}"))
    }
}

/// Sends the request and unwraps the envelope, turning non-2xx statuses into
/// [`ClientError::Status`].
async fn send<T>(request: RequestBuilder) -> ClientResult<ApiResponse<T>>
where
    T: DeserializeOwned,
{
    let response = request.send().await?;
    let status = response.status();

    if !status.is_success() {
        // Envelope errors carry `message`, the request gate uses `error`.
        let body = response.json::<Value>().await.unwrap_or(Value::Null);
        let message = ["message", "error"]
            .iter()
            .find_map(|key| body.get(key).and_then(Value::as_str))
            .or(status.canonical_reason())
            .unwrap_or_default()
            .to_string();
        log::debug!("Request failed with {status}: {message}");
        return Err(ClientError::Status {
            status: status.as_u16(),
            message,
        });
    }

    Ok(response.json::<ApiResponse<T>>().await?)
}

fn require<T>(data: Option<T>) -> ClientResult<T> {
    data.ok_or_else(|| ClientError::Decode("envelope carried no data".to_string()))
}

impl ProductApi for HttpProductApi {
    async fn list_products(&self, params: &QueryParams) -> ClientResult<ProductPage> {
        let body = send::<Vec<Product>>(self.client.get(self.url("/products")).query(params)).await?;
        Ok(ProductPage {
            products: require(body.data)?,
            pagination: require(body.pagination)?,
        })
    }

    async fn get_product(&self, id: ProductId) -> ClientResult<Option<Product>> {
        match send::<Product>(self.client.get(self.product_url(id))).await {
            Ok(body) => Ok(body.data),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn create_product(&self, draft: &ProductDraft) -> ClientResult<Product> {
        let body = send(self.client.post(self.url("/products")).json(draft)).await?;
        require(body.data)
    }

    async fn update_product(&self, id: ProductId, draft: &ProductDraft) -> ClientResult<Product> {
        let body = send(self.client.put(self.product_url(id)).json(draft)).await?;
        require(body.data)
    }

    async fn delete_product(&self, id: ProductId) -> ClientResult<Product> {
        let body = send(self.client.delete(self.product_url(id))).await?;
        require(body.data)
    }

    async fn list_all_products(&self) -> ClientResult<Vec<Product>> {
        let body = send(self.client.get(self.url("/products/analytics/all"))).await?;
        require(body.data)
    }
}
