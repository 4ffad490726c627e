//! Product catalog workflows behind the `/api/products` routes.

use crate::domain::product::Product;
use crate::domain::types::ProductId;
use crate::dto::api::ProductsQuery;
use crate::forms::product::{ProductForm, ProductPayload};
use crate::pagination::Paginated;
use crate::repository::{ProductListQuery, ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult};

/// Returns one page of products matching the search, in the requested order.
pub fn list_products<R>(repo: &R, query: ProductsQuery) -> ServiceResult<Paginated<Product>>
where
    R: ProductReader + ?Sized,
{
    let mut list_query = ProductListQuery::new()
        .sort(query.sort)
        .paginate(query.page, query.limit);

    if !query.search.is_empty() {
        list_query = list_query.search(query.search);
    }

    let (total, products) = repo.list_products(list_query).map_err(|err| {
        log::error!("Failed to list products: {err}");
        err
    })?;

    Ok(Paginated::new(products, total, query.page, query.limit))
}

/// Looks up a single product. Unknown or malformed ids yield `None`.
pub fn get_product<R>(repo: &R, product_id: i32) -> ServiceResult<Option<Product>>
where
    R: ProductReader + ?Sized,
{
    let Ok(product_id) = ProductId::new(product_id) else {
        return Ok(None);
    };

    let product = repo.get_product_by_id(product_id).map_err(|err| {
        log::error!("Failed to load product {product_id}: {err}");
        err
    })?;

    Ok(product)
}

/// Every product, unpaginated, for the analytics view.
pub fn list_all_products<R>(repo: &R) -> ServiceResult<Vec<Product>>
where
    R: ProductReader + ?Sized,
{
    let (_, products) = repo
        .list_products(ProductListQuery::new())
        .map_err(|err| {
            log::error!("Failed to load products for analytics: {err}");
            err
        })?;

    Ok(products)
}

/// Validates the form and persists a new product.
pub fn create_product<R>(repo: &R, form: ProductForm) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    let payload = ProductPayload::try_from(form)?;

    let product = repo
        .create_product(&payload.into_new_product())
        .map_err(|err| {
            log::error!("Failed to create product: {err}");
            err
        })?;

    Ok(product)
}

/// Replaces the product fields; a missing product is [`ServiceError::NotFound`].
pub fn update_product<R>(repo: &R, product_id: i32, form: ProductForm) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    let product_id = ProductId::new(product_id).map_err(|_| ServiceError::NotFound)?;
    let payload = ProductPayload::try_from(form)?;

    repo.update_product(product_id, &payload.into_update())
        .map_err(ServiceError::from)
        .inspect_err(|err| {
            if !matches!(err, ServiceError::NotFound) {
                log::error!("Failed to update product {product_id}: {err}");
            }
        })
}

/// Deletes the product and returns the removed row.
pub fn delete_product<R>(repo: &R, product_id: i32) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    let product_id = ProductId::new(product_id).map_err(|_| ServiceError::NotFound)?;

    repo.delete_product(product_id)
        .map_err(ServiceError::from)
        .inspect_err(|err| {
            if !matches!(err, ServiceError::NotFound) {
                log::error!("Failed to delete product {product_id}: {err}");
            }
        })
}
