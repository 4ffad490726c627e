use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::dto::api::{ApiResponse, ProductsQuery, ProductsQueryParams};
use crate::forms::product::ProductForm;
use crate::repository::DieselRepository;
use crate::routes::{error_response, run_blocking};
use crate::services::products as product_service;

#[get("/products")]
pub async fn list_products(
    params: web::Query<ProductsQueryParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let repo = repo.get_ref().clone();
    let query = ProductsQuery::from(params.into_inner());

    match run_blocking(move || product_service::list_products(&repo, query)).await {
        Ok(page) => HttpResponse::Ok().json(ApiResponse::from(page)),
        Err(err) => error_response(&err),
    }
}

#[get("/products/analytics/all")]
pub async fn analytics_products(repo: web::Data<DieselRepository>) -> impl Responder {
    let repo = repo.get_ref().clone();

    match run_blocking(move || product_service::list_all_products(&repo)).await {
        Ok(products) => HttpResponse::Ok().json(ApiResponse::ok(products)),
        Err(err) => error_response(&err),
    }
}

#[get("/products/{product_id}")]
pub async fn show_product(
    product_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let repo = repo.get_ref().clone();
    let product_id = product_id.into_inner();

    match run_blocking(move || product_service::get_product(&repo, product_id)).await {
        Ok(product) => HttpResponse::Ok().json(ApiResponse::maybe(product)),
        Err(err) => error_response(&err),
    }
}

#[post("/products")]
pub async fn create_product(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ProductForm>,
) -> impl Responder {
    let repo = repo.get_ref().clone();

    match run_blocking(move || product_service::create_product(&repo, form)).await {
        Ok(product) => HttpResponse::Created().json(ApiResponse::ok(product)),
        Err(err) => error_response(&err),
    }
}

#[put("/products/{product_id}")]
pub async fn update_product(
    product_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ProductForm>,
) -> impl Responder {
    let repo = repo.get_ref().clone();
    let product_id = product_id.into_inner();

    match run_blocking(move || product_service::update_product(&repo, product_id, form)).await {
        Ok(product) => HttpResponse::Ok().json(ApiResponse::ok(product)),
        Err(err) => error_response(&err),
    }
}

#[delete("/products/{product_id}")]
pub async fn delete_product(
    product_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let repo = repo.get_ref().clone();
    let product_id = product_id.into_inner();

    match run_blocking(move || product_service::delete_product(&repo, product_id)).await {
        Ok(product) => HttpResponse::Ok().json(ApiResponse::ok(product)),
        Err(err) => error_response(&err),
    }
}
