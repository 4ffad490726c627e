use actix_web::error::{InternalError, JsonPayloadError, PathError};
use actix_web::{HttpResponse, web};

use crate::dto::api::ApiResponse;
use crate::services::{ServiceError, ServiceResult};

pub mod products;

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";
pub const NOT_FOUND_MESSAGE: &str = "Product not found";

/// Registers the JSON API under `/api`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).app_data(path_config()).service(
        web::scope("/api")
            .service(products::list_products)
            .service(products::analytics_products)
            .service(products::show_product)
            .service(products::create_product)
            .service(products::update_product)
            .service(products::delete_product),
    );
}

/// Malformed JSON bodies are answered with a `400` envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req| {
        log::warn!("Rejected request body: {err}");
        let response = HttpResponse::BadRequest().json(ApiResponse::<()>::error(err.to_string()));
        InternalError::from_response(err, response).into()
    })
}

/// Ids that are not integers name no product.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err: PathError, _req| {
        let response = HttpResponse::NotFound().json(ApiResponse::<()>::error(NOT_FOUND_MESSAGE));
        InternalError::from_response(err, response).into()
    })
}

/// Runs a blocking service call on the actix thread pool.
pub async fn run_blocking<F, T>(f: F) -> ServiceResult<T>
where
    F: FnOnce() -> ServiceResult<T> + Send + 'static,
    T: Send + 'static,
{
    web::block(f).await.map_err(|err| {
        log::error!("Blocking task failed: {err}");
        ServiceError::Internal(err.to_string())
    })?
}

/// Maps a service failure onto the HTTP status and envelope of the API.
///
/// Internal details were already logged where the failure happened.
pub fn error_response(err: &ServiceError) -> HttpResponse {
    match err {
        ServiceError::Form(message) | ServiceError::TypeConstraint(message) => {
            HttpResponse::BadRequest().json(ApiResponse::<()>::error(message.as_str()))
        }
        ServiceError::NotFound => {
            HttpResponse::NotFound().json(ApiResponse::<()>::error(NOT_FOUND_MESSAGE))
        }
        ServiceError::Internal(_) => {
            HttpResponse::InternalServerError().json(ApiResponse::<()>::error(INTERNAL_ERROR_MESSAGE))
        }
    }
}
