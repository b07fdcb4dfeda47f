//! JSON API handlers.

use actix_web::error::InternalError;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;
use validator::Validate;

use crate::dto::envelope::{ErrorEnvelope, ResultEnvelope};
use crate::dto::list::ListQueryParams;
use crate::services::ServiceError;

pub mod customers;
pub mod defects;

/// Registers the `/api` scope with JSON error handling for bodies and paths.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                let message = err.to_string();
                InternalError::from_response(err, bad_request(message)).into()
            }))
            .app_data(web::PathConfig::default().error_handler(|err, _req| {
                let message = err.to_string();
                InternalError::from_response(err, bad_request(message)).into()
            }))
            .service(customers::list_customers)
            .service(customers::show_customer)
            .service(customers::add_customer)
            .service(defects::list_defects)
            .service(defects::add_defect),
    );
}

pub(crate) fn ok<T: Serialize>(result: T) -> HttpResponse {
    HttpResponse::Ok().json(ResultEnvelope { result })
}

pub(crate) fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorEnvelope::new(message))
}

/// Maps a service failure onto a status code. Internal details are logged,
/// never returned.
pub(crate) fn error_response(err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::Forbidden => {
            HttpResponse::Forbidden().json(ErrorEnvelope::new(err.to_string()))
        }
        ServiceError::NotFound => {
            HttpResponse::NotFound().json(ErrorEnvelope::new(err.to_string()))
        }
        ServiceError::Form(message) | ServiceError::TypeConstraint(message) => {
            bad_request(message)
        }
        ServiceError::Repository(err) => {
            log::error!("Request failed: {err}");
            HttpResponse::InternalServerError().json(ErrorEnvelope::new("Internal server error"))
        }
    }
}

/// Parses and validates the paging parameters of a list request. Repeated
/// keys (`sortField`, `sortAsc`, `searchFields`) are collected in order.
pub(crate) fn list_params(req: &HttpRequest) -> Result<ListQueryParams, HttpResponse> {
    let params: ListQueryParams = serde_html_form::from_str(req.query_string())
        .map_err(|err| bad_request(format!("Invalid query string: {err}")))?;
    params
        .validate()
        .map_err(|err| bad_request(err.to_string()))?;
    Ok(params)
}
