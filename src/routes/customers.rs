use actix_web::{HttpRequest, Responder, get, post, web};

use crate::domain::auth::AuthenticatedUser;
use crate::forms::customers::AddCustomerForm;
use crate::list_query::ListEntity;
use crate::models::customer::Customer as DbCustomer;
use crate::repository::DieselRepository;
use crate::routes::{error_response, list_params, ok};
use crate::services::customers as service;

#[get("/v1/customers")]
pub async fn list_customers(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let params = match list_params(&req) {
        Ok(params) => params,
        Err(response) => return response,
    };
    let paging = params.into_spec(DbCustomer::DESCRIPTOR.searchable_fields());

    match service::list_customers(repo.get_ref(), &user, paging) {
        Ok(page) => ok(page),
        Err(err) => error_response(err),
    }
}

#[get("/v1/customers/{customer_id}")]
pub async fn show_customer(
    customer_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match service::get_customer(repo.get_ref(), &user, customer_id.into_inner()) {
        Ok(customer) => ok(customer),
        Err(err) => error_response(err),
    }
}

#[post("/v1/customers")]
pub async fn add_customer(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<AddCustomerForm>,
) -> impl Responder {
    match service::create_customer(repo.get_ref(), &user, form.into_inner()) {
        Ok(customer) => {
            log::info!("Customer {} created by {}", customer.id, user.email);
            ok(customer)
        }
        Err(err) => error_response(err),
    }
}
