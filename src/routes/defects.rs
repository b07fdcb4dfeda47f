use actix_web::{HttpRequest, Responder, get, post, web};
use serde::Deserialize;

use crate::domain::auth::AuthenticatedUser;
use crate::forms::defects::AddDefectForm;
use crate::list_query::ListEntity;
use crate::models::defect::Defect as DbDefect;
use crate::repository::DieselRepository;
use crate::routes::{bad_request, error_response, list_params, ok};
use crate::services::defects as service;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DefectScopeParams {
    customer_id: Option<i32>,
}

#[get("/v1/defects")]
pub async fn list_defects(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let customer_id = match serde_html_form::from_str::<DefectScopeParams>(req.query_string()) {
        Ok(DefectScopeParams {
            customer_id: Some(id),
        }) => id,
        Ok(_) => return bad_request("customerId is required"),
        Err(err) => return bad_request(format!("Invalid customerId: {err}")),
    };
    let params = match list_params(&req) {
        Ok(params) => params,
        Err(response) => return response,
    };
    let paging = params.into_spec(DbDefect::DESCRIPTOR.searchable_fields());

    match service::list_defects(repo.get_ref(), &user, customer_id, paging) {
        Ok(page) => ok(page),
        Err(err) => error_response(err),
    }
}

#[post("/v1/defects")]
pub async fn add_defect(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<AddDefectForm>,
) -> impl Responder {
    match service::create_defect(repo.get_ref(), &user, form.into_inner()) {
        Ok(defect) => {
            log::info!("Defect {} recorded for customer {}", defect.id, defect.customer_id);
            ok(defect)
        }
        Err(err) => error_response(err),
    }
}
