use crate::domain::auth::AuthenticatedUser;
use crate::domain::defect::Defect;
use crate::domain::types::AccountId;
use crate::forms::FormError;
use crate::forms::defects::AddDefectForm;
use crate::paging::{PageResult, PagingSpec};
use crate::repository::{CustomerReader, DefectListQuery, DefectReader, DefectWriter};
use crate::services::customers::get_customer;
use crate::services::{ServiceError, ServiceResult};

/// Returns one page of the defects recorded for a customer the user can see.
pub fn list_defects<R>(
    repo: &R,
    user: &AuthenticatedUser,
    customer_id: i32,
    paging: PagingSpec,
) -> ServiceResult<PageResult<Defect>>
where
    R: CustomerReader + DefectReader + ?Sized,
{
    let customer = get_customer(repo, user, customer_id)?;
    let query = DefectListQuery::new(customer.account_id, customer.id).paging(paging);

    repo.list_defects(query).map_err(|err| {
        log::error!("Failed to list defects for customer {customer_id}: {err}");
        ServiceError::from(err)
    })
}

/// Records a defect against a customer the user can see.
pub fn create_defect<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddDefectForm,
) -> ServiceResult<Defect>
where
    R: CustomerReader + DefectWriter + ?Sized,
{
    get_customer(repo, user, form.customer_id)?;

    let account_id = AccountId::new(user.account_id)?;
    let new_defect = form.into_new_defect(account_id).map_err(|err| match err {
        FormError::Validation(errors) => ServiceError::Form(errors.to_string()),
        FormError::Constraint(err) => ServiceError::from(err),
    })?;

    repo.create_defect(&new_defect).map_err(|err| {
        log::error!("Failed to create defect: {err}");
        ServiceError::from(err)
    })
}
