use crate::domain::auth::AuthenticatedUser;
use crate::domain::customer::Customer;
use crate::domain::types::{AccountId, CustomerId, EmailAddress};
use crate::forms::FormError;
use crate::forms::customers::AddCustomerForm;
use crate::paging::{PageResult, PagingSpec};
use crate::repository::{CustomerListQuery, CustomerReader, CustomerWriter};
use crate::services::{ServiceError, ServiceResult};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

/// Builds the list scope for `user`: admins see the whole account, employees
/// only the customers assigned to them.
pub(crate) fn customer_scope(user: &AuthenticatedUser) -> ServiceResult<CustomerListQuery> {
    let account_id = AccountId::new(user.account_id)?;
    let query = CustomerListQuery::new(account_id);

    if user.has_role(SERVICE_ADMIN_ROLE) {
        Ok(query)
    } else if user.has_role(SERVICE_ACCESS_ROLE) {
        Ok(query.inspector_email(EmailAddress::new(user.email.as_str())?))
    } else {
        Err(ServiceError::Forbidden)
    }
}

/// Returns one page of the customers visible to `user`.
pub fn list_customers<R>(
    repo: &R,
    user: &AuthenticatedUser,
    paging: PagingSpec,
) -> ServiceResult<PageResult<Customer>>
where
    R: CustomerReader + ?Sized,
{
    let query = customer_scope(user)?.paging(paging);

    repo.list_customers(query).map_err(|err| {
        log::error!("Failed to list customers: {err}");
        ServiceError::from(err)
    })
}

/// Fetches a single customer, hiding customers outside the user's scope.
pub fn get_customer<R>(repo: &R, user: &AuthenticatedUser, customer_id: i32) -> ServiceResult<Customer>
where
    R: CustomerReader + ?Sized,
{
    let scope = customer_scope(user)?;
    let customer_id = CustomerId::new(customer_id)?;

    let customer = repo
        .get_customer_by_id(customer_id, scope.account_id)?
        .ok_or(ServiceError::NotFound)?;

    match &scope.inspector_email {
        Some(email) if customer.inspector_email.as_ref() != Some(email) => {
            Err(ServiceError::NotFound)
        }
        _ => Ok(customer),
    }
}

/// Validates the payload and stores a new customer. Admin only.
pub fn create_customer<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddCustomerForm,
) -> ServiceResult<Customer>
where
    R: CustomerWriter + ?Sized,
{
    if !user.has_role(SERVICE_ADMIN_ROLE) {
        return Err(ServiceError::Forbidden);
    }

    let account_id = AccountId::new(user.account_id)?;
    let new_customer = form.into_new_customer(account_id).map_err(|err| {
        log::warn!("Rejected customer payload: {err}");
        match err {
            FormError::Validation(errors) => ServiceError::Form(errors.to_string()),
            FormError::Constraint(err) => ServiceError::from(err),
        }
    })?;

    repo.create_customer(&new_customer).map_err(|err| {
        log::error!("Failed to create customer: {err}");
        ServiceError::from(err)
    })
}
