use serde::Deserialize;
use validator::Validate;

use crate::domain::customer::NewCustomer;
use crate::domain::types::{AccountId, CustomerName, EmailAddress};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "PascalCase")]
/// Payload for adding a customer to the signed-in user's account.
pub struct AddCustomerForm {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    #[validate(length(max = 500))]
    pub address: Option<String>,
    /// Employee the new customer is assigned to.
    #[validate(email)]
    pub inspector_email: Option<String>,
}

fn optional_email(value: Option<String>) -> Result<Option<EmailAddress>, FormError> {
    Ok(value
        .filter(|s| !s.trim().is_empty())
        .map(EmailAddress::new)
        .transpose()?)
}

impl AddCustomerForm {
    /// Validates the payload and converts it into a domain [`NewCustomer`].
    pub fn into_new_customer(self, account_id: AccountId) -> Result<NewCustomer, FormError> {
        self.validate()?;
        Ok(NewCustomer::new(
            account_id,
            CustomerName::new(self.name)?,
            optional_email(self.email)?,
            self.phone,
            self.address,
            optional_email(self.inspector_email)?,
        ))
    }
}
