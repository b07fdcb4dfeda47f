use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{AccountId, CustomerId, CustomerName, EmailAddress};

/// Customer of an inspection company. Serialized with the logical field names
/// used by the list endpoints for sorting and searching.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Customer {
    pub id: CustomerId,
    pub account_id: AccountId,
    pub name: CustomerName,
    pub email: Option<EmailAddress>,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// Employee the customer is assigned to.
    pub inspector_email: Option<EmailAddress>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewCustomer {
    pub account_id: AccountId,
    pub name: CustomerName,
    pub email: Option<EmailAddress>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub inspector_email: Option<EmailAddress>,
}

impl NewCustomer {
    #[must_use]
    pub fn new(
        account_id: AccountId,
        name: CustomerName,
        email: Option<EmailAddress>,
        phone: Option<String>,
        address: Option<String>,
        inspector_email: Option<EmailAddress>,
    ) -> Self {
        Self {
            account_id,
            name,
            email,
            phone: phone
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            address: address
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            inspector_email,
        }
    }
}
