use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::customer::{Customer as DomainCustomer, NewCustomer as DomainNewCustomer};
use crate::domain::types::{AccountId, CustomerId, CustomerName, EmailAddress, TypeConstraintError};
use crate::list_query::{Column, EntityDescriptor, ListEntity};
use crate::paging::SortDirection;

#[derive(Debug, Clone, Identifiable, Queryable, QueryableByName)]
#[diesel(table_name = crate::schema::customers)]
/// Diesel model for [`crate::domain::customer::Customer`].
pub struct Customer {
    pub id: i32,
    pub account_id: i32,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub inspector_email: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl ListEntity for Customer {
    const DESCRIPTOR: EntityDescriptor = EntityDescriptor {
        source: "customers",
        select: &[
            "id",
            "account_id",
            "name",
            "email",
            "phone",
            "address",
            "inspector_email",
            "created_at",
            "updated_at",
        ],
        columns: &[
            Column::new("Id", "id"),
            Column::searchable("Name", "name"),
            Column::searchable("Email", "email"),
            Column::searchable("Phone", "phone"),
            Column::searchable("Address", "address"),
            Column::new("InspectorEmail", "inspector_email"),
            Column::new("CreatedAt", "created_at"),
            Column::new("UpdatedAt", "updated_at"),
        ],
        default_sort: &[("CreatedAt", SortDirection::Desc), ("Id", SortDirection::Desc)],
        tie_breaker: "id",
    };
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::customers)]
/// Insertable form of [`Customer`].
pub struct NewCustomer<'a> {
    pub account_id: i32,
    pub name: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub address: Option<&'a str>,
    pub inspector_email: Option<&'a str>,
}

impl TryFrom<Customer> for DomainCustomer {
    type Error = TypeConstraintError;

    fn try_from(customer: Customer) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CustomerId::try_from(customer.id)?,
            account_id: AccountId::try_from(customer.account_id)?,
            name: CustomerName::new(customer.name)?,
            email: customer.email.map(EmailAddress::new).transpose()?,
            phone: customer.phone,
            address: customer.address,
            inspector_email: customer.inspector_email.map(EmailAddress::new).transpose()?,
            created_at: customer.created_at,
            updated_at: customer.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewCustomer> for NewCustomer<'a> {
    fn from(customer: &'a DomainNewCustomer) -> Self {
        Self {
            account_id: customer.account_id.get(),
            name: customer.name.as_str(),
            email: customer.email.as_ref().map(EmailAddress::as_str),
            phone: customer.phone.as_deref(),
            address: customer.address.as_deref(),
            inspector_email: customer.inspector_email.as_ref().map(EmailAddress::as_str),
        }
    }
}
