use crate::{
    db::{DbConnection, DbPool, get_connection},
    domain::{
        customer::{Customer, NewCustomer},
        defect::{Defect, NewDefect},
        types::{AccountId, CustomerId, EmailAddress},
    },
    list_query::Predicate,
    paging::{PageResult, PagingSpec},
    repository::errors::RepositoryResult,
};

pub mod customer;
pub mod defect;
pub mod errors;
#[cfg(feature = "test-mocks")]
pub mod mock;

/// Diesel-backed repository shared by every route through `web::Data`.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

#[derive(Debug, Clone)]
pub struct CustomerListQuery {
    pub account_id: AccountId,
    /// Restricts the list to customers assigned to this employee.
    pub inspector_email: Option<EmailAddress>,
    pub paging: PagingSpec,
}

impl CustomerListQuery {
    pub fn new(account_id: AccountId) -> Self {
        Self {
            account_id,
            inspector_email: None,
            paging: PagingSpec::default(),
        }
    }

    pub fn inspector_email(mut self, email: EmailAddress) -> Self {
        self.inspector_email = Some(email);
        self
    }

    pub fn paging(mut self, paging: PagingSpec) -> Self {
        self.paging = paging;
        self
    }

    /// Tenant scope applied before any search.
    pub fn predicate(&self) -> Predicate {
        let scope = Predicate::new("account_id = ?").bind(self.account_id.get());
        match &self.inspector_email {
            Some(email) => {
                scope.and(Predicate::new("inspector_email = ?").bind(email.as_str()))
            }
            None => scope,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DefectListQuery {
    pub account_id: AccountId,
    pub customer_id: CustomerId,
    pub paging: PagingSpec,
}

impl DefectListQuery {
    pub fn new(account_id: AccountId, customer_id: CustomerId) -> Self {
        Self {
            account_id,
            customer_id,
            paging: PagingSpec::default(),
        }
    }

    pub fn paging(mut self, paging: PagingSpec) -> Self {
        self.paging = paging;
        self
    }

    pub fn predicate(&self) -> Predicate {
        Predicate::new("account_id = ? AND customer_id = ?")
            .bind(self.account_id.get())
            .bind(self.customer_id.get())
    }
}

pub trait CustomerReader {
    fn get_customer_by_id(
        &self,
        id: CustomerId,
        account_id: AccountId,
    ) -> RepositoryResult<Option<Customer>>;
    fn list_customers(&self, query: CustomerListQuery) -> RepositoryResult<PageResult<Customer>>;
}

pub trait CustomerWriter {
    fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer>;
}

pub trait DefectReader {
    fn list_defects(&self, query: DefectListQuery) -> RepositoryResult<PageResult<Defect>>;
}

pub trait DefectWriter {
    fn create_defect(&self, new_defect: &NewDefect) -> RepositoryResult<Defect>;
}
