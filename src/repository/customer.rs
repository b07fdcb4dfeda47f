use diesel::prelude::*;

use crate::{
    domain::{
        customer::{Customer, NewCustomer},
        types::{AccountId, CustomerId},
    },
    list_query::ListQueryEngine,
    models::customer::{Customer as DbCustomer, NewCustomer as DbNewCustomer},
    paging::PageResult,
    repository::{
        CustomerListQuery, CustomerReader, CustomerWriter, DieselRepository,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl CustomerReader for DieselRepository {
    fn get_customer_by_id(
        &self,
        id: CustomerId,
        account_id: AccountId,
    ) -> RepositoryResult<Option<Customer>> {
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let customer = customers::table
            .filter(customers::id.eq(id.get()))
            .filter(customers::account_id.eq(account_id.get()))
            .first::<DbCustomer>(&mut conn)
            .optional()?;

        customer
            .map(Customer::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_customers(&self, query: CustomerListQuery) -> RepositoryResult<PageResult<Customer>> {
        let mut conn = self.conn()?;
        let page = ListQueryEngine::new(&mut conn)
            .fetch::<DbCustomer>(Some(&query.predicate()), &query.paging)?;

        page.try_map(Customer::try_from)
            .map_err(RepositoryError::from)
    }
}

impl CustomerWriter for DieselRepository {
    fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer> {
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let insertable: DbNewCustomer = new_customer.into();
        let created = diesel::insert_into(customers::table)
            .values(&insertable)
            .get_result::<DbCustomer>(&mut conn)?;

        Ok(Customer::try_from(created)?)
    }
}
