//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::customer::{Customer, NewCustomer};
use crate::domain::defect::{Defect, NewDefect};
use crate::domain::types::{AccountId, CustomerId};
use crate::paging::PageResult;
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    CustomerListQuery, CustomerReader, CustomerWriter, DefectListQuery, DefectReader,
    DefectWriter,
};

mock! {
    pub Repository {}

    impl CustomerReader for Repository {
        fn get_customer_by_id(
            &self,
            id: CustomerId,
            account_id: AccountId,
        ) -> RepositoryResult<Option<Customer>>;
        fn list_customers(&self, query: CustomerListQuery) -> RepositoryResult<PageResult<Customer>>;
    }

    impl CustomerWriter for Repository {
        fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer>;
    }

    impl DefectReader for Repository {
        fn list_defects(&self, query: DefectListQuery) -> RepositoryResult<PageResult<Defect>>;
    }

    impl DefectWriter for Repository {
        fn create_defect(&self, new_defect: &NewDefect) -> RepositoryResult<Defect>;
    }
}
