use inspection_portal::domain::types::CustomerId;
use inspection_portal::paging::{PageResult, PagingSpec, Sort};
use inspection_portal::repository::errors::RepositoryError;
use inspection_portal::repository::mock::MockRepository;
use inspection_portal::services::ServiceError;
use inspection_portal::services::{customers, defects};
use inspection_portal::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

mod common;

#[test]
fn test_list_customers_forwards_paging_and_employee_scope() {
    let mut repo = MockRepository::new();
    repo.expect_list_customers()
        .withf(|query| {
            query.account_id.get() == 1
                && query.inspector_email.as_ref().map(|e| e.as_str())
                    == Some("inspector@example.com")
                && query.paging.page_size == Some(20)
                && query.paging.sorts == vec![Sort::desc("Name")]
        })
        .times(1)
        .returning(|_| Ok(PageResult::empty()));

    let page = customers::list_customers(
        &repo,
        &common::user(1, &[SERVICE_ACCESS_ROLE]),
        PagingSpec::paged(20).sort(Sort::desc("Name")),
    )
    .unwrap();
    assert_eq!(page.total_count, 0);
    assert_eq!(page.total_pages, 1);
}

#[test]
fn test_repository_failure_is_not_leaked_as_not_found() {
    let mut repo = MockRepository::new();
    repo.expect_list_customers()
        .returning(|_| Err(RepositoryError::DatabaseError("disk I/O error".to_string())));

    let result = customers::list_customers(
        &repo,
        &common::user(1, &[SERVICE_ADMIN_ROLE]),
        PagingSpec::default(),
    );
    assert!(matches!(result, Err(ServiceError::Repository(_))));
}

#[test]
fn test_list_defects_checks_customer_before_listing() {
    let mut repo = MockRepository::new();
    repo.expect_get_customer_by_id()
        .withf(|id, account| *id == CustomerId::new(7).unwrap() && account.get() == 1)
        .returning(|_, _| Ok(None));
    repo.expect_list_defects().never();

    let result = defects::list_defects(
        &repo,
        &common::user(1, &[SERVICE_ADMIN_ROLE]),
        7,
        PagingSpec::paged(10),
    );
    assert!(matches!(result, Err(ServiceError::NotFound)));
}
