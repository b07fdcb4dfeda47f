use inspection_portal::domain::defect::NewDefect;
use inspection_portal::domain::types::{
    CustomerId, DefectArea, DefectDescription, DefectSeverity, EmailAddress,
};
use inspection_portal::paging::{PagingSpec, Sort};
use inspection_portal::repository::errors::RepositoryError;
use inspection_portal::repository::{
    CustomerListQuery, CustomerReader, CustomerWriter, DefectListQuery, DefectReader,
    DefectWriter,
};

mod common;

fn new_defect(account_id: i32, customer_id: CustomerId, area: &str) -> NewDefect {
    NewDefect {
        account_id: common::account(account_id),
        customer_id,
        area: DefectArea::new(area).unwrap(),
        category: Some("Structural".to_string()),
        description: DefectDescription::new(format!("Crack found in {area}")).unwrap(),
        recommendation: None,
        severity: DefectSeverity::Major,
    }
}

#[test]
fn test_customer_repository_create_and_get() {
    let test_db = common::TestDb::new("test_customer_repository.db");
    let repo = test_db.repo();

    let mut payload = common::new_customer(1, "Acme");
    payload.email = Some(EmailAddress::new("info@acme.test").unwrap());
    let created = repo.create_customer(&payload).unwrap();
    assert_eq!(created.name.as_str(), "Acme");
    assert_eq!(created.account_id.get(), 1);

    let found = repo
        .get_customer_by_id(created.id, common::account(1))
        .unwrap()
        .unwrap();
    assert_eq!(found, created);

    assert!(
        repo.get_customer_by_id(created.id, common::account(2))
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_customer_list_is_scoped_by_account_and_inspector() {
    let test_db = common::TestDb::new("test_customer_list_scope.db");
    let repo = test_db.repo();
    common::seed_items(&repo, 1, 6);
    common::seed_items(&repo, 2, 4);

    let account_page = repo
        .list_customers(CustomerListQuery::new(common::account(1)))
        .unwrap();
    assert_eq!(account_page.total_count, 6);

    let inspector_page = repo
        .list_customers(
            CustomerListQuery::new(common::account(1))
                .inspector_email(EmailAddress::new("inspector@example.com").unwrap())
                .paging(PagingSpec::paged(2).sort(Sort::asc("Name"))),
        )
        .unwrap();
    assert_eq!(inspector_page.total_count, 3);
    assert_eq!(inspector_page.total_pages, 2);
    let names: Vec<_> = inspector_page
        .result_list
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names, vec!["Item-00", "Item-02"]);
}

#[test]
fn test_defect_repository_create_and_list() {
    let test_db = common::TestDb::new("test_defect_repository.db");
    let repo = test_db.repo();
    let customer = repo.create_customer(&common::new_customer(1, "Acme")).unwrap();
    let other = repo.create_customer(&common::new_customer(1, "Globex")).unwrap();

    for area in ["Roof", "Kitchen", "Basement"] {
        repo.create_defect(&new_defect(1, customer.id, area)).unwrap();
    }
    repo.create_defect(&new_defect(1, other.id, "Garage")).unwrap();

    let page = repo
        .list_defects(
            DefectListQuery::new(common::account(1), customer.id)
                .paging(PagingSpec::paged(10).sort(Sort::asc("Area"))),
        )
        .unwrap();
    assert_eq!(page.total_count, 3);
    let areas: Vec<_> = page.result_list.iter().map(|d| d.area.as_str()).collect();
    assert_eq!(areas, vec!["Basement", "Kitchen", "Roof"]);
    assert!(page.result_list.iter().all(|d| d.severity == DefectSeverity::Major));

    let searched = repo
        .list_defects(
            DefectListQuery::new(common::account(1), customer.id)
                .paging(PagingSpec::paged(10).search("ROOF", ["Description"])),
        )
        .unwrap();
    assert_eq!(searched.total_count, 1);
}

#[test]
fn test_defect_for_foreign_customer_is_rejected() {
    let test_db = common::TestDb::new("test_defect_foreign_customer.db");
    let repo = test_db.repo();
    let customer = repo.create_customer(&common::new_customer(1, "Acme")).unwrap();

    let result = repo.create_defect(&new_defect(2, customer.id, "Roof"));
    assert!(matches!(result, Err(RepositoryError::NotFound)));
}
