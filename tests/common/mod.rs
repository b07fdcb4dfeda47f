#![allow(dead_code)]

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use inspection_portal::db::{DbPool, establish_connection_pool};
use inspection_portal::domain::auth::AuthenticatedUser;
use inspection_portal::domain::customer::{Customer, NewCustomer};
use inspection_portal::domain::types::{AccountId, CustomerName, EmailAddress};
use inspection_portal::repository::{CustomerWriter, DieselRepository};
use tempfile::TempDir;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Migrated SQLite database in a temporary directory removed on drop.
pub struct TestDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(name);
        let pool = establish_connection_pool(path.to_str().expect("utf-8 path"))
            .expect("create pool");
        pool.get()
            .expect("get connection")
            .run_pending_migrations(MIGRATIONS)
            .expect("run migrations");
        Self { _dir: dir, pool }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }
}

pub fn account(id: i32) -> AccountId {
    AccountId::new(id).unwrap()
}

pub fn new_customer(account_id: i32, name: &str) -> NewCustomer {
    NewCustomer::new(
        account(account_id),
        CustomerName::new(name).unwrap(),
        None,
        None,
        None,
        None,
    )
}

/// Inserts `Item-00` … `Item-{count-1}` in order. Phones cycle through five
/// values so they repeat.
pub fn seed_items(repo: &DieselRepository, account_id: i32, count: usize) -> Vec<Customer> {
    (0..count)
        .map(|i| {
            let mut customer = new_customer(account_id, &format!("Item-{i:02}"));
            customer.phone = Some(format!("555-{}", i % 5));
            customer.inspector_email = (i % 2 == 0)
                .then(|| EmailAddress::new("inspector@example.com").unwrap());
            repo.create_customer(&customer).unwrap()
        })
        .collect()
}

pub fn user(account_id: i32, roles: &[&str]) -> AuthenticatedUser {
    AuthenticatedUser {
        sub: "1".to_string(),
        email: "inspector@example.com".to_string(),
        name: "Inspector".to_string(),
        account_id,
        roles: roles.iter().map(|r| r.to_string()).collect(),
        exp: 4_102_444_800,
    }
}
