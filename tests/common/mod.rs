#![allow(dead_code)]

use chrono::NaiveDateTime;
use tempfile::TempDir;

use inventory_catalog::db::{DbPool, establish_connection_pool, run_migrations};
use inventory_catalog::domain::product::NewProduct;
use inventory_catalog::domain::types::{ImageUrl, Price, ProductName};
use inventory_catalog::repository::DieselRepository;

/// Migrated SQLite database in a temporary directory, removed on drop.
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
        run_migrations(&pool).expect("run migrations");
        Self { _dir: dir, pool }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }
}

/// Product created `minute` minutes after a fixed epoch.
pub fn new_product(name: &str, cents: i64, minute: u32) -> NewProduct {
    NewProduct {
        name: ProductName::new(name).unwrap(),
        price: Price::from_cents(cents).unwrap(),
        image: ImageUrl::new(format!("https://img.example.com/{minute}.png")).unwrap(),
        created_at: NaiveDateTime::parse_from_str("2025-01-01 00:00:00", "%Y-%m-%d %H:%M:%S")
            .unwrap()
            + chrono::Duration::minutes(i64::from(minute)),
    }
}
