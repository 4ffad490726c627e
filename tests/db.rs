use diesel::prelude::*;
use diesel_migrations::MigrationHarness;

use inventory_catalog::db::MIGRATIONS;
use inventory_catalog::schema::products;

mod common;

#[test]
fn test_creates_and_migrates_db_file() {
    let test_db = common::TestDb::new("test_creates_and_migrates_db_file.db");
    let mut conn = test_db.pool().get().unwrap();

    assert!(!conn.has_pending_migration(MIGRATIONS).unwrap());

    let count: i64 = products::table.count().get_result(&mut conn).unwrap();
    assert_eq!(count, 0);
}

#[test]
fn test_migrations_are_idempotent() {
    let test_db = common::TestDb::new("test_migrations_are_idempotent.db");
    inventory_catalog::db::run_migrations(&test_db.pool()).unwrap();
}
