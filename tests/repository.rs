use inventory_catalog::domain::product::{ProductSort, UpdateProduct};
use inventory_catalog::domain::types::{ImageUrl, Price, ProductId, ProductName};
use inventory_catalog::repository::errors::RepositoryError;
use inventory_catalog::repository::{ProductListQuery, ProductReader, ProductWriter};

mod common;

use common::new_product;

#[test]
fn test_product_repository_crud() {
    let test_db = common::TestDb::new("test_product_repository_crud.db");
    let repo = test_db.repo();

    let lamp = repo.create_product(&new_product("Lamp", 1999, 0)).unwrap();
    let mug = repo.create_product(&new_product("Mug", 500, 1)).unwrap();
    assert!(mug.id.get() > lamp.id.get());
    assert_eq!(lamp.price.to_string(), "19.99");

    let fetched = repo.get_product_by_id(lamp.id).unwrap().unwrap();
    assert_eq!(fetched, lamp);

    let updates = UpdateProduct {
        name: ProductName::new("Desk lamp").unwrap(),
        price: Price::from_cents(2450).unwrap(),
        image: lamp.image.clone(),
    };
    let updated = repo.update_product(lamp.id, &updates).unwrap();
    assert_eq!(updated.name.as_str(), "Desk lamp");
    assert_eq!(updated.price.cents(), 2450);
    assert_eq!(updated.created_at, lamp.created_at);

    let deleted = repo.delete_product(mug.id).unwrap();
    assert_eq!(deleted, mug);
    assert!(repo.get_product_by_id(mug.id).unwrap().is_none());

    let (total, items) = repo.list_products(ProductListQuery::new()).unwrap();
    assert_eq!(total, 1);
    assert_eq!(items, vec![updated]);
}

#[test]
fn test_delete_twice_reports_not_found() {
    let test_db = common::TestDb::new("test_delete_twice_reports_not_found.db");
    let repo = test_db.repo();
    let product = repo.create_product(&new_product("Chair", 4500, 0)).unwrap();

    assert!(repo.delete_product(product.id).is_ok());
    assert!(matches!(
        repo.delete_product(product.id),
        Err(RepositoryError::NotFound)
    ));
    assert!(matches!(
        repo.delete_product(product.id),
        Err(RepositoryError::NotFound)
    ));
}

#[test]
fn test_update_missing_product_creates_nothing() {
    let test_db = common::TestDb::new("test_update_missing_product_creates_nothing.db");
    let repo = test_db.repo();

    let updates = UpdateProduct {
        name: ProductName::new("Ghost").unwrap(),
        price: Price::from_cents(100).unwrap(),
        image: ImageUrl::new("https://img.example.com/ghost.png").unwrap(),
    };
    let result = repo.update_product(ProductId::new(42).unwrap(), &updates);

    assert!(matches!(result, Err(RepositoryError::NotFound)));
    let (total, _) = repo.list_products(ProductListQuery::new()).unwrap();
    assert_eq!(total, 0);
}

#[test]
fn test_search_sort_and_paginate() {
    let test_db = common::TestDb::new("test_search_sort_and_paginate.db");
    let repo = test_db.repo();

    for i in 0..13u32 {
        let cents = i64::from((i * 7) % 13 + 1) * 100;
        repo.create_product(&new_product(&format!("Widget {i}"), cents, i))
            .unwrap();
    }
    repo.create_product(&new_product("Gadget", 50, 20)).unwrap();

    let (total, items) = repo
        .list_products(
            ProductListQuery::new()
                .search("widget")
                .sort(ProductSort::PriceAsc)
                .paginate(2, 6),
        )
        .unwrap();

    assert_eq!(total, 13);
    assert_eq!(items.len(), 6);
    let cents: Vec<i64> = items.iter().map(|p| p.price.cents()).collect();
    assert_eq!(cents, vec![700, 800, 900, 1000, 1100, 1200]);

    let (_, last) = repo
        .list_products(
            ProductListQuery::new()
                .search("WIDGET")
                .sort(ProductSort::PriceAsc)
                .paginate(3, 6),
        )
        .unwrap();
    assert_eq!(last.len(), 1);

    let (total, beyond) = repo
        .list_products(ProductListQuery::new().search("widget").paginate(9, 6))
        .unwrap();
    assert_eq!(total, 13);
    assert!(beyond.is_empty());
}

#[test]
fn test_default_order_is_newest_first() {
    let test_db = common::TestDb::new("test_default_order_is_newest_first.db");
    let repo = test_db.repo();

    let old = repo.create_product(&new_product("Old", 300, 0)).unwrap();
    let new = repo.create_product(&new_product("New", 100, 10)).unwrap();
    let mid = repo.create_product(&new_product("Mid", 200, 5)).unwrap();

    let (_, items) = repo.list_products(ProductListQuery::new()).unwrap();
    let ids: Vec<_> = items.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![new.id, mid.id, old.id]);

    let (_, items) = repo
        .list_products(ProductListQuery::new().sort(ProductSort::PriceDesc))
        .unwrap();
    let ids: Vec<_> = items.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![old.id, mid.id, new.id]);
}

#[test]
fn test_search_matches_wildcards_literally() {
    let test_db = common::TestDb::new("test_search_matches_wildcards_literally.db");
    let repo = test_db.repo();

    repo.create_product(&new_product("50% off mug", 500, 0)).unwrap();
    repo.create_product(&new_product("500 mugs", 500, 1)).unwrap();
    repo.create_product(&new_product("snake_case tee", 900, 2)).unwrap();
    repo.create_product(&new_product("snakeXcase tee", 900, 3)).unwrap();

    let (total, items) = repo
        .list_products(ProductListQuery::new().search("50%"))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].name.as_str(), "50% off mug");

    let (total, _) = repo
        .list_products(ProductListQuery::new().search("snake_case"))
        .unwrap();
    assert_eq!(total, 1);
}

#[test]
fn test_search_folds_non_ascii_case() {
    let test_db = common::TestDb::new("test_search_folds_non_ascii_case.db");
    let repo = test_db.repo();

    repo.create_product(&new_product("Éclair tray", 1200, 0)).unwrap();
    repo.create_product(&new_product("ÄRMEL", 800, 1)).unwrap();
    repo.create_product(&new_product("Eclair mold", 900, 2)).unwrap();

    let cases = [
        ("éclair", "Éclair tray"),
        ("ärmel", "ÄRMEL"),
        ("ÉCLAIR", "Éclair tray"),
    ];
    for (search, expected) in cases {
        let (total, items) = repo
            .list_products(ProductListQuery::new().search(search))
            .unwrap();
        assert_eq!(total, 1, "search {search}");
        assert_eq!(items[0].name.as_str(), expected);
    }
}
