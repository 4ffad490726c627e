use actix_web::{App, http::StatusCode, test, web};
use serde_json::{Value, json};

use inventory_catalog::repository::ProductWriter;
use inventory_catalog::routes;

mod common;

use common::new_product;

macro_rules! init_app {
    ($test_db:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($test_db.repo()))
                .configure(routes::configure),
        )
        .await
    };
}

#[actix_web::test]
async fn create_then_get_returns_sent_fields() {
    let test_db = common::TestDb::new("create_then_get_returns_sent_fields.db");
    let app = init_app!(test_db);

    let req = test::TestRequest::post()
        .uri("/api/products")
        .set_json(json!({"name": "Lamp", "price": "19.99", "image": "https://img.example.com/lamp.png"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    let id = body["data"]["id"].as_i64().unwrap();

    let req = test::TestRequest::get()
        .uri(&format!("/api/products/{id}"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["data"]["name"], "Lamp");
    assert_eq!(body["data"]["price"], "19.99");
    assert_eq!(body["data"]["image"], "https://img.example.com/lamp.png");
    assert!(body["data"]["createdAt"].is_string());
}

#[actix_web::test]
async fn create_with_missing_fields_is_bad_request() {
    let test_db = common::TestDb::new("create_with_missing_fields_is_bad_request.db");
    let app = init_app!(test_db);

    let req = test::TestRequest::post()
        .uri("/api/products")
        .set_json(json!({"name": "Lamp", "image": "u"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({"success": false, "message": "All fields are required"})
    );
}

#[actix_web::test]
async fn malformed_json_is_bad_request() {
    let test_db = common::TestDb::new("malformed_json_is_bad_request.db");
    let app = init_app!(test_db);

    let req = test::TestRequest::post()
        .uri("/api/products")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
}

#[actix_web::test]
async fn list_returns_page_and_pagination() {
    let test_db = common::TestDb::new("list_returns_page_and_pagination.db");
    let repo = test_db.repo();
    for i in 0..13u32 {
        repo.create_product(&new_product(&format!("Widget {i}"), i64::from(i + 1) * 100, i))
            .unwrap();
    }
    repo.create_product(&new_product("Gadget", 100, 30)).unwrap();
    let app = init_app!(test_db);

    let req = test::TestRequest::get()
        .uri("/api/products?search=widget&sort=price_asc&page=2&limit=6")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["success"], true);
    let prices: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["price"].as_str().unwrap())
        .collect();
    assert_eq!(prices, vec!["7.00", "8.00", "9.00", "10.00", "11.00", "12.00"]);
    assert_eq!(
        body["pagination"],
        json!({
            "currentPage": 2,
            "totalPages": 3,
            "totalProducts": 13,
            "hasNextPage": true,
            "hasPrevPage": true
        })
    );
}

#[actix_web::test]
async fn list_tolerates_garbage_query_values() {
    let test_db = common::TestDb::new("list_tolerates_garbage_query_values.db");
    let app = init_app!(test_db);

    let req = test::TestRequest::get()
        .uri("/api/products?sort=DROP%20TABLE&page=abc&limit=-3")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["pagination"]["totalPages"], 0);
    assert_eq!(body["pagination"]["hasNextPage"], false);
    assert_eq!(body["pagination"]["hasPrevPage"], false);
}

#[actix_web::test]
async fn get_absent_product_omits_data() {
    let test_db = common::TestDb::new("get_absent_product_omits_data.db");
    let app = init_app!(test_db);

    let req = test::TestRequest::get().uri("/api/products/999").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"success": true}));
}

#[actix_web::test]
async fn non_numeric_id_is_not_found_envelope() {
    let test_db = common::TestDb::new("non_numeric_id_is_not_found_envelope.db");
    let app = init_app!(test_db);

    for req in [
        test::TestRequest::get().uri("/api/products/abc").to_request(),
        test::TestRequest::delete().uri("/api/products/abc").to_request(),
        test::TestRequest::put()
            .uri("/api/products/1.5")
            .set_json(json!({"name": "X", "price": "1", "image": "u"}))
            .to_request(),
    ] {
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"success": false, "message": "Product not found"}));
    }
}

#[actix_web::test]
async fn search_text_is_not_trimmed() {
    let test_db = common::TestDb::new("search_text_is_not_trimmed.db");
    let repo = test_db.repo();
    repo.create_product(&new_product("Lamp", 1000, 0)).unwrap();
    repo.create_product(&new_product("Lamp shade", 1500, 1)).unwrap();
    let app = init_app!(test_db);

    let req = test::TestRequest::get()
        .uri("/api/products?search=lamp%20")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["pagination"]["totalProducts"], 1);
    assert_eq!(body["data"][0]["name"], "Lamp shade");
}

#[actix_web::test]
async fn update_missing_product_is_not_found() {
    let test_db = common::TestDb::new("update_missing_product_is_not_found.db");
    let app = init_app!(test_db);

    let req = test::TestRequest::put()
        .uri("/api/products/42")
        .set_json(json!({"name": "X", "price": 9.99, "image": "u"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"success": false, "message": "Product not found"}));

    let req = test::TestRequest::get().uri("/api/products").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["pagination"]["totalProducts"], 0);
}

#[actix_web::test]
async fn update_replaces_fields() {
    let test_db = common::TestDb::new("update_replaces_fields.db");
    let product = test_db
        .repo()
        .create_product(&new_product("Mug", 500, 0))
        .unwrap();
    let app = init_app!(test_db);

    let req = test::TestRequest::put()
        .uri(&format!("/api/products/{}", product.id))
        .set_json(json!({"name": "Big mug", "price": "7.5", "image": "https://img.example.com/big.png"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["name"], "Big mug");
    assert_eq!(body["data"]["price"], "7.50");
}

#[actix_web::test]
async fn delete_twice_is_not_found() {
    let test_db = common::TestDb::new("delete_twice_is_not_found.db");
    let product = test_db
        .repo()
        .create_product(&new_product("Chair", 4500, 0))
        .unwrap();
    let app = init_app!(test_db);
    let uri = format!("/api/products/{}", product.id);

    let req = test::TestRequest::delete().uri(&uri).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    for _ in 0..2 {
        let req = test::TestRequest::delete().uri(&uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}

#[actix_web::test]
async fn analytics_returns_every_product() {
    let test_db = common::TestDb::new("analytics_returns_every_product.db");
    let repo = test_db.repo();
    for i in 0..8u32 {
        repo.create_product(&new_product(&format!("Item {i}"), 1000, i))
            .unwrap();
    }
    let app = init_app!(test_db);

    let req = test::TestRequest::get()
        .uri("/api/products/analytics/all")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["data"].as_array().unwrap().len(), 8);
    assert!(body.get("pagination").is_none());
}
