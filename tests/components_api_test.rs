mod common;

use axum::http::StatusCode;
use common::{id_of, TestApp};
use serde_json::{json, Value};

#[tokio::test]
async fn create_component_uses_type_key() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post("/api/components", json!({"type": "SSD", "make_year": 2022}))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Component created successfully");
    assert_eq!(body["data"]["type"], "SSD");
    assert_eq!(body["data"]["description"], Value::Null);
}

#[tokio::test]
async fn description_is_limited() {
    let app = TestApp::new().await;
    let (status, _) = app
        .post(
            "/api/components",
            json!({"type": "SSD", "description": "d".repeat(151), "make_year": 2022}),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn patch_component_clears_description() {
    let app = TestApp::new().await;
    let component = app.create_component().await;
    let id = id_of(&component, "component_id");

    let (status, body) = app
        .patch(
            &format!("/api/components/{id}"),
            json!({"type": "GPU", "description": null}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Component updated successfully");
    assert_eq!(body["data"]["type"], "GPU");
    assert_eq!(body["data"]["description"], Value::Null);
    assert_eq!(body["data"]["make_year"], component["make_year"]);
}

#[tokio::test]
async fn component_orders_relation() {
    let app = TestApp::new().await;
    let customer = app.create_customer().await;
    let order = app.create_order(&customer["customer_id"], None).await;
    let component = app.create_component().await;
    let id = id_of(&component, "component_id");
    app.create(
        "/api/orders/component",
        json!({"order_id": order["order_id"], "component_id": component["component_id"], "quantity": 4}),
    )
    .await;

    let (status, body) = app.get(&format!("/api/components/{id}/orders")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Component retrieved");
    assert_eq!(body["data"]["orders"], json!([order]));

    let (_, body) = app.get("/api/components/orders").await;
    assert_eq!(body["message"], "Components retrieved");
    assert_eq!(body["data"][0]["orders"], json!([order]));
}

#[tokio::test]
async fn delete_component_removes_links() {
    let app = TestApp::new().await;
    let laptop = app.create_laptop().await;
    let component = app.create_component().await;
    let laptop_id = id_of(&laptop, "laptop_id");
    let id = id_of(&component, "component_id");
    app.call(
        axum::http::Method::POST,
        &format!("/api/laptops/{laptop_id}/components/{id}"),
        None,
    )
    .await;

    let (status, body) = app.delete(&format!("/api/components/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Component deleted successfully");

    let (_, body) = app.get(&format!("/api/laptops/{laptop_id}/components")).await;
    assert_eq!(body["data"]["components"], json!([]));

    let (status, _) = app.get(&format!("/api/components/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
