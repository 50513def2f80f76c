//! HTTP-level integration tests for `/categories` and `/tags`.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, create_tag, delete_auth, get_auth, post_json_auth, put_json_auth,
    register_and_login,
};
use serde_json::json;

#[tokio::test]
async fn category_crud_and_ownership() {
    let app = build_test_app();
    let owner = register_and_login(&app, "owner@example.com").await;
    let other = register_and_login(&app, "other@example.com").await;

    let response = post_json_auth(
        &app,
        "/api/v1/categories",
        &owner,
        json!({ "name": "Work", "color": "#ff0000", "description": "Work items" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let category = body_json(response).await["data"].clone();
    assert_eq!(category["createdAt"], category["updatedAt"]);
    let uri = format!("/api/v1/categories/{}", category["id"].as_str().unwrap());

    let response = put_json_auth(&app, &uri, &other, json!({ "name": "Hijacked" })).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "FORBIDDEN");

    let response = put_json_auth(&app, &uri, &owner, json!({ "color": "#00ff00" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await["data"].clone();
    assert_eq!(updated["name"], "Work");
    assert_eq!(updated["color"], "#00ff00");

    let response = get_auth(&app, "/api/v1/categories", &other).await;
    assert!(body_json(response).await["data"].as_array().unwrap().is_empty());

    assert_eq!(
        delete_auth(&app, &uri, &owner).await.status(),
        StatusCode::NO_CONTENT
    );
    let response = get_auth(&app, "/api/v1/categories", &owner).await;
    assert!(body_json(response).await["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn todo_category_is_cleared_when_category_is_deleted() {
    let app = build_test_app();
    let token = register_and_login(&app, "ada@example.com").await;

    let response = post_json_auth(
        &app,
        "/api/v1/categories",
        &token,
        json!({ "name": "Home", "color": "#123456" }),
    )
    .await;
    let category_id = body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = post_json_auth(
        &app,
        "/api/v1/todos",
        &token,
        json!({ "title": "Vacuum", "categoryId": category_id }),
    )
    .await;
    let todo_id = body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    delete_auth(&app, &format!("/api/v1/categories/{category_id}"), &token).await;

    let response = get_auth(&app, &format!("/api/v1/todos/{todo_id}"), &token).await;
    assert_eq!(body_json(response).await["data"]["categoryId"], serde_json::Value::Null);
}

#[tokio::test]
async fn tag_names_are_unique_per_user() {
    let app = build_test_app();
    let alice = register_and_login(&app, "alice@example.com").await;
    let bob = register_and_login(&app, "bob@example.com").await;

    create_tag(&app, &alice, "urgent").await;
    let response = post_json_auth(&app, "/api/v1/tags", &alice, json!({ "name": "urgent" })).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    create_tag(&app, &bob, "urgent").await;
    let response = get_auth(&app, "/api/v1/tags", &alice).await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn tag_update_and_delete() {
    let app = build_test_app();
    let owner = register_and_login(&app, "owner@example.com").await;
    let other = register_and_login(&app, "other@example.com").await;
    let tag_id = create_tag(&app, &owner, "errands").await;
    let uri = format!("/api/v1/tags/{tag_id}");

    let response = put_json_auth(&app, &uri, &other, json!({ "name": "mine" })).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = put_json_auth(&app, &uri, &owner, json!({ "name": "chores" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["name"], "chores");

    let response = post_json_auth(
        &app,
        "/api/v1/todos",
        &owner,
        json!({ "title": "Laundry", "tagIds": [tag_id] }),
    )
    .await;
    let todo_id = body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    assert_eq!(
        delete_auth(&app, &uri, &other).await.status(),
        StatusCode::FORBIDDEN
    );
    assert_eq!(
        delete_auth(&app, &uri, &owner).await.status(),
        StatusCode::NO_CONTENT
    );
    assert_eq!(
        delete_auth(&app, &uri, &owner).await.status(),
        StatusCode::NO_CONTENT
    );

    let response = get_auth(&app, &format!("/api/v1/todos/{todo_id}"), &owner).await;
    assert_eq!(body_json(response).await["data"]["tagIds"], json!([]));
}
