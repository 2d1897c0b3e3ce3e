//! 路由层测试：请求经过完整的 axum 路由，仓库使用内存实现

mod common;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use common::*;
use serde_json::{json, Value};
use tower::ServiceExt;
use web_service::auth::USER_ID_HEADER;

async fn send(store: &std::sync::Arc<MemoryStore>, request: Request<Body>) -> (StatusCode, Value) {
    let response = store.router().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str, user_id: Option<i32>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(user_id) = user_id {
        builder = builder.header(USER_ID_HEADER, user_id.to_string());
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

#[tokio::test]
async fn test_health() {
    let store = seeded_store();

    let (status, body) = send(&store, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_get_single_project() {
    let store = seeded_store();

    let (status, body) = send(&store, get("/api/v1/projects/1.1.0")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Impact Attenuator");
    assert_eq!(body["goals"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_invalid_wbs_is_bad_request() {
    let store = seeded_store();

    let (status, _) = send(&store, get("/api/v1/projects/1.1")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // 工作包编号不能当作项目查询
    let (status, _) = send(&store, get("/api/v1/projects/1.1.3")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_project_is_not_found() {
    let store = seeded_store();

    let (status, body) = send(&store, get("/api/v1/projects/5.5.0")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Project with id: 5.5.0 not found!");
}

#[tokio::test]
async fn test_write_without_user_header_is_unauthorized() {
    let store = seeded_store();
    let body = json!({ "projectId": 1, "detail": "risky" });

    let (status, _) = send(&store, post("/api/v1/risks/create", None, body.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // 用户不存在
    let (status, _) = send(&store, post("/api/v1/risks/create", Some(999), body)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(store.writes(), 0);
}

#[tokio::test]
async fn test_create_project_returns_wbs_string() {
    let store = seeded_store();
    let body = json!({
        "crId": 1,
        "carNumber": 1,
        "name": "Battery Box",
        "summary": "Enclosure for the accumulator",
        "teamIds": ["1"],
    });

    let (status, body) = send(&store, post("/api/v1/projects/create", Some(superman().user_id), body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("1.2.0"));
}

#[tokio::test]
async fn test_create_project_validation_failure() {
    let store = seeded_store();
    let body = json!({
        "crId": 1,
        "carNumber": 1,
        "name": "",
        "summary": "summary",
    });

    let (status, body) = send(&store, post("/api/v1/projects/create", Some(superman().user_id), body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().starts_with("Validate failed"));
}

#[tokio::test]
async fn test_create_risk_returns_id() {
    let store = seeded_store();
    let body = json!({ "projectId": 1, "detail": "Cells arrive late" });

    let (status, body) = send(&store, post("/api/v1/risks/create", Some(aquaman().user_id), body)).await;
    assert_eq!(status, StatusCode::OK);
    let risk_id = body.as_str().unwrap().to_string();

    let (status, body) = send(&store, get("/api/v1/risks/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["id"], risk_id.as_str());
    assert_eq!(body[0]["isResolved"], false);
}

#[tokio::test]
async fn test_set_team_members_missing_users() {
    let store = seeded_store();
    let body = json!({ "userIds": [122, 55] });

    let (status, body) = send(&store, post("/api/v1/teams/1/set-members", Some(batman().user_id), body)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User(s) with the following ids not found: 122, 55");
}

#[tokio::test]
async fn test_delete_team_returns_message() {
    let store = seeded_store();
    let request = Request::builder()
        .method("DELETE")
        .uri("/api/v1/teams/id1/delete")
        .header(USER_ID_HEADER, superman().user_id.to_string())
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(&store, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Team id1 successfully deleted.");
}

#[tokio::test]
async fn test_toggle_favorite_route() {
    let store = seeded_store();

    let (status, body) = send(&store, post("/api/v1/projects/1.1.0/favorite", Some(aquaman().user_id), json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["favoritedBy"], json!([aquaman().user_id]));
}

#[tokio::test]
async fn test_docs_are_served() {
    let store = seeded_store();

    let response = store.router().oneshot(get("/docs")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_edit_material_route() {
    let store = seeded_store();
    let head = Some(batman().user_id);
    let member = Some(aquaman().user_id);

    send(&store, post("/api/v1/projects/bom/material-type/create", head, json!({ "name": "Cells" }))).await;
    send(&store, post("/api/v1/projects/bom/manufacturer/create", member, json!({ "name": "Molicel" }))).await;

    let material = json!({
        "name": "P45B",
        "status": "NOT_READY_TO_ORDER",
        "materialTypeName": "Cells",
        "manufacturerName": "Molicel",
        "manufacturerPartNumber": "INR-21700-P45B",
        "quantity": 10,
        "unitName": "pcs",
        "price": 600,
        "subtotal": 6000,
        "linkUrl": "https://molicel.example.com",
    });
    let (status, created) = send(&store, post("/api/v1/projects/material/1.1.0/create", member, material.clone())).await;
    assert_eq!(status, StatusCode::OK);

    let mut edit = material;
    edit["materialId"] = created["materialId"].clone();
    edit["quantity"] = json!(140);
    let (status, edited) = send(&store, post("/api/v1/projects/bom/material/1.1.0/edit", member, edit.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(edited["materialId"], created["materialId"]);
    assert_eq!(edited["quantity"], 140);

    // 嵌套字段同样会校验
    edit["quantity"] = json!(-1);
    let (status, body) = send(&store, post("/api/v1/projects/bom/material/1.1.0/edit", member, edit)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().starts_with("Validate failed"));

    // 仍被使用的物料类型不能删除
    let request = Request::builder()
        .method("DELETE")
        .uri("/api/v1/projects/bom/material-type/Cells/delete")
        .header(USER_ID_HEADER, batman().user_id.to_string())
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&store, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
