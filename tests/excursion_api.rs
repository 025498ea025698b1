use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use trek_backend::config::ContentConfig;
use trek_backend::features::excursion::{ExcursionStore, create_excursion_router};
use trek_backend::features::pages::ContentClient;
use trek_backend::state::AppState;

/// 贴近生产部署：excursions 实际挂在 /api/v1 下
fn build_app() -> Router {
    let content = ContentClient::new(&ContentConfig::default()).expect("content client");
    let state = AppState::new(ExcursionStore::in_memory(), content);
    Router::<AppState>::new()
        .nest("/api/v1", create_excursion_router())
        .with_state(state)
}

fn get(path: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(path)
        .body(Body::empty())
        .expect("build request")
}

fn with_json_body(method: &str, path: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("build request")
}

async fn json_body(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse json")
}

fn valid_body() -> Value {
    json!({
        "name": "Peak X",
        "height": 1500,
        "photo": "https://picsum.photos/id/29/1024/768.webp",
        "timing": 90,
        "notes": "ok"
    })
}

#[tokio::test]
async fn list_starts_with_single_seed_record() {
    let app = build_app();
    let resp = app.oneshot(get("/api/v1/excursions")).await.expect("call");
    assert_eq!(resp.status(), StatusCode::OK);

    let v = json_body(resp).await;
    let items = v.as_array().expect("array body");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Mount Nowhere");
    assert!(items[0]["uuid"].as_str().is_some_and(|s| !s.is_empty()));
}

#[tokio::test]
async fn post_appends_record_with_fresh_unique_uuid() {
    let app = build_app();

    let resp = app
        .clone()
        .oneshot(with_json_body("POST", "/api/v1/excursions", valid_body()))
        .await
        .expect("call");
    assert_eq!(resp.status(), StatusCode::OK);
    let v = json_body(resp).await;
    // 文案与上游原型逐字一致（含原有拼写）
    assert_eq!(v["message"], "new entry succesfully created");

    let resp = app.oneshot(get("/api/v1/excursions")).await.expect("call");
    let v = json_body(resp).await;
    let items = v.as_array().expect("array body");
    assert_eq!(items.len(), 2);

    let new_items: Vec<&Value> = items.iter().filter(|e| e["name"] == "Peak X").collect();
    assert_eq!(new_items.len(), 1);
    assert_ne!(new_items[0]["uuid"], items[0]["uuid"]);
}

#[tokio::test]
async fn post_ignores_client_supplied_uuid() {
    let app = build_app();

    let mut body = valid_body();
    body["uuid"] = json!("client-chosen-id");
    let resp = app
        .clone()
        .oneshot(with_json_body("POST", "/api/v1/excursions", body))
        .await
        .expect("call");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app.oneshot(get("/api/v1/excursions")).await.expect("call");
    let v = json_body(resp).await;
    let found = v
        .as_array()
        .expect("array body")
        .iter()
        .any(|e| e["uuid"] == "client-chosen-id");
    assert!(!found, "客户端传入的标识必须被忽略");
}

#[tokio::test]
async fn post_rejects_invalid_fields_with_422_problem() {
    let app = build_app();

    let mut body = valid_body();
    body["height"] = json!(-1);
    let resp = app
        .oneshot(with_json_body("POST", "/api/v1/excursions", body))
        .await
        .expect("call");
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .expect("missing Content-Type")
        .to_str()
        .expect("invalid Content-Type");
    assert_eq!(content_type, "application/problem+json");

    let v = json_body(resp).await;
    assert_eq!(v["code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn get_single_returns_matching_record() {
    let app = build_app();

    let resp = app
        .clone()
        .oneshot(get("/api/v1/excursions"))
        .await
        .expect("call");
    let v = json_body(resp).await;
    let seed_uuid = v[0]["uuid"].as_str().expect("seed uuid").to_string();

    let resp = app
        .oneshot(get(&format!("/api/v1/excursions/{seed_uuid}")))
        .await
        .expect("call");
    assert_eq!(resp.status(), StatusCode::OK);
    let v = json_body(resp).await;
    assert_eq!(v["uuid"], seed_uuid.as_str());
    assert_eq!(v["name"], "Mount Nowhere");
}

#[tokio::test]
async fn get_unknown_id_returns_404_problem() {
    let app = build_app();

    let resp = app
        .oneshot(get("/api/v1/excursions/no-such-id"))
        .await
        .expect("call");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let v = json_body(resp).await;
    assert_eq!(v["status"], 404);
    assert_eq!(v["code"], "NOT_FOUND");
    assert_eq!(
        v["detail"].as_str().expect("detail"),
        "未找到: The provided UUID doesn't match any activity"
    );
}

#[tokio::test]
async fn put_replaces_record_wholesale() {
    let app = build_app();

    let resp = app
        .clone()
        .oneshot(get("/api/v1/excursions"))
        .await
        .expect("call");
    let v = json_body(resp).await;
    let seed_uuid = v[0]["uuid"].as_str().expect("seed uuid").to_string();

    let resp = app
        .clone()
        .oneshot(with_json_body(
            "PUT",
            &format!("/api/v1/excursions/{seed_uuid}"),
            valid_body(),
        ))
        .await
        .expect("call");
    assert_eq!(resp.status(), StatusCode::OK);
    let v = json_body(resp).await;
    assert_eq!(
        v["message"],
        format!("The item with id {seed_uuid} has been updated")
    );

    let resp = app
        .oneshot(get(&format!("/api/v1/excursions/{seed_uuid}")))
        .await
        .expect("call");
    let v = json_body(resp).await;
    // 所有字段整体替换，uuid 保持不变
    assert_eq!(v["uuid"], seed_uuid.as_str());
    assert_eq!(v["name"], "Peak X");
    assert_eq!(v["height"], 1500.0);
    assert_eq!(v["notes"], "ok");
}

#[tokio::test]
async fn put_unknown_id_returns_404_without_upsert() {
    let app = build_app();

    let resp = app
        .clone()
        .oneshot(with_json_body(
            "PUT",
            "/api/v1/excursions/no-such-id",
            valid_body(),
        ))
        .await
        .expect("call");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // 集合未被补插
    let resp = app.oneshot(get("/api/v1/excursions")).await.expect("call");
    let v = json_body(resp).await;
    assert_eq!(v.as_array().expect("array body").len(), 1);
}

#[tokio::test]
async fn patch_overwrites_present_fields_and_preserves_rest() {
    let app = build_app();

    let resp = app
        .clone()
        .oneshot(get("/api/v1/excursions"))
        .await
        .expect("call");
    let v = json_body(resp).await;
    let seed = v[0].clone();
    let seed_uuid = seed["uuid"].as_str().expect("seed uuid").to_string();

    let resp = app
        .clone()
        .oneshot(with_json_body(
            "PATCH",
            &format!("/api/v1/excursions/{seed_uuid}"),
            json!({"notes": "gear upgraded"}),
        ))
        .await
        .expect("call");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .oneshot(get(&format!("/api/v1/excursions/{seed_uuid}")))
        .await
        .expect("call");
    let v = json_body(resp).await;
    assert_eq!(v["notes"], "gear upgraded");
    // body 中未出现的字段保持原值
    assert_eq!(v["name"], seed["name"]);
    assert_eq!(v["height"], seed["height"]);
    assert_eq!(v["photo"], seed["photo"]);
    assert_eq!(v["timing"], seed["timing"]);
}

#[tokio::test]
async fn patch_unknown_id_returns_404() {
    let app = build_app();
    let resp = app
        .oneshot(with_json_body(
            "PATCH",
            "/api/v1/excursions/no-such-id",
            json!({"notes": "x"}),
        ))
        .await
        .expect("call");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_record_and_confirms() {
    let app = build_app();

    let resp = app
        .clone()
        .oneshot(get("/api/v1/excursions"))
        .await
        .expect("call");
    let v = json_body(resp).await;
    let seed_uuid = v[0]["uuid"].as_str().expect("seed uuid").to_string();

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/excursions/{seed_uuid}"))
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("call");
    assert_eq!(resp.status(), StatusCode::OK);
    let v = json_body(resp).await;
    assert_eq!(
        v["message"],
        format!("The item with id {seed_uuid} has been deleted")
    );

    let resp = app.oneshot(get("/api/v1/excursions")).await.expect("call");
    let v = json_body(resp).await;
    assert!(v.as_array().expect("array body").is_empty());
}

#[tokio::test]
async fn delete_absent_id_confirms_and_leaves_collection_unchanged() {
    let app = build_app();

    // 先触发播种
    let resp = app
        .clone()
        .oneshot(get("/api/v1/excursions"))
        .await
        .expect("call");
    let before = json_body(resp).await;

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/v1/excursions/no-such-id")
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("call");
    // 与上游原型一致：未命中也返回确认
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app.oneshot(get("/api/v1/excursions")).await.expect("call");
    let after = json_body(resp).await;
    assert_eq!(before, after);
}

#[tokio::test]
async fn malformed_json_body_returns_problem_details() {
    let app = build_app();

    let req = Request::builder()
        .method("POST")
        .uri("/api/v1/excursions")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not valid json"))
        .expect("build request");
    let resp = app.oneshot(req).await.expect("call");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        resp.headers()
            .get(header::CONTENT_TYPE)
            .expect("missing content-type"),
        "application/problem+json"
    );

    let body = json_body(resp).await;
    assert_eq!(body["status"], 400);
    assert_eq!(body["code"], "BAD_REQUEST");
    assert_eq!(body["title"], "Bad Request");
}

#[tokio::test]
async fn type_mismatch_body_returns_400_not_plain_422() {
    let app = build_app();

    // height 类型不符：应走 400 BAD_REQUEST problem+json，
    // 而不是 axum 默认的纯文本 422（后者会与校验失败的 422 契约冲突）
    let mut body = valid_body();
    body["height"] = json!("very high");

    let resp = app
        .oneshot(with_json_body("PUT", "/api/v1/excursions/some-id", body))
        .await
        .expect("call");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        resp.headers()
            .get(header::CONTENT_TYPE)
            .expect("missing content-type"),
        "application/problem+json"
    );
    let body = json_body(resp).await;
    assert_eq!(body["code"], "BAD_REQUEST");
}
