use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use service::{
    errors::ServiceError,
    people::{
        domain::{Person, PersonInput},
        repository::{mock::MockPeopleRepository, PeopleRepository},
    },
};
use tower::ServiceExt;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use server::{routes, state::AppState};

fn app_with(repo: Arc<dyn PeopleRepository>) -> Router {
    routes::build_router(AppState::new(repo), CorsLayer::very_permissive())
}

fn app() -> Router {
    app_with(Arc::new(MockPeopleRepository::default()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            req = req.header(header::CONTENT_TYPE, "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let res = app.clone().oneshot(req.body(body).unwrap()).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, value)
}

#[tokio::test]
async fn root_greets() {
    let (status, body) = send(&app(), Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"hello": "world"}));
}

#[tokio::test]
async fn ada_lifecycle() {
    let app = app();

    let (status, created) =
        send(&app, Method::POST, "/people", Some(json!({"name": "Ada", "title": "Engineer"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["name"], "Ada");
    assert_eq!(created["title"], "Engineer");
    let id = created["id"].as_str().expect("generated id").to_string();
    assert!(Uuid::parse_str(&id).is_ok());
    assert!(created.get("image").is_none());

    let (status, fetched) = send(&app, Method::GET, &format!("/people/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, updated) =
        send(&app, Method::PUT, &format!("/people/{id}"), Some(json!({"name": "Ada Lovelace"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Ada Lovelace");
    assert_eq!(updated["title"], "Engineer");
    assert_eq!(updated["id"], id.as_str());

    let (status, deleted) = send(&app, Method::DELETE, &format!("/people/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(deleted, updated);

    let (status, gone) = send(&app, Method::GET, &format!("/people/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(gone, Value::Null);

    let (status, again) = send(&app, Method::DELETE, &format!("/people/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(again, Value::Null);
}

#[tokio::test]
async fn list_returns_all_created_people() {
    let app = app();
    let mut ids = Vec::new();
    for name in ["Ada", "Grace", "Katherine"] {
        let (_, p) = send(&app, Method::POST, "/people", Some(json!({"name": name}))).await;
        ids.push(p["id"].clone());
    }
    let (status, list) = send(&app, Method::GET, "/people", None).await;
    assert_eq!(status, StatusCode::OK);
    let listed: Vec<Value> = list.as_array().unwrap().iter().map(|p| p["id"].clone()).collect();
    assert_eq!(listed, ids);
}

#[tokio::test]
async fn empty_collection_lists_as_empty_array() {
    let (status, list) = send(&app(), Method::GET, "/people", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn post_without_body_creates_empty_person() {
    let (status, p) = send(&app(), Method::POST, "/people", None).await;
    assert_eq!(status, StatusCode::OK);
    let obj = p.as_object().unwrap();
    assert_eq!(obj.len(), 1);
    assert!(obj.contains_key("id"));
}

#[tokio::test]
async fn payload_values_are_cast_and_unknown_fields_dropped() {
    let (status, p) =
        send(&app(), Method::POST, "/people", Some(json!({"name": 7, "title": false, "age": 30}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(p["name"], "7");
    assert_eq!(p["title"], "false");
    assert!(p.get("age").is_none());
}

#[tokio::test]
async fn explicit_null_is_returned_as_null() {
    let app = app();
    let (status, created) =
        send(&app, Method::POST, "/people", Some(json!({"name": "Ada", "title": null}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["title"], Value::Null);
    assert!(created.as_object().unwrap().contains_key("title"));
    assert!(created.get("image").is_none());

    let id = created["id"].as_str().unwrap().to_string();
    let (_, updated) = send(&app, Method::PUT, &format!("/people/{id}"), Some(json!({"name": null}))).await;
    assert_eq!(updated, json!({"id": id, "name": null, "title": null}));
}

#[tokio::test]
async fn uncastable_payload_is_400() {
    let (status, body) = send(&app(), Method::POST, "/people", Some(json!({"name": {"first": "Ada"}}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("name"));
}

#[tokio::test]
async fn malformed_json_is_400() {
    let app = app();
    let req = Request::builder()
        .method(Method::POST)
        .uri("/people")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_id_is_400_on_every_id_route() {
    let app = app();
    for method in [Method::GET, Method::PUT, Method::DELETE] {
        let body = (method == Method::PUT).then(|| json!({"name": "x"}));
        let (status, err) = send(&app, method.clone(), "/people/not-an-id", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{method}");
        assert!(err["error"].as_str().unwrap().contains("not-an-id"), "{method}");
    }
}

#[tokio::test]
async fn undecodable_id_is_400_with_error_body() {
    let app = app();
    for method in [Method::GET, Method::PUT, Method::DELETE] {
        let body = (method == Method::PUT).then(|| json!({"name": "x"}));
        let (status, err) = send(&app, method.clone(), "/people/%FF", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{method}");
        assert!(err["error"].is_string(), "{method}");
    }
}

async fn send_text(app: &Router, method: Method, uri: &str, text: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(text.to_string()))
        .unwrap();
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn non_json_post_creates_empty_person() {
    let app = app();
    let (status, p) = send_text(&app, Method::POST, "/people", "{\"name\": \"Ada\"}").await;
    assert_eq!(status, StatusCode::OK);
    let obj = p.as_object().unwrap();
    assert_eq!(obj.len(), 1);
    assert!(obj.contains_key("id"));

    let (status, _) = send_text(&app, Method::POST, "/people", "hello").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn non_json_put_leaves_record_unchanged() {
    let app = app();
    let (_, created) = send(&app, Method::POST, "/people", Some(json!({"name": "Ada"}))).await;
    let id = created["id"].as_str().unwrap().to_string();
    let (status, updated) = send_text(&app, Method::PUT, &format!("/people/{id}"), "hello").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated, created);
}

#[tokio::test]
async fn json_content_type_with_charset_is_parsed() {
    let req = Request::builder()
        .method(Method::POST)
        .uri("/people")
        .header(header::CONTENT_TYPE, "application/json; charset=utf-8")
        .body(Body::from(json!({"name": "Grace"}).to_string()))
        .unwrap();
    let res = app().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let p: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(p["name"], "Grace");
}

#[tokio::test]
async fn absent_id_is_not_an_error() {
    let app = app();
    let id = Uuid::new_v4();
    let (status, body) = send(&app, Method::GET, &format!("/people/{id}"), None).await;
    assert_eq!((status, body), (StatusCode::OK, Value::Null));
    let (status, body) = send(&app, Method::PUT, &format!("/people/{id}"), Some(json!({"name": "x"}))).await;
    assert_eq!((status, body), (StatusCode::OK, Value::Null));
    let (status, _) = send(&app, Method::DELETE, &format!("/people/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

struct BrokenStore;

#[async_trait::async_trait]
impl PeopleRepository for BrokenStore {
    async fn list(&self) -> Result<Vec<Person>, ServiceError> {
        Err(ServiceError::Db("connection reset".into()))
    }
    async fn create(&self, _input: PersonInput) -> Result<Person, ServiceError> {
        Err(ServiceError::Db("connection reset".into()))
    }
    async fn get(&self, _id: Uuid) -> Result<Option<Person>, ServiceError> {
        Err(ServiceError::Db("connection reset".into()))
    }
    async fn replace(&self, _id: Uuid, _input: PersonInput) -> Result<Option<Person>, ServiceError> {
        Err(ServiceError::Db("connection reset".into()))
    }
    async fn delete(&self, _id: Uuid) -> Result<Option<Person>, ServiceError> {
        Err(ServiceError::Db("connection reset".into()))
    }
}

#[tokio::test]
async fn store_faults_collapse_to_400() {
    let app = app_with(Arc::new(BrokenStore));
    let id = Uuid::new_v4();
    let cases = [
        (Method::GET, "/people".to_string(), None),
        (Method::POST, "/people".to_string(), Some(json!({"name": "x"}))),
        (Method::GET, format!("/people/{id}"), None),
        (Method::PUT, format!("/people/{id}"), Some(json!({"name": "x"}))),
        (Method::DELETE, format!("/people/{id}"), None),
    ];
    for (method, uri, body) in cases {
        let (status, err) = send(&app, method.clone(), &uri, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{method} {uri}");
        assert_eq!(err, json!({"error": "database error: connection reset"}));
    }
}

#[tokio::test]
async fn openapi_document_is_served() {
    let (status, doc) = send(&app(), Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/people/{id}"].is_object());
}
