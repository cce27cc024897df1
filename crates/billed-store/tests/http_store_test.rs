//! HTTP store integration tests.
//!
//! Run with: `cargo test -p billed-store --test http_store_test`
//! Each test serves a mock backend with axum on an ephemeral local port.

use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::routing::{get, patch};
use axum::{Json, Router};
use billed_core::{Bill, BillStatus, ReceiptFile};
use billed_store::{BillStore, CreatePayload, HttpBillStore, StoreError, UpdatePayload};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct Recorded {
    auth: Option<String>,
    upload_email: Option<String>,
    upload_file_name: Option<String>,
    upload_bytes: Vec<u8>,
    update_id: Option<String>,
    update_content_type: Option<String>,
    update_body: Option<String>,
}

type Shared = Arc<Mutex<Recorded>>;

async fn list_bills(State(recorded): State<Shared>, headers: HeaderMap) -> Json<Value> {
    recorded.lock().unwrap().auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    Json(json!([
        { "id": "a", "date": "2003-03-03", "status": "pending", "amount": 100, "pct": 20 },
        { "id": "b", "date": "2004-04-04", "status": "refused", "amount": 200, "pct": 20 }
    ]))
}

async fn create_bill(State(recorded): State<Shared>, mut multipart: Multipart) -> Json<Value> {
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().map(str::to_string);
                let data = field.bytes().await.unwrap();
                let mut rec = recorded.lock().unwrap();
                rec.upload_file_name = file_name;
                rec.upload_bytes = data.to_vec();
            }
            "email" => {
                let text = field.text().await.unwrap();
                recorded.lock().unwrap().upload_email = Some(text);
            }
            _ => {}
        }
    }

    Json(json!({ "fileUrl": "http://localhost/public/test.jpg", "key": "123" }))
}

async fn update_bill(
    State(recorded): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: String,
) -> Json<Value> {
    let mut rec = recorded.lock().unwrap();
    rec.update_id = Some(id);
    rec.update_content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    rec.update_body = Some(body);
    Json(json!({ "ok": true }))
}

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn backend() -> (String, Shared) {
    let recorded: Shared = Arc::new(Mutex::new(Recorded::default()));
    let router = Router::new()
        .route("/bills", get(list_bills).post(create_bill))
        .route("/bills/{id}", patch(update_bill))
        .with_state(recorded.clone());
    (serve(router).await, recorded)
}

fn store(base_url: &str, jwt: Option<&str>) -> HttpBillStore {
    HttpBillStore::new(base_url, Duration::from_secs(5), jwt.map(str::to_string)).unwrap()
}

#[tokio::test]
async fn test_list_reads_bills_with_bearer_token() {
    let (url, recorded) = backend().await;
    let bills = store(&url, Some("jwt-token")).list().await.unwrap();

    assert_eq!(bills.len(), 2);
    assert_eq!(bills[1].status, BillStatus::Refused);
    assert_eq!(
        recorded.lock().unwrap().auth.as_deref(),
        Some("Bearer jwt-token")
    );
}

#[tokio::test]
async fn test_list_without_token_sends_no_auth() {
    let (url, recorded) = backend().await;
    store(&url, None).list().await.unwrap();
    assert!(recorded.lock().unwrap().auth.is_none());
}

#[tokio::test]
async fn test_create_sends_file_and_email() {
    let (url, recorded) = backend().await;
    let payload = CreatePayload::upload(
        ReceiptFile::with_guessed_type("test.jpg", b"dummy content".to_vec()),
        "test@example.com",
    );

    let response = store(&url, None).create(payload).await.unwrap();
    assert_eq!(response.key, "123");
    assert_eq!(response.file_url, "http://localhost/public/test.jpg");

    let rec = recorded.lock().unwrap();
    assert_eq!(rec.upload_email.as_deref(), Some("test@example.com"));
    assert_eq!(rec.upload_file_name.as_deref(), Some("test.jpg"));
    assert_eq!(rec.upload_bytes, b"dummy content");
}

#[tokio::test]
async fn test_update_patches_bill_by_selector() {
    let (url, recorded) = backend().await;
    let bill = Bill {
        email: "test@example.com".to_string(),
        name: "Train ticket".to_string(),
        amount: 50,
        pct: 20,
        ..Default::default()
    };
    let payload = UpdatePayload::for_bill(&bill, "123").unwrap();
    let expected_body = payload.data.clone();

    let value = store(&url, None).update(payload).await.unwrap();
    assert_eq!(value, json!({ "ok": true }));

    let rec = recorded.lock().unwrap();
    assert_eq!(rec.update_id.as_deref(), Some("123"));
    assert_eq!(rec.update_content_type.as_deref(), Some("application/json"));
    assert_eq!(rec.update_body.as_deref(), Some(expected_body.as_str()));
}

#[tokio::test]
async fn test_update_without_selector_targets_collection_path() {
    let seen: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));
    let router = Router::new()
        .route(
            "/bills/",
            patch(|State(seen): State<Arc<Mutex<Option<String>>>>, uri: Uri| async move {
                *seen.lock().unwrap() = Some(uri.path().to_string());
                Json(json!({ "ok": true }))
            }),
        )
        .with_state(seen.clone());
    let url = serve(router).await;

    let payload = UpdatePayload::for_bill(&Bill::default(), "").unwrap();
    let value = store(&url, None).update(payload).await.unwrap();

    assert_eq!(value, json!({ "ok": true }));
    assert_eq!(seen.lock().unwrap().as_deref(), Some("/bills/"));
}

#[tokio::test]
async fn test_error_status_maps_to_french_message() {
    let router = Router::new()
        .route("/bills", get(|| async { (StatusCode::NOT_FOUND, "no bills") }))
        .route(
            "/bills/{id}",
            patch(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
    let url = serve(router).await;
    let store = store(&url, None);

    let err = store.list().await.unwrap_err();
    assert_eq!(err.to_string(), "Erreur 404");
    assert!(matches!(err, StoreError::Status { ref body, .. } if body == "no bills"));

    let payload = UpdatePayload::for_bill(&Bill::default(), "1").unwrap();
    let err = store.update(payload).await.unwrap_err();
    assert_eq!(err.to_string(), "Erreur 500");
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = store(&format!("http://{}", addr), None)
        .list()
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Transport(_)));
}
