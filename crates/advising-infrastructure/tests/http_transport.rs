//! ReqwestTransport against a local axum server.

use std::sync::{Arc, Mutex};

use advising_core::fetch::{ApiRequest, Endpoint, FetchError, RestFetcher, Transport};
use advising_core::payload::{Ack, ForgotPasswordRequest, ResourcesPayload};
use advising_infrastructure::ReqwestTransport;
use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use serde_json::json;

#[derive(Debug, Clone)]
struct Captured {
    method: Method,
    path: String,
    authorization: Option<String>,
    body: String,
}

type Log = Arc<Mutex<Vec<Captured>>>;

async fn backend(
    State(log): State<Log>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    log.lock().unwrap().push(Captured {
        method: method.clone(),
        path: uri.path().to_string(),
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });

    match uri.path() {
        "/api/resources" => (
            StatusCode::OK,
            json!({"success": true, "resources": [
                {"id": 1, "title": "CV Workshop", "category": "Career"},
                {"id": 2, "title": "Math Tutoring", "category": "Academic"}
            ]})
            .to_string(),
        ),
        "/api/students/forgot-password" => (
            StatusCode::OK,
            json!({"success": true, "message": "Password reset instructions have been sent."}).to_string(),
        ),
        "/api/lecturer/data" => (
            StatusCode::UNAUTHORIZED,
            json!({"msg": "Token has expired"}).to_string(),
        ),
        _ => (
            StatusCode::NOT_FOUND,
            json!({"success": false, "message": "Resource not found."}).to_string(),
        ),
    }
}

async fn spawn_backend() -> (String, Log) {
    let log: Log = Arc::default();
    let app = Router::new().fallback(backend).with_state(log.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), log)
}

#[tokio::test]
async fn test_get_with_bearer() {
    let (base_url, log) = spawn_backend().await;
    let fetcher = RestFetcher::new(Arc::new(ReqwestTransport::new(base_url, None).unwrap()));

    let reply = fetcher
        .get::<ResourcesPayload>(&Endpoint::Resources, Some("tok-1"))
        .await
        .unwrap();

    assert_eq!(reply.payload.resources.len(), 2);
    assert_eq!(reply.payload.resources[0].id.as_deref(), Some("1"));

    let log = log.lock().unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].method, Method::GET);
    assert_eq!(log[0].path, "/api/resources");
    assert_eq!(log[0].authorization.as_deref(), Some("Bearer tok-1"));
}

#[tokio::test]
async fn test_post_sends_json_without_bearer() {
    let (base_url, log) = spawn_backend().await;
    let fetcher = RestFetcher::new(Arc::new(ReqwestTransport::new(base_url, None).unwrap()));

    let reply = fetcher
        .post::<_, Ack>(
            &Endpoint::ForgotPassword,
            None,
            &ForgotPasswordRequest {
                matric_number: "U2020/1001".to_string(),
            },
        )
        .await
        .unwrap();

    assert_eq!(
        reply.message.as_deref(),
        Some("Password reset instructions have been sent.")
    );
    let log = log.lock().unwrap();
    assert_eq!(log[0].method, Method::POST);
    assert!(log[0].authorization.is_none());
    let body: serde_json::Value = serde_json::from_str(&log[0].body).unwrap();
    assert_eq!(body, json!({"matric_number": "U2020/1001"}));
}

#[tokio::test]
async fn test_unauthorized_status() {
    let (base_url, _log) = spawn_backend().await;
    let fetcher = RestFetcher::new(Arc::new(ReqwestTransport::new(base_url, None).unwrap()));

    let err = fetcher
        .get::<ResourcesPayload>(&Endpoint::LecturerData, Some("expired"))
        .await
        .unwrap_err();
    assert!(err.is_auth_failure());
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let transport = ReqwestTransport::new(format!("http://{addr}"), None).unwrap();
    assert!(transport.send(ApiRequest::get("/api/resources")).await.is_err());

    let fetcher = RestFetcher::new(Arc::new(transport));
    let err = fetcher
        .get::<ResourcesPayload>(&Endpoint::Resources, None)
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
}
