#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use reqwest::Client;
use serde_json::{json, Value};
use sqlx::postgres::PgSslMode;

use journey_activity::config::{Config, PlatformConfig};
use journey_activity::db::ActivityLog;
use journey_activity::models::{ExecutionRecord, NewExecutionRecord};

pub const TEST_TOKEN: &str = "test-access-token";

// ── In-memory activity log ──────────────────────────────────────

#[derive(Default)]
pub struct MemoryActivityLog {
    records: Mutex<Vec<ExecutionRecord>>,
    next_id: AtomicI32,
    fail_writes: AtomicBool,
    fail_next_writes: AtomicUsize,
    fail_reads: AtomicBool,
}

impl MemoryActivityLog {
    pub fn records(&self) -> Vec<ExecutionRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Fail only the next `count` writes, then accept writes again.
    pub fn fail_next_writes(&self, count: usize) {
        self.fail_next_writes.store(count, Ordering::SeqCst);
    }

    fn write_fails(&self) -> bool {
        self.fail_writes.load(Ordering::SeqCst)
            || self
                .fail_next_writes
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl ActivityLog for MemoryActivityLog {
    async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(sqlx::Error::Protocol("store unavailable".to_string()));
        }
        Ok(())
    }

    async fn save(&self, record: &NewExecutionRecord) -> Result<(), sqlx::Error> {
        if self.write_fails() {
            return Err(sqlx::Error::Protocol("store unavailable".to_string()));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.records.lock().unwrap().push(ExecutionRecord {
            id,
            uuid: record.uuid.clone(),
            contact_key: record.contact_key.clone(),
            trigger_date: record.trigger_date,
            status: record.status.as_str().to_string(),
            error_log: record.error_log.clone(),
        });
        Ok(())
    }

    async fn find_by_uuid(&self, uuid: &str) -> Result<Vec<ExecutionRecord>, sqlx::Error> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(sqlx::Error::Protocol("store unavailable".to_string()));
        }

        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.uuid == uuid)
            .cloned()
            .collect())
    }
}

// ── Fake journey platform ───────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlatformMode {
    Healthy,
    TokenRejected,
    EventRejected,
}

#[derive(Default)]
pub struct PlatformCalls {
    pub token_requests: Mutex<Vec<Value>>,
    pub events: Mutex<Vec<Value>>,
}

#[derive(Clone)]
struct PlatformState {
    mode: Arc<Mutex<PlatformMode>>,
    calls: Arc<PlatformCalls>,
}

pub struct FakePlatform {
    pub addr: SocketAddr,
    pub calls: Arc<PlatformCalls>,
    mode: Arc<Mutex<PlatformMode>>,
}

impl FakePlatform {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn set_mode(&self, mode: PlatformMode) {
        *self.mode.lock().unwrap() = mode;
    }

    pub fn events(&self) -> Vec<Value> {
        self.calls.events.lock().unwrap().clone()
    }

    pub fn token_requests(&self) -> Vec<Value> {
        self.calls.token_requests.lock().unwrap().clone()
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TEST_TOKEN}"))
}

async fn token(State(state): State<PlatformState>, Json(body): Json<Value>) -> Response {
    state.calls.token_requests.lock().unwrap().push(body);

    if *state.mode.lock().unwrap() == PlatformMode::TokenRejected {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "invalid_client" })),
        )
            .into_response();
    }

    Json(json!({ "access_token": TEST_TOKEN, "token_type": "Bearer", "expires_in": 1079 }))
        .into_response()
}

async fn events(
    State(state): State<PlatformState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    state.calls.events.lock().unwrap().push(body);

    if *state.mode.lock().unwrap() == PlatformMode::EventRejected {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "Event definition key not found" })),
        )
            .into_response();
    }

    (
        StatusCode::CREATED,
        Json(json!({ "eventInstanceId": "4f1f5c0e-0000-0000-0000-000000000001" })),
    )
        .into_response()
}

async fn interactions(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    Json(json!({
        "count": 2,
        "items": [
            { "id": "j-1", "key": "welcome", "name": "Welcome Journey" },
            { "id": "j-2", "key": "winback", "name": "Win-back Journey" }
        ]
    }))
    .into_response()
}

pub async fn spawn_platform() -> FakePlatform {
    let mode = Arc::new(Mutex::new(PlatformMode::Healthy));
    let calls = Arc::new(PlatformCalls::default());

    let app = Router::new()
        .route("/v2/token", post(token))
        .route("/interaction/v1/events", post(events))
        .route("/interaction/v1/interactions/", get(interactions))
        .with_state(PlatformState {
            mode: mode.clone(),
            calls: calls.clone(),
        });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake platform");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Fake platform failed");
    });

    FakePlatform { addr, calls, mode }
}

// ── Application under test ──────────────────────────────────────

pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub store: Arc<MemoryActivityLog>,
    pub platform: FakePlatform,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// POST a JSON body and return (text body, status).
    pub async fn post_json(&self, path: &str, body: &Value) -> (String, reqwest::StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("post request failed");
        let status = resp.status();
        (resp.text().await.unwrap_or_default(), status)
    }

    /// GET a path and return (JSON body, status).
    pub async fn get_json(&self, path: &str) -> (Value, reqwest::StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn execute(&self, body: &Value) -> (String, reqwest::StatusCode) {
        self.post_json("/activity/execute", body).await
    }
}

pub fn execute_body(contact_key: &str, event_key: &str, uuid: &str, payload: Value) -> Value {
    json!({
        "inArguments": [{
            "contactKey": contact_key,
            "selectedJourneyAPIEventKey": event_key,
            "payload": payload,
            "uuid": uuid,
        }],
        "outArguments": [],
        "activityObjectID": "a1b2c3",
        "journeyId": "j-1",
    })
}

pub fn test_config(auth_base_url: String, rest_base_url: String) -> Config {
    Config {
        database_url: String::new(),
        database_ssl_mode: PgSslMode::Disable,
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        max_body_size: 1_048_576,
        http_timeout_secs: 5,
        log_level: "warn".to_string(),
        platform: PlatformConfig {
            auth_base_url,
            client_id: "test-client-id".to_string(),
            client_secret: "test-client-secret".to_string(),
            rest_base_url,
        },
    }
}

/// Spawn the app against a fresh fake platform and an empty in-memory log.
pub async fn spawn_app() -> TestApp {
    let platform = spawn_platform().await;
    let config = test_config(platform.base_url(), platform.base_url());
    spawn_app_with(platform, config).await
}

pub async fn spawn_app_with(platform: FakePlatform, config: Config) -> TestApp {
    let store = Arc::new(MemoryActivityLog::default());
    let app = journey_activity::build_app(config, store.clone()).expect("Failed to build app");

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        addr,
        client: Client::new(),
        store,
        platform,
    }
}
