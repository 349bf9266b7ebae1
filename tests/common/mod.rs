use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::extract::State;
use axum::http::Uri;
use axum::{Json, Router};
use reqwest::{Client, Method, StatusCode};
use serde_json::{json, Value};

use ledger_relay::config::{Config, TelegramConfig};
use ledger_relay::relay::{Notifier, RelayOutcome};

pub const TEST_TOKEN: &str = "123456:test-token";
pub const TEST_CHAT_ID: &str = "-1001234567890";

/// A running relay instance.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// POST a JSON submission, return (body, status).
    pub async fn submit_json(&self, data: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/submit"))
            .json(data)
            .send()
            .await
            .expect("submit json failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// POST a form-urlencoded submission, return (body, status).
    #[allow(dead_code)]
    pub async fn submit_form(&self, data: &[(&str, &str)]) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/submit"))
            .form(data)
            .send()
            .await
            .expect("submit form failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Send a JSON body to the submit route with an arbitrary method.
    #[allow(dead_code)]
    pub async fn request(&self, method: Method, data: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .request(method, self.url("/api/submit"))
            .json(data)
            .send()
            .await
            .expect("request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

/// One request received by the Telegram stub.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub path: String,
    pub body: Value,
}

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    reply: Value,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

/// A stand-in for the Bot API that answers every request with a fixed reply.
pub struct TelegramStub {
    pub addr: SocketAddr,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl TelegramStub {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

async fn record(
    State(stub): State<StubState>,
    uri: Uri,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    stub.calls.lock().unwrap().push(RecordedCall {
        path: uri.path().to_string(),
        body,
    });
    (stub.status, Json(stub.reply.clone()))
}

pub async fn spawn_telegram(status: StatusCode, reply: Value) -> TelegramStub {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        status,
        reply,
        calls: calls.clone(),
    };

    let app = Router::new().fallback(record).with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Stub failed");
    });

    TelegramStub { addr, calls }
}

#[allow(dead_code)]
pub async fn spawn_telegram_ok() -> TelegramStub {
    spawn_telegram(
        StatusCode::OK,
        json!({ "ok": true, "result": { "message_id": 1 } }),
    )
    .await
}

/// A base URL nothing listens on.
#[allow(dead_code)]
pub async fn unreachable_base() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

pub fn test_config(api_base: &str) -> Config {
    Config {
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        max_body_size: 65_536,
        log_level: "warn".to_string(),
        telegram: TelegramConfig {
            bot_token: TEST_TOKEN.to_string(),
            chat_id: TEST_CHAT_ID.to_string(),
            api_base: api_base.to_string(),
            timeout_secs: 5,
        },
    }
}

/// Spawn the relay pointed at the given Bot API base URL.
#[allow(dead_code)]
pub async fn spawn_app(api_base: &str) -> TestApp {
    let app = ledger_relay::build_app(test_config(api_base)).expect("Failed to build app");
    serve(app).await
}

/// Spawn the relay with an in-process notifier.
#[allow(dead_code)]
pub async fn spawn_app_with_notifier(notifier: Arc<dyn Notifier>) -> TestApp {
    let app = ledger_relay::build_app_with_notifier(test_config("http://127.0.0.1:9"), notifier);
    serve(app).await
}

async fn serve(app: Router) -> TestApp {
    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    // Spawn server in background
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        addr,
        client: Client::new(),
    }
}

/// Notifier returning a fixed outcome and remembering what it was asked to send.
pub struct FakeNotifier {
    outcome: RelayOutcome,
    sent: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl FakeNotifier {
    pub fn new(outcome: RelayOutcome) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for FakeNotifier {
    fn id(&self) -> &str {
        "fake"
    }

    async fn send(&self, text: &str) -> RelayOutcome {
        self.sent.lock().unwrap().push(text.to_string());
        self.outcome.clone()
    }
}

/// The worked example submission.
#[allow(dead_code)]
pub fn valid_submission() -> Value {
    json!({
        "experience": "5y",
        "portfolio": "link",
        "tradingPlatform": "MT4",
        "contactPlatform": "Telegram",
        "contactHandle": "@x",
        "timestamp": "2024-01-01T00:00:00Z",
    })
}
