// Stub of the web app's verification endpoints, started once per test binary.
#![allow(dead_code)]

use axum::{
    Form, Json, Router,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Deserialize;
use serde_json::json;
use std::{
    sync::{Arc, Mutex, OnceLock},
    time::Duration,
};

pub const VERIFIER_USERNAME: &str = "gate";
pub const VERIFIER_PASSWORD: &str = "secret";
const SESSION_COOKIE: &str = "verifier=granted";

// Global base URL used by all tests after the stub publishes its bound address.
static SERVER_URL: OnceLock<String> = OnceLock::new();
// One-time guard that ensures the stub bootstrap path runs only once.
static SERVER_READY: OnceLock<()> = OnceLock::new();
// Every token the stub was asked to verify, in arrival order.
static RECEIVED_TOKENS: Mutex<Vec<String>> = Mutex::new(Vec::new());

#[derive(Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

#[derive(Deserialize)]
struct VerifyBody {
    token: String,
}

async fn verifier_login(Form(form): Form<LoginForm>) -> Response {
    // The real page answers 200 either way and only sets the session on success.
    if form.username == VERIFIER_USERNAME && form.password == VERIFIER_PASSWORD {
        (
            [(header::SET_COOKIE, format!("{SESSION_COOKIE}; Path=/"))],
            "welcome",
        )
            .into_response()
    } else {
        "invalid credentials".into_response()
    }
}

async fn verify_token(headers: HeaderMap, Json(body): Json<VerifyBody>) -> Response {
    let has_session = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .any(|value| value.split(';').any(|pair| pair.trim() == SESSION_COOKIE));
    if !has_session {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Unauthorized" })),
        )
            .into_response();
    }

    RECEIVED_TOKENS
        .lock()
        .expect("received tokens mutex poisoned")
        .push(body.token.clone());

    let token = body.token.as_str();
    if token.starts_with("fresh-") {
        Json(json!({
            "valid": true,
            "redeemed": true,
            "user": { "name": "Bo", "email": "bo@x.com" }
        }))
        .into_response()
    } else if token.starts_with("spent-") {
        Json(json!({
            "valid": true,
            "redeemed": true,
            "already_redeemed": true,
            "user": { "name": "Ann", "email": "ann@x.com" }
        }))
        .into_response()
    } else if token.starts_with("broken-") {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Error verifying token" })),
        )
            .into_response()
    } else if token.starts_with("garbled-") {
        "definitely not json".into_response()
    } else {
        Json(json!({ "valid": false })).into_response()
    }
}

fn stub_app() -> Router {
    Router::new()
        .route("/verifier", post(verifier_login))
        .route("/verify_token", post(verify_token))
}

/// How many times the stub was asked to verify `token`.
pub fn received_count(token: &str) -> usize {
    RECEIVED_TOKENS
        .lock()
        .expect("received tokens mutex poisoned")
        .iter()
        .filter(|received| received.as_str() == token)
        .count()
}

// Ensure the stub is running and return the shared base URL.
pub fn ensure_server() -> &'static str {
    SERVER_READY.get_or_init(|| {
        let published_url = Arc::new(OnceLock::<String>::new());
        let published_url_thread = Arc::clone(&published_url);
        // Spawn an OS thread so the stub outlives individual `#[tokio::test]` runtimes.
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("test runtime");
            runtime.block_on(async move {
                // Bind to an ephemeral port to avoid collisions with local services.
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind ephemeral test port");
                let addr = listener.local_addr().expect("get local addr");
                let _ = published_url_thread.set(format!("http://{}", addr));
                axum::serve(listener, stub_app())
                    .await
                    .expect("stub server failed");
            });
        });
        wait_for_server_url_and_readiness(published_url);
    });

    SERVER_URL
        .get()
        .expect("server url should be initialized")
        .as_str()
}

// Wait for URL publication and then for the stub socket to accept TCP connections.
fn wait_for_server_url_and_readiness(published_url: Arc<OnceLock<String>>) {
    let base_url = loop {
        if let Some(url) = published_url.get() {
            break url.clone();
        }
        std::thread::sleep(Duration::from_millis(10));
    };

    let _ = SERVER_URL.set(base_url.clone());

    let addr = base_url
        .strip_prefix("http://")
        .expect("base url should use http://");

    for _ in 0..100 {
        if std::net::TcpStream::connect(addr).is_ok() {
            return;
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    panic!("stub server did not become ready in time");
}
