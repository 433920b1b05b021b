//! In-process REST mock for unit tests

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::{Multipart, Path, RawQuery};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chat_common::ClientConfig;
use chat_core::Token;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::client::HttpClient;

pub(crate) const SELF_ID: &str = "01H00000000000000000SELF01";

/// Axum server bound to an ephemeral port, aborted on drop
pub(crate) struct MockServer {
    pub addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl MockServer {
    pub async fn start(router: Router) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.ok();
        });
        Self { addr, handle }
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(Token::bot("secret"))
            .with_api_url(format!("http://{}/api", self.addr))
            .with_upload_url(format!("http://{}/autumn", self.addr))
    }

    pub fn client(&self) -> HttpClient {
        let http = reqwest::Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        HttpClient::with_http_client(&self.config(), http).unwrap()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

// ============================================================================
// Echo routes
// ============================================================================

/// Routes that reflect the request back, plus fixed error and empty answers
pub(crate) fn echo_router() -> Router {
    Router::new()
        .route("/api/echo", get(echo).post(echo).patch(echo))
        .route("/api/forbidden", get(forbidden))
        .route("/api/empty", axum::routing::delete(|| async { StatusCode::NO_CONTENT }))
}

async fn echo(
    method: Method,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> Json<Value> {
    let headers: BTreeMap<String, String> = headers
        .iter()
        .filter_map(|(name, value)| Some((name.to_string(), value.to_str().ok()?.to_string())))
        .collect();
    Json(json!({
        "method": method.as_str(),
        "headers": headers,
        "query": query,
        "body": String::from_utf8_lossy(&body),
    }))
}

async fn forbidden() -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(json!({ "type": "MissingPermission", "permission": "ViewChannel" })),
    )
        .into_response()
}

// ============================================================================
// Entity routes
// ============================================================================

/// Minimal platform API plus upload service
pub(crate) fn rest_router() -> Router {
    Router::new()
        .route("/api/users/@me", get(|| async { Json(user(SELF_ID)) }))
        .route(
            "/api/users/:id",
            get(|Path(id): Path<String>| async move { Json(user(&id)) }),
        )
        .route(
            "/api/channels/:id",
            get(fetch_channel).patch(edit_channel).delete(delete_channel),
        )
        .route("/api/channels/:id/messages", post(send_message))
        .route(
            "/api/channels/:channel/messages/:message",
            get(fetch_message).patch(edit_message).delete(|| async { StatusCode::NO_CONTENT }),
        )
        .route("/api/servers/:id", get(fetch_server))
        .route("/api/servers/:server/members/:user", get(fetch_member))
        .route("/api/custom/emoji/:id", get(fetch_emoji))
        .route("/api/webhooks/:id", get(fetch_webhook))
        .route("/autumn/", get(upload_config))
        .route("/autumn/:tag", post(upload))
}

fn user(id: &str) -> Value {
    json!({ "_id": id, "username": format!("user-{id}"), "discriminator": "0001", "online": true })
}

fn channel(id: &str, name: &str) -> Value {
    json!({
        "_id": id,
        "channel_type": "TextChannel",
        "server": "01H0000000000000000SERVER1",
        "name": name
    })
}

fn message(id: &str, channel: &str, content: &str) -> Value {
    json!({ "_id": id, "channel": channel, "author": SELF_ID, "content": content })
}

async fn fetch_channel(Path(id): Path<String>) -> Json<Value> {
    Json(channel(&id, "general"))
}

async fn edit_channel(Path(id): Path<String>, Json(body): Json<Value>) -> Json<Value> {
    let name = body["name"].as_str().unwrap_or("general");
    Json(channel(&id, name))
}

async fn delete_channel(Path(id): Path<String>, RawQuery(query): RawQuery) -> Response {
    if id == "LOCKED" {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "type": "MissingPermission", "permission": "ManageChannel" })),
        )
            .into_response();
    }
    match query.as_deref() {
        None | Some("leave_silently=true" | "leave_silently=false") => {
            StatusCode::NO_CONTENT.into_response()
        }
        Some(_) => StatusCode::BAD_REQUEST.into_response(),
    }
}

async fn send_message(
    Path(channel): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    // The idempotency key doubles as the new message ID
    let id = headers
        .get("idempotency-key")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("01H000000000000000MESSAGE1");
    let mut sent = message(id, &channel, body["content"].as_str().unwrap_or_default());
    let replies: Vec<Value> = body["replies"]
        .as_array()
        .map(|r| r.iter().map(|reply| reply["id"].clone()).collect())
        .unwrap_or_default();
    sent["replies"] = Value::Array(replies);
    Json(sent)
}

async fn fetch_message(Path((channel, id)): Path<(String, String)>) -> Json<Value> {
    Json(message(&id, &channel, "hello"))
}

async fn edit_message(
    Path((channel, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let mut edited = message(&id, &channel, body["content"].as_str().unwrap_or_default());
    edited["edited"] = json!("2024-01-01T00:00:00Z");
    Json(edited)
}

async fn fetch_server(Path(id): Path<String>) -> Json<Value> {
    Json(json!({
        "_id": id,
        "owner": SELF_ID,
        "name": "Test Server",
        "channels": ["01H000000000000000CHANNEL1"]
    }))
}

async fn fetch_member(Path((server, user)): Path<(String, String)>) -> Json<Value> {
    Json(json!({
        "_id": { "server": server, "user": user },
        "joined_at": "2024-01-01T00:00:00Z",
        "nickname": "nick"
    }))
}

async fn fetch_emoji(Path(id): Path<String>) -> Json<Value> {
    Json(json!({
        "_id": id,
        "parent": { "type": "Server", "id": "01H0000000000000000SERVER1" },
        "creator_id": SELF_ID,
        "name": "party"
    }))
}

async fn fetch_webhook(Path(id): Path<String>) -> Json<Value> {
    Json(json!({ "id": id, "name": "hook", "channel_id": "01H000000000000000CHANNEL1" }))
}

async fn upload_config() -> Json<Value> {
    Json(json!({
        "autumn": "1.1.5",
        "jpeg_quality": 80,
        "tags": {
            "attachments": { "max_size": 20_000_000, "use_ulid": true, "enabled": true },
            "avatars": {
                "max_size": 4_000_000,
                "use_ulid": true,
                "enabled": true,
                "restrict_content_type": "Image"
            }
        }
    }))
}

async fn upload(Path(tag): Path<String>, mut multipart: Multipart) -> Response {
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let Ok(bytes) = field.bytes().await else {
            return StatusCode::BAD_REQUEST.into_response();
        };
        return Json(json!({ "id": format!("{tag}:{filename}:{}", bytes.len()) })).into_response();
    }
    (StatusCode::BAD_REQUEST, Json(json!({ "type": "FileMissing" }))).into_response()
}
