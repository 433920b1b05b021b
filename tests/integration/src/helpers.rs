//! Test helpers for integration tests
//!
//! Provides an axum WebSocket gateway and an axum REST server, both bound to
//! an ephemeral localhost port, plus a way to await published events.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use axum::extract::ws::{Message as WsMessage, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chat_client::{ClientConfig, EventChannel, Subscription, Token};
use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::fixtures;

/// Upper bound for any single wait in a test
pub const TIMEOUT: Duration = Duration::from_secs(5);

async fn serve(router: Router) -> Result<(SocketAddr, JoinHandle<()>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });
    Ok((addr, handle))
}

/// Client configuration pointing at the mock servers
pub fn test_config(gateway: &MockGateway, api: Option<&MockApi>) -> ClientConfig {
    let config = ClientConfig::new(Token::bot("test-token"))
        .with_gateway_url(gateway.url())
        .with_reconnect_delay(Duration::from_millis(50));
    match api {
        Some(api) => config.with_api_url(api.url()),
        None => config,
    }
}

// ============================================================================
// Gateway
// ============================================================================

/// What the mock gateway received from the client
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
    Frame(Value),
    Close(Option<u16>),
}

/// One accepted WebSocket connection, seen from the server side
pub struct GatewayPeer {
    outgoing: mpsc::UnboundedSender<WsMessage>,
    incoming: mpsc::UnboundedReceiver<Inbound>,
    tasks: Vec<JoinHandle<()>>,
}

impl GatewayPeer {
    fn attach(socket: WebSocket) -> Self {
        let (mut sink, mut stream) = socket.split();
        let (outgoing, mut out_rx) = mpsc::unbounded_channel::<WsMessage>();
        let (in_tx, incoming) = mpsc::unbounded_channel();

        let writer = tokio::spawn(async move {
            while let Some(message) = out_rx.recv().await {
                if sink.send(message).await.is_err() {
                    break;
                }
            }
        });

        let reader = tokio::spawn(async move {
            while let Some(Ok(message)) = stream.next().await {
                match message {
                    WsMessage::Text(text) => {
                        if let Ok(frame) = serde_json::from_str(&text) {
                            let _ = in_tx.send(Inbound::Frame(frame));
                        }
                    }
                    WsMessage::Close(frame) => {
                        let _ = in_tx.send(Inbound::Close(frame.map(|f| f.code)));
                        break;
                    }
                    _ => {}
                }
            }
        });

        Self {
            outgoing,
            incoming,
            tasks: vec![writer, reader],
        }
    }

    /// Push a frame to the client
    pub fn send(&self, frame: &Value) -> Result<()> {
        self.outgoing
            .send(WsMessage::Text(frame.to_string()))
            .map_err(|_| anyhow!("peer disconnected"))
    }

    async fn next(&mut self) -> Result<Inbound> {
        tokio::time::timeout(TIMEOUT, self.incoming.recv())
            .await
            .context("timed out waiting for the client")?
            .ok_or_else(|| anyhow!("connection dropped"))
    }

    /// Next JSON frame from the client
    pub async fn recv(&mut self) -> Result<Value> {
        match self.next().await? {
            Inbound::Frame(frame) => Ok(frame),
            Inbound::Close(code) => Err(anyhow!("client closed the socket with {code:?}")),
        }
    }

    /// Next frame of the given type, skipping others
    pub async fn recv_type(&mut self, kind: &str) -> Result<Value> {
        loop {
            let frame = self.recv().await?;
            if frame["type"] == kind {
                return Ok(frame);
            }
        }
    }

    /// Wait for the client's close frame and return its code
    pub async fn recv_close(&mut self) -> Result<Option<u16>> {
        loop {
            if let Inbound::Close(code) = self.next().await? {
                return Ok(code);
            }
        }
    }

    /// Drop the connection without a close frame
    pub fn hang_up(self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

/// WebSocket gateway that hands every accepted connection to the test
pub struct MockGateway {
    addr: SocketAddr,
    peers: mpsc::UnboundedReceiver<GatewayPeer>,
    handle: JoinHandle<()>,
}

impl MockGateway {
    pub async fn start() -> Result<Self> {
        let (tx, peers) = mpsc::unbounded_channel();
        let router = Router::new().route("/", get(upgrade)).with_state(tx);
        let (addr, handle) = serve(router).await?;
        Ok(Self {
            addr,
            peers,
            handle,
        })
    }

    pub fn url(&self) -> String {
        format!("ws://{}/?version=1&format=json", self.addr)
    }

    /// Wait for the next connection
    pub async fn accept(&mut self) -> Result<GatewayPeer> {
        tokio::time::timeout(TIMEOUT, self.peers.recv())
            .await
            .context("timed out waiting for a connection")?
            .ok_or_else(|| anyhow!("gateway stopped"))
    }

    /// Accept a connection and complete the handshake with `ready`
    pub async fn accept_ready(&mut self, ready: &Value) -> Result<GatewayPeer> {
        let mut peer = self.accept().await?;
        let auth = peer.recv().await?;
        anyhow::ensure!(auth["type"] == "Authenticate", "expected Authenticate, got {auth}");
        anyhow::ensure!(auth["token"] == "test-token", "unexpected token in {auth}");
        peer.send(&fixtures::authenticated())?;
        peer.send(ready)?;
        Ok(peer)
    }

    /// Assert no connection arrives within `wait`
    pub async fn expect_no_connection(&mut self, wait: Duration) -> Result<()> {
        match tokio::time::timeout(wait, self.peers.recv()).await {
            Ok(Some(_)) => Err(anyhow!("unexpected connection")),
            _ => Ok(()),
        }
    }
}

impl Drop for MockGateway {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn upgrade(
    State(peers): State<mpsc::UnboundedSender<GatewayPeer>>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| async move {
        let _ = peers.send(GatewayPeer::attach(socket));
    })
}

// ============================================================================
// REST
// ============================================================================

/// A message the client posted through the REST API
#[derive(Debug, Clone)]
pub struct SentMessage {
    pub channel: String,
    pub token: Option<String>,
    pub body: Value,
}

#[derive(Clone, Default)]
struct ApiState {
    sent: Arc<Mutex<Vec<SentMessage>>>,
    counter: Arc<AtomicUsize>,
}

/// REST server that records posted messages
pub struct MockApi {
    addr: SocketAddr,
    state: ApiState,
    handle: JoinHandle<()>,
}

impl MockApi {
    pub async fn start() -> Result<Self> {
        let state = ApiState::default();
        let router = Router::new()
            .route(
                "/users/@me",
                get(|| async { Json(fixtures::user(fixtures::SELF_ID, "bot")) }),
            )
            .route("/channels/:channel/messages", post(send_message))
            .with_state(state.clone());
        let (addr, handle) = serve(router).await?;
        Ok(Self {
            addr,
            state,
            handle,
        })
    }

    pub fn url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.state.sent.lock().clone()
    }

    /// Wait until at least `count` messages were posted
    pub async fn wait_for_sent(&self, count: usize) -> Result<Vec<SentMessage>> {
        tokio::time::timeout(TIMEOUT, async {
            loop {
                let sent = self.sent();
                if sent.len() >= count {
                    return sent;
                }
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .context("timed out waiting for posted messages")
    }
}

impl Drop for MockApi {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn send_message(
    State(state): State<ApiState>,
    Path(channel): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    let n = state.counter.fetch_add(1, Ordering::SeqCst);
    let id = format!("01H0000000000000000SENT{n:03}");
    let content = body["content"].as_str().unwrap_or_default().to_string();

    state.sent.lock().push(SentMessage {
        channel: channel.clone(),
        token: headers
            .get("x-bot-token")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });

    let mut message = fixtures::message(&id, fixtures::SELF_ID, &content);
    message["channel"] = Value::String(channel);
    Json(message)
}

// ============================================================================
// Events
// ============================================================================

/// Events captured from one channel, in delivery order
pub struct Captured<T> {
    rx: mpsc::UnboundedReceiver<T>,
    subscription: Subscription,
}

impl<T> Captured<T> {
    /// Next captured event
    pub async fn next(&mut self) -> Result<T> {
        tokio::time::timeout(TIMEOUT, self.rx.recv())
            .await
            .context("timed out waiting for an event")?
            .ok_or_else(|| anyhow!("event channel closed"))
    }

    /// Stop capturing
    pub fn stop(self) {
        self.subscription.delete();
    }
}

/// Forward every event published on `channel` into a queue
pub fn capture<T: Clone + Send + Sync + 'static>(channel: &EventChannel<T>) -> Captured<T> {
    let (tx, rx) = mpsc::unbounded_channel();
    let subscription = channel.listen(move |event: &T| {
        let _ = tx.send(event.clone());
    });
    Captured { rx, subscription }
}
