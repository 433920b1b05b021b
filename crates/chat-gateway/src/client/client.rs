//! Event stream client
//!
//! One supervisor task owns the read half of the socket and redials after
//! every unexpected loss. One heartbeat task pings on a fixed interval.
//! Writes from any task go through a mutex around the write half.

use std::sync::Arc;
use std::time::Duration;

use chat_cache::{EntityCache, EntityCacheConfig, SharedEntityCache};
use chat_common::ClientConfig;
use chat_core::Ulid;
use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode as WsCloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;

use crate::connection::{Connection, ConnectionEvent, ConnectionState};
use crate::error::{ClientError, ClientResult, TransportError};
use crate::events::{Events, ReadyEvent};
use crate::handlers::{FrameDispatcher, HandlerContext};
use crate::protocol::{ClientFrame, CloseCode, FrameCodec};
use crate::transport::{BoxSink, BoxStream, Dialer};

use super::ClientBuilder;

type ReadySlot = Arc<Mutex<Option<oneshot::Sender<ClientResult<ReadyEvent>>>>>;

/// Gateway client
///
/// Cheap to clone; clones share the connection, cache and events. Call
/// [`close`](Self::close) to stop the background tasks.
#[derive(Clone)]
pub struct Client {
    shared: Arc<Shared>,
}

struct Shared {
    config: ClientConfig,
    dialer: Arc<dyn Dialer>,
    codec: Arc<dyn FrameCodec>,
    events: Arc<Events>,
    cache: SharedEntityCache,
    connection: Arc<Connection>,
    dispatcher: FrameDispatcher,
    writer: tokio::sync::Mutex<Option<BoxSink>>,
    shutdown: watch::Sender<bool>,
    heartbeat: Mutex<Option<JoinHandle<()>>>,
    supervisor: Mutex<Option<JoinHandle<()>>>,
}

impl Client {
    /// Start building a client
    #[must_use]
    pub fn builder(config: ClientConfig) -> ClientBuilder {
        ClientBuilder::new(config)
    }

    pub(super) fn from_parts(
        config: ClientConfig,
        dialer: Arc<dyn Dialer>,
        codec: Arc<dyn FrameCodec>,
        cache: EntityCacheConfig,
    ) -> Self {
        let events = Arc::new(Events::new());
        let cache = EntityCache::shared(cache);
        let connection = Arc::new(Connection::new());
        let dispatcher = FrameDispatcher::new(
            HandlerContext::new(Arc::clone(&events), Arc::clone(&cache), Arc::clone(&connection)),
            Arc::clone(&codec),
        );
        let (shutdown, _) = watch::channel(false);

        Self {
            shared: Arc::new(Shared {
                config,
                dialer,
                codec,
                events,
                cache,
                connection,
                dispatcher,
                writer: tokio::sync::Mutex::new(None),
                shutdown,
                heartbeat: Mutex::new(None),
                supervisor: Mutex::new(None),
            }),
        }
    }

    /// Connect, authenticate and wait for the initial state
    ///
    /// Resolves with the first `Ready`, or fails with the first transport
    /// or protocol error. There is no timeout. Later reconnects happen in
    /// the background and do not notify this caller.
    pub async fn open(&self) -> ClientResult<ReadyEvent> {
        let shared = &self.shared;
        if shared.connection.is_closed() {
            return Err(ClientError::Closed);
        }
        if shared
            .supervisor
            .lock()
            .as_ref()
            .is_some_and(|task| !task.is_finished())
        {
            return Err(ClientError::AlreadyOpen);
        }

        let mut shutdown = shared.shutdown.subscribe();
        let (tx, rx) = oneshot::channel();
        let slot: ReadySlot = Arc::new(Mutex::new(Some(tx)));

        let race = [
            shared.events.ready.listen({
                let slot = Arc::clone(&slot);
                move |ready| resolve(&slot, Ok(ready.clone()))
            }),
            shared.events.protocol_error.listen({
                let slot = Arc::clone(&slot);
                move |error| resolve(&slot, Err(ClientError::Protocol(error.clone())))
            }),
            shared.events.error.listen({
                let slot = Arc::clone(&slot);
                move |error| {
                    // No second Ready follows a malformed one
                    if error.is_transport() || error.is_ready_decode() {
                        resolve(&slot, Err(error.clone()));
                    }
                }
            }),
        ];

        let result = async {
            let stream = Shared::connect(shared).await?;
            let task = tokio::spawn(Shared::supervise(Arc::clone(shared), stream));
            *shared.supervisor.lock() = Some(task);

            tokio::select! {
                outcome = rx => outcome.unwrap_or(Err(ClientError::Closed)),
                () = closed(&mut shutdown) => Err(ClientError::Closed),
            }
        }
        .await;

        for subscription in &race {
            subscription.delete();
        }

        match &result {
            Ok(ready) => {
                tracing::info!(
                    servers = ready.servers.len(),
                    channels = ready.channels.len(),
                    "gateway session ready"
                );
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to open gateway session");
                if !shared.connection.is_closed() {
                    shared.teardown().await;
                }
            }
        }
        result
    }

    /// Close the connection for good
    ///
    /// Stops the heartbeat and the supervisor, sends a normal close frame
    /// and suppresses any reconnect in flight. Closing twice is a no-op.
    pub async fn close(&self) -> ClientResult<()> {
        let shared = &self.shared;
        if !shared.connection.mark_closed() {
            return Ok(());
        }
        shared.connection.apply(ConnectionEvent::CloseRequested);
        shared.shutdown.send_replace(true);
        shared.stop_heartbeat();

        let sink = shared.writer.lock().await.take();
        if let Some(mut sink) = sink {
            let frame = CloseFrame {
                code: WsCloseCode::from(CloseCode::Normal.as_u16()),
                reason: "".into(),
            };
            if let Err(e) = sink.send(Message::Close(Some(frame))).await {
                tracing::debug!(error = %e, "failed to send close frame");
            }
            let _ = sink.close().await;
        }

        shared.connection.apply(ConnectionEvent::CloseSent);
        tracing::info!("gateway client closed");
        Ok(())
    }

    /// Send a frame
    pub async fn send(&self, frame: ClientFrame) -> ClientResult<()> {
        self.shared.send(frame).await
    }

    /// Show the typing indicator in a channel
    pub async fn begin_typing(&self, channel: &Ulid) -> ClientResult<()> {
        self.send(ClientFrame::BeginTyping {
            channel: channel.clone(),
        })
        .await
    }

    /// Clear the typing indicator in a channel
    pub async fn end_typing(&self, channel: &Ulid) -> ClientResult<()> {
        self.send(ClientFrame::EndTyping {
            channel: channel.clone(),
        })
        .await
    }

    /// Send a ping outside the heartbeat schedule
    pub async fn ping(&self) -> ClientResult<()> {
        self.shared.connection.record_ping();
        self.send(ClientFrame::ping()).await
    }

    /// Most recent heartbeat round trip
    pub fn latency(&self) -> Option<Duration> {
        self.shared.connection.latency()
    }

    /// Most recent heartbeat round trip in milliseconds, NaN before the first pong
    pub fn latency_ms(&self) -> f64 {
        self.shared.connection.latency_ms()
    }

    pub fn state(&self) -> ConnectionState {
        self.shared.connection.state()
    }

    pub fn is_closed(&self) -> bool {
        self.shared.connection.is_closed()
    }

    pub fn cache(&self) -> &SharedEntityCache {
        &self.shared.cache
    }

    pub fn events(&self) -> &Events {
        &self.shared.events
    }

    pub fn config(&self) -> &ClientConfig {
        &self.shared.config
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("gateway_url", &self.shared.config.gateway_url)
            .field("connection", &self.shared.connection)
            .finish_non_exhaustive()
    }
}

/// Completes once `close` has been called
async fn closed(shutdown: &mut watch::Receiver<bool>) {
    let _ = shutdown.wait_for(|closed| *closed).await;
}

fn resolve(slot: &ReadySlot, outcome: ClientResult<ReadyEvent>) {
    if let Some(tx) = slot.lock().take() {
        let _ = tx.send(outcome);
    }
}

// ============================================================================
// Background tasks
// ============================================================================

impl Shared {
    /// Dial, install the write half, authenticate and start the heartbeat
    async fn connect(self: &Arc<Self>) -> ClientResult<BoxStream> {
        self.connection.apply(ConnectionEvent::Dial);
        tracing::debug!(url = %self.config.gateway_url, "dialing gateway");

        let (sink, stream) = match self.dialer.dial(&self.config.gateway_url).await {
            Ok(halves) => halves,
            Err(e) => {
                self.connection.apply(ConnectionEvent::TransportLost);
                return Err(e.into());
            }
        };
        {
            // `close` sets the flag before taking the writer
            let mut writer = self.writer.lock().await;
            if self.connection.is_closed() {
                return Err(ClientError::Closed);
            }
            *writer = Some(sink);
        }
        self.connection.apply(ConnectionEvent::Dialed);
        self.connection.reset_heartbeat();

        let authenticate = ClientFrame::Authenticate {
            token: self.config.token.as_str().to_string(),
        };
        if let Err(e) = self.send(authenticate).await {
            self.connection.apply(ConnectionEvent::TransportLost);
            return Err(e);
        }

        self.start_heartbeat();
        Ok(stream)
    }

    async fn send(&self, frame: ClientFrame) -> ClientResult<()> {
        let text = self.codec.encode(&frame)?;
        let mut writer = self.writer.lock().await;
        let sink = writer.as_mut().ok_or(ClientError::NotConnected)?;
        sink.send(Message::Text(text))
            .await
            .map_err(TransportError::send)?;
        tracing::trace!(%frame, "frame sent");
        Ok(())
    }

    /// Read until the socket fails, then redial until closed
    async fn supervise(self: Arc<Self>, mut stream: BoxStream) {
        let mut shutdown = self.shutdown.subscribe();
        loop {
            let error = tokio::select! {
                () = closed(&mut shutdown) => return,
                error = self.read_loop(&mut stream) => error,
            };
            if self.connection.is_closed() {
                return;
            }
            self.on_transport_lost(error).await;

            stream = loop {
                tokio::select! {
                    () = closed(&mut shutdown) => return,
                    () = tokio::time::sleep(self.config.reconnect_delay) => {}
                }
                if self.connection.is_closed() {
                    return;
                }
                tracing::info!("reconnecting to gateway");
                match self.connect().await {
                    Ok(stream) => break stream,
                    Err(ClientError::Closed) => return,
                    Err(e) => {
                        tracing::warn!(error = %e, "reconnect failed");
                        self.events.error.emit_async(e);
                    }
                }
            };
        }
    }

    /// Dispatch text frames until the stream fails or ends
    async fn read_loop(&self, stream: &mut BoxStream) -> TransportError {
        while let Some(message) = stream.next().await {
            match message {
                Ok(Message::Text(text)) => self.dispatcher.handle_text(&text),
                Ok(Message::Close(frame)) => {
                    return TransportError::Closed {
                        code: frame.as_ref().map(|f| u16::from(f.code)),
                        reason: frame.map(|f| f.reason.into_owned()).unwrap_or_default(),
                    };
                }
                Ok(_) => tracing::trace!("skipping non-text frame"),
                Err(e) => return TransportError::receive(e),
            }
        }
        TransportError::Closed {
            code: None,
            reason: "stream ended".to_string(),
        }
    }

    async fn on_transport_lost(&self, error: TransportError) {
        match error.close_code() {
            Some(code) if !code.should_reconnect() => {
                tracing::warn!(%code, "gateway closed the connection");
            }
            _ => tracing::warn!(error = %error, "gateway connection lost"),
        }
        self.events.error.emit_async(ClientError::Transport(error));
        self.stop_heartbeat();
        self.connection.reset_heartbeat();
        *self.writer.lock().await = None;
        self.connection.apply(ConnectionEvent::TransportLost);
    }

    /// Undo a failed `open` so it can be retried
    async fn teardown(&self) {
        if let Some(task) = self.supervisor.lock().take() {
            task.abort();
        }
        self.stop_heartbeat();
        self.connection.reset_heartbeat();
        *self.writer.lock().await = None;
        self.connection.apply(ConnectionEvent::TransportLost);
    }

    fn start_heartbeat(self: &Arc<Self>) {
        let shared = Arc::clone(self);
        let task = tokio::spawn(async move { shared.heartbeat_loop().await });
        if let Some(previous) = self.heartbeat.lock().replace(task) {
            previous.abort();
        }
    }

    fn stop_heartbeat(&self) {
        if let Some(task) = self.heartbeat.lock().take() {
            task.abort();
        }
    }

    async fn heartbeat_loop(&self) {
        let interval = self.config.heartbeat_interval;
        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
        loop {
            ticker.tick().await;
            if self.connection.is_closed() {
                break;
            }
            if self.connection.is_ping_pending() {
                tracing::warn!("previous ping was never acknowledged, stopping heartbeat");
                break;
            }
            self.connection.record_ping();
            if let Err(e) = self.send(ClientFrame::ping()).await {
                tracing::debug!(error = %e, "heartbeat send failed");
                break;
            }
        }
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
