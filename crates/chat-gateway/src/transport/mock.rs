//! In-memory dialer for tests

use std::time::Duration;

use async_trait::async_trait;
use futures::channel::mpsc;
use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};

use super::dialer::{BoxSink, BoxStream, Dialer};
use crate::error::TransportError;

/// Server side of one mocked socket
pub struct MockPeer {
    /// Frames the client wrote
    pub from_client: mpsc::UnboundedReceiver<Message>,
    /// Feed frames (or read errors) to the client
    pub to_client: mpsc::UnboundedSender<Result<Message, WsError>>,
}

impl MockPeer {
    /// Send a text frame to the client
    pub fn send_text(&self, text: impl Into<String>) {
        let _ = self.to_client.unbounded_send(Ok(Message::Text(text.into())));
    }

    /// Send a JSON frame to the client
    pub fn send_json(&self, value: &serde_json::Value) {
        self.send_text(value.to_string());
    }

    /// Next text frame the client wrote, parsed as JSON
    pub async fn next_json(&mut self) -> serde_json::Value {
        loop {
            let message = tokio::time::timeout(Duration::from_secs(5), self.from_client.next())
                .await
                .expect("timed out waiting for client frame")
                .expect("client hung up");
            if let Message::Text(text) = message {
                return serde_json::from_str(&text).expect("client sent invalid json");
            }
        }
    }

    /// Next frame of any kind the client wrote
    pub async fn next_message(&mut self) -> Option<Message> {
        tokio::time::timeout(Duration::from_secs(5), self.from_client.next())
            .await
            .ok()
            .flatten()
    }

    /// Drop the connection from the server side
    pub fn hang_up(self) {
        drop(self);
    }
}

/// Dialer that hands every new socket to the test
pub struct MockDialer {
    peers: tokio::sync::mpsc::UnboundedSender<MockPeer>,
    failures: Mutex<usize>,
    dialed: Mutex<Vec<String>>,
}

impl MockDialer {
    /// Create a dialer and the receiver that yields each dialed peer
    pub fn new() -> (Self, tokio::sync::mpsc::UnboundedReceiver<MockPeer>) {
        let (peers, rx) = tokio::sync::mpsc::unbounded_channel();
        (
            Self {
                peers,
                failures: Mutex::new(0),
                dialed: Mutex::new(Vec::new()),
            },
            rx,
        )
    }

    /// Make the next `count` dials fail
    pub fn fail_next(&self, count: usize) {
        *self.failures.lock() += count;
    }

    /// URLs dialed so far
    pub fn dialed(&self) -> Vec<String> {
        self.dialed.lock().clone()
    }
}

#[async_trait]
impl Dialer for MockDialer {
    async fn dial(&self, url: &str) -> Result<(BoxSink, BoxStream), TransportError> {
        self.dialed.lock().push(url.to_string());
        {
            let mut failures = self.failures.lock();
            if *failures > 0 {
                *failures -= 1;
                return Err(TransportError::connect(WsError::ConnectionClosed));
            }
        }

        let (client_tx, from_client) = mpsc::unbounded();
        let (to_client, client_rx) = mpsc::unbounded();
        let _ = self.peers.send(MockPeer {
            from_client,
            to_client,
        });

        let sink = client_tx.sink_map_err(|_| WsError::ConnectionClosed);
        Ok((Box::pin(sink), Box::pin(client_rx)))
    }
}
