//! Connection bookkeeping
//!
//! Tracks lifecycle state and heartbeat timing for the client's socket.
//! The socket halves themselves live in the client.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use super::heartbeat::Heartbeat;
use super::state::{ConnectionEvent, ConnectionState};

/// State shared between the client, its tasks and the frame handler
pub struct Connection {
    /// Current lifecycle state
    state: Mutex<ConnectionState>,

    /// Ping/pong timing
    heartbeat: Mutex<Heartbeat>,

    /// Set once by `close`; never cleared
    closed: AtomicBool,
}

impl Connection {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ConnectionState::Disconnected),
            heartbeat: Mutex::new(Heartbeat::new()),
            closed: AtomicBool::new(false),
        }
    }

    /// Get the current state
    pub fn state(&self) -> ConnectionState {
        *self.state.lock()
    }

    /// Feed an event to the state machine and return the new state
    pub fn apply(&self, event: ConnectionEvent) -> ConnectionState {
        let mut state = self.state.lock();
        let previous = *state;
        *state = previous.transition(event);
        if *state != previous {
            tracing::debug!(from = %previous, to = %*state, ?event, "connection state changed");
        }
        *state
    }

    /// Check if the client was closed
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Mark the client closed; returns `false` if it already was
    pub fn mark_closed(&self) -> bool {
        !self.closed.swap(true, Ordering::SeqCst)
    }

    /// Record a ping sent now
    pub fn record_ping(&self) {
        self.heartbeat.lock().record_sent(Instant::now());
    }

    /// Record a pong received now; returns the round trip if one was measured
    pub fn record_pong(&self) -> Option<Duration> {
        self.heartbeat.lock().record_ack(Instant::now())
    }

    /// Check if the last ping is still unanswered
    pub fn is_ping_pending(&self) -> bool {
        self.heartbeat.lock().is_pending()
    }

    /// Clear heartbeat timing for a fresh socket
    pub fn reset_heartbeat(&self) {
        self.heartbeat.lock().reset();
    }

    /// Most recent heartbeat round trip
    pub fn latency(&self) -> Option<Duration> {
        self.heartbeat.lock().latency()
    }

    /// Most recent round trip in milliseconds, NaN if none yet
    pub fn latency_ms(&self) -> f64 {
        self.heartbeat.lock().latency_ms()
    }
}

impl Default for Connection {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("state", &self.state())
            .field("closed", &self.is_closed())
            .field("latency", &self.latency())
            .finish()
    }
}
