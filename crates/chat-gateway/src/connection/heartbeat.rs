//! Heartbeat bookkeeping

use std::time::{Duration, Instant};

/// Ping/pong timing for one connection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Heartbeat {
    last_sent: Option<Instant>,
    last_ack: Option<Instant>,
    last_rtt: Option<Duration>,
}

impl Heartbeat {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A ping just went out
    pub fn record_sent(&mut self, at: Instant) {
        self.last_sent = Some(at);
    }

    /// A pong arrived; returns the measured round trip
    ///
    /// A pong with no ping outstanding is recorded without a measurement.
    pub fn record_ack(&mut self, at: Instant) -> Option<Duration> {
        self.last_ack = Some(at);
        let rtt = self.last_sent.and_then(|sent| at.checked_duration_since(sent));
        if rtt.is_some() {
            self.last_rtt = rtt;
        }
        rtt
    }

    /// Whether the last ping has not been answered yet
    pub fn is_pending(&self) -> bool {
        match (self.last_sent, self.last_ack) {
            (Some(sent), Some(ack)) => ack < sent,
            (Some(_), None) => true,
            (None, _) => false,
        }
    }

    /// Most recent round trip
    #[inline]
    pub fn latency(&self) -> Option<Duration> {
        self.last_rtt
    }

    /// Most recent round trip in milliseconds, NaN before the first pong
    pub fn latency_ms(&self) -> f64 {
        self.last_rtt
            .map_or(f64::NAN, |rtt| rtt.as_secs_f64() * 1000.0)
    }

    /// Forget everything, used when a new socket is opened
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
