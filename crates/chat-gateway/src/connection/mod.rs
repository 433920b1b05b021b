//! Connection state
//!
//! Lifecycle state machine, heartbeat timing and the shared record tying
//! them together.

mod connection;
mod heartbeat;
mod state;

pub use connection::Connection;
pub use heartbeat::Heartbeat;
pub use state::{ConnectionEvent, ConnectionState};
