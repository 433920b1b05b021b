//! WebSocket transport

mod dialer;
#[cfg(test)]
pub(crate) mod mock;

pub use dialer::{BoxSink, BoxStream, Dialer, TungsteniteDialer};
