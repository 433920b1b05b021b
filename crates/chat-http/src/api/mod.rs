//! Typed endpoints
//!
//! Each call returns the wire entity; callers that want it mirrored locally
//! insert it into their cache themselves.

mod assets;
mod channels;
mod messages;
pub mod params;
mod servers;
mod users;


pub use params::{EditChannel, EditMessage, Reply, SendMessage};
