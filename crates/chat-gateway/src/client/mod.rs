//! Gateway client

mod builder;
mod client;

pub use builder::ClientBuilder;
pub use client::Client;
