//! Integration test utilities for the chat client
//!
//! This crate provides an in-process mock gateway and mock REST server so
//! the real WebSocket dialer and HTTP client can be exercised end to end.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
