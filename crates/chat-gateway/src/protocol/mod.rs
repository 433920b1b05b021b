//! Gateway protocol definitions
//!
//! Inbound frame kinds, outbound frames, server errors, close codes and the
//! text codec.

mod client_frame;
mod close_codes;
mod codec;
mod errors;
mod frame_kind;

pub use client_frame::ClientFrame;
pub use close_codes::CloseCode;
pub use codec::{CodecError, FrameCodec, SerdeJsonCodec};
pub use errors::{ProtocolError, ProtocolErrorKind};
pub use frame_kind::FrameKind;
