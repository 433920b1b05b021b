//! Value objects - immutable types that represent domain concepts

mod flags;
mod permissions;
mod token;
mod ulid;

pub use flags::{mask_update, ChannelFlags, EmojiFlags, RoleFlags, ServerFlags, UserBits};
pub use permissions::{PermissionOverride, Permissions};
pub use token::{Token, TokenKind, TokenKindParseError};
pub use ulid::{Ulid, UlidParseError, ULID_LEN};
