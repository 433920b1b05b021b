//! Bitfields for cached entity attributes
//!
//! Boolean attributes of cached projections are packed into one integer per
//! entity. Patch events flip single bits through `set`, so bits that the
//! patch does not mention survive untouched.

use bitflags::bitflags;

bitflags! {
    /// Channel attributes
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ChannelFlags: u8 {
        /// Direct message channel is open
        const ACTIVE = 1 << 0;
        /// Channel is marked as NSFW
        const NSFW   = 1 << 1;
    }
}

bitflags! {
    /// Server attributes
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ServerFlags: u8 {
        /// Server shares analytics
        const ANALYTICS    = 1 << 0;
        /// Server is listed in discovery
        const DISCOVERABLE = 1 << 1;
        /// Server is marked as NSFW
        const NSFW         = 1 << 2;
    }
}

bitflags! {
    /// Role attributes
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RoleFlags: u8 {
        /// Members with this role are displayed separately
        const HOIST = 1 << 0;
    }
}

bitflags! {
    /// Custom emoji attributes
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct EmojiFlags: u8 {
        const ANIMATED = 1 << 0;
        const NSFW     = 1 << 1;
    }
}

bitflags! {
    /// Packed user attributes
    ///
    /// Layout:
    /// - Bits 0-31:  badges as sent by the server
    /// - Bits 32-47: account flags as sent by the server
    /// - Bit 61:     bot account
    /// - Bit 62:     privileged account
    /// - Bit 63:     currently online
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct UserBits: u64 {
        const BADGES     = 0xFFFF_FFFF;
        const FLAGS      = 0xFFFF << 32;
        const BOT        = 1 << 61;
        const PRIVILEGED = 1 << 62;
        const ONLINE     = 1 << 63;
    }
}

/// Replace only the bits selected by `mask` with the matching bits of `value`
#[inline]
#[must_use]
pub const fn mask_update(bits: u64, mask: u64, value: u64) -> u64 {
    (bits & !mask) | (value & mask)
}

impl UserBits {
    /// Badge bits
    #[inline]
    pub fn badges(self) -> u32 {
        (self.bits() & Self::BADGES.bits()) as u32
    }

    /// Account flag bits
    #[inline]
    pub fn flags(self) -> u32 {
        ((self.bits() & Self::FLAGS.bits()) >> 32) as u32
    }

    /// Overwrite the badge bits, leaving every other bit alone
    pub fn update_badges(&mut self, badges: u32) {
        *self = Self::from_bits_retain(mask_update(
            self.bits(),
            Self::BADGES.bits(),
            u64::from(badges),
        ));
    }

    /// Overwrite the account flag bits, leaving every other bit alone
    pub fn update_flags(&mut self, flags: u32) {
        *self = Self::from_bits_retain(mask_update(
            self.bits(),
            Self::FLAGS.bits(),
            u64::from(flags) << 32,
        ));
    }

    #[inline]
    pub fn is_online(self) -> bool {
        self.contains(Self::ONLINE)
    }

    #[inline]
    pub fn is_bot(self) -> bool {
        self.contains(Self::BOT)
    }
}
