//! Protocol ceilings and fixed wire constants for NSPI encoding/decoding.
//!
//! The ceilings come from the protocol itself and double as protection
//! against resource exhaustion when decoding untrusted buffers.

/// Maximum element count of any counted array (multi-valued properties,
/// rows in a row set, values in a row, tags in a tag array).
pub const MAX_VALUES: usize = 100_000;

/// Maximum byte length of a single binary value.
pub const MAX_BINARY_LEN: usize = 2_097_152;

/// Maximum number of child restrictions under one And/Or node.
pub const MAX_RESTRICTION_CHILDREN: usize = MAX_VALUES;

/// Default nesting limit for decoded restriction trees.
pub const DEFAULT_MAX_RESTRICTION_DEPTH: usize = 255;

/// Byte size of a FlatUID / GUID.
pub const FLAT_UID_LEN: usize = 16;

/// Byte size of an encoded STAT block (nine 32-bit fields).
pub const STAT_LEN: usize = 36;

/// Byte size of an encoded Ephemeral Entry ID.
pub const EPHEMERAL_ENTRY_ID_LEN: usize = 32;

/// Presence byte: a value follows.
pub const HAS_VALUE: u8 = 0xFF;

/// Presence byte: no value follows.
pub const NO_VALUE: u8 = 0x00;
