//! FlatUID identifiers.
//!
//! A FlatUID is a GUID stored as 16 raw bytes in Windows GUID layout
//! (first three fields little-endian).

use std::fmt;

use uuid::Uuid;

use crate::limits::FLAT_UID_LEN;

/// A 16-byte opaque identifier, compared byte-wise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct FlatUid(pub [u8; FLAT_UID_LEN]);

/// The all-zero FlatUID.
pub const NIL_FLAT_UID: FlatUid = FlatUid([0u8; FLAT_UID_LEN]);

/// Provider UID carried by every Permanent Entry ID
/// (`{C840A7DC-42C0-1A10-B4B9-08002B2FE182}`).
pub const PERMANENT_ENTRY_ID_GUID: FlatUid = FlatUid([
    0xDC, 0xA7, 0x40, 0xC8, 0xC0, 0x42, 0x10, 0x1A, 0xB4, 0xB9, 0x08, 0x00, 0x2B, 0x2F, 0xE1, 0x82,
]);

impl FlatUid {
    pub const fn from_bytes(bytes: [u8; FLAT_UID_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; FLAT_UID_LEN] {
        &self.0
    }

    /// Interprets the bytes as a Windows GUID.
    pub fn to_uuid(self) -> Uuid {
        Uuid::from_bytes_le(self.0)
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid.to_bytes_le())
    }
}

impl fmt::Display for FlatUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uuid().braced())
    }
}

/// Parses a GUID string (hyphenated, simple, braced or URN form).
pub fn parse_flat_uid(s: &str) -> Option<FlatUid> {
    Uuid::parse_str(s).ok().map(FlatUid::from_uuid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permanent_guid_display() {
        assert_eq!(
            PERMANENT_ENTRY_ID_GUID.to_string(),
            "{c840a7dc-42c0-1a10-b4b9-08002b2fe182}"
        );
    }

    #[test]
    fn test_parse_roundtrip() {
        let parsed = parse_flat_uid("{c840a7dc-42c0-1a10-b4b9-08002b2fe182}").unwrap();
        assert_eq!(parsed, PERMANENT_ENTRY_ID_GUID);

        let plain = parse_flat_uid("c840a7dc-42c0-1a10-b4b9-08002b2fe182").unwrap();
        assert_eq!(plain, parsed);
        assert!(parse_flat_uid("not a guid").is_none());
    }

    #[test]
    fn test_bytewise_equality() {
        let mut other = PERMANENT_ENTRY_ID_GUID;
        assert_eq!(other, PERMANENT_ENTRY_ID_GUID);
        other.0[15] ^= 1;
        assert_ne!(other, PERMANENT_ENTRY_ID_GUID);
        assert_ne!(NIL_FLAT_UID, PERMANENT_ENTRY_ID_GUID);
    }
}
