//! Address-book entry identifiers.

use crate::model::{FlatUid, PERMANENT_ENTRY_ID_GUID};

/// First byte of an Ephemeral Entry ID.
pub const EPHEMERAL_ID_TYPE: u8 = 0x87;

/// First byte of a Permanent Entry ID.
pub const PERMANENT_ID_TYPE: u8 = 0x00;

/// Value of the reserved R4 field in both entry ID forms.
pub const ENTRY_ID_R4: u32 = 0x0000_0001;

/// The kind of object an entry ID refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum DisplayType {
    MailUser = 0x0000_0000,
    DistList = 0x0000_0001,
    Forum = 0x0000_0002,
    Agent = 0x0000_0003,
    Organization = 0x0000_0004,
    PrivateDistList = 0x0000_0005,
    RemoteMailUser = 0x0000_0006,
    Container = 0x0000_0100,
    Template = 0x0000_0101,
    AddressTemplate = 0x0000_0102,
    Search = 0x0000_0200,
}

impl DisplayType {
    pub fn from_u32(v: u32) -> Option<DisplayType> {
        match v {
            0x0000_0000 => Some(DisplayType::MailUser),
            0x0000_0001 => Some(DisplayType::DistList),
            0x0000_0002 => Some(DisplayType::Forum),
            0x0000_0003 => Some(DisplayType::Agent),
            0x0000_0004 => Some(DisplayType::Organization),
            0x0000_0005 => Some(DisplayType::PrivateDistList),
            0x0000_0006 => Some(DisplayType::RemoteMailUser),
            0x0000_0100 => Some(DisplayType::Container),
            0x0000_0101 => Some(DisplayType::Template),
            0x0000_0102 => Some(DisplayType::AddressTemplate),
            0x0000_0200 => Some(DisplayType::Search),
            _ => None,
        }
    }

    pub fn code(self) -> u32 {
        self as u32
    }
}

/// Identifies an object by its Minimal Entry ID on one server.
///
/// Equality compares the provider UID, display type and MID, so two IDs
/// from the same server for the same object are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EphemeralEntryId {
    pub provider_uid: FlatUid,
    pub display_type: DisplayType,
    pub mid: u32,
}

/// Identifies an object by its distinguished name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PermanentEntryId {
    pub display_type: DisplayType,
    pub distinguished_name: String,
}

impl PermanentEntryId {
    /// The fixed provider UID every permanent ID carries.
    pub fn provider_uid(&self) -> FlatUid {
        PERMANENT_ENTRY_ID_GUID
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryId {
    Ephemeral(EphemeralEntryId),
    Permanent(PermanentEntryId),
}

impl EntryId {
    pub fn id_type(&self) -> u8 {
        match self {
            EntryId::Ephemeral(_) => EPHEMERAL_ID_TYPE,
            EntryId::Permanent(_) => PERMANENT_ID_TYPE,
        }
    }

    pub fn display_type(&self) -> DisplayType {
        match self {
            EntryId::Ephemeral(id) => id.display_type,
            EntryId::Permanent(id) => id.display_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_type_codes() {
        assert_eq!(DisplayType::from_u32(0x200), Some(DisplayType::Search));
        assert_eq!(DisplayType::from_u32(0x102), Some(DisplayType::AddressTemplate));
        assert_eq!(DisplayType::from_u32(7), None);
        assert_eq!(DisplayType::Container.code(), 0x100);
    }

    #[test]
    fn test_ephemeral_equality() {
        let a = EphemeralEntryId {
            provider_uid: FlatUid([1; 16]),
            display_type: DisplayType::MailUser,
            mid: 42,
        };
        let mut b = a;
        assert_eq!(a, b);
        b.mid = 43;
        assert_ne!(a, b);
    }
}
