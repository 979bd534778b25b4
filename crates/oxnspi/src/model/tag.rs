//! Property tags and property type discriminants.

use std::fmt;

/// Wire discriminant selecting the shape of a property value.
///
/// Multi-valued types are the base type with [`PropertyType::MULTIPLE_FLAG`]
/// set. `Unspecified` never describes a value; it marks a column whose values
/// carry their own type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum PropertyType {
    Unspecified = 0x0000,
    Null = 0x0001,
    Integer16 = 0x0002,
    Integer32 = 0x0003,
    ErrorCode = 0x000A,
    Boolean = 0x000B,
    EmbeddedTable = 0x000D,
    String8 = 0x001E,
    String = 0x001F,
    Time = 0x0040,
    Guid = 0x0048,
    Binary = 0x0102,
    MultipleInteger16 = 0x1002,
    MultipleInteger32 = 0x1003,
    MultipleString8 = 0x101E,
    MultipleString = 0x101F,
    MultipleTime = 0x1040,
    MultipleGuid = 0x1048,
    MultipleBinary = 0x1102,
}

impl PropertyType {
    /// Bit OR-ed into a base type to form its multi-valued variant.
    pub const MULTIPLE_FLAG: u16 = 0x1000;

    /// Creates a PropertyType from its wire representation.
    pub fn from_u16(v: u16) -> Option<PropertyType> {
        match v {
            0x0000 => Some(PropertyType::Unspecified),
            0x0001 => Some(PropertyType::Null),
            0x0002 => Some(PropertyType::Integer16),
            0x0003 => Some(PropertyType::Integer32),
            0x000A => Some(PropertyType::ErrorCode),
            0x000B => Some(PropertyType::Boolean),
            0x000D => Some(PropertyType::EmbeddedTable),
            0x001E => Some(PropertyType::String8),
            0x001F => Some(PropertyType::String),
            0x0040 => Some(PropertyType::Time),
            0x0048 => Some(PropertyType::Guid),
            0x0102 => Some(PropertyType::Binary),
            0x1002 => Some(PropertyType::MultipleInteger16),
            0x1003 => Some(PropertyType::MultipleInteger32),
            0x101E => Some(PropertyType::MultipleString8),
            0x101F => Some(PropertyType::MultipleString),
            0x1040 => Some(PropertyType::MultipleTime),
            0x1048 => Some(PropertyType::MultipleGuid),
            0x1102 => Some(PropertyType::MultipleBinary),
            _ => None,
        }
    }

    pub fn code(self) -> u16 {
        self as u16
    }

    pub fn is_multiple(self) -> bool {
        self.code() & Self::MULTIPLE_FLAG != 0
    }

    /// The scalar type of a multi-valued type, or `self` for scalars.
    pub fn base(self) -> PropertyType {
        PropertyType::from_u16(self.code() & !Self::MULTIPLE_FLAG).unwrap_or(self)
    }
}

/// A 32-bit property tag: property identifier in the high 16 bits,
/// [`PropertyType`] code in the low 16 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyTag(u32);

impl PropertyTag {
    pub const fn new(id: u16, property_type: PropertyType) -> Self {
        Self(((id as u32) << 16) | property_type as u32)
    }

    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub const fn id(self) -> u16 {
        (self.0 >> 16) as u16
    }

    pub const fn type_code(self) -> u16 {
        (self.0 & 0xFFFF) as u16
    }

    /// The type discriminant, or `None` if the low bits are not a known type.
    pub fn property_type(self) -> Option<PropertyType> {
        PropertyType::from_u16(self.type_code())
    }

    /// Same property identifier with a different type.
    pub const fn with_type(self, property_type: PropertyType) -> Self {
        Self::new(self.id(), property_type)
    }
}

impl From<u32> for PropertyTag {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl From<PropertyTag> for u32 {
    fn from(tag: PropertyTag) -> Self {
        tag.0
    }
}

impl fmt::Display for PropertyTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_layout() {
        let tag = PropertyTag::from_raw(0x3001_001F);
        assert_eq!(tag.id(), 0x3001);
        assert_eq!(tag.type_code(), 0x001F);
        assert_eq!(tag.property_type(), Some(PropertyType::String));
        assert_eq!(PropertyTag::new(0x3001, PropertyType::String), tag);
        assert_eq!(tag.with_type(PropertyType::String8).raw(), 0x3001_001E);
        assert_eq!(tag.to_string(), "0x3001001F");
    }

    #[test]
    fn test_type_codes_roundtrip() {
        for code in 0..=0xFFFFu16 {
            if let Some(ty) = PropertyType::from_u16(code) {
                assert_eq!(ty.code(), code);
            }
        }
        assert_eq!(PropertyType::from_u16(0x0005), None);
        assert_eq!(PropertyType::from_u16(0x1102), Some(PropertyType::MultipleBinary));
    }

    #[test]
    fn test_multiple_base() {
        assert!(PropertyType::MultipleGuid.is_multiple());
        assert!(!PropertyType::Guid.is_multiple());
        assert_eq!(PropertyType::MultipleString8.base(), PropertyType::String8);
        assert_eq!(PropertyType::Binary.base(), PropertyType::Binary);
    }
}
