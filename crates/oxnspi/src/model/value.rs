//! Property values: the tagged union selected by a property type.

use crate::limits::{MAX_BINARY_LEN, MAX_VALUES};
use crate::model::{FlatUid, PropertyTag, PropertyType};

/// A 64-bit FILETIME (100ns intervals since 1601-01-01 UTC), split as on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct FileTime {
    pub low: u32,
    pub high: u32,
}

impl FileTime {
    pub const fn from_u64(v: u64) -> Self {
        Self {
            low: v as u32,
            high: (v >> 32) as u32,
        }
    }

    pub const fn as_u64(self) -> u64 {
        ((self.high as u64) << 32) | self.low as u64
    }
}

/// A single property value. Exactly one shape is live, selected by the
/// variant; [`TaggedValue::property_type`] gives the wire discriminant.
///
/// 8-bit strings are kept as raw bytes (without terminator) because their
/// meaning depends on the session code page; see [`crate::codepage`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TaggedValue {
    Null,
    Integer16(i16),
    Integer32(i32),
    Boolean(bool),
    String8(Vec<u8>),
    String(String),
    Binary(Vec<u8>),
    Guid(FlatUid),
    Time(FileTime),
    ErrorCode(u32),
    EmbeddedTable,
    MultipleInteger16(Vec<i16>),
    MultipleInteger32(Vec<i32>),
    MultipleString8(Vec<Vec<u8>>),
    MultipleString(Vec<String>),
    MultipleBinary(Vec<Vec<u8>>),
    MultipleGuid(Vec<FlatUid>),
    MultipleTime(Vec<FileTime>),
}

impl TaggedValue {
    /// Returns the property type this value encodes as.
    pub fn property_type(&self) -> PropertyType {
        match self {
            TaggedValue::Null => PropertyType::Null,
            TaggedValue::Integer16(_) => PropertyType::Integer16,
            TaggedValue::Integer32(_) => PropertyType::Integer32,
            TaggedValue::Boolean(_) => PropertyType::Boolean,
            TaggedValue::String8(_) => PropertyType::String8,
            TaggedValue::String(_) => PropertyType::String,
            TaggedValue::Binary(_) => PropertyType::Binary,
            TaggedValue::Guid(_) => PropertyType::Guid,
            TaggedValue::Time(_) => PropertyType::Time,
            TaggedValue::ErrorCode(_) => PropertyType::ErrorCode,
            TaggedValue::EmbeddedTable => PropertyType::EmbeddedTable,
            TaggedValue::MultipleInteger16(_) => PropertyType::MultipleInteger16,
            TaggedValue::MultipleInteger32(_) => PropertyType::MultipleInteger32,
            TaggedValue::MultipleString8(_) => PropertyType::MultipleString8,
            TaggedValue::MultipleString(_) => PropertyType::MultipleString,
            TaggedValue::MultipleBinary(_) => PropertyType::MultipleBinary,
            TaggedValue::MultipleGuid(_) => PropertyType::MultipleGuid,
            TaggedValue::MultipleTime(_) => PropertyType::MultipleTime,
        }
    }

    /// Element count of a multi-valued value, `None` for scalars.
    pub fn element_count(&self) -> Option<usize> {
        match self {
            TaggedValue::MultipleInteger16(v) => Some(v.len()),
            TaggedValue::MultipleInteger32(v) => Some(v.len()),
            TaggedValue::MultipleString8(v) => Some(v.len()),
            TaggedValue::MultipleString(v) => Some(v.len()),
            TaggedValue::MultipleBinary(v) => Some(v.len()),
            TaggedValue::MultipleGuid(v) => Some(v.len()),
            TaggedValue::MultipleTime(v) => Some(v.len()),
            _ => None,
        }
    }

    /// Checks the protocol ceilings and string constraints.
    ///
    /// Returns an error description if invalid, None if valid.
    pub fn validate(&self) -> Option<&'static str> {
        if self.element_count().is_some_and(|n| n > MAX_VALUES) {
            return Some("multi-valued property exceeds 100,000 values");
        }
        match self {
            TaggedValue::Binary(b) if b.len() > MAX_BINARY_LEN => {
                Some("binary value exceeds 2,097,152 bytes")
            }
            TaggedValue::MultipleBinary(v) if v.iter().any(|b| b.len() > MAX_BINARY_LEN) => {
                Some("binary value exceeds 2,097,152 bytes")
            }
            TaggedValue::String8(s) if s.contains(&0) => Some("8-bit string contains NUL"),
            TaggedValue::MultipleString8(v) if v.iter().any(|s| s.contains(&0)) => {
                Some("8-bit string contains NUL")
            }
            TaggedValue::String(s) if s.contains('\0') => Some("string contains NUL"),
            TaggedValue::MultipleString(v) if v.iter().any(|s| s.contains('\0')) => {
                Some("string contains NUL")
            }
            _ => None,
        }
    }
}

/// A property tag paired with its value (`PropertyValue_r`).
///
/// The reserved 32-bit field of the wire structure is not stored: it is
/// written as zero and ignored on receipt.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyValue {
    pub tag: PropertyTag,
    pub value: TaggedValue,
}

impl PropertyValue {
    /// Pairs a property identifier with a value, deriving the tag's type
    /// from the value.
    pub fn new(id: u16, value: TaggedValue) -> Self {
        Self {
            tag: PropertyTag::new(id, value.property_type()),
            value,
        }
    }

    /// Whether the tag's type agrees with the value's variant.
    pub fn is_consistent(&self) -> bool {
        self.tag.property_type() == Some(self.value.property_type())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filetime_split() {
        let ft = FileTime::from_u64(0x01D9_1234_5678_9ABC);
        assert_eq!(ft.low, 0x5678_9ABC);
        assert_eq!(ft.high, 0x01D9_1234);
        assert_eq!(ft.as_u64(), 0x01D9_1234_5678_9ABC);
    }

    #[test]
    fn test_property_value_new_derives_tag() {
        let pv = PropertyValue::new(0x3001, TaggedValue::String("Alice".to_string()));
        assert_eq!(pv.tag.raw(), 0x3001_001F);
        assert!(pv.is_consistent());

        let wrong = PropertyValue {
            tag: PropertyTag::from_raw(0x3001_001E),
            value: TaggedValue::String("Alice".to_string()),
        };
        assert!(!wrong.is_consistent());
    }

    #[test]
    fn test_validate_strings() {
        assert!(TaggedValue::String8(b"ok".to_vec()).validate().is_none());
        assert!(TaggedValue::String8(b"a\0b".to_vec()).validate().is_some());
        assert!(TaggedValue::MultipleString(vec!["x\0".to_string()]).validate().is_some());
    }

    #[test]
    fn test_validate_ceilings() {
        assert!(TaggedValue::MultipleInteger16(vec![0; MAX_VALUES]).validate().is_none());
        assert!(TaggedValue::MultipleInteger16(vec![0; MAX_VALUES + 1]).validate().is_some());
        assert!(TaggedValue::Binary(vec![0; MAX_BINARY_LEN + 1]).validate().is_some());
    }
}
