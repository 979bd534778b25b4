//! Error types for NSPI encoding, decoding and validation.

use thiserror::Error;

use crate::model::{PropertyTag, PropertyType};

/// Errors raised while decoding a wire buffer.
///
/// None of these are recoverable at the codec layer: the buffer is malformed
/// or uses a shape this codec does not know, and the caller gets the error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unexpected end of input while reading {context}")]
    UnexpectedEof { context: &'static str },

    #[error("unsupported property type 0x{type_code:04X}")]
    UnsupportedPropertyType { type_code: u16 },

    #[error("{field} count {count} exceeds limit {max}")]
    CountLimitExceeded {
        field: &'static str,
        count: usize,
        max: usize,
    },

    #[error("row length mismatch: expected {expected} values, found {actual}")]
    RowLengthMismatch { expected: usize, actual: usize },

    #[error("column {index}: expected tag {expected}, found {actual}")]
    ColumnTagMismatch {
        index: usize,
        expected: PropertyTag,
        actual: PropertyTag,
    },

    #[error("invalid row flag 0x{flag:02X}")]
    InvalidRowFlag { flag: u8 },

    #[error("invalid value flag 0x{flag:02X}")]
    InvalidValueFlag { flag: u8 },

    #[error("invalid presence byte 0x{value:02X} for {context}")]
    InvalidPresenceByte { value: u8, context: &'static str },

    #[error("invalid boolean value {value}")]
    InvalidBoolean { value: u16 },

    #[error("unterminated string in {context}")]
    UnterminatedString { context: &'static str },

    #[error("invalid UTF-16 in {context}")]
    InvalidUtf16 { context: &'static str },

    #[error("invalid string in {context}")]
    InvalidString { context: &'static str },

    #[error("invalid restriction type 0x{value:08X}")]
    InvalidRestrictionType { value: u32 },

    #[error("invalid relational operator {value}")]
    InvalidRelOp { value: u32 },

    #[error("restriction nesting exceeds {max} levels")]
    RestrictionTooDeep { max: usize },

    #[error("script data length {len} is not a multiple of 4")]
    MisalignedScript { len: usize },

    #[error("invalid entry ID type 0x{value:02X}")]
    InvalidEntryIdType { value: u8 },

    #[error("permanent entry ID carries an unexpected provider UID")]
    InvalidProviderUid,

    #[error("invalid display type 0x{value:08X}")]
    InvalidDisplayType { value: u32 },

    #[error("template string offset {offset} outside buffer of {len} bytes")]
    StringOffsetOutOfBounds { offset: usize, len: usize },
}

/// Errors raised while encoding.
///
/// Encoding is total for values that respect the protocol ceilings and the
/// tag/value agreement; everything here is one of those two failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("{field} count {count} exceeds limit {max}")]
    CountLimitExceeded {
        field: &'static str,
        count: usize,
        max: usize,
    },

    #[error("unsupported property type 0x{type_code:04X}")]
    UnsupportedPropertyType { type_code: u16 },

    #[error("row length mismatch: expected {expected} values, found {actual}")]
    RowLengthMismatch { expected: usize, actual: usize },

    #[error("tag {tag} does not match value of type {actual:?}")]
    TypeMismatch { tag: PropertyTag, actual: PropertyType },

    #[error("string in {context} contains an interior NUL")]
    InteriorNul { context: &'static str },

    #[error("invalid string in {context}")]
    InvalidString { context: &'static str },
}

/// Errors raised by semantic validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("row length mismatch: expected {expected} values, found {actual}")]
    RowLengthMismatch { expected: usize, actual: usize },

    #[error("column {index}: tag {tag} does not accept a value of type {actual:?}")]
    ColumnTypeMismatch {
        index: usize,
        tag: PropertyTag,
        actual: PropertyType,
    },

    #[error("tag {tag} does not match value of type {actual:?}")]
    TypeMismatch { tag: PropertyTag, actual: PropertyType },

    #[error("value for {tag} is invalid: {reason}")]
    InvalidValue { tag: PropertyTag, reason: &'static str },

    #[error("restriction tag {restriction} differs from embedded value tag {value}")]
    RestrictionTagMismatch {
        restriction: PropertyTag,
        value: PropertyTag,
    },

    #[error("restriction nesting exceeds {max} levels")]
    RestrictionTooDeep { max: usize },

    #[error("{kind} restriction has no children")]
    EmptyRestriction { kind: &'static str },

    #[error("script does not end with a Halt instruction")]
    ScriptNotHalted,
}
