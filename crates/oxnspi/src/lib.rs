//! oxnspi: wire-format codec for the Exchange address book protocol (NSPI).
//!
//! This crate encodes, decodes and validates the binary structures NSPI
//! exchanges: property values, rows and row sets, restriction trees, the
//! STAT table cursor, address-book rule scripts, display templates and
//! entry IDs. Transport, authentication and rule evaluation live elsewhere;
//! the codec only turns buffers into values and back.
//!
//! # Quick Start
//!
//! ```rust
//! use oxnspi::codec::{decode_address_book_row_set, encode_address_book_row_set, Reader, Writer};
//! use oxnspi::{tags, AddressBookRow, AddressBookRowSet, ColumnValue, TaggedValue};
//!
//! let row_set = AddressBookRowSet {
//!     columns: vec![tags::DISPLAY_NAME, tags::DISPLAY_TYPE],
//!     rows: vec![AddressBookRow::new(vec![
//!         TaggedValue::String8(b"Alice".to_vec()).into(),
//!         ColumnValue::Absent,
//!     ])],
//! };
//!
//! let mut writer = Writer::new();
//! encode_address_book_row_set(&mut writer, &row_set).unwrap();
//!
//! let mut reader = Reader::new(writer.as_bytes());
//! let decoded = decode_address_book_row_set(&mut reader).unwrap();
//! assert_eq!(decoded, row_set);
//! ```
//!
//! # Modules
//!
//! - [`model`]: Data types (tags, values, rows, restrictions, scripts, STAT)
//! - [`codec`]: Binary encoding/decoding
//! - [`validate`]: Semantic validation
//! - [`tags`]: Well-known address-book property tags
//! - [`codepage`]: Decoding of code-page dependent 8-bit strings
//! - [`error`]: Error types
//! - [`limits`]: Protocol ceilings
//!
//! # Security
//!
//! Decoders are safe on untrusted input:
//! - Every count is checked against the protocol ceilings before allocating
//! - Restriction nesting is bounded by [`DecodeOptions`]
//! - Malformed input is rejected with a descriptive [`DecodeError`]
//!
//! # Wire Format
//!
//! Integers are little-endian. Values are written inline; variable-length
//! values that may be empty carry a 0xFF/0x00 presence byte.

pub mod codec;
pub mod codepage;
pub mod error;
pub mod limits;
pub mod model;
pub mod options;
pub mod tags;
pub mod validate;

// Re-export commonly used types at crate root
pub use codec::{
    decode_address_book_row_set, decode_entry_id, decode_property_row_set, decode_restriction,
    decode_script, decode_stat, decode_template_rows, encode_address_book_row_set, encode_entry_id,
    encode_property_row_set, encode_restriction, encode_script, encode_stat, encode_template_rows,
    Reader, Writer,
};
pub use error::{DecodeError, EncodeError, ValidationError};
pub use model::{
    AddressBookRow, AddressBookRowSet, ColumnValue, Control, DisplayType, EntryId, EphemeralEntryId,
    FileTime, FlatUid, Opcode, Operation, PermanentEntryId, PropertyRow, PropertyRowSet, PropertyTag,
    PropertyType, PropertyValue, RelOp, Restriction, RestrictionType, RowFlag, Stat, TaggedValue,
    TemplateRow, TemplateRowSet, ValueFlag,
};
pub use options::DecodeOptions;
pub use validate::{validate_address_book_row, validate_property_value, validate_restriction, validate_script};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
