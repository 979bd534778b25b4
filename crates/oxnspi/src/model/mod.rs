//! Data model types for NSPI.
//!
//! This module contains the in-memory forms of everything the codec reads
//! and writes:
//! - Property tags and types
//! - Values (the tagged union) and rows
//! - Restriction trees, rule scripts and the STAT cursor
//! - Display templates and entry IDs

pub mod entry_id;
pub mod id;
pub mod restriction;
pub mod row;
pub mod script;
pub mod stat;
pub mod tag;
pub mod template;
pub mod value;

pub use entry_id::{DisplayType, EntryId, EphemeralEntryId, PermanentEntryId};
pub use id::{parse_flat_uid, FlatUid, NIL_FLAT_UID, PERMANENT_ENTRY_ID_GUID};
pub use restriction::{fuzzy_level, RelOp, Restriction, RestrictionType};
pub use row::{
    AddressBookRow, AddressBookRowSet, ColumnValue, PropertyRow, PropertyRowSet, RowFlag, ValueFlag,
};
pub use script::{Opcode, Operand, Operation};
pub use stat::Stat;
pub use tag::{PropertyTag, PropertyType};
pub use template::{control_type, template_info_flags, Control, TemplateRow, TemplateRowSet};
pub use value::{FileTime, PropertyValue, TaggedValue};
