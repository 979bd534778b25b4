//! Well-known address-book property tags.
//!
//! Tags carry the type the address book reports them with. Use
//! [`PropertyTag::with_type`] to request another string flavour.

use crate::model::PropertyTag;

// =============================================================================
// OBJECT IDENTITY
// =============================================================================

pub const ENTRY_ID: PropertyTag = PropertyTag::from_raw(0x0FFF_0102);
pub const INSTANCE_KEY: PropertyTag = PropertyTag::from_raw(0x0FF6_0102);
pub const OBJECT_TYPE: PropertyTag = PropertyTag::from_raw(0x0FFE_0003);
pub const DISPLAY_TYPE: PropertyTag = PropertyTag::from_raw(0x3900_0003);
pub const TEMPLATE_ID: PropertyTag = PropertyTag::from_raw(0x3902_0102);

// =============================================================================
// NAMES AND ADDRESSES
// =============================================================================

pub const DISPLAY_NAME: PropertyTag = PropertyTag::from_raw(0x3001_001E);
pub const TRANSMITTABLE_DISPLAY_NAME: PropertyTag = PropertyTag::from_raw(0x3A20_001F);
pub const ADDRESS_BOOK_PHONETIC_DISPLAY_NAME: PropertyTag = PropertyTag::from_raw(0x8C92_001F);
pub const ADDRESS_TYPE: PropertyTag = PropertyTag::from_raw(0x3002_001E);
pub const EMAIL_ADDRESS: PropertyTag = PropertyTag::from_raw(0x3003_001F);

// =============================================================================
// CONTAINERS AND HIERARCHY
// =============================================================================

pub const ADDRESS_BOOK_CONTAINER_ID: PropertyTag = PropertyTag::from_raw(0xFFFD_0003);
pub const ADDRESS_BOOK_PARENT_ENTRY_ID: PropertyTag = PropertyTag::from_raw(0xFFFC_0102);
/// Members of a distribution list (multi-valued 8-bit strings).
pub const ADDRESS_BOOK_MEMBER: PropertyTag = PropertyTag::from_raw(0x8009_101E);
pub const CONTAINER_FLAGS: PropertyTag = PropertyTag::from_raw(0x3600_0003);
pub const DEPTH: PropertyTag = PropertyTag::from_raw(0x3005_0003);

// =============================================================================
// TEMPLATES AND SCRIPTS
// =============================================================================

/// Display template blob; see [`crate::codec::template`].
pub const TEMPLATE_DATA: PropertyTag = PropertyTag::from_raw(0x0001_0102);
/// Address-book rule script blob; see [`crate::codec::script`].
pub const SCRIPT_DATA: PropertyTag = PropertyTag::from_raw(0x0004_0102);
