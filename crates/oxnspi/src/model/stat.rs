//! The STAT table cursor threaded through paged NSPI table operations.

/// Sort orders for the `sort_type` field.
pub mod sort_type {
    pub const DISPLAY_NAME: u32 = 0x0000_0000;
    pub const PHONETIC_DISPLAY_NAME: u32 = 0x0000_0003;
    pub const DISPLAY_NAME_RO: u32 = 0x0000_03E8;
    pub const DISPLAY_NAME_W: u32 = 0x0000_03E9;
}

/// Minimal Entry IDs with positional meaning.
pub mod mid {
    pub const BEGINNING_OF_TABLE: u32 = 0x0000_0000;
    pub const CURRENT: u32 = 0x0000_0001;
    pub const END_OF_TABLE: u32 = 0x0000_0002;
}

/// Code pages the protocol names explicitly.
pub mod code_page {
    pub const TELETEX: u32 = 0x0000_4F25;
    pub const WIN_UNICODE: u32 = 0x0000_04B0;
}

/// Locale used when the client has no preference (en-US).
pub const NSPI_DEFAULT_LOCALE: u32 = 0x0000_0409;

/// Table position and state, nine 32-bit fields in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Stat {
    pub sort_type: u32,
    pub container_id: u32,
    pub current_rec: u32,
    pub delta: i32,
    pub num_pos: u32,
    pub total_recs: u32,
    pub code_page: u32,
    pub template_locale: u32,
    pub sort_locale: u32,
}

impl Stat {
    /// A STAT positioned at the beginning of the default container.
    pub fn new() -> Self {
        Self {
            sort_type: sort_type::DISPLAY_NAME,
            container_id: 0,
            current_rec: mid::BEGINNING_OF_TABLE,
            delta: 0,
            num_pos: 0,
            total_recs: 0,
            code_page: code_page::TELETEX,
            template_locale: NSPI_DEFAULT_LOCALE,
            sort_locale: NSPI_DEFAULT_LOCALE,
        }
    }

    /// Resets every field to the initial protocol defaults.
    pub fn initiate(&mut self) {
        *self = Self::new();
    }
}

impl Default for Stat {
    fn default() -> Self {
        Self::new()
    }
}
