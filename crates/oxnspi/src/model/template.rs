//! Address-book display templates (`TRowSet` / `TROW` / `CNTRL`).
//!
//! A template lays out the controls of an address-book property dialog. On
//! the wire each control names its label through an offset into the template
//! buffer; the model holds the resolved label bytes instead, and the encoder
//! rebuilds the offsets.

use crate::codepage::decode_ansi;
use crate::model::PropertyTag;
use crate::tags;

/// Control types (`DTCT_*`).
pub mod control_type {
    pub const LABEL: u32 = 0x0000_0000;
    pub const EDIT: u32 = 0x0000_0001;
    pub const LIST_BOX: u32 = 0x0000_0002;
    pub const COMBO_BOX: u32 = 0x0000_0003;
    pub const DROP_DOWN_LIST_BOX: u32 = 0x0000_0004;
    pub const CHECK_BOX: u32 = 0x0000_0005;
    pub const GROUP_BOX: u32 = 0x0000_0006;
    pub const BUTTON: u32 = 0x0000_0007;
    pub const PAGE: u32 = 0x0000_0008;
    pub const MULTI_VALUE_LIST_BOX: u32 = 0x0000_000B;
    pub const MULTI_VALUE_DROP_DOWN_LIST_BOX: u32 = 0x0000_000C;
}

/// Template info request flags (`TI_*`).
pub mod template_info_flags {
    use super::{tags, PropertyTag};

    pub const TEMPLATE: u32 = 0x0000_0001;
    pub const SCRIPT: u32 = 0x0000_0004;
    pub const EMT: u32 = 0x0000_0010;
    pub const HELPFILE_NAME: u32 = 0x0000_0020;
    pub const HELPFILE_CONTENTS: u32 = 0x0000_0040;

    /// The blob properties a template info reply carries for `flags`.
    pub fn data_tags(flags: u32) -> Vec<PropertyTag> {
        let mut out = Vec::with_capacity(2);
        if flags & TEMPLATE != 0 {
            out.push(tags::TEMPLATE_DATA);
        }
        if flags & SCRIPT != 0 {
            out.push(tags::SCRIPT_DATA);
        }
        out
    }
}

/// A template control: its property, its size limit and its label.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Control {
    pub control_type: u32,
    pub size: u32,
    /// Label bytes in the template's code page, without terminator.
    pub string: Vec<u8>,
}

impl Control {
    /// The label decoded through `code_page`.
    pub fn decode_string(&self, code_page: u32) -> String {
        decode_ansi(&self.string, code_page)
    }
}

/// One positioned control of a template.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TemplateRow {
    pub x_pos: u32,
    pub delta_x: u32,
    pub y_pos: u32,
    pub delta_y: u32,
    pub control_type: u32,
    pub control_flags: u32,
    pub control: Control,
}

/// A decoded display template.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TemplateRowSet {
    pub template_type: u32,
    pub rows: Vec<TemplateRow>,
}

impl TemplateRowSet {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
