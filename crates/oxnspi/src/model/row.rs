//! Property rows and row sets.
//!
//! Two row shapes exist on the wire:
//! - the standard NSPI form, where every value carries its own tag
//!   ([`PropertyRow`], [`PropertyRowSet`]);
//! - the column form, where tags come from a separate column list and each
//!   value may be absent or an error ([`AddressBookRow`], [`AddressBookRowSet`]).

use crate::model::{PropertyTag, PropertyType, PropertyValue, TaggedValue};

/// A row of self-tagged values (`PropertyRow_r`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PropertyRow {
    pub values: Vec<PropertyValue>,
}

impl PropertyRow {
    pub fn new(values: Vec<PropertyValue>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Looks up a value by its exact tag.
    pub fn get(&self, tag: PropertyTag) -> Option<&TaggedValue> {
        self.values.iter().find(|pv| pv.tag == tag).map(|pv| &pv.value)
    }

    /// The tags of this row, in order.
    pub fn tags(&self) -> Vec<PropertyTag> {
        self.values.iter().map(|pv| pv.tag).collect()
    }
}

/// An ordered set of independently sized rows (`PropertyRowSet_r`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PropertyRowSet {
    pub rows: Vec<PropertyRow>,
}

/// Row flag of a column-form row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RowFlag {
    /// Every value is present; values carry no per-value flag.
    Standard = 0x00,
    /// Every value is preceded by a [`ValueFlag`].
    Flagged = 0x01,
}

impl RowFlag {
    pub fn from_u8(v: u8) -> Option<RowFlag> {
        match v {
            0x00 => Some(RowFlag::Standard),
            0x01 => Some(RowFlag::Flagged),
            _ => None,
        }
    }
}

/// Per-value flag inside a flagged column-form row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ValueFlag {
    Present = 0x00,
    Absent = 0x01,
    Error = 0x0A,
}

impl ValueFlag {
    pub fn from_u8(v: u8) -> Option<ValueFlag> {
        match v {
            0x00 => Some(ValueFlag::Present),
            0x01 => Some(ValueFlag::Absent),
            0x0A => Some(ValueFlag::Error),
            _ => None,
        }
    }
}

/// One cell of a column-form row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnValue {
    Present(TaggedValue),
    /// The object has no value for this column.
    Absent,
    /// The server could not produce the value; carries the error code.
    Error(u32),
}

impl ColumnValue {
    pub fn flag(&self) -> ValueFlag {
        match self {
            ColumnValue::Present(_) => ValueFlag::Present,
            ColumnValue::Absent => ValueFlag::Absent,
            ColumnValue::Error(_) => ValueFlag::Error,
        }
    }

    pub fn as_value(&self) -> Option<&TaggedValue> {
        match self {
            ColumnValue::Present(v) => Some(v),
            _ => None,
        }
    }
}

impl From<TaggedValue> for ColumnValue {
    fn from(value: TaggedValue) -> Self {
        ColumnValue::Present(value)
    }
}

/// A row whose tags are supplied by a separate column list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AddressBookRow {
    pub values: Vec<ColumnValue>,
}

impl AddressBookRow {
    pub fn new(values: Vec<ColumnValue>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The row flag this row encodes with: flagged as soon as one value is
    /// absent or an error.
    pub fn flag(&self) -> RowFlag {
        if self.values.iter().all(|v| matches!(v, ColumnValue::Present(_))) {
            RowFlag::Standard
        } else {
            RowFlag::Flagged
        }
    }

    /// Pairs each value with its column tag.
    ///
    /// Errors become `ErrorCode` values under the column's identifier, as the
    /// standard row form carries them. Absent values are dropped.
    pub fn to_property_row(&self, columns: &[PropertyTag]) -> PropertyRow {
        let values = columns
            .iter()
            .zip(&self.values)
            .filter_map(|(tag, cell)| match cell {
                ColumnValue::Present(value) => Some(PropertyValue {
                    tag: tag.with_type(value.property_type()),
                    value: value.clone(),
                }),
                ColumnValue::Error(code) => Some(PropertyValue {
                    tag: tag.with_type(PropertyType::ErrorCode),
                    value: TaggedValue::ErrorCode(*code),
                }),
                ColumnValue::Absent => None,
            })
            .collect();
        PropertyRow { values }
    }
}

/// A column list plus the rows that follow it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AddressBookRowSet {
    pub columns: Vec<PropertyTag>,
    pub rows: Vec<AddressBookRow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_flag_selection() {
        let plain = AddressBookRow::new(vec![TaggedValue::Integer32(1).into()]);
        assert_eq!(plain.flag(), RowFlag::Standard);

        let flagged = AddressBookRow::new(vec![
            TaggedValue::Integer32(1).into(),
            ColumnValue::Error(0x8004_010F),
        ]);
        assert_eq!(flagged.flag(), RowFlag::Flagged);
        assert_eq!(RowFlag::from_u8(0x02), None);
    }

    #[test]
    fn test_to_property_row_skips_missing() {
        let columns = [
            PropertyTag::new(0x3001, PropertyType::Unspecified),
            PropertyTag::new(0x0FFE, PropertyType::Integer32),
        ];
        let row = AddressBookRow::new(vec![
            TaggedValue::String("Bob".to_string()).into(),
            ColumnValue::Absent,
        ]);
        let standard = row.to_property_row(&columns);
        assert_eq!(standard.len(), 1);
        assert_eq!(standard.values[0].tag.raw(), 0x3001_001F);
        assert_eq!(
            standard.get(PropertyTag::from_raw(0x3001_001F)),
            Some(&TaggedValue::String("Bob".to_string()))
        );

        let failed = AddressBookRow::new(vec![
            ColumnValue::Error(0x8004_010F),
            TaggedValue::Integer32(6).into(),
        ]);
        let standard = failed.to_property_row(&columns);
        assert_eq!(standard.len(), 2);
        assert_eq!(standard.values[0].tag.raw(), 0x3001_000A);
        assert_eq!(standard.values[0].value, TaggedValue::ErrorCode(0x8004_010F));
        assert_eq!(standard.values[1].tag.raw(), 0x0FFE_0003);
    }
}
