//! Row and row-set encoding/decoding.
//!
//! Covers the standard self-tagged rows (`PropertyRow_r`, `PropertyRowSet_r`),
//! the property tag array, and the column-form address-book rows whose tags
//! come from a separately transmitted column list.

use tracing::debug;

use crate::codec::primitives::{Reader, Writer};
use crate::codec::value::{
    decode_property_value, decode_value, decode_value_for_code, encode_property_value, encode_value,
};
use crate::error::{DecodeError, EncodeError};
use crate::limits::MAX_VALUES;
use crate::model::{
    AddressBookRow, AddressBookRowSet, ColumnValue, PropertyRow, PropertyRowSet, PropertyTag,
    PropertyType, RowFlag, TaggedValue, ValueFlag,
};

// =============================================================================
// DECODING
// =============================================================================

/// Decodes a `PropertyTagArray_r`: u32 count, then that many tags.
pub fn decode_property_tag_array(reader: &mut Reader<'_>) -> Result<Vec<PropertyTag>, DecodeError> {
    let count = reader.read_count(MAX_VALUES, "tag array count")?;
    let mut tags = Vec::with_capacity(reader.capacity_for(count));
    for _ in 0..count {
        tags.push(PropertyTag::from_raw(reader.read_u32("tag array")?));
    }
    Ok(tags)
}

/// Decodes a `PropertyRow_r`: reserved u32, value count, values.
pub fn decode_property_row(reader: &mut Reader<'_>) -> Result<PropertyRow, DecodeError> {
    reader.read_u32("property_row.reserved")?;
    let count = reader.read_count(MAX_VALUES, "property_row value count")?;
    let mut values = Vec::with_capacity(reader.capacity_for(count));
    for _ in 0..count {
        values.push(decode_property_value(reader)?);
    }
    Ok(PropertyRow { values })
}

/// Decodes a standard row and checks it against the requested columns.
///
/// Each value must carry its column's property identifier. Its type must be
/// the column type, unless the column is `Unspecified` or the server
/// substituted an `ErrorCode` for a value it could not return.
pub fn decode_property_row_for_columns(
    reader: &mut Reader<'_>,
    columns: &[PropertyTag],
) -> Result<PropertyRow, DecodeError> {
    let row = decode_property_row(reader)?;
    if row.len() != columns.len() {
        return Err(DecodeError::RowLengthMismatch {
            expected: columns.len(),
            actual: row.len(),
        });
    }
    for (index, (column, pv)) in columns.iter().zip(&row.values).enumerate() {
        let type_ok = column.type_code() == PropertyType::Unspecified.code()
            || pv.tag.type_code() == column.type_code()
            || pv.tag.type_code() == PropertyType::ErrorCode.code();
        if pv.tag.id() != column.id() || !type_ok {
            return Err(DecodeError::ColumnTagMismatch {
                index,
                expected: *column,
                actual: pv.tag,
            });
        }
    }
    Ok(row)
}

/// Decodes a `PropertyRowSet_r`: u32 row count, then self-delimiting rows.
pub fn decode_property_row_set(reader: &mut Reader<'_>) -> Result<PropertyRowSet, DecodeError> {
    let count = reader.read_count(MAX_VALUES, "row count")?;
    let mut rows = Vec::with_capacity(reader.capacity_for(count));
    for _ in 0..count {
        rows.push(decode_property_row(reader)?);
    }
    debug!(rows = rows.len(), "decoded property row set");
    Ok(PropertyRowSet { rows })
}

fn is_unspecified(column: PropertyTag) -> bool {
    column.type_code() == PropertyType::Unspecified.code()
}

/// Decodes the value of `column`; Unspecified columns read their type first.
fn decode_column_value(reader: &mut Reader<'_>, column: PropertyTag) -> Result<TaggedValue, DecodeError> {
    let type_code = if is_unspecified(column) {
        reader.read_u16("column value type")?
    } else {
        column.type_code()
    };
    decode_value_for_code(reader, type_code)
}

/// Decodes one column-form row.
///
/// The row flag selects whether values carry a per-value flag. For an
/// `Unspecified` column the u16 type code precedes the value flag.
pub fn decode_address_book_row(
    reader: &mut Reader<'_>,
    columns: &[PropertyTag],
) -> Result<AddressBookRow, DecodeError> {
    let flag = reader.read_byte("row flag")?;
    let row_flag = RowFlag::from_u8(flag).ok_or(DecodeError::InvalidRowFlag { flag })?;

    let mut values = Vec::with_capacity(columns.len());
    for column in columns {
        let cell = match row_flag {
            RowFlag::Standard => ColumnValue::Present(decode_column_value(reader, *column)?),
            RowFlag::Flagged => {
                let type_code = if is_unspecified(*column) {
                    reader.read_u16("column value type")?
                } else {
                    column.type_code()
                };
                let flag = reader.read_byte("value flag")?;
                match ValueFlag::from_u8(flag).ok_or(DecodeError::InvalidValueFlag { flag })? {
                    ValueFlag::Present => ColumnValue::Present(decode_value_for_code(reader, type_code)?),
                    ValueFlag::Absent => ColumnValue::Absent,
                    ValueFlag::Error => ColumnValue::Error(reader.read_u32("value error code")?),
                }
            }
        };
        values.push(cell);
    }
    Ok(AddressBookRow { values })
}

/// Decodes a column-form row set: column tag array, u32 row count, rows.
pub fn decode_address_book_row_set(reader: &mut Reader<'_>) -> Result<AddressBookRowSet, DecodeError> {
    let columns = decode_property_tag_array(reader)?;
    let count = reader.read_count(MAX_VALUES, "row count")?;
    let mut rows = Vec::with_capacity(reader.capacity_for(count));
    for _ in 0..count {
        rows.push(decode_address_book_row(reader, &columns)?);
    }
    debug!(
        columns = columns.len(),
        rows = rows.len(),
        "decoded address book row set"
    );
    Ok(AddressBookRowSet { columns, rows })
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes a `PropertyTagArray_r`.
pub fn encode_property_tag_array(writer: &mut Writer, tags: &[PropertyTag]) -> Result<(), EncodeError> {
    writer.write_count(tags.len(), MAX_VALUES, "tag array count")?;
    for tag in tags {
        writer.write_u32(tag.raw());
    }
    Ok(())
}

/// Encodes a `PropertyRow_r`.
pub fn encode_property_row(writer: &mut Writer, row: &PropertyRow) -> Result<(), EncodeError> {
    writer.write_u32(0);
    writer.write_count(row.values.len(), MAX_VALUES, "property_row value count")?;
    for pv in &row.values {
        encode_property_value(writer, pv)?;
    }
    Ok(())
}

/// Encodes a `PropertyRowSet_r`.
pub fn encode_property_row_set(writer: &mut Writer, row_set: &PropertyRowSet) -> Result<(), EncodeError> {
    writer.write_count(row_set.rows.len(), MAX_VALUES, "row count")?;
    for row in &row_set.rows {
        encode_property_row(writer, row)?;
    }
    Ok(())
}

/// Checks a present value against its column type.
fn check_column(column: PropertyTag, value: &TaggedValue) -> Result<(), EncodeError> {
    if is_unspecified(column) || column.type_code() == value.property_type().code() {
        Ok(())
    } else {
        Err(EncodeError::TypeMismatch {
            tag: column,
            actual: value.property_type(),
        })
    }
}

/// Encodes one column-form row.
///
/// Uses the standard flag when every value is present and the flagged form
/// otherwise. For `Unspecified` columns an absent value is typed as Null and
/// an error as ErrorCode.
pub fn encode_address_book_row(
    writer: &mut Writer,
    row: &AddressBookRow,
    columns: &[PropertyTag],
) -> Result<(), EncodeError> {
    if row.len() != columns.len() {
        return Err(EncodeError::RowLengthMismatch {
            expected: columns.len(),
            actual: row.len(),
        });
    }

    let row_flag = row.flag();
    writer.write_byte(row_flag as u8);

    for (column, cell) in columns.iter().zip(&row.values) {
        if let Some(value) = cell.as_value() {
            check_column(*column, value)?;
        }
        if is_unspecified(*column) {
            let type_code = match cell {
                ColumnValue::Present(value) => value.property_type().code(),
                ColumnValue::Absent => PropertyType::Null.code(),
                ColumnValue::Error(_) => PropertyType::ErrorCode.code(),
            };
            writer.write_u16(type_code);
        }
        if row_flag == RowFlag::Flagged {
            writer.write_byte(cell.flag() as u8);
        }
        match cell {
            ColumnValue::Present(value) => encode_value(writer, value)?,
            ColumnValue::Absent => {}
            ColumnValue::Error(code) => writer.write_u32(*code),
        }
    }
    Ok(())
}

/// Encodes a column-form row set.
pub fn encode_address_book_row_set(
    writer: &mut Writer,
    row_set: &AddressBookRowSet,
) -> Result<(), EncodeError> {
    encode_property_tag_array(writer, &row_set.columns)?;
    writer.write_count(row_set.rows.len(), MAX_VALUES, "row count")?;
    for row in &row_set.rows {
        encode_address_book_row(writer, row, &row_set.columns)?;
    }
    Ok(())
}

/// Decodes a single value for a column of known type. Exposed for callers
/// that walk rows themselves.
pub fn decode_value_for_column(
    reader: &mut Reader<'_>,
    column: PropertyTag,
) -> Result<TaggedValue, DecodeError> {
    match column.property_type() {
        Some(PropertyType::Unspecified) => decode_column_value(reader, column),
        Some(ty) => decode_value(reader, ty),
        None => Err(DecodeError::UnsupportedPropertyType {
            type_code: column.type_code(),
        }),
    }
}
