//! Value encoding/decoding for the NSPI tagged value union.
//!
//! Implements the wire format for `PROP_VAL_UNION` and `PropertyValue_r`.
//! Pointer indirection of the native layout is collapsed: every value is
//! written inline, and variable-length values that may be absent carry a
//! one-byte presence marker.

use crate::codec::primitives::{Reader, Writer};
use crate::error::{DecodeError, EncodeError};
use crate::limits::{HAS_VALUE, MAX_BINARY_LEN, MAX_VALUES, NO_VALUE};
use crate::model::{FileTime, FlatUid, PropertyTag, PropertyType, PropertyValue, TaggedValue};

// =============================================================================
// DECODING
// =============================================================================

/// Decodes a value whose shape is selected by `property_type`.
pub fn decode_value(
    reader: &mut Reader<'_>,
    property_type: PropertyType,
) -> Result<TaggedValue, DecodeError> {
    let value = match property_type {
        PropertyType::Unspecified => {
            return Err(DecodeError::UnsupportedPropertyType {
                type_code: property_type.code(),
            });
        }
        PropertyType::Null => {
            reader.read_u32("null.reserved")?;
            TaggedValue::Null
        }
        PropertyType::EmbeddedTable => {
            reader.read_u32("embedded_table.reserved")?;
            TaggedValue::EmbeddedTable
        }
        PropertyType::Integer16 => TaggedValue::Integer16(reader.read_i16("integer16")?),
        PropertyType::Integer32 => TaggedValue::Integer32(reader.read_i32("integer32")?),
        PropertyType::Boolean => TaggedValue::Boolean(decode_bool(reader)?),
        PropertyType::ErrorCode => TaggedValue::ErrorCode(reader.read_u32("error_code")?),
        PropertyType::Time => TaggedValue::Time(decode_time(reader)?),
        PropertyType::Guid => TaggedValue::Guid(reader.read_flat_uid("guid")?),
        PropertyType::String8 => TaggedValue::String8(decode_string8(reader)?),
        PropertyType::String => TaggedValue::String(decode_string(reader)?),
        PropertyType::Binary => TaggedValue::Binary(decode_binary(reader)?),
        PropertyType::MultipleInteger16 => {
            let count = reader.read_count(MAX_VALUES, "multiple_integer16 count")?;
            let mut values = Vec::with_capacity(reader.capacity_for(count));
            for _ in 0..count {
                values.push(reader.read_i16("multiple_integer16")?);
            }
            TaggedValue::MultipleInteger16(values)
        }
        PropertyType::MultipleInteger32 => {
            let count = reader.read_count(MAX_VALUES, "multiple_integer32 count")?;
            let mut values = Vec::with_capacity(reader.capacity_for(count));
            for _ in 0..count {
                values.push(reader.read_i32("multiple_integer32")?);
            }
            TaggedValue::MultipleInteger32(values)
        }
        PropertyType::MultipleTime => {
            let count = reader.read_count(MAX_VALUES, "multiple_time count")?;
            let mut values = Vec::with_capacity(reader.capacity_for(count));
            for _ in 0..count {
                values.push(decode_time(reader)?);
            }
            TaggedValue::MultipleTime(values)
        }
        PropertyType::MultipleGuid => {
            let count = reader.read_count(MAX_VALUES, "multiple_guid count")?;
            let mut values: Vec<FlatUid> = Vec::with_capacity(reader.capacity_for(count));
            for _ in 0..count {
                values.push(reader.read_flat_uid("multiple_guid")?);
            }
            TaggedValue::MultipleGuid(values)
        }
        PropertyType::MultipleString8 => {
            TaggedValue::MultipleString8(decode_multiple(reader, "multiple_string8", decode_string8)?)
        }
        PropertyType::MultipleString => {
            TaggedValue::MultipleString(decode_multiple(reader, "multiple_string", decode_string)?)
        }
        PropertyType::MultipleBinary => {
            TaggedValue::MultipleBinary(decode_multiple(reader, "multiple_binary", decode_binary)?)
        }
    };
    Ok(value)
}

/// Decodes a value selected by a raw type code, rejecting unknown codes.
pub fn decode_value_for_code(reader: &mut Reader<'_>, type_code: u16) -> Result<TaggedValue, DecodeError> {
    let property_type =
        PropertyType::from_u16(type_code).ok_or(DecodeError::UnsupportedPropertyType { type_code })?;
    decode_value(reader, property_type)
}

fn decode_bool(reader: &mut Reader<'_>) -> Result<bool, DecodeError> {
    let value = reader.read_u16("boolean")?;
    match value {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(DecodeError::InvalidBoolean { value }),
    }
}

fn decode_time(reader: &mut Reader<'_>) -> Result<FileTime, DecodeError> {
    let low = reader.read_u32("time.low")?;
    let high = reader.read_u32("time.high")?;
    Ok(FileTime { low, high })
}

/// Reads a presence byte; `true` means a value follows.
fn decode_presence(reader: &mut Reader<'_>, context: &'static str) -> Result<bool, DecodeError> {
    match reader.read_byte(context)? {
        HAS_VALUE => Ok(true),
        NO_VALUE => Ok(false),
        value => Err(DecodeError::InvalidPresenceByte { value, context }),
    }
}

fn decode_string8(reader: &mut Reader<'_>) -> Result<Vec<u8>, DecodeError> {
    if !decode_presence(reader, "string8")? {
        return Ok(Vec::new());
    }
    Ok(reader.read_ansi_cstring("string8")?.to_vec())
}

fn decode_string(reader: &mut Reader<'_>) -> Result<String, DecodeError> {
    if !decode_presence(reader, "string")? {
        return Ok(String::new());
    }
    reader.read_utf16_cstring("string")
}

fn decode_binary(reader: &mut Reader<'_>) -> Result<Vec<u8>, DecodeError> {
    if !decode_presence(reader, "binary")? {
        return Ok(Vec::new());
    }
    let len = reader.read_count(MAX_BINARY_LEN, "binary length")?;
    Ok(reader.read_bytes(len, "binary")?.to_vec())
}

fn decode_multiple<T>(
    reader: &mut Reader<'_>,
    field: &'static str,
    decode_element: fn(&mut Reader<'_>) -> Result<T, DecodeError>,
) -> Result<Vec<T>, DecodeError> {
    if !decode_presence(reader, field)? {
        return Ok(Vec::new());
    }
    let count = reader.read_count(MAX_VALUES, field)?;
    let mut values = Vec::with_capacity(reader.capacity_for(count));
    for _ in 0..count {
        values.push(decode_element(reader)?);
    }
    Ok(values)
}

/// Decodes a `PropertyValue_r`: tag, reserved u32, then the value typed by
/// the tag.
pub fn decode_property_value(reader: &mut Reader<'_>) -> Result<PropertyValue, DecodeError> {
    let tag = PropertyTag::from_raw(reader.read_u32("property_value.tag")?);
    reader.read_u32("property_value.reserved")?;
    let value = decode_value_for_code(reader, tag.type_code())?;
    Ok(PropertyValue { tag, value })
}

/// Decodes a self-describing value: u16 type code, then the value.
pub fn decode_typed_value(reader: &mut Reader<'_>) -> Result<TaggedValue, DecodeError> {
    let type_code = reader.read_u16("typed_value.type")?;
    decode_value_for_code(reader, type_code)
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes a value in the shape its variant selects.
pub fn encode_value(writer: &mut Writer, value: &TaggedValue) -> Result<(), EncodeError> {
    match value {
        TaggedValue::Null | TaggedValue::EmbeddedTable => writer.write_u32(0),
        TaggedValue::Integer16(v) => writer.write_i16(*v),
        TaggedValue::Integer32(v) => writer.write_i32(*v),
        TaggedValue::Boolean(v) => writer.write_u16(u16::from(*v)),
        TaggedValue::ErrorCode(v) => writer.write_u32(*v),
        TaggedValue::Time(t) => encode_time(writer, *t),
        TaggedValue::Guid(uid) => writer.write_flat_uid(uid),
        TaggedValue::String8(s) => encode_string8(writer, s)?,
        TaggedValue::String(s) => encode_string(writer, s)?,
        TaggedValue::Binary(b) => encode_binary(writer, b)?,
        TaggedValue::MultipleInteger16(values) => {
            writer.write_count(values.len(), MAX_VALUES, "multiple_integer16 count")?;
            for v in values {
                writer.write_i16(*v);
            }
        }
        TaggedValue::MultipleInteger32(values) => {
            writer.write_count(values.len(), MAX_VALUES, "multiple_integer32 count")?;
            for v in values {
                writer.write_i32(*v);
            }
        }
        TaggedValue::MultipleTime(values) => {
            writer.write_count(values.len(), MAX_VALUES, "multiple_time count")?;
            for t in values {
                encode_time(writer, *t);
            }
        }
        TaggedValue::MultipleGuid(values) => {
            writer.write_count(values.len(), MAX_VALUES, "multiple_guid count")?;
            for uid in values {
                writer.write_flat_uid(uid);
            }
        }
        TaggedValue::MultipleString8(values) => {
            encode_multiple(writer, values, "multiple_string8", |w, s| encode_string8(w, s))?
        }
        TaggedValue::MultipleString(values) => {
            encode_multiple(writer, values, "multiple_string", |w, s| encode_string(w, s))?
        }
        TaggedValue::MultipleBinary(values) => {
            encode_multiple(writer, values, "multiple_binary", |w, b| encode_binary(w, b))?
        }
    }
    Ok(())
}

fn encode_time(writer: &mut Writer, time: FileTime) {
    writer.write_u32(time.low);
    writer.write_u32(time.high);
}

fn encode_string8(writer: &mut Writer, s: &[u8]) -> Result<(), EncodeError> {
    if s.is_empty() {
        writer.write_byte(NO_VALUE);
        return Ok(());
    }
    writer.write_byte(HAS_VALUE);
    writer.write_ansi_cstring(s, "string8")
}

fn encode_string(writer: &mut Writer, s: &str) -> Result<(), EncodeError> {
    if s.is_empty() {
        writer.write_byte(NO_VALUE);
        return Ok(());
    }
    writer.write_byte(HAS_VALUE);
    writer.write_utf16_cstring(s, "string")
}

fn encode_binary(writer: &mut Writer, b: &[u8]) -> Result<(), EncodeError> {
    if b.is_empty() {
        writer.write_byte(NO_VALUE);
        return Ok(());
    }
    writer.write_byte(HAS_VALUE);
    writer.write_count(b.len(), MAX_BINARY_LEN, "binary length")?;
    writer.write_bytes(b);
    Ok(())
}

fn encode_multiple<T>(
    writer: &mut Writer,
    values: &[T],
    field: &'static str,
    encode_element: impl Fn(&mut Writer, &T) -> Result<(), EncodeError>,
) -> Result<(), EncodeError> {
    if values.is_empty() {
        writer.write_byte(NO_VALUE);
        return Ok(());
    }
    writer.write_byte(HAS_VALUE);
    writer.write_count(values.len(), MAX_VALUES, field)?;
    for v in values {
        encode_element(writer, v)?;
    }
    Ok(())
}

/// Checks that `tag` describes `value` exactly.
pub(crate) fn check_tag(tag: PropertyTag, value: &TaggedValue) -> Result<(), EncodeError> {
    match tag.property_type() {
        None | Some(PropertyType::Unspecified) => Err(EncodeError::UnsupportedPropertyType {
            type_code: tag.type_code(),
        }),
        Some(ty) if ty != value.property_type() => Err(EncodeError::TypeMismatch {
            tag,
            actual: value.property_type(),
        }),
        Some(_) => Ok(()),
    }
}

/// Encodes a `PropertyValue_r`: tag, reserved zero, value.
///
/// The tag's type must agree with the value's variant.
pub fn encode_property_value(writer: &mut Writer, pv: &PropertyValue) -> Result<(), EncodeError> {
    check_tag(pv.tag, &pv.value)?;
    writer.write_u32(pv.tag.raw());
    writer.write_u32(0);
    encode_value(writer, &pv.value)
}

/// Encodes a self-describing value: u16 type code, then the value.
pub fn encode_typed_value(writer: &mut Writer, value: &TaggedValue) -> Result<(), EncodeError> {
    writer.write_u16(value.property_type().code());
    encode_value(writer, value)
}
