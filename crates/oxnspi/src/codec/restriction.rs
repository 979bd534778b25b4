//! Restriction tree encoding/decoding (`Restriction_r`).
//!
//! Each node starts with its u32 restriction type. And/Or carry a child count
//! and children, Not a single child, and the leaf kinds their tag and value.

use crate::codec::primitives::{Reader, Writer};
use crate::codec::value::{decode_property_value, encode_property_value};
use crate::error::{DecodeError, EncodeError};
use crate::limits::MAX_RESTRICTION_CHILDREN;
use crate::model::{PropertyTag, RelOp, Restriction, RestrictionType};
use crate::options::DecodeOptions;

// =============================================================================
// DECODING
// =============================================================================

/// Decodes a restriction tree, bounding its depth by
/// `options.max_restriction_depth`.
pub fn decode_restriction(
    reader: &mut Reader<'_>,
    options: &DecodeOptions,
) -> Result<Restriction, DecodeError> {
    decode_node(reader, options.max_restriction_depth, 1)
}

fn decode_node(reader: &mut Reader<'_>, max_depth: usize, depth: usize) -> Result<Restriction, DecodeError> {
    if depth > max_depth {
        return Err(DecodeError::RestrictionTooDeep { max: max_depth });
    }

    let raw = reader.read_u32("restriction type")?;
    let rt = RestrictionType::from_u32(raw).ok_or(DecodeError::InvalidRestrictionType { value: raw })?;

    match rt {
        RestrictionType::And | RestrictionType::Or => {
            let count = reader.read_count(MAX_RESTRICTION_CHILDREN, "restriction child count")?;
            let mut children = Vec::with_capacity(count.min(64));
            for _ in 0..count {
                children.push(decode_node(reader, max_depth, depth + 1)?);
            }
            if rt == RestrictionType::And {
                Ok(Restriction::And(children))
            } else {
                Ok(Restriction::Or(children))
            }
        }
        RestrictionType::Not => {
            let inner = decode_node(reader, max_depth, depth + 1)?;
            Ok(Restriction::Not(Box::new(inner)))
        }
        RestrictionType::Content => {
            let fuzzy_level = reader.read_u32("content.fuzzy_level")?;
            let tag = PropertyTag::from_raw(reader.read_u32("content.tag")?);
            let value = decode_property_value(reader)?;
            Ok(Restriction::Content { fuzzy_level, tag, value })
        }
        RestrictionType::Property => {
            let raw_relop = reader.read_u32("property.relop")?;
            let relop = RelOp::from_u32(raw_relop).ok_or(DecodeError::InvalidRelOp { value: raw_relop })?;
            let tag = PropertyTag::from_raw(reader.read_u32("property.tag")?);
            let value = decode_property_value(reader)?;
            Ok(Restriction::Property { relop, tag, value })
        }
        RestrictionType::Exist => {
            reader.read_u32("exist.reserved1")?;
            let tag = PropertyTag::from_raw(reader.read_u32("exist.tag")?);
            reader.read_u32("exist.reserved2")?;
            Ok(Restriction::Exist { tag })
        }
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes a restriction tree.
pub fn encode_restriction(writer: &mut Writer, restriction: &Restriction) -> Result<(), EncodeError> {
    writer.write_u32(restriction.restriction_type() as u32);
    match restriction {
        Restriction::And(children) | Restriction::Or(children) => {
            writer.write_count(children.len(), MAX_RESTRICTION_CHILDREN, "restriction child count")?;
            for child in children {
                encode_restriction(writer, child)?;
            }
        }
        Restriction::Not(inner) => encode_restriction(writer, inner)?,
        Restriction::Content { fuzzy_level, tag, value } => {
            writer.write_u32(*fuzzy_level);
            writer.write_u32(tag.raw());
            encode_property_value(writer, value)?;
        }
        Restriction::Property { relop, tag, value } => {
            writer.write_u32(*relop as u32);
            writer.write_u32(tag.raw());
            encode_property_value(writer, value)?;
        }
        Restriction::Exist { tag } => {
            writer.write_u32(0);
            writer.write_u32(tag.raw());
            writer.write_u32(0);
        }
    }
    Ok(())
}
