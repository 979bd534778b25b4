//! Display template encoding/decoding (`TRowSet`).
//!
//! Layout: u32 template type, u32 row count, then per row six u32 layout
//! fields and a control of three u32s (type, size, string offset). The string
//! offset is absolute within the template buffer and points at a
//! NUL-terminated code-page string.

use tracing::warn;

use crate::codec::primitives::{Reader, Writer};
use crate::error::{DecodeError, EncodeError};
use crate::limits::MAX_VALUES;
use crate::model::{Control, TemplateRow, TemplateRowSet};
use crate::options::DecodeOptions;

/// Encoded size of the header (type and row count).
const HEADER_LEN: usize = 8;

/// Encoded size of one row including its control.
const ROW_LEN: usize = 36;

// =============================================================================
// DECODING
// =============================================================================

/// Decodes a display template.
///
/// Malformed input is an error, unless `options.lenient_templates` is set, in
/// which case the failure is logged and an empty set is returned.
pub fn decode_template_rows(data: &[u8], options: &DecodeOptions) -> Result<TemplateRowSet, DecodeError> {
    match decode_template_rows_strict(data) {
        Ok(set) => Ok(set),
        Err(error) if options.lenient_templates => {
            warn!(%error, len = data.len(), "malformed display template, returning empty set");
            Ok(TemplateRowSet::default())
        }
        Err(error) => Err(error),
    }
}

fn decode_template_rows_strict(data: &[u8]) -> Result<TemplateRowSet, DecodeError> {
    let mut reader = Reader::new(data);
    let template_type = reader.read_u32("template.type")?;
    let count = reader.read_count(MAX_VALUES, "template row count")?;

    let mut rows = Vec::with_capacity(count.min(data.len() / ROW_LEN));
    for _ in 0..count {
        let x_pos = reader.read_u32("template.x_pos")?;
        let delta_x = reader.read_u32("template.delta_x")?;
        let y_pos = reader.read_u32("template.y_pos")?;
        let delta_y = reader.read_u32("template.delta_y")?;
        let control_type = reader.read_u32("template.control_type")?;
        let control_flags = reader.read_u32("template.control_flags")?;

        let cntrl_type = reader.read_u32("control.type")?;
        let size = reader.read_u32("control.size")?;
        let offset = reader.read_u32("control.string")? as usize;

        rows.push(TemplateRow {
            x_pos,
            delta_x,
            y_pos,
            delta_y,
            control_type,
            control_flags,
            control: Control {
                control_type: cntrl_type,
                size,
                string: read_string_at(data, offset)?,
            },
        });
    }

    Ok(TemplateRowSet { template_type, rows })
}

/// Reads the NUL-terminated string at an absolute offset.
fn read_string_at(data: &[u8], offset: usize) -> Result<Vec<u8>, DecodeError> {
    let tail = data.get(offset..).ok_or(DecodeError::StringOffsetOutOfBounds {
        offset,
        len: data.len(),
    })?;
    if tail.is_empty() {
        return Err(DecodeError::StringOffsetOutOfBounds {
            offset,
            len: data.len(),
        });
    }
    let mut reader = Reader::new(tail);
    Ok(reader.read_ansi_cstring("control.string")?.to_vec())
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes a display template.
///
/// Labels are written to a string pool after the last row; every empty label
/// points at a single shared NUL at the end of the pool.
pub fn encode_template_rows(set: &TemplateRowSet) -> Result<Vec<u8>, EncodeError> {
    let mut writer = Writer::with_capacity(HEADER_LEN + set.rows.len() * ROW_LEN);
    writer.write_u32(set.template_type);
    writer.write_count(set.rows.len(), MAX_VALUES, "template row count")?;

    let mut pool = Writer::new();
    let pool_start = HEADER_LEN + set.rows.len() * ROW_LEN;
    let mut offsets = Vec::with_capacity(set.rows.len());
    for row in &set.rows {
        if row.control.string.is_empty() {
            offsets.push(None);
        } else {
            offsets.push(Some(pool_start + pool.len()));
            pool.write_ansi_cstring(&row.control.string, "control.string")?;
        }
    }
    let empty_offset = pool_start + pool.len();
    pool.write_byte(0);

    for (row, offset) in set.rows.iter().zip(offsets) {
        writer.write_u32(row.x_pos);
        writer.write_u32(row.delta_x);
        writer.write_u32(row.y_pos);
        writer.write_u32(row.delta_y);
        writer.write_u32(row.control_type);
        writer.write_u32(row.control_flags);
        writer.write_u32(row.control.control_type);
        writer.write_u32(row.control.size);
        writer.write_u32(offset.unwrap_or(empty_offset) as u32);
    }

    writer.write_bytes(pool.as_bytes());
    Ok(writer.into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::template::control_type;

    fn sample() -> TemplateRowSet {
        TemplateRowSet {
            template_type: 1,
            rows: vec![
                TemplateRow {
                    x_pos: 10,
                    delta_x: 100,
                    y_pos: 5,
                    delta_y: 12,
                    control_type: control_type::LABEL,
                    control_flags: 0,
                    control: Control {
                        control_type: 0x3001_001E,
                        size: 0,
                        string: b"&Name:".to_vec(),
                    },
                },
                TemplateRow {
                    x_pos: 120,
                    delta_x: 200,
                    y_pos: 5,
                    delta_y: 12,
                    control_type: control_type::EDIT,
                    control_flags: 0x0000_0002,
                    control: Control {
                        control_type: 0x3001_001E,
                        size: 256,
                        string: Vec::new(),
                    },
                },
            ],
        }
    }

    #[test]
    fn test_roundtrip() {
        let set = sample();
        let data = encode_template_rows(&set).unwrap();
        // Header, two rows, "&Name:\0", shared "\0".
        assert_eq!(data.len(), 8 + 2 * 36 + 7 + 1);
        let decoded = decode_template_rows(&data, &DecodeOptions::default()).unwrap();
        assert_eq!(decoded, set);
        assert_eq!(decoded.rows[0].control.decode_string(1252), "&Name:");
    }

    #[test]
    fn test_offset_out_of_bounds() {
        let mut data = encode_template_rows(&sample()).unwrap();
        // First row's string offset lives at 8 + 32.
        data[40..44].copy_from_slice(&500u32.to_le_bytes());
        assert!(matches!(
            decode_template_rows(&data, &DecodeOptions::default()),
            Err(DecodeError::StringOffsetOutOfBounds { offset: 500, .. })
        ));
    }

    #[test]
    fn test_truncated_strict_vs_lenient() {
        let data = encode_template_rows(&sample()).unwrap();
        let cut = &data[..30];
        assert!(matches!(
            decode_template_rows(cut, &DecodeOptions::default()),
            Err(DecodeError::UnexpectedEof { .. })
        ));

        let lenient = DecodeOptions::default().with_lenient_templates(true);
        let decoded = decode_template_rows(cut, &lenient).unwrap();
        assert!(decoded.is_empty());
        assert_eq!(decoded.template_type, 0);
    }

    #[test]
    fn test_unterminated_label() {
        let mut writer = Writer::new();
        writer.write_u32(0);
        writer.write_u32(1);
        for _ in 0..8 {
            writer.write_u32(0);
        }
        writer.write_u32(44);
        writer.write_bytes(b"abc");
        assert!(matches!(
            decode_template_rows(writer.as_bytes(), &DecodeOptions::default()),
            Err(DecodeError::UnterminatedString { .. })
        ));
    }
}
