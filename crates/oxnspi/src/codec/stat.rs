//! STAT block encoding/decoding: nine little-endian 32-bit fields.

use crate::codec::primitives::{Reader, Writer};
use crate::error::DecodeError;
use crate::model::Stat;

pub fn decode_stat(reader: &mut Reader<'_>) -> Result<Stat, DecodeError> {
    Ok(Stat {
        sort_type: reader.read_u32("stat.sort_type")?,
        container_id: reader.read_u32("stat.container_id")?,
        current_rec: reader.read_u32("stat.current_rec")?,
        delta: reader.read_i32("stat.delta")?,
        num_pos: reader.read_u32("stat.num_pos")?,
        total_recs: reader.read_u32("stat.total_recs")?,
        code_page: reader.read_u32("stat.code_page")?,
        template_locale: reader.read_u32("stat.template_locale")?,
        sort_locale: reader.read_u32("stat.sort_locale")?,
    })
}

pub fn encode_stat(writer: &mut Writer, stat: &Stat) {
    writer.write_u32(stat.sort_type);
    writer.write_u32(stat.container_id);
    writer.write_u32(stat.current_rec);
    writer.write_i32(stat.delta);
    writer.write_u32(stat.num_pos);
    writer.write_u32(stat.total_recs);
    writer.write_u32(stat.code_page);
    writer.write_u32(stat.template_locale);
    writer.write_u32(stat.sort_locale);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limits::STAT_LEN;

    #[test]
    fn test_default_stat_bytes() {
        let mut writer = Writer::new();
        encode_stat(&mut writer, &Stat::default());
        let bytes = writer.into_bytes();
        assert_eq!(bytes.len(), STAT_LEN);
        assert_eq!(&bytes[24..28], &[0x25, 0x4F, 0x00, 0x00]);
        assert_eq!(&bytes[28..32], &[0x09, 0x04, 0x00, 0x00]);
        assert_eq!(&bytes[32..36], &[0x09, 0x04, 0x00, 0x00]);
        assert!(bytes[..24].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_negative_delta_roundtrip() {
        let stat = Stat {
            delta: -25,
            num_pos: 3,
            total_recs: 90,
            ..Stat::default()
        };
        let mut writer = Writer::new();
        encode_stat(&mut writer, &stat);
        assert_eq!(&writer.as_bytes()[12..16], &[0xE7, 0xFF, 0xFF, 0xFF]);
        let mut reader = Reader::new(writer.as_bytes());
        assert_eq!(decode_stat(&mut reader).unwrap(), stat);
    }

    #[test]
    fn test_truncated_stat() {
        let mut reader = Reader::new(&[0u8; STAT_LEN - 1]);
        assert_eq!(
            decode_stat(&mut reader),
            Err(DecodeError::UnexpectedEof { context: "stat.sort_locale" })
        );
    }
}
