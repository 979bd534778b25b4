//! Windows code page support for 8-bit strings.
//!
//! String8 values and template labels are raw bytes whose meaning depends on
//! the code page negotiated in the STAT block. This maps Windows code page
//! numbers to `encoding_rs` encodings.

use encoding_rs::Encoding;
use tracing::debug;

/// Looks up the encoding for a Windows code page number.
pub fn encoding_for_code_page(code_page: u32) -> Option<&'static Encoding> {
    let encoding = match code_page {
        1252 | 28591 => encoding_rs::WINDOWS_1252,
        866 => encoding_rs::IBM866,
        874 => encoding_rs::WINDOWS_874,
        932 => encoding_rs::SHIFT_JIS,
        936 => encoding_rs::GBK,
        949 => encoding_rs::EUC_KR,
        950 => encoding_rs::BIG5,
        1200 => encoding_rs::UTF_16LE,
        1201 => encoding_rs::UTF_16BE,
        1250 => encoding_rs::WINDOWS_1250,
        1251 => encoding_rs::WINDOWS_1251,
        1253 => encoding_rs::WINDOWS_1253,
        1254 => encoding_rs::WINDOWS_1254,
        1255 => encoding_rs::WINDOWS_1255,
        1256 => encoding_rs::WINDOWS_1256,
        1257 => encoding_rs::WINDOWS_1257,
        1258 => encoding_rs::WINDOWS_1258,
        10000 => encoding_rs::MACINTOSH,
        20866 => encoding_rs::KOI8_R,
        20932 => encoding_rs::EUC_JP,
        21866 => encoding_rs::KOI8_U,
        28592 => encoding_rs::ISO_8859_2,
        28593 => encoding_rs::ISO_8859_3,
        28594 => encoding_rs::ISO_8859_4,
        28595 => encoding_rs::ISO_8859_5,
        28596 => encoding_rs::ISO_8859_6,
        28597 => encoding_rs::ISO_8859_7,
        28598 => encoding_rs::ISO_8859_8,
        28603 => encoding_rs::ISO_8859_13,
        28605 => encoding_rs::ISO_8859_15,
        50220 => encoding_rs::ISO_2022_JP,
        54936 => encoding_rs::GB18030,
        65001 => encoding_rs::UTF_8,
        _ => return None,
    };
    Some(encoding)
}

/// Decodes code-page bytes to a string, replacing malformed sequences.
///
/// Code pages without a known encoding (including Teletex, the STAT default)
/// fall back to windows-1252.
pub fn decode_ansi(bytes: &[u8], code_page: u32) -> String {
    let encoding = encoding_for_code_page(code_page).unwrap_or_else(|| {
        debug!(code_page, "no encoding for code page, using windows-1252");
        encoding_rs::WINDOWS_1252
    });
    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        debug!(code_page, encoding = encoding.name(), "replaced malformed code page bytes");
    }
    text.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::stat::code_page;

    #[test]
    fn test_known_code_pages() {
        assert_eq!(encoding_for_code_page(1252), Some(encoding_rs::WINDOWS_1252));
        assert_eq!(encoding_for_code_page(932), Some(encoding_rs::SHIFT_JIS));
        assert_eq!(
            encoding_for_code_page(code_page::WIN_UNICODE),
            Some(encoding_rs::UTF_16LE)
        );
        assert_eq!(encoding_for_code_page(code_page::TELETEX), None);
    }

    #[test]
    fn test_decode_ansi() {
        assert_eq!(decode_ansi(b"Caf\xE9", 1252), "Café");
        assert_eq!(decode_ansi(b"\xCF\xF0\xE8", 1251), "При");
        // Teletex falls back to windows-1252.
        assert_eq!(decode_ansi(b"Caf\xE9", code_page::TELETEX), "Café");
        assert_eq!(decode_ansi(b"", 1252), "");
    }
}
