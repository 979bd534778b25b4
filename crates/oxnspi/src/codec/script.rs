//! Address-book rule script decoding.
//!
//! `PidTagScriptData` carries a program of 32-bit words. The blob comes in two
//! shapes: prefixed by a u32 word count, or (as some servers send it) the bare
//! words. Both parse to a word stream, which [`decode_script`] turns into
//! [`Operation`]s.

use tracing::{debug, warn};

use crate::codec::primitives::{Reader, Writer};
use crate::error::{DecodeError, EncodeError};
use crate::limits::MAX_BINARY_LEN;
use crate::model::{Opcode, Operation};

/// Most words a script blob may hold: a binary value's byte ceiling in words.
pub const MAX_SCRIPT_WORDS: usize = MAX_BINARY_LEN / 4;

// =============================================================================
// DECODING
// =============================================================================

/// Decodes a word stream into instructions.
///
/// Words are scanned left to right. Each recognized opcode consumes the next
/// words as its operands. Decoding stops after a Halt (which is included) or
/// when the stream runs out. Words that are not opcodes are skipped. An
/// instruction whose operands run past the end is dropped.
pub fn decode_script(words: &[u32]) -> Vec<Operation> {
    let mut ops = Vec::new();
    let mut index = 0;

    while index < words.len() {
        let word = words[index];
        index += 1;

        let Some(opcode) = Opcode::from_u32(word) else {
            debug!(index = index - 1, word, "skipping unrecognized script word");
            continue;
        };

        let arity = opcode.arity();
        let Some(operands) = words.get(index..index + arity) else {
            warn!(
                ?opcode,
                needed = arity,
                available = words.len() - index,
                "script instruction truncated"
            );
            break;
        };
        index += arity;

        if let Some(op) = Operation::from_operands(opcode, operands) {
            ops.push(op);
        }
        if opcode.is_terminal() {
            break;
        }
    }

    debug!(instructions = ops.len(), words = words.len(), "decoded script");
    ops
}

/// Parses a size-prefixed script blob: u32 word count, then the words.
pub fn parse_script_blob(data: &[u8]) -> Result<Vec<u32>, DecodeError> {
    let mut reader = Reader::new(data);
    let count = reader.read_count(MAX_SCRIPT_WORDS, "script word count")?;
    let mut words = Vec::with_capacity(reader.capacity_for(count));
    for _ in 0..count {
        words.push(reader.read_u32("script word")?);
    }
    Ok(words)
}

/// Parses a bare script blob whose whole length is words.
pub fn parse_script_words(data: &[u8]) -> Result<Vec<u32>, DecodeError> {
    if data.len() % 4 != 0 {
        return Err(DecodeError::MisalignedScript { len: data.len() });
    }
    let mut reader = Reader::new(data);
    let mut words = Vec::with_capacity(data.len() / 4);
    while !reader.is_empty() {
        words.push(reader.read_u32("script word")?);
    }
    Ok(words)
}

// =============================================================================
// ENCODING
// =============================================================================

/// Flattens instructions back into a word stream.
pub fn encode_script(ops: &[Operation]) -> Vec<u32> {
    let mut words = Vec::with_capacity(ops.len() * 2);
    for op in ops {
        op.write_words(&mut words);
    }
    words
}

/// Writes the size-prefixed blob form.
pub fn encode_script_blob(words: &[u32]) -> Result<Vec<u8>, EncodeError> {
    let mut writer = Writer::with_capacity(4 + words.len() * 4);
    writer.write_count(words.len(), MAX_SCRIPT_WORDS, "script word count")?;
    for word in words {
        writer.write_u32(*word);
    }
    Ok(writer.into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PropertyTag;

    #[test]
    fn test_emit_then_halt() {
        let ops = decode_script(&[0x0000_0002, 0x0003_0003, 0x0000_0000]);
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0].instruction, Opcode::EmitPropertyValue);
        assert_eq!(ops[0].prop_tag1, Some(PropertyTag::from_raw(0x0003_0003)));
        assert_eq!(ops[0].prop_tag2, None);
        assert_eq!(ops[0].offset, None);
        assert_eq!(ops[1], Operation::halt());
    }

    #[test]
    fn test_stops_after_halt() {
        let ops = decode_script(&[0, 2, 0x3001_001F, 0]);
        assert_eq!(ops, vec![Operation::halt()]);
    }

    #[test]
    fn test_operands_follow_opcode() {
        let words = [
            0x4000_0005, 0x3001_001F, 0x3002_001F, 7, // jump if equal values
            0x8000_0006, 0x3003_001F, // emit upper string
            0x0000_0004, 0x3004_001F, 2, // jump if not exists
            0x0000_0000,
        ];
        let ops = decode_script(&words);
        assert_eq!(ops.len(), 4);
        assert_eq!(ops[0].prop_tag2, Some(PropertyTag::from_raw(0x3002_001F)));
        assert_eq!(ops[0].offset, Some(7));
        assert_eq!(ops[1].instruction, Opcode::EmitUpperString);
        assert_eq!(ops[1].prop_tag1, Some(PropertyTag::from_raw(0x3003_001F)));
        assert_eq!(ops[2].offset, Some(2));
        assert_eq!(encode_script(&ops), words.to_vec());
    }

    #[test]
    fn test_unknown_words_skipped() {
        let ops = decode_script(&[0xDEAD_BEEF, 0x0000_0001, 0x0000_0000]);
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0].instruction, Opcode::Error);
    }

    #[test]
    fn test_truncated_instruction_dropped() {
        let ops = decode_script(&[0x0000_0001, 0x0000_0005, 0x3001_001F]);
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].instruction, Opcode::Error);
    }

    #[test]
    fn test_exhaustion_without_halt() {
        let ops = decode_script(&[0x0000_0003, 4]);
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].offset, Some(4));
        assert!(decode_script(&[]).is_empty());
    }

    #[test]
    fn test_blob_forms() {
        let words = vec![2, 0x3001_001F, 0];
        let blob = encode_script_blob(&words).unwrap();
        assert_eq!(&blob[..4], &[3, 0, 0, 0]);
        assert_eq!(parse_script_blob(&blob).unwrap(), words);
        assert_eq!(parse_script_words(&blob[4..]).unwrap(), words);
    }

    #[test]
    fn test_blob_errors() {
        assert_eq!(
            parse_script_words(&[0, 0, 0, 0, 1]),
            Err(DecodeError::MisalignedScript { len: 5 })
        );
        assert!(matches!(
            parse_script_blob(&[2, 0, 0, 0, 0, 0, 0, 0]),
            Err(DecodeError::UnexpectedEof { .. })
        ));
        assert!(parse_script_words(&[]).unwrap().is_empty());
    }
}
