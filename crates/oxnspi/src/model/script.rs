//! Address-book rule script instructions.
//!
//! A script is a flat stream of 32-bit words. Each instruction is an opcode
//! word followed by a fixed number of operand words; the opcode values and
//! arities are part of the wire contract.

use crate::model::PropertyTag;

/// Script opcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Opcode {
    Halt = 0x0000_0000,
    Error = 0x0000_0001,
    EmitPropertyValue = 0x0000_0002,
    Jump = 0x0000_0003,
    JumpIfNotExists = 0x0000_0004,
    JumpIfEqualProperties = 0x0000_0005,
    EmitUpperProperty = 0x0000_0006,
    EmitString = 0x8000_0002,
    JumpIfEqualValues = 0x4000_0005,
    EmitUpperString = 0x8000_0006,
}

/// Operand slot of an [`Operation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operand {
    PropTag1,
    PropTag2,
    Offset,
}

impl Opcode {
    pub fn from_u32(v: u32) -> Option<Opcode> {
        match v {
            0x0000_0000 => Some(Opcode::Halt),
            0x0000_0001 => Some(Opcode::Error),
            0x0000_0002 => Some(Opcode::EmitPropertyValue),
            0x0000_0003 => Some(Opcode::Jump),
            0x0000_0004 => Some(Opcode::JumpIfNotExists),
            0x0000_0005 => Some(Opcode::JumpIfEqualProperties),
            0x0000_0006 => Some(Opcode::EmitUpperProperty),
            0x8000_0002 => Some(Opcode::EmitString),
            0x4000_0005 => Some(Opcode::JumpIfEqualValues),
            0x8000_0006 => Some(Opcode::EmitUpperString),
            _ => None,
        }
    }

    pub fn code(self) -> u32 {
        self as u32
    }

    /// Operand slots consumed after the opcode word, in stream order.
    pub fn operands(self) -> &'static [Operand] {
        match self {
            Opcode::Halt | Opcode::Error => &[],
            Opcode::EmitPropertyValue
            | Opcode::EmitUpperProperty
            | Opcode::EmitString
            | Opcode::EmitUpperString => &[Operand::PropTag1],
            Opcode::Jump => &[Operand::Offset],
            Opcode::JumpIfNotExists => &[Operand::PropTag1, Operand::Offset],
            Opcode::JumpIfEqualProperties | Opcode::JumpIfEqualValues => {
                &[Operand::PropTag1, Operand::PropTag2, Operand::Offset]
            }
        }
    }

    pub fn arity(self) -> usize {
        self.operands().len()
    }

    pub fn is_terminal(self) -> bool {
        self == Opcode::Halt
    }
}

/// One decoded instruction. Operand slots the opcode does not use are `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Operation {
    pub instruction: Opcode,
    pub prop_tag1: Option<PropertyTag>,
    pub prop_tag2: Option<PropertyTag>,
    pub offset: Option<u32>,
}

impl Operation {
    /// Builds an operation from its opcode and exactly `arity()` operand words.
    ///
    /// Returns `None` if the operand count is wrong.
    pub fn from_operands(instruction: Opcode, words: &[u32]) -> Option<Self> {
        let slots = instruction.operands();
        if words.len() != slots.len() {
            return None;
        }
        let mut op = Operation {
            instruction,
            prop_tag1: None,
            prop_tag2: None,
            offset: None,
        };
        for (slot, word) in slots.iter().zip(words) {
            match slot {
                Operand::PropTag1 => op.prop_tag1 = Some(PropertyTag::from_raw(*word)),
                Operand::PropTag2 => op.prop_tag2 = Some(PropertyTag::from_raw(*word)),
                Operand::Offset => op.offset = Some(*word),
            }
        }
        Some(op)
    }

    pub fn halt() -> Self {
        Operation {
            instruction: Opcode::Halt,
            prop_tag1: None,
            prop_tag2: None,
            offset: None,
        }
    }

    /// Writes the opcode and its operand words to `out`. A slot the opcode
    /// requires but that is `None` is written as zero.
    pub fn write_words(&self, out: &mut Vec<u32>) {
        out.push(self.instruction.code());
        for slot in self.instruction.operands() {
            let word = match slot {
                Operand::PropTag1 => self.prop_tag1.map(PropertyTag::raw),
                Operand::PropTag2 => self.prop_tag2.map(PropertyTag::raw),
                Operand::Offset => self.offset,
            };
            out.push(word.unwrap_or(0));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Opcode; 10] = [
        Opcode::Halt,
        Opcode::Error,
        Opcode::EmitPropertyValue,
        Opcode::Jump,
        Opcode::JumpIfNotExists,
        Opcode::JumpIfEqualProperties,
        Opcode::EmitUpperProperty,
        Opcode::EmitString,
        Opcode::JumpIfEqualValues,
        Opcode::EmitUpperString,
    ];

    #[test]
    fn test_opcode_codes_roundtrip() {
        for op in ALL {
            assert_eq!(Opcode::from_u32(op.code()), Some(op));
        }
        assert_eq!(Opcode::from_u32(0x0000_0007), None);
        assert_eq!(Opcode::from_u32(0x8000_0003), None);
    }

    #[test]
    fn test_arity_table() {
        let arities: Vec<usize> = ALL.iter().map(|op| op.arity()).collect();
        assert_eq!(arities, vec![0, 0, 1, 1, 2, 3, 1, 1, 3, 1]);
        assert!(Opcode::Halt.is_terminal());
        assert!(!Opcode::Error.is_terminal());
    }

    #[test]
    fn test_from_operands_wrong_count() {
        assert!(Operation::from_operands(Opcode::Jump, &[]).is_none());
        assert!(Operation::from_operands(Opcode::Halt, &[1]).is_none());
    }
}
