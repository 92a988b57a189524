use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::AsmError;

/// Longest mnemonic the resolver accepts.
pub const MAX_MNEMONIC_LEN: usize = 7;

/// Bit layout of one output byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WordFormat {
    /// No byte emitted.
    None,
    /// `AAAA AAAA`
    Address,
    /// `DDDD DDDD`
    Data,
    /// `OOOO OOOO`, opcode verbatim
    Opcode,
    /// `OOOO CCCC`
    OpcodeCond,
    /// `OOOO AAAA`, high nibble of a 12-bit address
    OpcodeAddr,
    /// `OOOO DDDD`
    OpcodeData,
    /// `OOOO RRR0`
    OpcodeRegPair0,
    /// `OOOO RRR1`
    OpcodeRegPair1,
    /// `OOOO RRRR`
    OpcodeRegister,
}

impl WordFormat {
    /// Whether building this byte takes one operand.
    pub fn consumes_operand(self) -> bool {
        match self {
            WordFormat::None | WordFormat::Opcode => false,
            WordFormat::Address
            | WordFormat::Data
            | WordFormat::OpcodeCond
            | WordFormat::OpcodeAddr
            | WordFormat::OpcodeData
            | WordFormat::OpcodeRegPair0
            | WordFormat::OpcodeRegPair1
            | WordFormat::OpcodeRegister => true,
        }
    }

    /// Whether this format produces a byte at all.
    pub fn emits(self) -> bool {
        self != WordFormat::None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InstrDesc {
    pub mnemonic: &'static str,
    pub opcode: u8,
    pub operands: usize,
    pub word0: WordFormat,
    pub word1: WordFormat,
}

impl InstrDesc {
    const fn new(
        mnemonic: &'static str,
        opcode: u8,
        operands: usize,
        word0: WordFormat,
        word1: WordFormat,
    ) -> Self {
        Self { mnemonic, opcode, operands, word0, word1 }
    }

    /// Operands actually consumed by `word0` and `word1`.
    pub fn consumed_operands(&self) -> usize {
        [self.word0, self.word1]
            .iter()
            .filter(|w| w.consumes_operand())
            .count()
    }

    /// Encoded size in bytes (1 or 2).
    pub fn width(&self) -> usize {
        [self.word0, self.word1].iter().filter(|w| w.emits()).count()
    }
}

use WordFormat as F;

pub const TABLE: &[InstrDesc] = &[
    InstrDesc::new("NOP", 0x00, 0, F::Opcode, F::None),
    InstrDesc::new("JCN", 0x01, 2, F::OpcodeCond, F::Address),
    InstrDesc::new("FIM", 0x02, 2, F::OpcodeRegPair0, F::Data),
    InstrDesc::new("SRC", 0x02, 1, F::OpcodeRegPair1, F::None),
    InstrDesc::new("FIN", 0x03, 1, F::OpcodeRegPair0, F::None),
    InstrDesc::new("JIN", 0x03, 1, F::OpcodeRegPair1, F::None),
    InstrDesc::new("JUN", 0x04, 2, F::OpcodeAddr, F::Address),
    InstrDesc::new("JMS", 0x05, 2, F::OpcodeAddr, F::Address),
    InstrDesc::new("INC", 0x06, 1, F::OpcodeRegister, F::None),
    InstrDesc::new("ISZ", 0x07, 2, F::OpcodeRegister, F::Address),
    InstrDesc::new("ADD", 0x08, 1, F::OpcodeRegister, F::None),
    InstrDesc::new("SUB", 0x09, 1, F::OpcodeRegister, F::None),
    InstrDesc::new("LD", 0x0A, 1, F::OpcodeRegister, F::None),
    InstrDesc::new("XCH", 0x0B, 1, F::OpcodeRegister, F::None),
    InstrDesc::new("BBL", 0x0C, 1, F::OpcodeData, F::None),
    InstrDesc::new("LDM", 0x0D, 1, F::OpcodeData, F::None),
    // Accumulator group
    InstrDesc::new("CLB", 0xF0, 0, F::Opcode, F::None),
    InstrDesc::new("CLC", 0xF1, 0, F::Opcode, F::None),
    InstrDesc::new("IAC", 0xF2, 0, F::Opcode, F::None),
    InstrDesc::new("CMC", 0xF3, 0, F::Opcode, F::None),
    InstrDesc::new("CMA", 0xF4, 0, F::Opcode, F::None),
    InstrDesc::new("RAL", 0xF5, 0, F::Opcode, F::None),
    InstrDesc::new("RAR", 0xF6, 0, F::Opcode, F::None),
    InstrDesc::new("TCC", 0xF7, 0, F::Opcode, F::None),
    InstrDesc::new("DAC", 0xF8, 0, F::Opcode, F::None),
    InstrDesc::new("TCS", 0xF9, 0, F::Opcode, F::None),
    InstrDesc::new("STC", 0xFA, 0, F::Opcode, F::None),
    InstrDesc::new("DAA", 0xFB, 0, F::Opcode, F::None),
    InstrDesc::new("KBP", 0xFC, 0, F::Opcode, F::None),
    InstrDesc::new("DCL", 0xFD, 0, F::Opcode, F::None),
    // I/O and RAM group
    InstrDesc::new("WRM", 0xE0, 0, F::Opcode, F::None),
    InstrDesc::new("WMP", 0xE1, 0, F::Opcode, F::None),
    InstrDesc::new("WRR", 0xE2, 0, F::Opcode, F::None),
    InstrDesc::new("WPM", 0xE3, 0, F::Opcode, F::None),
    InstrDesc::new("WR0", 0xE4, 0, F::Opcode, F::None),
    InstrDesc::new("WR1", 0xE5, 0, F::Opcode, F::None),
    InstrDesc::new("WR2", 0xE6, 0, F::Opcode, F::None),
    InstrDesc::new("WR3", 0xE7, 0, F::Opcode, F::None),
    InstrDesc::new("SBM", 0xE8, 0, F::Opcode, F::None),
    InstrDesc::new("RDM", 0xE9, 0, F::Opcode, F::None),
    InstrDesc::new("RDR", 0xEA, 0, F::Opcode, F::None),
    InstrDesc::new("ADM", 0xEB, 0, F::Opcode, F::None),
    InstrDesc::new("RD0", 0xEC, 0, F::Opcode, F::None),
    InstrDesc::new("RD1", 0xED, 0, F::Opcode, F::None),
    InstrDesc::new("RD2", 0xEE, 0, F::Opcode, F::None),
    InstrDesc::new("RD3", 0xEF, 0, F::Opcode, F::None),
];

/// Immutable mnemonic -> descriptor index over a descriptor slice.
#[derive(Debug, Clone)]
pub struct InstructionTable {
    descs: &'static [InstrDesc],
    index: HashMap<&'static str, usize>,
}

impl InstructionTable {
    /// Builds the index, rejecting duplicate mnemonics and descriptors whose
    /// declared operand count disagrees with their word formats.
    pub fn new(descs: &'static [InstrDesc]) -> Result<Self, AsmError> {
        let mut index = HashMap::with_capacity(descs.len());
        for (i, d) in descs.iter().enumerate() {
            let consumed = d.consumed_operands();
            if consumed != d.operands {
                return Err(AsmError::ArityMismatch {
                    mnemonic: d.mnemonic.to_string(),
                    declared: d.operands,
                    consumed,
                });
            }
            if index.insert(d.mnemonic, i).is_some() {
                return Err(AsmError::DuplicateMnemonic { mnemonic: d.mnemonic.to_string() });
            }
        }
        Ok(Self { descs, index })
    }

    /// The Intel 4004 instruction set.
    pub fn i4004() -> Result<Self, AsmError> {
        Self::new(TABLE)
    }

    /// Exact, case-sensitive lookup.
    pub fn get(&self, mnemonic: &str) -> Option<&InstrDesc> {
        self.index.get(mnemonic).map(|&i| &self.descs[i])
    }

    pub fn resolve(&self, mnemonic: &str) -> Result<&InstrDesc, AsmError> {
        if mnemonic.len() > MAX_MNEMONIC_LEN {
            return Err(AsmError::UnknownMnemonic { mnemonic: mnemonic.to_string() });
        }
        self.get(mnemonic)
            .ok_or_else(|| AsmError::UnknownMnemonic { mnemonic: mnemonic.to_string() })
    }

    /// Descriptors in table order.
    pub fn iter(&self) -> impl Iterator<Item = &InstrDesc> {
        self.descs.iter()
    }

    pub fn len(&self) -> usize {
        self.descs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descs.is_empty()
    }
}
