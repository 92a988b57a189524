use crate::decoder::{Decoded, Decoder};
use crate::instructions::{InstrDesc, WordFormat, TABLE};

/// Intel 4004 decoder driven by the same table as the assembler.
///
/// Every first byte maps to at most one descriptor, so the match is
/// precomputed into a 256-entry lookup.
pub struct I4004Decoder {
    by_first: [Option<&'static InstrDesc>; 256],
}

impl I4004Decoder {
    pub fn new() -> Self {
        let mut by_first = [None; 256];
        for b in 0..=255u8 {
            by_first[b as usize] = TABLE.iter().find(|d| first_byte_matches(d, b));
        }
        Self { by_first }
    }
}

impl Default for I4004Decoder {
    fn default() -> Self {
        Self::new()
    }
}

fn first_byte_matches(d: &InstrDesc, b: u8) -> bool {
    let op_hi = d.opcode & 0x0F;
    match d.word0 {
        WordFormat::None => false,
        WordFormat::Address | WordFormat::Data => true,
        WordFormat::Opcode => b == d.opcode,
        WordFormat::OpcodeCond
        | WordFormat::OpcodeAddr
        | WordFormat::OpcodeData
        | WordFormat::OpcodeRegister => b >> 4 == op_hi,
        WordFormat::OpcodeRegPair0 => b >> 4 == op_hi && b & 1 == 0,
        WordFormat::OpcodeRegPair1 => b >> 4 == op_hi && b & 1 == 1,
    }
}

/// Inverse of the encoder for a single word.
fn extract(fmt: WordFormat, b: u8) -> Option<u8> {
    match fmt {
        WordFormat::None | WordFormat::Opcode => None,
        WordFormat::Address | WordFormat::Data => Some(b),
        WordFormat::OpcodeCond
        | WordFormat::OpcodeAddr
        | WordFormat::OpcodeData
        | WordFormat::OpcodeRegister => Some(b & 0x0F),
        WordFormat::OpcodeRegPair0 | WordFormat::OpcodeRegPair1 => Some((b >> 1) & 0x07),
    }
}

impl Decoder for I4004Decoder {
    fn decode(&self, bytes: &[u8]) -> Option<Decoded> {
        let b0 = *bytes.first()?;
        let desc = self.by_first[b0 as usize]?;
        let width = desc.width();
        if bytes.len() < width {
            return None;
        }
        let mut args = [0u8; 2];
        let mut n = 0;
        for (fmt, b) in [desc.word0, desc.word1].into_iter().zip(bytes.iter().copied()) {
            if let Some(v) = extract(fmt, b) {
                args[n] = v;
                n += 1;
            }
        }
        Some(Decoded { desc, args, width: width as u8 })
    }
}
