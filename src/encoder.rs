use crate::error::AsmError;
use crate::instructions::{InstrDesc, WordFormat};
use crate::memory::ByteSink;

/// Low nibble of the opcode moved into bits 7..4.
#[inline]
fn hi(opcode: u8) -> u8 {
    (opcode & 0x0F) << 4
}

/// Builds one byte for `fmt`. `arg` is the operand this word consumes, if any.
fn build_word(fmt: WordFormat, opcode: u8, arg: u32) -> Option<u8> {
    let b = match fmt {
        WordFormat::None => return None,
        WordFormat::Address | WordFormat::Data => (arg & 0xFF) as u8,
        WordFormat::Opcode => opcode,
        WordFormat::OpcodeCond
        | WordFormat::OpcodeAddr
        | WordFormat::OpcodeData
        | WordFormat::OpcodeRegister => hi(opcode) | (arg & 0x0F) as u8,
        WordFormat::OpcodeRegPair0 => hi(opcode) | ((arg & 0x07) << 1) as u8,
        WordFormat::OpcodeRegPair1 => hi(opcode) | ((arg & 0x07) << 1) as u8 | 0x01,
    };
    Some(b)
}

/// Checks arity, then appends the instruction's bytes to `out`.
/// Returns the number of bytes written.
pub fn encode<S: ByteSink>(desc: &InstrDesc, operands: &[u32], out: &mut S) -> Result<usize, AsmError> {
    let found = operands.len();
    if found > desc.operands {
        return Err(AsmError::TooManyModifiers {
            mnemonic: desc.mnemonic.to_string(),
            expected: desc.operands,
            found,
        });
    }
    if found < desc.operands {
        return Err(AsmError::TooFewModifiers {
            mnemonic: desc.mnemonic.to_string(),
            expected: desc.operands,
            found,
        });
    }

    let mut args = operands.iter().copied();
    let mut written = 0;
    for fmt in [desc.word0, desc.word1] {
        let arg = if fmt.consumes_operand() { args.next().unwrap_or(0) } else { 0 };
        if let Some(b) = build_word(fmt, desc.opcode, arg) {
            out.push(b)?;
            written += 1;
        }
    }
    Ok(written)
}

/// Encodes into a fresh vector; no capacity limit applies.
pub fn encode_to_vec(desc: &InstrDesc, operands: &[u32]) -> Result<Vec<u8>, AsmError> {
    let mut v = Vec::with_capacity(2);
    encode(desc, operands, &mut v)?;
    Ok(v)
}
