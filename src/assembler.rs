use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::encoder::encode;
use crate::error::{AsmError, LineError};
use crate::instructions::InstructionTable;
use crate::memory::{CodeBuffer, MAX_CODE};
use crate::parser::parse_line;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsmConfig {
    /// Code buffer capacity in bytes.
    pub max_code: usize,
}

impl Default for AsmConfig {
    fn default() -> Self {
        Self { max_code: MAX_CODE }
    }
}

/// One assembly run: borrows the instruction table, owns the output image.
///
/// Lines go through parse -> resolve -> encode in order. The first error
/// stops the run; the session keeps whatever was emitted before it, but
/// callers are expected to discard it.
pub struct Assembler<'t> {
    table: &'t InstructionTable,
    code: CodeBuffer,
    line_no: usize,
}

impl<'t> Assembler<'t> {
    pub fn new(table: &'t InstructionTable) -> Self {
        Self::with_config(table, AsmConfig::default())
    }

    pub fn with_config(table: &'t InstructionTable, cfg: AsmConfig) -> Self {
        Self {
            table,
            code: CodeBuffer::new(cfg.max_code),
            line_no: 0,
        }
    }

    /// Assembles one line; returns the number of bytes it produced.
    pub fn assemble_line(&mut self, line: &str) -> Result<usize, AsmError> {
        self.line_no += 1;
        let Some(parsed) = parse_line(line)? else {
            trace!(line = self.line_no, "blank");
            return Ok(0);
        };
        let desc = self.table.resolve(parsed.mnemonic)?;
        let start = self.code.len();
        let n = encode(desc, &parsed.operands, &mut self.code)?;
        debug!(
            line = self.line_no,
            mnemonic = desc.mnemonic,
            bytes = ?&self.code.as_bytes()[start..],
            "encoded"
        );
        Ok(n)
    }

    /// Assembles a whole source text, stopping at the first failing line.
    pub fn assemble_source(&mut self, src: &str) -> Result<(), LineError> {
        for line in src.lines() {
            self.assemble_line(line).map_err(|source| LineError { line: self.line_no, source })?;
        }
        info!(lines = self.line_no, bytes = self.code.len(), "assembled");
        Ok(())
    }

    pub fn code(&self) -> &CodeBuffer {
        &self.code
    }

    pub fn finish(self) -> Vec<u8> {
        self.code.into_bytes()
    }
}

/// Assembles `src` with a fresh session and returns the code image.
pub fn assemble(table: &InstructionTable, src: &str) -> Result<Vec<u8>, LineError> {
    let mut asm = Assembler::new(table);
    asm.assemble_source(src)?;
    Ok(asm.finish())
}
