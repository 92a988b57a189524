pub mod assembler;
pub mod decoder;
pub mod disasm;
pub mod encoder;
pub mod error;
pub mod instructions;
pub mod memory;
pub mod parser;

pub mod isa {
    pub mod i4004;
}

pub use assembler::{assemble, AsmConfig, Assembler};
pub use error::{AsmError, LineError};
pub use instructions::{InstrDesc, InstructionTable, WordFormat};
pub use memory::{ByteSink, CodeBuffer};
