use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    #[error("Invalid mnemonic `{mnemonic}`")]
    UnknownMnemonic { mnemonic: String },
    #[error("Too many modifiers for {mnemonic}: expected {expected}, found {found}")]
    TooManyModifiers { mnemonic: String, expected: usize, found: usize },
    #[error("Too few modifiers for {mnemonic}: expected {expected}, found {found}")]
    TooFewModifiers { mnemonic: String, expected: usize, found: usize },
    #[error("Invalid hexadecimal operand `{token}`")]
    InvalidOperand { token: String },
    #[error("Code memory overflow (capacity {capacity} bytes)")]
    CodeOverflow { capacity: usize },
    #[error("Duplicate mnemonic `{mnemonic}` in instruction table")]
    DuplicateMnemonic { mnemonic: String },
    #[error("{mnemonic} declares {declared} operands but its word formats consume {consumed}")]
    ArityMismatch { mnemonic: String, declared: usize, consumed: usize },
}

/// An [`AsmError`] tied to the 1-based source line that raised it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {source}")]
pub struct LineError {
    pub line: usize,
    #[source]
    pub source: AsmError,
}
