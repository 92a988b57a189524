use serde::{Deserialize, Serialize};

use crate::error::AsmError;

/// Reference program memory size of the 4004 assembler.
pub const MAX_CODE: usize = 4096;

/// Destination for encoded bytes, in program order.
pub trait ByteSink {
    fn push(&mut self, byte: u8) -> Result<(), AsmError>;
}

/// Unbounded sink, handy for encoding single instructions.
impl ByteSink for Vec<u8> {
    fn push(&mut self, byte: u8) -> Result<(), AsmError> {
        Vec::push(self, byte);
        Ok(())
    }
}

/// Append-only code image with a fixed capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBuffer {
    bytes: Vec<u8>,
    capacity: usize,
}

impl CodeBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.capacity - self.bytes.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl Default for CodeBuffer {
    fn default() -> Self {
        Self::new(MAX_CODE)
    }
}

impl ByteSink for CodeBuffer {
    fn push(&mut self, byte: u8) -> Result<(), AsmError> {
        if self.bytes.len() >= self.capacity {
            return Err(AsmError::CodeOverflow { capacity: self.capacity });
        }
        self.bytes.push(byte);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_to_capacity_then_overflows() {
        let mut buf = CodeBuffer::new(3);
        for b in [1u8, 2, 3] {
            buf.push(b).unwrap();
        }
        assert_eq!(buf.remaining(), 0);
        assert_eq!(buf.push(4), Err(AsmError::CodeOverflow { capacity: 3 }));
        assert_eq!(buf.as_bytes(), &[1, 2, 3]);
    }

    #[test]
    fn zero_capacity_rejects_first_byte() {
        let mut buf = CodeBuffer::new(0);
        assert!(buf.push(0).is_err());
        assert!(buf.is_empty());
    }
}
