use serde::Serialize;

use crate::instructions::InstrDesc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Decoded {
    pub desc: &'static InstrDesc,
    /// Recovered operands, in source order; only `desc.operands` are valid.
    pub args: [u8; 2],
    /// Encoded size in bytes, 1 or 2.
    pub width: u8,
}

impl Decoded {
    pub fn operands(&self) -> &[u8] {
        &self.args[..self.desc.operands]
    }
}

pub trait Decoder {
    /// Decodes the instruction at the start of `bytes`.
    fn decode(&self, bytes: &[u8]) -> Option<Decoded>;
}
