use serde::Serialize;

use crate::decoder::{Decoded, Decoder};

/// Renders `d` as source text the assembler accepts, e.g. `JUN 1 23`.
pub fn fmt_decoded(d: &Decoded) -> String {
    let mut s = d.desc.mnemonic.to_string();
    for a in d.operands() {
        s.push_str(&format!(" {:X}", a));
    }
    s
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Line {
    Instr { addr: usize, bytes: Vec<u8>, text: String },
    Unknown { addr: usize, byte: u8 },
}

impl Line {
    pub fn addr(&self) -> usize {
        match self {
            Line::Instr { addr, .. } | Line::Unknown { addr, .. } => *addr,
        }
    }
}

/// Linear sweep over a whole image. Bytes that do not start a valid
/// instruction are reported one at a time and skipped.
pub fn disassemble<D: Decoder>(dec: &D, image: &[u8]) -> Vec<Line> {
    let mut out = Vec::new();
    let mut pc = 0;
    while pc < image.len() {
        match dec.decode(&image[pc..]) {
            Some(d) => {
                let w = d.width as usize;
                out.push(Line::Instr {
                    addr: pc,
                    bytes: image[pc..pc + w].to_vec(),
                    text: fmt_decoded(&d),
                });
                pc += w;
            }
            None => {
                out.push(Line::Unknown { addr: pc, byte: image[pc] });
                pc += 1;
            }
        }
    }
    out
}
