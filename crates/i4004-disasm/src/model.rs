use anyhow::{anyhow, Result};
use serde::Serialize;
use std::path::Path;

use i4004_asm::{InstrDesc, WordFormat};

/// The `[skip, skip + len)` window of an image; `len` defaults to the rest.
pub fn window(image: &[u8], skip: usize, len: Option<usize>) -> Result<&[u8]> {
    let rest = image.get(skip..).ok_or_else(|| anyhow!("--skip exceeds file size"))?;
    match len {
        Some(n) => rest
            .get(..n)
            .ok_or_else(|| anyhow!("--len exceeds remaining file size after skip")),
        None => Ok(rest),
    }
}

pub fn load_raw_bin(path: &Path, skip: usize, len: Option<usize>) -> Result<Vec<u8>> {
    let file = std::fs::read(path)?;
    Ok(window(&file, skip, len)?.to_vec())
}

/// One instruction table entry as printed by `i4004-dis isa`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IsaRow {
    pub mnemonic: &'static str,
    pub opcode: u8,
    pub operands: usize,
    pub width: usize,
    pub word0: WordFormat,
    pub word1: WordFormat,
    /// Bit pattern of the encoding, e.g. `0100 AAAA AAAA AAAA`.
    pub layout: String,
}

impl From<&InstrDesc> for IsaRow {
    fn from(d: &InstrDesc) -> Self {
        let hi = format!("{:04b}", d.opcode & 0x0F);
        let word = |fmt: WordFormat| -> Option<String> {
            Some(match fmt {
                WordFormat::None => return None,
                WordFormat::Address => "AAAA AAAA".into(),
                WordFormat::Data => "DDDD DDDD".into(),
                WordFormat::Opcode => format!("{:04b} {:04b}", d.opcode >> 4, d.opcode & 0x0F),
                WordFormat::OpcodeCond => format!("{hi} CCCC"),
                WordFormat::OpcodeAddr => format!("{hi} AAAA"),
                WordFormat::OpcodeData => format!("{hi} DDDD"),
                WordFormat::OpcodeRegPair0 => format!("{hi} RRR0"),
                WordFormat::OpcodeRegPair1 => format!("{hi} RRR1"),
                WordFormat::OpcodeRegister => format!("{hi} RRRR"),
            })
        };
        let layout = [d.word0, d.word1]
            .into_iter()
            .filter_map(word)
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            mnemonic: d.mnemonic,
            opcode: d.opcode,
            operands: d.operands,
            width: d.width(),
            word0: d.word0,
            word1: d.word1,
            layout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use i4004_asm::InstructionTable;
    use pretty_assertions::assert_eq;

    #[test]
    fn layouts() {
        let t = InstructionTable::i4004().unwrap();
        let row = |m: &str| IsaRow::from(t.get(m).unwrap()).layout;
        assert_eq!(row("JUN"), "0100 AAAA AAAA AAAA");
        assert_eq!(row("FIM"), "0010 RRR0 DDDD DDDD");
        assert_eq!(row("SRC"), "0010 RRR1");
        assert_eq!(row("WR3"), "1110 0111");
        assert_eq!(row("NOP"), "0000 0000");
    }

    #[test]
    fn window_bounds() {
        let img = [0u8, 1, 2, 3, 4, 5];
        assert_eq!(window(&img, 2, Some(3)).unwrap(), &[2, 3, 4]);
        assert_eq!(window(&img, 6, None).unwrap(), &[] as &[u8]);
        assert_eq!(window(&img, 4, Some(2)).unwrap(), &[4, 5]);

        let err = window(&img, 7, None).unwrap_err();
        assert_eq!(err.to_string(), "--skip exceeds file size");
        let err = window(&img, 4, Some(3)).unwrap_err();
        assert_eq!(err.to_string(), "--len exceeds remaining file size after skip");
    }

    #[test]
    fn loader_applies_skip_and_len() {
        let path = std::env::temp_dir().join(format!("i4004_loader_{}.bin", std::process::id()));
        std::fs::write(&path, [0xD5u8, 0x41, 0x23, 0xF0]).unwrap();
        assert_eq!(load_raw_bin(&path, 1, Some(2)).unwrap(), vec![0x41, 0x23]);
        assert_eq!(load_raw_bin(&path, 0, None).unwrap().len(), 4);
        assert!(load_raw_bin(&path, 5, None).is_err());
        assert!(load_raw_bin(&path, 3, Some(2)).is_err());
        let _ = std::fs::remove_file(&path);
    }
}
