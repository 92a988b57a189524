use crate::error::AsmError;

/// One non-blank source line split into mnemonic and operand values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine<'a> {
    pub mnemonic: &'a str,
    pub operands: Vec<u32>,
}

/// Drops everything from the first `;`, and any line terminator.
pub fn strip_comment(line: &str) -> &str {
    let end = line.find([';', '\n', '\r']).unwrap_or(line.len());
    &line[..end]
}

/// Parses a hex literal; a `0x`/`0X` prefix is tolerated. Literals wider
/// than 32 bits keep their low bits.
pub fn parse_hex(tok: &str) -> Result<u32, AsmError> {
    let digits = tok
        .strip_prefix("0x")
        .or_else(|| tok.strip_prefix("0X"))
        .unwrap_or(tok);
    if digits.is_empty() {
        return Err(AsmError::InvalidOperand { token: tok.to_string() });
    }
    digits
        .chars()
        .try_fold(0u32, |acc, c| c.to_digit(16).map(|d| acc.wrapping_shl(4) | d))
        .ok_or_else(|| AsmError::InvalidOperand { token: tok.to_string() })
}

/// Returns `Ok(None)` for blank and comment-only lines.
pub fn parse_line(line: &str) -> Result<Option<ParsedLine<'_>>, AsmError> {
    let mut toks = strip_comment(line).split_whitespace();
    let Some(mnemonic) = toks.next() else {
        return Ok(None);
    };
    let operands = toks.map(parse_hex).collect::<Result<Vec<_>, _>>()?;
    Ok(Some(ParsedLine { mnemonic, operands }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_comment_lines() {
        assert_eq!(parse_line(""), Ok(None));
        assert_eq!(parse_line("   \t "), Ok(None));
        assert_eq!(parse_line("; just a comment"), Ok(None));
        assert_eq!(parse_line("    ; indented comment\n"), Ok(None));
    }

    #[test]
    fn mnemonic_and_operands() {
        let p = parse_line("  JUN 1 23 ; far jump\n").unwrap().unwrap();
        assert_eq!(p.mnemonic, "JUN");
        assert_eq!(p.operands, vec![0x1, 0x23]);

        let p = parse_line("FIM 0x2 5a").unwrap().unwrap();
        assert_eq!(p.operands, vec![0x2, 0x5A]);

        let p = parse_line("CLB").unwrap().unwrap();
        assert!(p.operands.is_empty());
    }

    #[test]
    fn counts_every_trailing_token() {
        let p = parse_line("LDM 1 2 3").unwrap().unwrap();
        assert_eq!(p.operands.len(), 3);
    }

    #[test]
    fn rejects_non_hex() {
        assert_eq!(
            parse_line("LDM zz"),
            Err(AsmError::InvalidOperand { token: "zz".into() })
        );
        assert!(parse_hex("+1").is_err());
        assert!(parse_hex("0x").is_err());
        assert!(parse_hex("1_0").is_err());
    }

    #[test]
    fn long_literals_keep_low_bits() {
        assert_eq!(parse_hex("100000005"), Ok(0x5));
        assert_eq!(parse_hex("0x1234567890AB"), Ok(0x567890AB));
        assert_eq!(parse_hex("ffffffff"), Ok(u32::MAX));
    }
}
