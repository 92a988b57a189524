use i4004_asm::{assemble, AsmConfig, AsmError, Assembler, InstructionTable, LineError};
use pretty_assertions::assert_eq;

const PROGRAM: &str = "\
; count down R0 from 5
    LDM 5        ; acc = 5
    XCH 0

    FIM 2 5A
    SRC 3
    ISZ 0 06
    JUN 1 23
  ; trailing comment only
NOP
";

#[test]
fn small_program() {
    let t = InstructionTable::i4004().unwrap();
    let bin = assemble(&t, PROGRAM).unwrap();
    assert_eq!(
        bin,
        vec![0xD5, 0xB0, 0x24, 0x5A, 0x27, 0x70, 0x06, 0x41, 0x23, 0x00]
    );
}

#[test]
fn blank_and_comment_lines_contribute_nothing() {
    let t = InstructionTable::i4004().unwrap();
    let bin = assemble(&t, "\n\n   \n; only comments\n\t; here\n").unwrap();
    assert!(bin.is_empty());

    let mut asm = Assembler::new(&t);
    assert_eq!(asm.assemble_line("   ; nothing").unwrap(), 0);
    assert_eq!(asm.assemble_line("CLC").unwrap(), 1);
    assert_eq!(asm.code().as_bytes(), &[0xF1]);
}

#[test]
fn reassembly_is_identical() {
    let t = InstructionTable::i4004().unwrap();
    let a = assemble(&t, PROGRAM).unwrap();
    let b = assemble(&t, PROGRAM).unwrap();
    assert_eq!(a, b);
}

#[test]
fn first_error_stops_with_line_number() {
    let t = InstructionTable::i4004().unwrap();
    let src = "NOP\n\nXYZ\nJUN\n";
    let err = assemble(&t, src).unwrap_err();
    assert_eq!(
        err,
        LineError { line: 3, source: AsmError::UnknownMnemonic { mnemonic: "XYZ".into() } }
    );
    assert_eq!(err.to_string(), "line 3: Invalid mnemonic `XYZ`");
}

#[test]
fn arity_errors_carry_line() {
    let t = InstructionTable::i4004().unwrap();
    let err = assemble(&t, "JUN\n").unwrap_err();
    assert_eq!(err.line, 1);
    assert!(matches!(err.source, AsmError::TooFewModifiers { .. }));

    let err = assemble(&t, "CLB\nNOP 1\n").unwrap_err();
    assert_eq!(err.line, 2);
    assert!(matches!(err.source, AsmError::TooManyModifiers { .. }));
}

#[test]
fn bad_operand_is_reported() {
    let t = InstructionTable::i4004().unwrap();
    let err = assemble(&t, "LDM G\n").unwrap_err();
    assert_eq!(err.source, AsmError::InvalidOperand { token: "G".into() });
}

#[test]
fn overflow_hits_exact_byte() {
    let t = InstructionTable::i4004().unwrap();
    let mut asm = Assembler::with_config(&t, AsmConfig { max_code: 4 });
    // 3 bytes fit, the second byte of this JUN is byte 5
    asm.assemble_source("NOP\nNOP\nNOP\n").unwrap();
    let err = asm.assemble_line("JUN 0 0").unwrap_err();
    assert_eq!(err, AsmError::CodeOverflow { capacity: 4 });
    assert_eq!(asm.code().len(), 4);

    // exactly full is fine
    let mut asm = Assembler::with_config(&t, AsmConfig { max_code: 4 });
    asm.assemble_source("FIM 0 1\nJUN 0 0\n").unwrap();
    assert_eq!(asm.finish(), vec![0x20, 0x01, 0x40, 0x00]);
}

#[test]
fn default_capacity_is_4096() {
    let t = InstructionTable::i4004().unwrap();
    let src = "NOP\n".repeat(4096);
    assert_eq!(assemble(&t, &src).unwrap().len(), 4096);

    let src = "NOP\n".repeat(4097);
    let err = assemble(&t, &src).unwrap_err();
    assert_eq!(err.line, 4097);
    assert_eq!(err.source, AsmError::CodeOverflow { capacity: 4096 });
}

#[test]
fn independent_sessions_share_a_table() {
    let t = InstructionTable::i4004().unwrap();
    let mut a = Assembler::new(&t);
    let mut b = Assembler::new(&t);
    a.assemble_line("IAC").unwrap();
    b.assemble_line("RAL").unwrap();
    a.assemble_line("RAR").unwrap();
    assert_eq!(a.finish(), vec![0xF2, 0xF6]);
    assert_eq!(b.finish(), vec![0xF5]);
}
