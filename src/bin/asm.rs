use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use i4004_asm::{Assembler, InstructionTable};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Intel 4004 assembler: one instruction per line, hex operands"
)]
struct Opts {
    /// Assembly source file
    #[arg(value_name = "INPUT_FILE")]
    input: PathBuf,
    /// Raw binary to write
    #[arg(value_name = "OUTPUT_FILE")]
    output: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let opts = Opts::parse();
    let table = InstructionTable::i4004()?;

    let src = fs::read_to_string(&opts.input)
        .with_context(|| format!("Cannot open input file {}", opts.input.display()))?;

    let mut asm = Assembler::new(&table);
    asm.assemble_source(&src)
        .with_context(|| format!("{}", opts.input.display()))?;
    let bin = asm.finish();

    fs::write(&opts.output, &bin)
        .with_context(|| format!("Cannot open output file {}", opts.output.display()))?;
    Ok(())
}
