use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::fmt::Write as _;
use std::path::PathBuf;

use i4004_asm::disasm::{disassemble, Line};
use i4004_asm::isa::i4004::I4004Decoder;
use i4004_asm::InstructionTable;
use i4004_disasm::{load_raw_bin, IsaRow};

#[derive(Parser, Debug)]
#[command(author, version, about = "Intel 4004 disassembler CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Disassemble a raw binary from start to end
    List {
        /// Input binary path
        #[arg(value_name = "BINFILE")]
        input: PathBuf,
        /// Skip N bytes at start of file before loading
        #[arg(long, default_value_t = 0usize)]
        skip: usize,
        /// Limit bytes loaded (default: to EOF after --skip)
        #[arg(long)]
        len: Option<usize>,
        /// Show instruction bytes
        #[arg(long)]
        show_bytes: bool,
        /// Output format: text or json
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Write output to file instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Print the instruction table
    Isa {
        /// Output format: text or json
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat { Text, Json }

fn render_text(lines: &[Line], show_bytes: bool) -> String {
    let mut buf = String::new();
    for l in lines {
        match l {
            Line::Instr { addr, bytes, text } => {
                let _ = write!(buf, "{addr:#05x}: ");
                if show_bytes {
                    let hex = bytes.iter().map(|b| format!("{b:02X}")).collect::<Vec<_>>().join(" ");
                    let _ = write!(buf, "{hex:<6} ");
                }
                let _ = writeln!(buf, "{text}");
            }
            Line::Unknown { addr, byte } => {
                let _ = writeln!(buf, "{addr:#05x}: ; unknown byte {byte:02X}");
            }
        }
    }
    buf
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Command::List { input, skip, len, show_bytes, format, out } => {
            let img = load_raw_bin(&input, skip, len)?;
            let dec = I4004Decoder::new();
            let lines = disassemble(&dec, &img);
            let rendered = match format {
                OutputFormat::Text => render_text(&lines, show_bytes),
                OutputFormat::Json => serde_json::to_string_pretty(&lines)? + "\n",
            };
            if let Some(path) = out { std::fs::write(path, rendered)?; } else { print!("{rendered}"); }
        }
        Command::Isa { format } => {
            let table = InstructionTable::i4004()?;
            let rows: Vec<IsaRow> = table.iter().map(IsaRow::from).collect();
            match format {
                OutputFormat::Text => {
                    println!("{:<6} {:<6} {:<4} {}", "mnem", "opcode", "args", "layout");
                    for r in &rows {
                        println!("{:<6} {:#04x}   {:<4} {}", r.mnemonic, r.opcode, r.operands, r.layout);
                    }
                }
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
            }
        }
    }
    Ok(())
}
