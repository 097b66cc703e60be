//! RISC-V RV32IM instruction-level simulator CLI.
//!
//! This binary loads a program image, runs it to completion, and prints the
//! execution statistics. It performs:
//! 1. **ELF run:** Load segments, entry point, and symbols from an ELF image.
//! 2. **Flat-binary run:** Copy a raw image to a chosen base address.
//! 3. **Reporting:** Text or JSON statistics; optional per-instruction trace log.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use rv32sim_core::sim::loader;
use rv32sim_core::{Executor, SimConfig, SparseMemory};

#[derive(Parser, Debug)]
#[command(
    name = "rv32sim",
    author,
    version,
    about = "RISC-V RV32IM instruction-level simulator",
    long_about = "Run an RV32IM program and report execution statistics, including \
the accuracy of four scored branch predictors.\n\nExamples:\n  \
rv32sim program.elf\n  rv32sim program.elf --log trace.log\n  \
rv32sim image.bin --bin --base 0x1000 --json"
)]
struct Cli {
    /// Program image to execute (ELF unless --bin is given).
    program: PathBuf,

    /// Treat the image as a flat binary instead of ELF.
    #[arg(long)]
    bin: bool,

    /// Load address (and entry point) for a flat binary.
    #[arg(long, default_value = "0x0", value_parser = parse_addr)]
    base: u32,

    /// Override the entry point.
    #[arg(long, value_parser = parse_addr)]
    start: Option<u32>,

    /// Write a per-instruction trace log to this file.
    #[arg(long)]
    log: Option<PathBuf>,

    /// JSON configuration file (predictor sizing).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print statistics as JSON instead of the text report.
    #[arg(long)]
    json: bool,
}

/// Parses a decimal or `0x`-prefixed hexadecimal address.
fn parse_addr(text: &str) -> Result<u32, String> {
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => text.parse(),
    };
    parsed.map_err(|e| format!("invalid address '{text}': {e}"))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match cli.config {
        Some(ref path) => {
            let text = std::fs::read_to_string(path).unwrap_or_else(|e| {
                eprintln!("error: could not read config '{}': {e}", path.display());
                process::exit(1);
            });
            SimConfig::from_json(&text).unwrap_or_else(|e| {
                eprintln!("error: could not parse config '{}': {e}", path.display());
                process::exit(1);
            })
        }
        None => SimConfig::default(),
    };

    let mut mem = SparseMemory::new();

    let program = if cli.bin {
        let data = std::fs::read(&cli.program).unwrap_or_else(|e| {
            eprintln!("error: could not read '{}': {e}", cli.program.display());
            process::exit(1);
        });
        loader::load_binary(&mut mem, &data, cli.base)
    } else {
        loader::load_elf_file(&mut mem, &cli.program).unwrap_or_else(|e| {
            eprintln!("error: {e}");
            process::exit(1);
        })
    };

    let start = cli.start.unwrap_or(program.entry);

    let mut log_sink = cli.log.as_ref().map(|path| {
        let file = File::create(path).unwrap_or_else(|e| {
            eprintln!("error: could not create log '{}': {e}", path.display());
            process::exit(1);
        });
        BufWriter::new(file)
    });

    let mut executor = Executor::new(&mut mem, start, &config);
    if let Some(ref mut sink) = log_sink {
        executor = executor.with_log(sink);
    }
    if !program.symbols.is_empty() {
        executor = executor.with_symbols(&program.symbols);
    }

    let stat = executor.run();
    let failed = executor.fault().is_some();
    drop(executor);

    // process::exit skips destructors; push the trace out explicitly.
    if let Some(mut sink) = log_sink {
        use std::io::Write;
        let _ = sink.flush();
    }

    if cli.json {
        match serde_json::to_string_pretty(&stat) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("error: could not serialize statistics: {e}");
                process::exit(1);
            }
        }
    } else {
        stat.print();
    }

    if failed {
        process::exit(1);
    }
}
