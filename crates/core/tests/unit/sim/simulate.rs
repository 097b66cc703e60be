//! Public entry point tests.
//!
//! Drives `simulate` end-to-end: statistics, the per-instruction trace log
//! (format, taken-branch marker, file sinks), and symbol annotation.

use std::io::Write;

use rv32sim_core::common::symbols::SymbolTable;
use rv32sim_core::isa::rv32i::funct3;
use rv32sim_core::{simulate, SparseMemory};

use crate::common::*;

fn load_program(words: &[u32]) -> SparseMemory {
    let mut mem = SparseMemory::new();
    load_words(&mut mem, 0, words);
    mem
}

#[test]
fn simulate_returns_the_statistics_snapshot() {
    let mut mem = load_program(&[addi(10, 0, 5), addi(17, 0, 93), ecall()]);
    let stat = simulate(&mut mem, 0, None, None);
    assert_eq!(stat.instructions_retired, 3);
    assert_eq!(stat.not_taken.predictions, 0);
}

#[test]
fn simulate_honours_the_start_address() {
    let mut mem = SparseMemory::new();
    load_words(&mut mem, 0x400, &halt_sequence());
    let stat = simulate(&mut mem, 0x400, None, None);
    assert_eq!(stat.instructions_retired, 2);
}

#[test]
fn trace_log_renders_one_line_per_instruction() {
    let mut mem = load_program(&[addi(10, 0, 5), addi(17, 0, 93), ecall()]);
    let mut sink: Vec<u8> = Vec::new();
    let stat = simulate(&mut mem, 0, Some(&mut sink), None);
    assert_eq!(stat.instructions_retired, 3);

    let log = String::from_utf8(sink).expect("log is UTF-8");
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "     1 => 00000000 : 00500513    addi a0, zero, 5");
    assert_eq!(lines[1], "     2 => 00000004 : 05d00893    addi a7, zero, 93");
    assert_eq!(lines[2], "     3 => 00000008 : 00000073    ecall");
}

#[test]
fn trace_log_marks_taken_branches() {
    let mut words = vec![
        branch(funct3::BEQ, 0, 0, 8), // taken
        nop(),                        // skipped
        branch(funct3::BNE, 0, 0, 8), // not taken
    ];
    words.extend(halt_sequence());
    let mut mem = load_program(&words);

    let mut sink: Vec<u8> = Vec::new();
    let _ = simulate(&mut mem, 0, Some(&mut sink), None);

    let log = String::from_utf8(sink).expect("log is UTF-8");
    let lines: Vec<&str> = log.lines().collect();
    assert!(lines[0].ends_with("beq zero, zero, 0x8 {T}"));
    assert!(
        lines[1].ends_with("bne zero, zero, 0x10"),
        "fall-through branches carry no marker: {}",
        lines[1]
    );
}

#[test]
fn trace_log_annotates_symbols() {
    let mut words = vec![jal(1, 8), nop()];
    words.extend(halt_sequence());
    let mut mem = load_program(&words);

    let mut symbols = SymbolTable::new();
    symbols.insert(8, "target_fn");

    let mut sink: Vec<u8> = Vec::new();
    let _ = simulate(&mut mem, 0, Some(&mut sink), Some(&symbols));

    let log = String::from_utf8(sink).expect("log is UTF-8");
    assert!(
        log.lines().next().expect("first line").ends_with("jal ra, 0x8 <target_fn>"),
        "jal line should carry the symbol: {log}"
    );
}

#[test]
fn trace_log_writes_through_a_file_sink() {
    let mut mem = load_program(&[addi(10, 0, 5), addi(17, 0, 93), ecall()]);

    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("trace.log");
    let mut file = std::fs::File::create(&path).expect("create log");

    let _ = simulate(&mut mem, 0, Some(&mut file), None);
    file.flush().expect("flush log");
    drop(file);

    let contents = std::fs::read_to_string(&path).expect("read log back");
    assert_eq!(contents.lines().count(), 3);
    assert!(contents.contains("ecall"));
}

#[test]
fn fatal_runs_still_return_statistics() {
    let mut mem = load_program(&[nop(), 0xFFFF_FFFF]);
    let stat = simulate(&mut mem, 0, None, None);
    assert_eq!(stat.instructions_retired, 1);
}

#[test]
fn statistics_serialize_to_json() {
    let mut mem = load_program(&[addi(10, 0, 5), addi(17, 0, 93), ecall()]);
    let stat = simulate(&mut mem, 0, None, None);

    let json = serde_json::to_value(&stat).expect("serialize");
    assert_eq!(json["instructions_retired"], 3);
    assert_eq!(json["bimodal"]["predictions"].as_array().map(Vec::len), Some(4));
}
