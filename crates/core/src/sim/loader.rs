//! Program Loader.
//!
//! This module places an executable image into simulator memory. It performs:
//! 1. **ELF loading:** Copies loadable segments, resolves the entry point,
//!    and harvests function symbols for disassembly annotation.
//! 2. **Flat binaries:** Copies a raw image to a caller-chosen base address.
//!
//! The symbol table is cosmetic; a stripped image loads without one.

use std::fs;
use std::path::Path;

use object::{File, Object, ObjectSegment, ObjectSymbol, SymbolKind};
use thiserror::Error;

use crate::common::symbols::SymbolTable;
use crate::memory::Memory;

/// Errors produced while placing a program into memory.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The image file could not be read from disk.
    #[error("could not read '{path}': {source}")]
    Io {
        /// Path that failed to read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The image is not a parseable ELF object.
    #[error("could not parse ELF image: {0}")]
    Parse(#[from] object::read::Error),

    /// A segment or the entry point lies outside the 32-bit address space.
    #[error("address {0:#x} does not fit a 32-bit address space")]
    AddressOutOfRange(u64),
}

/// A successfully loaded program.
#[derive(Clone, Debug)]
pub struct LoadedProgram {
    /// Execution entry point.
    pub entry: u32,
    /// Function symbols harvested from the image (possibly empty).
    pub symbols: SymbolTable,
}

/// Loads an ELF image into memory.
///
/// Copies every loadable segment to its linked address, returns the entry
/// point, and collects defined function symbols.
///
/// # Errors
///
/// Returns a [`LoadError`] when the image does not parse as ELF or uses
/// addresses beyond 32 bits.
pub fn load_elf(mem: &mut impl Memory, data: &[u8]) -> Result<LoadedProgram, LoadError> {
    let file = File::parse(data)?;

    for segment in file.segments() {
        let addr = to_addr32(segment.address())?;
        let bytes = segment.data()?;
        mem.write_block(addr, bytes);
    }

    let entry = to_addr32(file.entry())?;

    let mut symbols = SymbolTable::new();
    for sym in file.symbols() {
        if sym.kind() != SymbolKind::Text || !sym.is_definition() {
            continue;
        }
        if let Ok(name) = sym.name() {
            if !name.is_empty() {
                symbols.insert(to_addr32(sym.address())?, name);
            }
        }
    }

    tracing::debug!(
        entry,
        symbols = symbols.len(),
        "loaded ELF image"
    );

    Ok(LoadedProgram { entry, symbols })
}

/// Loads an ELF image from a file on disk.
///
/// # Errors
///
/// Returns a [`LoadError`] when the file cannot be read or parsed.
pub fn load_elf_file(mem: &mut impl Memory, path: &Path) -> Result<LoadedProgram, LoadError> {
    let data = fs::read(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_elf(mem, &data)
}

/// Copies a flat binary image to `base` and treats it as the entry point.
pub fn load_binary(mem: &mut impl Memory, data: &[u8], base: u32) -> LoadedProgram {
    mem.write_block(base, data);
    LoadedProgram {
        entry: base,
        symbols: SymbolTable::new(),
    }
}

/// Narrows a 64-bit image address to the simulator's 32-bit address space.
fn to_addr32(addr: u64) -> Result<u32, LoadError> {
    u32::try_from(addr).map_err(|_| LoadError::AddressOutOfRange(addr))
}
