//! Program loading and the public simulation entry point.
//!
//! This module provides:
//! 1. **Loader:** ELF segment loading, entry-point discovery, and symbol
//!    harvesting; flat binary images as a fallback.
//! 2. **Simulator:** The one-call `simulate` entry point over an executor.

/// ELF and flat-binary program loading.
pub mod loader;

/// The public simulation entry point.
pub mod simulator;
