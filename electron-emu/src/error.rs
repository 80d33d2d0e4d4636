//! Errors raised while configuring an Electron.

use thiserror::Error;

/// Machine configuration errors.
///
/// Both are fatal: the machine must not run with a missing or mis-sized ROM.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ElectronError {
    /// A ROM image has the wrong length. For the OS ROM `expected` is the
    /// exact size; for sideways ROMs it is the upper limit.
    #[error("bad ROM size: {actual} bytes (expected {expected})")]
    BadRomSize { expected: usize, actual: usize },

    /// A sideways ROM bank outside 0..16.
    #[error("bad ROM bank {0} (expected 0-15)")]
    BadRomBank(usize),
}
