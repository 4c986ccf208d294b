//! Error kinds surfaced to callers of the coder and to the `arcode` binary.

use std::io;
use std::path::PathBuf;

/// Everything that can go wrong driving the coder end to end.
#[derive(thiserror::Error, Debug)]
pub enum CoderError {
    /// Could not open or create one of the two files named on the command line.
    #[error("failed to open {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A magic header (table or data section) did not match what was expected.
    #[error("invalid {section} header: expected {expected:?}, found {found:?}")]
    InvalidHeader {
        section: &'static str,
        expected: Vec<u8>,
        found: Vec<u8>,
    },

    /// The compressed stream ended before all `N` symbols had been decoded.
    #[error("premature end of input: decoded {decoded} of {expected} symbols")]
    PrematureEnd { decoded: u64, expected: u64 },

    /// Wrong subcommand or missing/conflicting arguments on the command line.
    #[error("usage error: {0}")]
    UsageError(String),

    /// Any other I/O failure while reading or writing the stream.
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, CoderError>;
