use std::path::PathBuf;

use thiserror::Error;

/// Every failure the simulator can report.
///
/// None of these are recovered from inside the library; they travel up to the
/// binary, which prints the diagnostic and terminates the process.
#[derive(Debug, Error)]
pub enum LifeError {
    #[error("usage: {program} input_file output_file")]
    Usage { program: String },

    #[error("error opening {kind} file {}: {source}", path.display())]
    FileOpen {
        /// `"input"` or `"output"`
        kind: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot allocate cell buffers for a {width}x{height} world")]
    Allocation { width: usize, height: usize },

    #[error("world dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("({x}, {y}) does not have 8 neighbors")]
    InvariantViolation { x: usize, y: usize },

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("invalid value {value:?} for {name}")]
    Config { name: &'static str, value: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LifeError>;
