//! Error types for tabscan

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for tabscan operations
pub type Result<T> = std::result::Result<T, TabscanError>;

/// Result of a scan that hands back whatever was accumulated on failure
pub type ScanResult<T> = std::result::Result<T, Partial<T>>;

/// Error types that can occur while scanning a delimited file
#[derive(Debug, Error)]
pub enum TabscanError {
    /// The input could not be opened as a byte stream
    #[error("Failed to open {path:?}: {source}")]
    Open {
        /// Path that failed to open
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Read or decompression error in the middle of the stream
    #[error("Stream error: {0}")]
    Stream(String),

    /// Cancel token observed at a chunk boundary
    #[error("Interrupted after {lines} lines")]
    Cancelled {
        /// Lines emitted before the interrupt was observed
        lines: u64,
    },

    /// A selected row has fewer fields than the requested column count
    #[error("Line {line} has {actual} fields, expected at least {expected}")]
    IndexFault {
        /// 1-based line number in the file
        line: u64,
        /// Requested column count
        expected: usize,
        /// Fields actually present
        actual: usize,
    },

    /// Scan settings that cannot be honoured
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl TabscanError {
    /// Returns `true` for [`TabscanError::Cancelled`].
    pub fn is_cancelled(&self) -> bool {
        matches!(self, TabscanError::Cancelled { .. })
    }
}

/// A failed scan together with the result accumulated before the failure.
///
/// Open failures carry the default (zeroed or empty) value; stream errors,
/// cancellation and index faults carry everything collected up to that point.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct Partial<T: fmt::Debug> {
    /// Value accumulated before the error
    pub partial: T,
    /// What stopped the scan
    #[source]
    pub error: TabscanError,
}

impl<T: fmt::Debug> Partial<T> {
    /// Pair a partial value with the error that interrupted it
    pub fn new(partial: T, error: TabscanError) -> Self {
        Self { partial, error }
    }

    /// Borrow the partial value
    pub fn partial(&self) -> &T {
        &self.partial
    }

    /// Borrow the error
    pub fn error(&self) -> &TabscanError {
        &self.error
    }

    /// Split into the partial value and the error
    pub fn into_parts(self) -> (T, TabscanError) {
        (self.partial, self.error)
    }
}

impl<T: fmt::Debug> From<Partial<T>> for TabscanError {
    fn from(partial: Partial<T>) -> Self {
        partial.error
    }
}
