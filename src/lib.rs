//! tabscan: streaming reader for large delimited tables
//!
//! # Overview
//!
//! tabscan walks plain or gzip-compressed delimited text in fixed-size chunks,
//! so memory stays bounded by one chunk plus the fragment of the line that
//! straddles a chunk boundary, whatever the size of the input.
//!
//! ## Key Features
//!
//! - **Streaming**: Lines are reassembled across chunk boundaries on the fly
//! - **Transparent gzip**: Detected from the magic bytes, multi-member aware
//! - **Row windows**: Skip a header block and bound the number of rows kept
//! - **Partial results**: Failures hand back what was gathered before them
//! - **Cancellation**: A shared token stops a scan at the next chunk boundary
//!
//! ## Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Row/column counts, skipping a one-line header
//! let stats = tabscan::file_stats("genotypes.tsv.gz", '\t', -1, 1, false)?;
//! println!("{}", stats);
//!
//! // First 10 rows, 3 columns, after the header
//! let matrix = tabscan::read_matrix("genotypes.tsv.gz", '\t', 10, 3, 1, false)?;
//! for row in matrix.rows() {
//!     println!("{}", row.join(" | "));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`io`]: Byte streams, gzip detection, chunked line reading, progress
//! - [`formats`]: Line and field splitting over raw bytes
//! - [`operations`]: Statistics and matrix consumers
//! - [`scanner`]: Path-level entry points
//! - [`config`]: Scan settings and defaults

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod formats;
pub mod io;
pub mod operations;
pub mod scanner;
pub mod types;

pub use config::ScanConfig;
pub use error::{Partial, Result, ScanResult, TabscanError};
pub use io::{
    ByteStream, CancelToken, ChunkedLineReader, DataSource, ProgressCallback, ProgressEvent,
    ReadStream,
};
pub use scanner::{file_stats, read_matrix, TableScanner};
pub use types::{FileStats, RowWindow, StringMatrix};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
