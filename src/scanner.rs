//! Path-level entry points
//!
//! [`TableScanner`] wires a [`ScanConfig`], an optional progress callback and
//! an optional [`CancelToken`] into a [`ChunkedLineReader`], then runs either
//! consumer over it. [`file_stats`] and [`read_matrix`] mirror the classic
//! call surface with its defaults.

use crate::config::{delimiter_from_char, ScanConfig};
use crate::error::{Partial, ScanResult};
use crate::io::{ByteStream, CancelToken, ChunkedLineReader, DataSource, ProgressCallback};
use crate::operations::{matrix, stats};
use crate::types::{FileStats, RowWindow, StringMatrix};
use std::fmt;
use std::path::Path;

/// Configured scanner for one statistics or matrix pass
///
/// # Example
///
/// ```no_run
/// use tabscan::{RowWindow, ScanConfig, TableScanner};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let stats = TableScanner::new()
///     .with_config(ScanConfig::default().with_verbose(false))
///     .stats_from_path("genotypes.tsv.gz", RowWindow::new(1, None))?;
/// println!("{}", stats);
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct TableScanner {
    config: ScanConfig,
    progress: Option<ProgressCallback>,
    cancel: Option<CancelToken>,
}

impl TableScanner {
    /// Scanner with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the scan settings
    pub fn with_config(mut self, config: ScanConfig) -> Self {
        self.config = config;
        self
    }

    /// Deliver progress events to `callback`
    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Abort at the next chunk boundary once `token` is cancelled
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Settings in use
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Count rows and last-line columns of the file at `path`
    pub fn stats_from_path<P: AsRef<Path>>(self, path: P, window: RowWindow) -> ScanResult<FileStats> {
        let path = path.as_ref();
        let result = match DataSource::from_path(path).open_stream() {
            Ok(stream) => self.stats_from_stream(stream, window),
            Err(e) => Err(Partial::new(FileStats::default(), e)),
        };
        report(path, result)
    }

    /// Count rows and last-line columns of an already opened stream
    pub fn stats_from_stream<S: ByteStream>(self, stream: S, window: RowWindow) -> ScanResult<FileStats> {
        let delimiter = self.config.delimiter;
        match self.reader(stream) {
            Ok(lines) => stats::compute(lines, delimiter, window),
            Err(e) => Err(Partial::new(FileStats::default(), e)),
        }
    }

    /// Load an `nrows × ncols` window of the file at `path` after `skip` lines
    ///
    /// Reading stops once the grid is full; with `verbose` set the progress
    /// sink still receives a completion event for the lines read up to then.
    pub fn matrix_from_path<P: AsRef<Path>>(
        self,
        path: P,
        nrows: usize,
        ncols: usize,
        skip: u64,
    ) -> ScanResult<StringMatrix> {
        let path = path.as_ref();
        let result = match DataSource::from_path(path).open_stream() {
            Ok(stream) => self.matrix_from_stream(stream, nrows, ncols, skip),
            Err(e) => Err(Partial::new(empty_grid(nrows, ncols), e)),
        };
        report(path, result)
    }

    /// Load an `nrows × ncols` window of an already opened stream
    pub fn matrix_from_stream<S: ByteStream>(
        self,
        stream: S,
        nrows: usize,
        ncols: usize,
        skip: u64,
    ) -> ScanResult<StringMatrix> {
        let delimiter = self.config.delimiter;
        let mut lines = match self.reader(stream) {
            Ok(lines) => lines,
            Err(e) => return Err(Partial::new(empty_grid(nrows, ncols), e)),
        };
        let result = matrix::load(lines.by_ref(), delimiter, nrows, ncols, skip);
        if result.is_ok() {
            lines.close();
        }
        result
    }

    fn reader<S: ByteStream>(self, stream: S) -> crate::Result<ChunkedLineReader<S>> {
        let mut reader = ChunkedLineReader::new(stream, &self.config)?;
        if let Some(callback) = self.progress {
            reader = reader.with_progress(callback);
        }
        if let Some(token) = self.cancel {
            reader = reader.with_cancel_token(token);
        }
        Ok(reader)
    }
}

/// Grid handed back when a matrix scan fails before reading
fn empty_grid(nrows: usize, ncols: usize) -> StringMatrix {
    StringMatrix::try_new(nrows, ncols).unwrap_or_default()
}

fn report<T: fmt::Debug>(path: &Path, result: ScanResult<T>) -> ScanResult<T> {
    if let Err(failure) = &result {
        if failure.error().is_cancelled() {
            log::warn!("{}: {}", path.display(), failure.error());
        } else {
            log::error!("{}: {}", path.display(), failure.error());
        }
    }
    result
}

/// Row and column counts for a delimited, optionally gzipped file
///
/// `nrows < 0` retains every line after `skip`. Defaults in the classic
/// interface are `sep = '\t'`, `nrows = -1`, `skip = 0`, `verbose = true`.
///
/// ```no_run
/// let stats = tabscan::file_stats("calls.tsv.gz", '\t', -1, 0, false)?;
/// println!("{} rows, {} columns", stats.total_rows, stats.columns);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn file_stats<P: AsRef<Path>>(
    path: P,
    sep: char,
    nrows: i64,
    skip: u64,
    verbose: bool,
) -> ScanResult<FileStats> {
    let delimiter = delimiter_from_char(sep).map_err(|e| Partial::new(FileStats::default(), e))?;
    let config = ScanConfig::default()
        .with_delimiter(delimiter)
        .with_verbose(verbose);
    TableScanner::new()
        .with_config(config)
        .stats_from_path(path, RowWindow::from_signed(skip, nrows))
}

/// Read an `nrows × ncols` block of text cells after `skip` lines
///
/// Defaults in the classic interface are `sep = '\t'`, `nrows = 1`,
/// `ncols = 1`, `skip = 0`, `verbose = true`.
pub fn read_matrix<P: AsRef<Path>>(
    path: P,
    sep: char,
    nrows: usize,
    ncols: usize,
    skip: u64,
    verbose: bool,
) -> ScanResult<StringMatrix> {
    let delimiter =
        delimiter_from_char(sep).map_err(|e| Partial::new(empty_grid(nrows, ncols), e))?;
    let config = ScanConfig::default()
        .with_delimiter(delimiter)
        .with_verbose(verbose);
    TableScanner::new()
        .with_config(config)
        .matrix_from_path(path, nrows, ncols, skip)
}
