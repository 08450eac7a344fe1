//! Scan configuration
//!
//! [`ScanConfig`] gathers the knobs shared by every scan: the field
//! delimiter, the read chunk capacity, and how often verbose progress is
//! reported. Defaults match the classic `read.table`-style call surface:
//! tab-delimited, verbose, 4 KB chunks, a progress tick every 1000 lines.

use crate::error::{Result, TabscanError};

/// Chunk buffer capacity in bytes (each read requests one byte less)
pub const DEFAULT_CHUNK_CAPACITY: usize = 0x1000;

/// Lines between verbose progress notifications
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 1000;

/// Default field delimiter (tab)
pub const DEFAULT_DELIMITER: u8 = b'\t';

/// Record delimiter; not configurable
pub const LINE_DELIMITER: u8 = b'\n';

/// Settings shared by the statistics and matrix scans
///
/// # Example
///
/// ```
/// use tabscan::ScanConfig;
///
/// let config = ScanConfig::default()
///     .with_delimiter(b',')
///     .with_verbose(false);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfig {
    /// Field delimiter byte
    pub delimiter: u8,
    /// Emit progress notifications
    pub verbose: bool,
    /// Chunk buffer capacity; each read requests `chunk_capacity - 1` bytes
    pub chunk_capacity: usize,
    /// Lines between progress notifications
    pub progress_interval: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            verbose: true,
            chunk_capacity: DEFAULT_CHUNK_CAPACITY,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl ScanConfig {
    /// Set the field delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Enable or disable progress notifications
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Set the chunk buffer capacity
    pub fn with_chunk_capacity(mut self, chunk_capacity: usize) -> Self {
        self.chunk_capacity = chunk_capacity;
        self
    }

    /// Set the number of lines between progress notifications
    pub fn with_progress_interval(mut self, progress_interval: u64) -> Self {
        self.progress_interval = progress_interval;
        self
    }

    /// Bytes requested from the stream per read
    pub fn read_size(&self) -> usize {
        self.chunk_capacity.saturating_sub(1)
    }

    /// Check the settings before a scan starts
    ///
    /// # Errors
    ///
    /// Returns [`TabscanError::InvalidConfig`] if the chunk capacity leaves no
    /// room for data, the progress interval is zero, or the delimiter is the
    /// newline byte.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_capacity < 2 {
            return Err(TabscanError::InvalidConfig(format!(
                "chunk capacity must be at least 2 bytes, got {}",
                self.chunk_capacity
            )));
        }
        if self.progress_interval == 0 {
            return Err(TabscanError::InvalidConfig(
                "progress interval must be non-zero".to_string(),
            ));
        }
        if self.delimiter == LINE_DELIMITER {
            return Err(TabscanError::InvalidConfig(
                "field delimiter cannot be the newline byte".to_string(),
            ));
        }
        Ok(())
    }
}

/// Convert a single-character separator into a delimiter byte
///
/// # Errors
///
/// Returns [`TabscanError::InvalidConfig`] for characters outside ASCII,
/// which cannot be matched as a single byte.
pub fn delimiter_from_char(sep: char) -> Result<u8> {
    if sep.is_ascii() {
        Ok(sep as u8)
    } else {
        Err(TabscanError::InvalidConfig(format!(
            "separator {:?} is not a single-byte character",
            sep
        )))
    }
}
