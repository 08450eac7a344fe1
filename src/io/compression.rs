//! Opening inputs as transparently decompressed byte streams
//!
//! A [`DataSource`] is opened once per scan. Gzip input (including bgzip and
//! other multi-member files) is detected from its magic bytes and decoded on
//! the fly; anything else is passed through unchanged. Large plain files are
//! memory-mapped.

use crate::error::{Result, TabscanError};
use crate::io::stream::ReadStream;
use flate2::bufread::MultiGzDecoder;
use memmap2::Mmap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

/// Memory-mapped file threshold (50 MB)
pub const MMAP_THRESHOLD: u64 = 50 * 1024 * 1024;

/// Gzip member magic bytes
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Compression detected on an opened source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    /// Plain bytes
    None,
    /// One or more gzip members
    Gzip,
}

impl Compression {
    /// Short name for diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            Compression::None => "none",
            Compression::Gzip => "gzip",
        }
    }
}

/// Input location for a scan
#[derive(Debug, Clone)]
pub enum DataSource {
    /// Local file path
    Local(PathBuf),
}

impl DataSource {
    /// Create a local file data source
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        DataSource::Local(path.as_ref().to_path_buf())
    }

    /// Path of the source
    pub fn path(&self) -> &Path {
        match self {
            DataSource::Local(path) => path,
        }
    }

    /// Open the data source and return a buffered reader over the raw bytes
    ///
    /// # Errors
    ///
    /// Returns [`TabscanError::Open`] if the file is missing or unreadable.
    pub fn open(&self) -> Result<Box<dyn BufRead + Send>> {
        match self {
            DataSource::Local(path) => open_local_file(path).map_err(|source| TabscanError::Open {
                path: path.clone(),
                source,
            }),
        }
    }

    /// Open the source as a decompressed [`ByteStream`](crate::io::ByteStream)
    pub fn open_stream(&self) -> Result<ReadStream<CompressedReader>> {
        CompressedReader::new(self).map(ReadStream::new)
    }
}

/// Open a local file, memory-mapping it at or above [`MMAP_THRESHOLD`]
fn open_local_file(path: &Path) -> io::Result<Box<dyn BufRead + Send>> {
    let metadata = std::fs::metadata(path)?;

    if metadata.is_file() && metadata.len() >= MMAP_THRESHOLD {
        open_mmap_file(path)
    } else {
        let file = File::open(path)?;
        Ok(Box::new(BufReader::new(file)))
    }
}

fn open_mmap_file(path: &Path) -> io::Result<Box<dyn BufRead + Send>> {
    let file = File::open(path)?;
    // The mapping is read-only and owned by the returned cursor.
    let mmap = unsafe { Mmap::map(&file)? };
    Ok(Box::new(io::Cursor::new(mmap)))
}

/// Reader that decompresses gzip input and passes plain input through
///
/// # Example
///
/// ```no_run
/// use tabscan::io::{CompressedReader, DataSource};
/// use std::io::Read;
///
/// # fn main() -> tabscan::Result<()> {
/// let source = DataSource::from_path("genotypes.tsv.gz");
/// let mut reader = CompressedReader::new(&source)?;
/// let mut text = String::new();
/// reader.read_to_string(&mut text).map_err(|e| tabscan::TabscanError::Stream(e.to_string()))?;
/// # Ok(())
/// # }
/// ```
pub struct CompressedReader {
    inner: Box<dyn Read + Send>,
    compression: Compression,
}

impl CompressedReader {
    /// Open `source` and pick a decoder from its first two bytes
    ///
    /// # Errors
    ///
    /// Returns [`TabscanError::Open`] if the source cannot be opened or its
    /// first bytes cannot be read.
    pub fn new(source: &DataSource) -> Result<Self> {
        let mut reader = source.open()?;

        let is_gzipped = {
            let peeked = reader.fill_buf().map_err(|e| TabscanError::Open {
                path: source.path().to_path_buf(),
                source: e,
            })?;
            peeked.starts_with(&GZIP_MAGIC)
        };

        if is_gzipped {
            log::debug!("{}: gzip input", source.path().display());
            Ok(Self {
                inner: Box::new(MultiGzDecoder::new(reader)),
                compression: Compression::Gzip,
            })
        } else {
            Ok(Self {
                inner: Box::new(reader),
                compression: Compression::None,
            })
        }
    }

    /// Compression detected when the source was opened
    pub fn compression(&self) -> Compression {
        self.compression
    }
}

impl Read for CompressedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}
