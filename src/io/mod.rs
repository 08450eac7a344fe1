//! I/O module: byte streams, decompression and chunked line reading
//!
//! Memory stays bounded by one chunk plus the carried fragment of the line
//! currently open, regardless of input size.

pub mod chunked;
pub mod compression;
pub mod progress;
pub mod stream;

pub use chunked::ChunkedLineReader;
pub use compression::{CompressedReader, Compression, DataSource, MMAP_THRESHOLD};
pub use progress::{CancelToken, ProgressCallback, ProgressEvent};
pub use stream::{ByteStream, ReadStream};
