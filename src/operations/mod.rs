//! Line consumers: row/column statistics and windowed matrix extraction
//!
//! Both consumers take any iterator of `Result<Vec<u8>>` lines, normally a
//! [`ChunkedLineReader`](crate::io::ChunkedLineReader), and hand back their
//! accumulated result alongside the error when the stream fails.

pub mod matrix;
pub mod stats;

pub use matrix::MatrixLoader;
pub use stats::StatsCollector;
