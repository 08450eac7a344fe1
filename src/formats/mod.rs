//! Delimited text primitives.
//!
//! - [`delimited`]: line splitting with carry of the trailing fragment, and
//!   single-byte field splitting

pub mod delimited;

pub use delimited::{count_fields, split_fields, LineSplitter};
