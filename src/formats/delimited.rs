//! Line and field splitting for delimited text.
//!
//! Both splitters work on raw bytes and never trim, unquote or unescape:
//! a delimiter byte always separates, and empty pieces are preserved.
//!
//! # Examples
//!
//! ```
//! use tabscan::formats::delimited::{split_fields, LineSplitter};
//!
//! let mut lines = LineSplitter::new(b"a\tb\nc\td\ne", b'\n');
//! assert_eq!(lines.next(), Some(&b"a\tb"[..]));
//! assert_eq!(lines.next(), Some(&b"c\td"[..]));
//! assert_eq!(lines.next(), None);
//! assert_eq!(lines.remainder(), b"e");
//!
//! let fields = split_fields(b"a\tb\t\tc", b'\t');
//! assert_eq!(fields, vec![&b"a"[..], b"b", b"", b"c"]);
//! ```

/// Iterator over the complete lines of a byte buffer
///
/// Yields every piece terminated by `delimiter` (without the delimiter).
/// The unterminated tail is not yielded; it is available from
/// [`remainder`](LineSplitter::remainder) once iteration has finished.
#[derive(Debug, Clone)]
pub struct LineSplitter<'a> {
    buf: &'a [u8],
    pos: usize,
    delimiter: u8,
}

impl<'a> LineSplitter<'a> {
    /// Split `buf` on `delimiter`
    pub fn new(buf: &'a [u8], delimiter: u8) -> Self {
        Self {
            buf,
            pos: 0,
            delimiter,
        }
    }

    /// Bytes after the last delimiter seen so far
    ///
    /// After the iterator returns `None` this is the incomplete trailing
    /// fragment (possibly empty).
    pub fn remainder(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }
}

impl<'a> Iterator for LineSplitter<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.buf[self.pos..];
        let end = rest.iter().position(|&b| b == self.delimiter)?;
        self.pos += end + 1;
        Some(&rest[..end])
    }
}

/// Split one line into fields on a single delimiter byte
///
/// An empty line yields a single empty field; leading and trailing
/// delimiters produce empty fields.
pub fn split_fields(line: &[u8], delimiter: u8) -> Vec<&[u8]> {
    line.split(|&b| b == delimiter).collect()
}

/// Number of fields [`split_fields`] would return, without allocating
pub fn count_fields(line: &[u8], delimiter: u8) -> usize {
    line.iter().filter(|&&b| b == delimiter).count() + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_fields_keeps_empty() {
        let fields = split_fields(b"a\tb\t\tc", b'\t');
        assert_eq!(fields, vec![&b"a"[..], b"b", b"", b"c"]);
    }

    #[test]
    fn test_split_fields_empty_line() {
        assert_eq!(split_fields(b"", b'\t'), vec![&b""[..]]);
        assert_eq!(count_fields(b"", b'\t'), 1);
    }

    #[test]
    fn test_split_fields_edge_delimiters() {
        let fields = split_fields(b",a,", b',');
        assert_eq!(fields, vec![&b""[..], b"a", b""]);
        assert_eq!(count_fields(b",a,", b','), 3);
    }

    #[test]
    fn test_split_fields_no_trimming() {
        let fields = split_fields(b" a \t\"b\"\r", b'\t');
        assert_eq!(fields, vec![&b" a "[..], b"\"b\"\r"]);
    }

    #[test]
    fn test_line_splitter_remainder() {
        let mut lines = LineSplitter::new(b"one\ntwo\nthr", b'\n');
        let collected: Vec<_> = lines.by_ref().collect();
        assert_eq!(collected, vec![&b"one"[..], b"two"]);
        assert_eq!(lines.remainder(), b"thr");
    }

    #[test]
    fn test_line_splitter_terminated_buffer() {
        let mut lines = LineSplitter::new(b"one\n\n", b'\n');
        assert_eq!(lines.next(), Some(&b"one"[..]));
        assert_eq!(lines.next(), Some(&b""[..]));
        assert_eq!(lines.next(), None);
        assert!(lines.remainder().is_empty());
    }

    #[test]
    fn test_line_splitter_empty_buffer() {
        let mut lines = LineSplitter::new(b"", b'\n');
        assert_eq!(lines.next(), None);
        assert!(lines.remainder().is_empty());
    }
}
