//! Byte stream abstraction consumed by the chunked line reader
//!
//! A [`ByteStream`] hands out chunks of (already decompressed) bytes and can
//! tell a clean end of stream apart from a read that merely came up short.
//! [`ReadStream`] adapts any [`Read`] implementation.

use std::io::{self, Read};

/// Chunked, forward-only source of bytes
pub trait ByteStream {
    /// Fill `buf` as far as the stream allows and return the byte count
    ///
    /// A count below `buf.len()` is a short read; callers consult
    /// [`is_eof`](ByteStream::is_eof) to decide whether the stream ended
    /// cleanly.
    fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Whether the end of the stream has been reached
    fn is_eof(&self) -> bool;

    /// Error that cut the last read short, if the stream held one back
    ///
    /// Streams that return the bytes decoded before a failure as a short
    /// read hand the failure out here.
    fn take_error(&mut self) -> Option<io::Error> {
        None
    }
}

impl<S: ByteStream + ?Sized> ByteStream for Box<S> {
    fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        (**self).read_chunk(buf)
    }

    fn is_eof(&self) -> bool {
        (**self).is_eof()
    }

    fn take_error(&mut self) -> Option<io::Error> {
        (**self).take_error()
    }
}

/// [`ByteStream`] over any reader
///
/// Keeps reading until the buffer is full or the reader returns 0 bytes,
/// which marks the stream as finished. A reader error after some bytes have
/// been filled ends the read short; the error is held until
/// [`take_error`](ByteStream::take_error) or the next `read_chunk`.
#[derive(Debug)]
pub struct ReadStream<R: Read> {
    inner: R,
    eof: bool,
    pending_error: Option<io::Error>,
}

impl<R: Read> ReadStream<R> {
    /// Wrap a reader
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            eof: false,
            pending_error: None,
        }
    }

    /// Unwrap the reader
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> ByteStream for ReadStream<R> {
    fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if let Some(e) = self.pending_error.take() {
            return Err(e);
        }

        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => {
                    self.eof = true;
                    break;
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) if filled > 0 => {
                    self.pending_error = Some(e);
                    break;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }

    fn is_eof(&self) -> bool {
        self.eof
    }

    fn take_error(&mut self) -> Option<io::Error> {
        self.pending_error.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reader that hands out at most `step` bytes per call
    struct Trickle<'a> {
        data: &'a [u8],
        step: usize,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.step.min(buf.len()).min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn test_read_chunk_fills_buffer() {
        let mut stream = ReadStream::new(Trickle {
            data: b"abcdefghij",
            step: 3,
        });
        let mut buf = [0u8; 8];

        assert_eq!(stream.read_chunk(&mut buf).unwrap(), 8);
        assert_eq!(&buf, b"abcdefgh");
        assert!(!stream.is_eof());

        assert_eq!(stream.read_chunk(&mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], b"ij");
        assert!(stream.is_eof());
    }

    #[test]
    fn test_exact_fit_then_eof() {
        let mut stream = ReadStream::new(&b"abcd"[..]);
        let mut buf = [0u8; 4];

        assert_eq!(stream.read_chunk(&mut buf).unwrap(), 4);
        assert!(!stream.is_eof());
        assert_eq!(stream.read_chunk(&mut buf).unwrap(), 0);
        assert!(stream.is_eof());
    }

    /// Reader that hands out `data` once, then fails
    struct Truncated<'a> {
        data: &'a [u8],
    }

    impl Read for Truncated<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.data.is_empty() {
                return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "gzip stream truncated"));
            }
            let n = buf.len().min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn test_bytes_before_error_are_kept() {
        let mut stream = ReadStream::new(Truncated { data: b"a\nb\nc\n" });
        let mut buf = [0u8; 16];

        assert_eq!(stream.read_chunk(&mut buf).unwrap(), 6);
        assert_eq!(&buf[..6], b"a\nb\nc\n");
        assert!(!stream.is_eof());

        let err = stream.take_error().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
        assert!(stream.take_error().is_none());
    }

    #[test]
    fn test_held_error_surfaces_on_next_read() {
        let mut stream = ReadStream::new(Truncated { data: b"xy" });
        let mut buf = [0u8; 4];

        assert_eq!(stream.read_chunk(&mut buf).unwrap(), 2);
        let err = stream.read_chunk(&mut buf).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_error_without_bytes_is_immediate() {
        let mut stream = ReadStream::new(Truncated { data: b"" });
        let mut buf = [0u8; 4];
        assert!(stream.read_chunk(&mut buf).is_err());
        assert!(stream.take_error().is_none());
    }

    #[test]
    fn test_boxed_stream() {
        let mut stream: Box<dyn ByteStream> = Box::new(ReadStream::new(&b"xy"[..]));
        let mut buf = [0u8; 4];
        assert_eq!(stream.read_chunk(&mut buf).unwrap(), 2);
        assert!(stream.is_eof());
    }
}
