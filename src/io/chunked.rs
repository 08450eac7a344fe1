//! Chunked line reader
//!
//! Reads a [`ByteStream`] in fixed-size chunks and reassembles logical lines
//! across chunk boundaries in bounded memory: one chunk buffer plus the
//! carried fragment of the line that is still open.
//!
//! # Chunk protocol
//!
//! 1. Poll the cancel token.
//! 2. Request `chunk_capacity - 1` bytes.
//! 3. Split `carry ++ chunk` on newlines; queue every complete line and keep
//!    the unterminated tail as the new carry.
//! 4. A short read ends the stream if the source reports EOF, in which case a
//!    non-empty carry is emitted as the final line. A short read without EOF
//!    is a stream error and the carry is dropped.
//!
//! An empty carry is never emitted: empty input yields no lines, and a final
//! newline does not produce a trailing empty line.

use crate::config::{ScanConfig, LINE_DELIMITER};
use crate::error::{Result, TabscanError};
use crate::formats::delimited::LineSplitter;
use crate::io::compression::{CompressedReader, DataSource};
use crate::io::progress::{CancelToken, ProgressCallback, ProgressReporter};
use crate::io::stream::{ByteStream, ReadStream};
use std::collections::VecDeque;
use std::mem;
use std::path::Path;

enum State {
    Reading,
    /// Clean EOF seen; carry still to be emitted
    Exhausted,
    /// Error to surface once queued lines are drained
    Failed(TabscanError),
    Done,
}

/// Iterator over the logical lines of a byte stream
///
/// Lines are yielded without their newline, in file order, exactly once.
/// After an error the iterator is exhausted.
///
/// # Example
///
/// ```
/// use tabscan::io::{ChunkedLineReader, ReadStream};
/// use tabscan::ScanConfig;
///
/// # fn main() -> tabscan::Result<()> {
/// let data = b"chr1\t100\nchr2\t200\nchr3\t300";
/// let config = ScanConfig::default().with_chunk_capacity(8);
/// let reader = ChunkedLineReader::new(ReadStream::new(&data[..]), &config)?;
///
/// let lines = reader.collect::<tabscan::Result<Vec<_>>>()?;
/// assert_eq!(lines, vec![b"chr1\t100".to_vec(), b"chr2\t200".to_vec(), b"chr3\t300".to_vec()]);
/// # Ok(())
/// # }
/// ```
pub struct ChunkedLineReader<S: ByteStream> {
    stream: S,
    config: ScanConfig,
    /// Reused read arena, `chunk_capacity - 1` bytes
    chunk: Vec<u8>,
    /// Reused `carry ++ chunk` buffer
    window: Vec<u8>,
    carry: Vec<u8>,
    pending: VecDeque<Vec<u8>>,
    progress: ProgressReporter,
    cancel: Option<CancelToken>,
    state: State,
    lines_read: u64,
    bytes_read: u64,
    chunks_read: u64,
}

impl<S: ByteStream> ChunkedLineReader<S> {
    /// Create a reader over `stream`
    ///
    /// # Errors
    ///
    /// Returns [`TabscanError::InvalidConfig`] if `config` fails validation.
    pub fn new(stream: S, config: &ScanConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            stream,
            config: *config,
            chunk: vec![0u8; config.read_size()],
            window: Vec::with_capacity(config.chunk_capacity),
            carry: Vec::new(),
            pending: VecDeque::new(),
            progress: ProgressReporter::new(config),
            cancel: None,
            state: State::Reading,
            lines_read: 0,
            bytes_read: 0,
            chunks_read: 0,
        })
    }

    /// Deliver progress events to `callback` instead of the log
    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress.set_callback(callback);
        self
    }

    /// Poll `token` before every read
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Settings this reader was built with
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Lines emitted so far
    pub fn lines_read(&self) -> u64 {
        self.lines_read
    }

    /// Decompressed bytes pulled from the stream so far
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Chunk reads issued so far
    pub fn chunks_read(&self) -> u64 {
        self.chunks_read
    }

    /// Stop reading before the end of the stream
    ///
    /// Reports [`ProgressEvent::Completed`](crate::io::ProgressEvent::Completed)
    /// for the lines delivered so far unless the reader has already finished.
    /// Afterwards the iterator yields nothing.
    pub fn close(&mut self) {
        if matches!(self.state, State::Done) {
            return;
        }
        self.state = State::Done;
        self.pending.clear();
        self.carry.clear();
        self.progress.completed(self.lines_read);
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }

    /// Read one chunk and queue the lines it completes
    fn fill(&mut self) {
        if self.is_cancelled() {
            self.state = State::Failed(TabscanError::Cancelled {
                lines: self.lines_read,
            });
            return;
        }

        let n = match self.stream.read_chunk(&mut self.chunk) {
            Ok(n) => n,
            Err(e) => {
                self.state = State::Failed(TabscanError::Stream(e.to_string()));
                return;
            }
        };
        self.chunks_read += 1;
        self.bytes_read += n as u64;

        self.window.clear();
        self.window.extend_from_slice(&self.carry);
        self.window.extend_from_slice(&self.chunk[..n]);

        let mut splitter = LineSplitter::new(&self.window, LINE_DELIMITER);
        for line in splitter.by_ref() {
            self.pending.push_back(line.to_vec());
        }
        self.carry.clear();
        self.carry.extend_from_slice(splitter.remainder());

        if n < self.chunk.len() {
            self.state = if self.stream.is_eof() {
                State::Exhausted
            } else {
                let message = match self.stream.take_error() {
                    Some(e) => e.to_string(),
                    None => format!("short read of {} bytes before end of stream", n),
                };
                State::Failed(TabscanError::Stream(message))
            };
        }
    }

    fn emit(&mut self, line: Vec<u8>) -> Vec<u8> {
        self.lines_read += 1;
        self.progress.line(self.lines_read);
        line
    }
}

impl<S: ByteStream> Iterator for ChunkedLineReader<S> {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(line) = self.pending.pop_front() {
                return Some(Ok(self.emit(line)));
            }

            match self.state {
                State::Reading => self.fill(),
                State::Exhausted => {
                    self.state = State::Done;
                    let last = (!self.carry.is_empty()).then(|| mem::take(&mut self.carry));
                    let last = last.map(|line| self.emit(line));
                    self.progress.completed(self.lines_read);
                    return last.map(Ok);
                }
                State::Failed(_) => {
                    if let State::Failed(err) = mem::replace(&mut self.state, State::Done) {
                        self.carry.clear();
                        return Some(Err(err));
                    }
                }
                State::Done => return None,
            }
        }
    }
}

impl ChunkedLineReader<ReadStream<CompressedReader>> {
    /// Open `path` (gzip or plain) and read it line by line
    ///
    /// # Errors
    ///
    /// Returns [`TabscanError::Open`] if the file cannot be opened, or
    /// [`TabscanError::InvalidConfig`] if `config` fails validation.
    pub fn from_path<P: AsRef<Path>>(path: P, config: &ScanConfig) -> Result<Self> {
        config.validate()?;
        let stream = DataSource::from_path(path).open_stream()?;
        Self::new(stream, config)
    }
}

#[cfg(test)]
pub(crate) mod test_streams {
    //! Byte streams that misbehave on purpose

    use super::*;
    use std::io;

    /// Raises the cancel token after the first read
    pub struct CancelAfterFirstRead<'a> {
        pub inner: ReadStream<&'a [u8]>,
        pub token: CancelToken,
    }

    impl ByteStream for CancelAfterFirstRead<'_> {
        fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.inner.read_chunk(buf)?;
            self.token.cancel();
            Ok(n)
        }

        fn is_eof(&self) -> bool {
            self.inner.is_eof()
        }
    }

    /// Fails with a decoder-style error on read number `fail_on` (1-based)
    pub struct FailingStream<'a> {
        pub inner: ReadStream<&'a [u8]>,
        pub fail_on: usize,
        pub reads: usize,
    }

    impl ByteStream for FailingStream<'_> {
        fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.reads += 1;
            if self.reads == self.fail_on {
                return Err(io::Error::new(io::ErrorKind::InvalidData, "corrupt deflate stream"));
            }
            self.inner.read_chunk(buf)
        }

        fn is_eof(&self) -> bool {
            self.inner.is_eof()
        }
    }

    /// Reader that hands out `data` once, then fails as a cut-off gzip member would
    pub struct Truncated<'a> {
        pub data: &'a [u8],
    }

    impl io::Read for Truncated<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.data.is_empty() {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "unexpected end of gzip stream",
                ));
            }
            let n = buf.len().min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    /// Returns every byte in one short read but never reports EOF
    pub struct ShortReadNoEof<'a> {
        pub data: &'a [u8],
    }

    impl ByteStream for ShortReadNoEof<'_> {
        fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = buf.len().min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }

        fn is_eof(&self) -> bool {
            false
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn expected_lines(text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }
        let mut lines: Vec<String> = text.split('\n').map(str::to_string).collect();
        if text.ends_with('\n') {
            lines.pop();
        }
        lines
    }

    proptest! {
        #[test]
        fn test_line_count_independent_of_chunk_capacity(
            text in "[a-d\t\n]{0,200}",
            capacity in 2usize..40,
        ) {
            let config = ScanConfig::default().with_chunk_capacity(capacity);
            let lines: Vec<String> = ChunkedLineReader::new(ReadStream::new(text.as_bytes()), &config)
                .unwrap()
                .map(|line| String::from_utf8(line.unwrap()).unwrap())
                .collect();

            prop_assert_eq!(&lines, &expected_lines(&text));

            let rejoined = lines.join("\n");
            prop_assert_eq!(rejoined.as_str(), text.strip_suffix('\n').unwrap_or(&text));
        }
    }
}
