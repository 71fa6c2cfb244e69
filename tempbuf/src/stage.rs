//! Stage data into a buffer and replay it.
//!
//! # Example
//!
//! ```
//! use tempbuf::{stage_from, TempBuffer};
//!
//! let source: &[u8] = b"payload";
//! let mut staged = stage_from(source).unwrap();
//!
//! let mut first = TempBuffer::new();
//! let mut second = TempBuffer::new();
//! staged.replay_into(&mut first).unwrap();
//! staged.replay_into(&mut second).unwrap();
//! assert_eq!(first.bytes(), b"payload");
//! assert_eq!(second.bytes(), b"payload");
//! ```

use embedded_io::Error as _;
use tracing::debug;

use crate::error::TempBufferError;
use crate::error_mapping::{error_kind_to_str, std_to_error_kind};
use crate::options::BufferOptions;
use crate::temp_buffer::{TempBuffer, Whence};

/// Errors that can occur while staging or replaying
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageError {
    /// Reading the source failed
    Source(embedded_io::ErrorKind),
    /// Writing the sink failed
    Sink(embedded_io::ErrorKind),
    /// The buffer rejected an operation
    Buffer(TempBufferError),
}

impl std::fmt::Display for StageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source(kind) => write!(f, "Failed to read source: {}", error_kind_to_str(*kind)),
            Self::Sink(kind) => write!(f, "Failed to write sink: {}", error_kind_to_str(*kind)),
            Self::Buffer(err) => write!(f, "Buffer error: {err}"),
        }
    }
}

impl std::error::Error for StageError {}

impl From<TempBufferError> for StageError {
    fn from(err: TempBufferError) -> Self {
        Self::Buffer(err)
    }
}

/// Read `source` to its end into a new buffer, using default options
///
/// # Errors
/// `StageError::Source` if reading fails.
pub fn stage_from(source: impl embedded_io::Read) -> Result<TempBuffer, StageError> {
    stage_with(source, &BufferOptions::default())
}

/// Read `source` to its end into a new buffer configured by `options`
///
/// The cursor of the returned buffer is at the end, as after any write.
///
/// # Errors
/// `StageError::Source` if reading fails.
pub fn stage_with(
    mut source: impl embedded_io::Read,
    options: &BufferOptions,
) -> Result<TempBuffer, StageError> {
    let mut buffer = TempBuffer::with_options(options);
    let mut chunk = vec![0u8; options.effective_chunk_size()];
    loop {
        let n = source
            .read(&mut chunk)
            .map_err(|e| StageError::Source(e.kind()))?;
        if n == 0 {
            break;
        }
        #[allow(clippy::indexing_slicing)]
        let data = &chunk[..n];
        buffer.write(data);
    }
    debug!(len = buffer.len(), "staged");
    Ok(buffer)
}

// `write_all` without its panic on a sink that accepts nothing
fn write_chunk<W: embedded_io::Write>(sink: &mut W, mut data: &[u8]) -> Result<(), StageError> {
    while !data.is_empty() {
        match sink.write(data) {
            Ok(0) => return Err(StageError::Sink(embedded_io::ErrorKind::WriteZero)),
            #[allow(clippy::indexing_slicing)]
            Ok(n) => data = &data[n..],
            Err(e) => return Err(StageError::Sink(e.kind())),
        }
    }
    Ok(())
}

impl TempBuffer {
    /// Rewind and copy all stored data into `sink`
    ///
    /// Returns the number of bytes copied. An empty buffer copies nothing
    /// (a rewind is not possible there). Afterwards the cursor is at the end,
    /// so the call can be repeated to replay the data again.
    ///
    /// Data goes out in chunks of [`TempBuffer::chunk_size`].
    ///
    /// # Errors
    /// `StageError::Sink` if writing fails or the sink accepts no bytes.
    /// Bytes already written stay written.
    pub fn replay_into<W: embedded_io::Write>(&mut self, sink: &mut W) -> Result<usize, StageError> {
        if self.is_empty() {
            return Ok(0);
        }
        self.seek(0, Whence::Start)?;

        let mut chunk = vec![0u8; self.chunk_size().min(self.len())];
        let mut total = 0;
        loop {
            let n = match self.read(&mut chunk) {
                Ok(n) => n,
                Err(TempBufferError::EndOfStream) => break,
                Err(e) => return Err(e.into()),
            };
            #[allow(clippy::indexing_slicing)]
            let data = &chunk[..n];
            write_chunk(sink, data)?;
            total += n;
        }
        sink.flush().map_err(|e| StageError::Sink(e.kind()))?;
        debug!(bytes = total, "replayed");
        Ok(total)
    }
}

/// Adapter exposing a `std::io` reader or writer as `embedded_io`
///
/// ```
/// use tempbuf::{stage_from, StdIo};
///
/// let staged = stage_from(StdIo(std::io::Cursor::new(b"abc".to_vec()))).unwrap();
/// assert_eq!(staged.bytes(), b"abc");
/// ```
#[derive(Debug)]
pub struct StdIo<T>(pub T);

impl<T> StdIo<T> {
    /// Unwrap the std reader or writer
    #[must_use]
    pub fn into_inner(self) -> T {
        self.0
    }
}

/// `std::io::Error` carried through `embedded_io`
#[derive(Debug)]
pub struct StdIoError(pub std::io::Error);

impl embedded_io::Error for StdIoError {
    fn kind(&self) -> embedded_io::ErrorKind {
        std_to_error_kind(self.0.kind())
    }
}

impl<T> embedded_io::ErrorType for StdIo<T> {
    type Error = StdIoError;
}

impl<T: std::io::Read> embedded_io::Read for StdIo<T> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.0.read(buf).map_err(StdIoError)
    }
}

impl<T: std::io::Write> embedded_io::Write for StdIo<T> {
    // A full std writer may return Ok(0), which `embedded_io` does not allow
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        match self.0.write(buf) {
            Ok(0) if !buf.is_empty() => Err(StdIoError(std::io::ErrorKind::WriteZero.into())),
            other => other.map_err(StdIoError),
        }
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.0.flush().map_err(StdIoError)
    }
}
