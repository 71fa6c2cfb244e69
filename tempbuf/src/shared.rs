//! Shared temp buffer with internal locking
//!
//! `TempBuffer` has no locking of its own. This wrapper serializes every
//! operation behind one mutex so that several owners can use the same buffer.

use parking_lot::{Mutex, MutexGuard};
use std::ops::Deref;
use std::sync::Arc;

use crate::error::TempBufferError;
use crate::options::BufferOptions;
use crate::temp_buffer::{TempBuffer, Whence};
use crate::write_at::WriteAt;

/// Read-only guard to buffer contents
///
/// Holds the lock and provides read-only access to the stored data.
/// The lock is released when the guard is dropped.
pub struct SharedTempBufferGuard<'a>(MutexGuard<'a, TempBuffer>);

impl SharedTempBufferGuard<'_> {
    /// Cursor at the moment the lock was taken
    #[must_use]
    pub fn position(&self) -> usize {
        self.0.position()
    }
}

impl Deref for SharedTempBufferGuard<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.0.bytes()
    }
}

impl AsRef<[u8]> for SharedTempBufferGuard<'_> {
    fn as_ref(&self) -> &[u8] {
        self.0.bytes()
    }
}

/// Shared temp buffer with internal locking
///
/// A thread-safe buffer backed by `Arc<Mutex<TempBuffer>>`. Multiple clones
/// share the same data and the same cursor.
///
/// # Thread Safety
///
/// All operations use internal locking via `parking_lot::Mutex`. Each call
/// locks, runs the `TempBuffer` operation, and releases. A sequence of calls
/// (seek then read) is not atomic; hold [`SharedTempBuffer::with`] for that.
///
/// # Example
///
/// ```
/// use tempbuf::{SharedTempBuffer, Whence};
///
/// let buffer = SharedTempBuffer::new();
/// let writer = buffer.clone();
/// writer.write(b"hello");
///
/// buffer.seek(0, Whence::Start).unwrap();
/// let mut dest = [0u8; 5];
/// assert_eq!(buffer.read(&mut dest), Ok(5));
/// assert_eq!(&dest, b"hello");
/// ```
#[derive(Clone, Default)]
pub struct SharedTempBuffer(Arc<Mutex<TempBuffer>>);

impl SharedTempBuffer {
    /// Create a new empty buffer
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_options(options: &BufferOptions) -> Self {
        Self::from(TempBuffer::with_options(options))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.lock().is_empty()
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.0.lock().position()
    }

    /// Append data and move the cursor to the end
    pub fn write(&self, data: &[u8]) -> usize {
        self.0.lock().write(data)
    }

    /// Append data, ignoring `offset`, without moving the cursor
    pub fn write_at(&self, data: &[u8], offset: i64) -> usize {
        self.0.lock().write_at(data, offset)
    }

    /// Read from the shared cursor
    ///
    /// # Errors
    /// `EndOfStream` if the cursor is at the end.
    pub fn read(&self, buf: &mut [u8]) -> Result<usize, TempBufferError> {
        self.0.lock().read(buf)
    }

    /// Move the shared cursor
    ///
    /// # Errors
    /// `InvalidOffset` if the target is out of bounds.
    pub fn seek(&self, offset: i64, whence: Whence) -> Result<u64, TempBufferError> {
        self.0.lock().seek(offset, whence)
    }

    /// Copy the stored data out
    #[must_use]
    pub fn snapshot(&self) -> Vec<u8> {
        self.0.lock().bytes().to_vec()
    }

    /// Lock the buffer for reading
    ///
    /// Returns a read-only guard that provides access to the stored data.
    /// The lock is held until the guard is dropped.
    #[must_use]
    pub fn lock(&self) -> SharedTempBufferGuard<'_> {
        SharedTempBufferGuard(self.0.lock())
    }

    /// Run `f` with exclusive access to the underlying buffer
    pub fn with<R>(&self, f: impl FnOnce(&mut TempBuffer) -> R) -> R {
        f(&mut *self.0.lock())
    }
}

impl From<TempBuffer> for SharedTempBuffer {
    fn from(buffer: TempBuffer) -> Self {
        Self(Arc::new(Mutex::new(buffer)))
    }
}

impl std::fmt::Debug for SharedTempBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Shared{:?}", *self.0.lock())
    }
}

impl embedded_io::ErrorType for SharedTempBuffer {
    type Error = TempBufferError;
}

impl WriteAt for SharedTempBuffer {
    fn write_at(&mut self, buf: &[u8], offset: i64) -> Result<usize, TempBufferError> {
        Ok(SharedTempBuffer::write_at(self, buf, offset))
    }
}

impl embedded_io::Read for SharedTempBuffer {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        embedded_io::Read::read(&mut *self.0.lock(), buf)
    }
}

impl embedded_io::Write for SharedTempBuffer {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        Ok(SharedTempBuffer::write(self, buf))
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl embedded_io::Seek for SharedTempBuffer {
    fn seek(&mut self, pos: embedded_io::SeekFrom) -> Result<u64, Self::Error> {
        embedded_io::Seek::seek(&mut *self.0.lock(), pos)
    }

    fn stream_position(&mut self) -> Result<u64, Self::Error> {
        Ok(self.position() as u64)
    }
}
