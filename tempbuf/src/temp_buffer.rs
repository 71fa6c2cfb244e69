//! Growable in-memory buffer with a read cursor
//!
//! All writes append to the end of the data. Reads consume from the cursor.
//! Seeks move the cursor inside the data, and by default never onto the
//! end position itself (see [`TempBuffer::seek`]).

use std::fmt;
use tracing::trace;

use crate::error::TempBufferError;
use crate::options::{BufferOptions, DEFAULT_CHUNK_SIZE};

/// Reference point of a seek offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Whence {
    /// Offset counts from the first byte
    Start = 0,
    /// Offset is added to the cursor
    Current = 1,
    /// Offset is subtracted from the buffer length
    End = 2,
}

impl TryFrom<i32> for Whence {
    type Error = TempBufferError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Start),
            1 => Ok(Self::Current),
            2 => Ok(Self::End),
            other => Err(TempBufferError::UnsupportedOrigin(other)),
        }
    }
}

impl fmt::Display for Whence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::Current => write!(f, "current"),
            Self::End => write!(f, "end"),
        }
    }
}

/// In-memory seekable byte buffer
///
/// Single owner, no locking. Use [`crate::SharedTempBuffer`] when several
/// owners need the same buffer.
///
/// # Invariants
///
/// - `position() <= len()` after every operation
/// - a successful `seek` leaves `position() < len()`, unless the buffer was
///   built with `allow_seek_to_end`
/// - data only grows; nothing is overwritten in place
#[derive(Default, Clone)]
pub struct TempBuffer {
    data: Vec<u8>,
    pos: usize,
    allow_seek_to_end: bool,
    // 0 means `DEFAULT_CHUNK_SIZE`
    chunk_size: usize,
}

impl TempBuffer {
    /// Create a new empty buffer with the cursor at 0
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new empty buffer configured by `options`
    #[must_use]
    pub fn with_options(options: &BufferOptions) -> Self {
        Self {
            data: Vec::with_capacity(options.initial_capacity),
            pos: 0,
            allow_seek_to_end: options.allow_seek_to_end,
            chunk_size: options.effective_chunk_size(),
        }
    }

    /// Length of the stored data
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Current cursor
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes between the cursor and the end of the data
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Chunk size used when replaying the data
    #[must_use]
    pub fn chunk_size(&self) -> usize {
        if self.chunk_size == 0 {
            DEFAULT_CHUNK_SIZE
        } else {
            self.chunk_size
        }
    }

    /// The whole stored data, regardless of the cursor
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer and return the stored data
    #[must_use]
    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }

    /// Append `data`, ignoring `offset`
    ///
    /// Despite the name, this is not a positional write: every chunk lands at
    /// the end of the data, whatever `offset` says. The cursor is not moved.
    pub fn write_at(&mut self, data: &[u8], offset: i64) -> usize {
        self.data.extend_from_slice(data);
        trace!(
            requested_offset = offset,
            n = data.len(),
            len = self.data.len(),
            "write_at"
        );
        data.len()
    }

    /// Append `data` and move the cursor to the new end
    pub fn write(&mut self, data: &[u8]) -> usize {
        self.data.extend_from_slice(data);
        self.pos = self.data.len();
        trace!(n = data.len(), pos = self.pos, "write");
        data.len()
    }

    /// Read from the cursor into `buf`
    ///
    /// Copies `min(buf.len(), remaining())` bytes. The cursor advances by the
    /// requested size `buf.len()`, clamped to the end of the data.
    ///
    /// # Errors
    ///
    /// `EndOfStream` if the cursor is already at the end, even for an empty `buf`.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize, TempBufferError> {
        let len = self.data.len();
        if self.pos >= len {
            trace!(pos = self.pos, "read: end of stream");
            return Err(TempBufferError::EndOfStream);
        }

        let to_read = (len - self.pos).min(buf.len());
        let end_pos = self.pos + to_read;

        // to_read <= len - pos and to_read <= buf.len(), so both ranges are in bounds
        #[allow(clippy::indexing_slicing)]
        {
            buf[..to_read].copy_from_slice(&self.data[self.pos..end_pos]);
        }
        self.pos = self.pos.saturating_add(buf.len()).min(len);

        trace!(n = to_read, pos = self.pos, "read");
        Ok(to_read)
    }

    /// Move the cursor
    ///
    /// The target is `offset` for `Start`, `position() + offset` for
    /// `Current`, and `len() - offset` for `End`. Note the subtraction: a
    /// positive offset from the end moves backwards.
    ///
    /// The target must satisfy `0 <= target < len()`. Seeking exactly to the
    /// end is rejected, so any seek on an empty buffer fails. Buffers built
    /// with `allow_seek_to_end` accept `target == len()` too.
    ///
    /// # Errors
    ///
    /// `InvalidOffset` if the target is out of bounds. The cursor is unchanged.
    pub fn seek(&mut self, offset: i64, whence: Whence) -> Result<u64, TempBufferError> {
        let len = self.data.len();
        let target = match whence {
            Whence::Start => Some(offset),
            Whence::Current => i64::try_from(self.pos)
                .ok()
                .and_then(|pos| pos.checked_add(offset)),
            Whence::End => i64::try_from(len)
                .ok()
                .and_then(|len| len.checked_sub(offset)),
        };

        let Some(target) = target
            .and_then(|t| usize::try_from(t).ok())
            .filter(|&t| t < len || (self.allow_seek_to_end && t == len))
        else {
            log::warn!(
                "TempBuffer::seek() rejected: offset={offset}, whence={whence}, pos={}, len={len}",
                self.pos
            );
            return Err(TempBufferError::InvalidOffset {
                offset,
                whence,
                len,
            });
        };

        self.pos = target;
        trace!(offset, %whence, pos = self.pos, "seek");
        Ok(target as u64)
    }

    /// Move the cursor using a raw origin value: 0 start, 1 current, 2 end
    ///
    /// # Errors
    ///
    /// `UnsupportedOrigin` for any other origin value, or the errors of
    /// [`TempBuffer::seek`]. The cursor is unchanged on error.
    pub fn seek_whence(&mut self, offset: i64, whence: i32) -> Result<u64, TempBufferError> {
        let whence = Whence::try_from(whence).inspect_err(|_| {
            log::warn!("TempBuffer::seek() rejected: unsupported origin {whence}");
        })?;
        self.seek(offset, whence)
    }
}

impl fmt::Debug for TempBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TempBuffer(len={}, pos={}, allow_seek_to_end={})",
            self.data.len(),
            self.pos,
            self.allow_seek_to_end
        )
    }
}
