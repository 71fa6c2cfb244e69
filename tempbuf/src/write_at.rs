//! Positional-write capability.
//!
//! Transfer utilities that hand out chunks with an offset write through this
//! trait. `TempBuffer` appends every chunk in arrival order and ignores the
//! offset, so it is only a correct destination when chunks arrive in order.

use crate::error::TempBufferError;
use crate::temp_buffer::TempBuffer;

pub trait WriteAt: embedded_io::ErrorType {
    /// Write `buf` for position `offset`, returning the number of bytes written.
    ///
    /// # Errors
    /// Implementation-defined.
    fn write_at(&mut self, buf: &[u8], offset: i64) -> Result<usize, Self::Error>;
}

impl WriteAt for TempBuffer {
    fn write_at(&mut self, buf: &[u8], offset: i64) -> Result<usize, TempBufferError> {
        Ok(TempBuffer::write_at(self, buf, offset))
    }
}
