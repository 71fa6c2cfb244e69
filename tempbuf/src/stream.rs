//! Stream capability: `Read`, `Write` and `Seek` for `TempBuffer`.
//!
//! Both trait families are implemented: `embedded_io` for code in this
//! workspace, `std::io` for third-party consumers.
//!
//! The adapters follow the host trait conventions where the native API does
//! not:
//! - end of stream is `Ok(0)`, not an error
//! - `SeekFrom::End(n)` means `len() + n`, translated to the native
//!   `seek(-n, Whence::End)`. The native bound still applies, so
//!   `SeekFrom::End(0)` fails unless `allow_seek_to_end` is set.

use crate::error::TempBufferError;
use crate::temp_buffer::{TempBuffer, Whence};

fn read_or_eof(buffer: &mut TempBuffer, buf: &mut [u8]) -> Result<usize, TempBufferError> {
    match TempBuffer::read(buffer, buf) {
        Err(TempBufferError::EndOfStream) => Ok(0),
        other => other,
    }
}

fn seek_end_offset(n: i64, len: usize) -> Result<i64, TempBufferError> {
    n.checked_neg().ok_or(TempBufferError::InvalidOffset {
        offset: n,
        whence: Whence::End,
        len,
    })
}

impl embedded_io::ErrorType for TempBuffer {
    type Error = TempBufferError;
}

impl embedded_io::Read for TempBuffer {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        read_or_eof(self, buf)
    }
}

impl embedded_io::Write for TempBuffer {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        Ok(TempBuffer::write(self, buf))
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl embedded_io::Seek for TempBuffer {
    fn seek(&mut self, pos: embedded_io::SeekFrom) -> Result<u64, Self::Error> {
        match pos {
            embedded_io::SeekFrom::Start(n) => {
                // The error carries an i64 offset, so starts past i64::MAX saturate
                let offset = i64::try_from(n).map_err(|_| TempBufferError::InvalidOffset {
                    offset: i64::MAX,
                    whence: Whence::Start,
                    len: self.len(),
                })?;
                TempBuffer::seek(self, offset, Whence::Start)
            }
            embedded_io::SeekFrom::Current(n) => TempBuffer::seek(self, n, Whence::Current),
            embedded_io::SeekFrom::End(n) => {
                let offset = seek_end_offset(n, self.len())?;
                TempBuffer::seek(self, offset, Whence::End)
            }
        }
    }

    // The default goes through `seek(Current(0))`, which fails at the end
    fn stream_position(&mut self) -> Result<u64, Self::Error> {
        Ok(self.position() as u64)
    }
}

impl std::io::Read for TempBuffer {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        Ok(read_or_eof(self, buf)?)
    }
}

impl std::io::Write for TempBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        Ok(TempBuffer::write(self, buf))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl std::io::Seek for TempBuffer {
    fn seek(&mut self, pos: std::io::SeekFrom) -> std::io::Result<u64> {
        let pos = match pos {
            std::io::SeekFrom::Start(n) => embedded_io::SeekFrom::Start(n),
            std::io::SeekFrom::Current(n) => embedded_io::SeekFrom::Current(n),
            std::io::SeekFrom::End(n) => embedded_io::SeekFrom::End(n),
        };
        Ok(embedded_io::Seek::seek(self, pos)?)
    }

    fn stream_position(&mut self) -> std::io::Result<u64> {
        Ok(self.position() as u64)
    }
}
