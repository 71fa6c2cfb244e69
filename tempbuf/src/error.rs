//! Error type for buffer operations

use crate::temp_buffer::Whence;

/// Error type for `TempBuffer` operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TempBufferError {
    /// Seek target is negative, overflows, or is not below the buffer length
    InvalidOffset {
        offset: i64,
        whence: Whence,
        len: usize,
    },
    /// Raw seek origin is not one of 0 (start), 1 (current), 2 (end)
    UnsupportedOrigin(i32),
    /// Nothing left to read: the cursor is at the end of the data
    EndOfStream,
}

impl std::fmt::Display for TempBufferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidOffset { offset, whence, len } => {
                write!(f, "Invalid offset {offset} from {whence} (buffer length {len})")
            }
            Self::UnsupportedOrigin(whence) => write!(f, "Unsupported seek origin: {whence}"),
            Self::EndOfStream => write!(f, "End of stream"),
        }
    }
}

impl std::error::Error for TempBufferError {}

impl embedded_io::Error for TempBufferError {
    fn kind(&self) -> embedded_io::ErrorKind {
        match self {
            Self::InvalidOffset { .. } => embedded_io::ErrorKind::InvalidInput,
            Self::UnsupportedOrigin(_) => embedded_io::ErrorKind::Unsupported,
            Self::EndOfStream => embedded_io::ErrorKind::Other,
        }
    }
}

impl From<TempBufferError> for std::io::Error {
    fn from(err: TempBufferError) -> Self {
        let kind = match err {
            TempBufferError::InvalidOffset { .. } => std::io::ErrorKind::InvalidInput,
            TempBufferError::UnsupportedOrigin(_) => std::io::ErrorKind::Unsupported,
            TempBufferError::EndOfStream => std::io::ErrorKind::UnexpectedEof,
        };
        std::io::Error::new(kind, err)
    }
}
