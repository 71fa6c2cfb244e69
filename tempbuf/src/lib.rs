//! In-memory seekable byte buffer.
//!
//! `TempBuffer` stages bytes in memory and replays them through stream
//! interfaces (`embedded_io` and `std::io`) that expect something readable,
//! writable and seekable, so no temporary file is needed.
//!
//! # Example
//!
//! ```
//! use tempbuf::{TempBuffer, TempBufferError, Whence};
//!
//! let mut buffer = TempBuffer::new();
//! buffer.write(b"hello");
//! buffer.seek(0, Whence::Start).unwrap();
//!
//! let mut dest = [0u8; 3];
//! assert_eq!(buffer.read(&mut dest), Ok(3));
//! assert_eq!(&dest, b"hel");
//!
//! assert!(matches!(
//!     buffer.seek(5, Whence::Start),
//!     Err(TempBufferError::InvalidOffset { .. })
//! ));
//! assert_eq!(buffer.position(), 3);
//! ```

pub mod error;
mod error_mapping;
pub mod options;
pub mod shared;
pub mod stage;
pub mod stream;
pub mod temp_buffer;
pub mod write_at;

pub use error::TempBufferError;
pub use error_mapping::{error_kind_to_str, std_to_error_kind};
pub use options::{BufferOptions, OptionsError};
pub use shared::{SharedTempBuffer, SharedTempBufferGuard};
pub use stage::{stage_from, stage_with, StageError, StdIo, StdIoError};
pub use temp_buffer::{TempBuffer, Whence};
pub use write_at::WriteAt;
