//! Buffer configuration
//!
//! Options are plain data. Build them in code, or read them from JSON:
//!
//! ```
//! use tempbuf::BufferOptions;
//!
//! let opts = BufferOptions::from_json_str(r#"{"initial_capacity": 4096}"#).unwrap();
//! assert_eq!(opts.initial_capacity, 4096);
//! assert!(!opts.allow_seek_to_end);
//! ```

use serde::Deserialize;

/// Chunk size used by staging and replay when none is configured
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct BufferOptions {
    /// Bytes reserved up front. Does not affect `len()`.
    pub initial_capacity: usize,
    /// Chunk size for `stage_with`, and for `replay_into` on buffers built
    /// with these options. 0 means the default.
    pub chunk_size: usize,
    /// Accept a seek target equal to the buffer length
    pub allow_seek_to_end: bool,
}

impl Default for BufferOptions {
    fn default() -> Self {
        Self {
            initial_capacity: 0,
            chunk_size: DEFAULT_CHUNK_SIZE,
            allow_seek_to_end: false,
        }
    }
}

/// Errors that can occur while loading options
#[derive(Debug)]
pub enum OptionsError {
    /// The source reader failed
    Read(embedded_io::ErrorKind),
    /// The input is not valid options JSON
    Parse(String),
}

impl std::fmt::Display for OptionsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read(kind) => write!(
                f,
                "Failed to read buffer options: {}",
                crate::error_kind_to_str(*kind)
            ),
            Self::Parse(msg) => write!(f, "Failed to parse buffer options JSON: {msg}"),
        }
    }
}

impl std::error::Error for OptionsError {}

impl BufferOptions {
    /// Read options JSON from a reader.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - There are I/O errors reading from the provided reader
    /// - The JSON input is invalid, or names an unknown option
    pub fn from_reader(mut reader: impl embedded_io::Read) -> Result<Self, OptionsError> {
        let mut buffer = Vec::new();
        let mut chunk = [0u8; DEFAULT_CHUNK_SIZE];
        loop {
            match embedded_io::Read::read(&mut reader, &mut chunk) {
                Ok(0) => break,
                #[allow(clippy::indexing_slicing)]
                Ok(n) => buffer.extend_from_slice(&chunk[..n]),
                Err(e) => return Err(OptionsError::Read(embedded_io::Error::kind(&e))),
            }
        }
        serde_json::from_slice(&buffer).map_err(|e| OptionsError::Parse(e.to_string()))
    }

    /// Parse options from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or names an unknown option.
    pub fn from_json_str(json: &str) -> Result<Self, OptionsError> {
        serde_json::from_str(json).map_err(|e| OptionsError::Parse(e.to_string()))
    }

    /// Chunk size to use, with 0 replaced by the default
    #[must_use]
    pub fn effective_chunk_size(&self) -> usize {
        if self.chunk_size == 0 {
            DEFAULT_CHUNK_SIZE
        } else {
            self.chunk_size
        }
    }
}
