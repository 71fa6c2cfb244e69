//! Error mapping utilities for converting between error types.
//!
//! Converts `std::io::ErrorKind` values to `embedded_io::ErrorKind` and error
//! kinds to human-readable static strings.

/// Convert a `std::io::ErrorKind` to `embedded_io::ErrorKind`
#[must_use]
#[allow(clippy::match_same_arms)]
pub fn std_to_error_kind(kind: std::io::ErrorKind) -> embedded_io::ErrorKind {
    match kind {
        std::io::ErrorKind::NotFound => embedded_io::ErrorKind::NotFound,
        std::io::ErrorKind::PermissionDenied => embedded_io::ErrorKind::PermissionDenied,
        std::io::ErrorKind::BrokenPipe => embedded_io::ErrorKind::BrokenPipe,
        std::io::ErrorKind::InvalidInput => embedded_io::ErrorKind::InvalidInput,
        std::io::ErrorKind::InvalidData => embedded_io::ErrorKind::InvalidData,
        std::io::ErrorKind::TimedOut => embedded_io::ErrorKind::TimedOut,
        std::io::ErrorKind::Interrupted => embedded_io::ErrorKind::Interrupted,
        std::io::ErrorKind::Unsupported => embedded_io::ErrorKind::Unsupported,
        std::io::ErrorKind::OutOfMemory => embedded_io::ErrorKind::OutOfMemory,
        std::io::ErrorKind::WriteZero => embedded_io::ErrorKind::WriteZero,
        _ => embedded_io::ErrorKind::Other,
    }
}

/// Convert error kind to a static string description
#[must_use]
pub fn error_kind_to_str(kind: embedded_io::ErrorKind) -> &'static str {
    match kind {
        embedded_io::ErrorKind::NotFound => "not found",
        embedded_io::ErrorKind::PermissionDenied => "permission denied",
        embedded_io::ErrorKind::BrokenPipe => "broken pipe",
        embedded_io::ErrorKind::InvalidInput => "invalid input",
        embedded_io::ErrorKind::InvalidData => "invalid data",
        embedded_io::ErrorKind::TimedOut => "timed out",
        embedded_io::ErrorKind::Interrupted => "interrupted",
        embedded_io::ErrorKind::Unsupported => "unsupported",
        embedded_io::ErrorKind::OutOfMemory => "out of memory",
        embedded_io::ErrorKind::WriteZero => "write zero",
        embedded_io::ErrorKind::Other => "other error",
        _ => "unknown error",
    }
}
