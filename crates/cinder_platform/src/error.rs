//! Platform error types

use thiserror::Error;

/// Platform-related errors
#[derive(Error, Debug)]
pub enum PlatformError {
    /// Failed to initialize platform
    #[error("Platform initialization failed: {0}")]
    InitFailed(String),

    /// A system service could not be obtained
    #[error("Resource unavailable: {0}")]
    ResourceUnavailable(String),

    /// Release requested on a wake-lock that is not held
    #[error("Wake-lock '{0}' is not held")]
    WakeLockNotHeld(String),

    /// Call across the native/managed boundary failed
    #[error("FFI call failed: {0}")]
    Ffi(String),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Platform not supported on this OS
    #[error("Platform not supported: {0}")]
    Unsupported(String),

    /// Generic platform error
    #[error("Platform error: {0}")]
    Other(String),
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
