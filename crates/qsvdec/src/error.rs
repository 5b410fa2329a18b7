//! Typed error hierarchy for the harness.
//!
//! Uses `thiserror`. Each variant maps to a stable integer code via
//! [`DecodeError::error_code`] so the CLI can exit with a meaningful
//! status without string parsing.

/// All errors originating from this crate.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The native `initialize` call returned a nonzero status. Decoding
    /// must not proceed.
    #[error("native decoder initialization failed with status {status}")]
    Init { status: i32 },

    /// The native library exposes exactly one decoder; a second live
    /// `QsvDecoder` would alias it.
    #[error("the process-wide QSV decoder instance is already held")]
    InstanceHeld,

    /// The crate was built without the native library present.
    #[error(
        "qsvdec built in stub mode: the intel_qsv_decoder library is unavailable on this build host"
    )]
    Unavailable,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DecodeError {
    /// Stable integer error code.
    ///
    /// - 1xx: native decoder lifecycle
    /// - 2xx: host I/O
    pub fn error_code(&self) -> u32 {
        match self {
            Self::Init { .. } => 100,
            Self::InstanceHeld => 101,
            Self::Unavailable => 102,
            Self::Io(_) => 200,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DecodeError>;
