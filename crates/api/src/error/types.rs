//! Error type definitions for the ecseal engine

use std::string::String;

/// Primary error type for key handling and encryption operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed PEM, DER or base64 input, or a ciphertext that is
    /// structurally too short
    Format {
        context: &'static str,
        message: String,
    },

    /// Key material that parsed but is not a usable key (scalar out of
    /// range, point not on the curve, embedded public key mismatch)
    InvalidKey {
        context: &'static str,
        message: String,
    },

    /// The parsed key is not the kind of key the caller asked for
    KeyType {
        expected: &'static str,
        found: String,
    },

    /// The key is bound to a different curve than the engine requires
    CurveMismatch {
        expected: &'static str,
        found: String,
    },

    /// MAC verification failed; deliberately carries no detail
    AuthenticationFailed {
        context: &'static str,
    },

    /// Failure of an underlying primitive (RNG, KDF)
    Backend {
        context: &'static str,
        message: String,
    },

    /// I/O failure while reading caller-supplied input
    Io {
        context: &'static str,
        message: String,
    },
}

/// Result type for ecseal operations
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Replace the context of an existing error
    pub fn with_context(self, context: &'static str) -> Self {
        match self {
            Self::Format { message, .. } => Self::Format { context, message },
            Self::InvalidKey { message, .. } => Self::InvalidKey { context, message },
            Self::AuthenticationFailed { .. } => Self::AuthenticationFailed { context },
            Self::Backend { message, .. } => Self::Backend { context, message },
            Self::Io { message, .. } => Self::Io { context, message },
            other @ (Self::KeyType { .. } | Self::CurveMismatch { .. }) => other,
        }
    }

    /// Replace the message of an existing error.
    ///
    /// Authentication failures never carry a message.
    pub fn with_message(self, message: impl Into<String>) -> Self {
        let message = message.into();
        match self {
            Self::Format { context, .. } => Self::Format { context, message },
            Self::InvalidKey { context, .. } => Self::InvalidKey { context, message },
            Self::Backend { context, .. } => Self::Backend { context, message },
            Self::Io { context, .. } => Self::Io { context, message },
            other => other,
        }
    }

    /// Process exit code for this error kind. Zero is success and 2 is
    /// reserved for command-line usage errors.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io { .. } => 3,
            Self::Format { .. } | Self::InvalidKey { .. } => 4,
            Self::KeyType { .. } => 5,
            Self::CurveMismatch { .. } => 6,
            Self::AuthenticationFailed { .. } => 7,
            Self::Backend { .. } => 8,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Format { context, message } => {
                write!(f, "Format error: {}: {}", context, message)
            }
            Self::InvalidKey { context, message } => {
                write!(f, "Invalid key: {}: {}", context, message)
            }
            Self::KeyType { expected, found } => {
                write!(f, "Key type error: expected {}, found {}", expected, found)
            }
            Self::CurveMismatch { expected, found } => {
                write!(f, "Curve mismatch: expected {}, found {}", expected, found)
            }
            Self::AuthenticationFailed { context } => {
                write!(f, "Decryption failed: {}", context)
            }
            Self::Backend { context, message } => {
                write!(f, "Crypto backend error: {}: {}", context, message)
            }
            Self::Io { context, message } => {
                write!(f, "I/O error: {}: {}", context, message)
            }
        }
    }
}
