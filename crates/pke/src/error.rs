//! Error handling for PKE operations.

use core::fmt;

use ecseal_api::error::Error as CoreError;
use ecseal_keys::Error as KeyError;

/// Error type for PKE operations.
#[derive(Debug)]
pub enum Error {
    Key(KeyError),
    Api(CoreError),
    InvalidCiphertextFormat(&'static str),
    AuthenticationFailed(&'static str),
    KeyDerivationFailed(&'static str),
    RandomnessFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Key(e) => write!(f, "PKE key error: {}", e),
            Error::Api(e) => write!(f, "PKE API error: {}", e),
            Error::InvalidCiphertextFormat(reason) => {
                write!(f, "Invalid PKE ciphertext format: {}", reason)
            }
            // the reason is for logs only and never leaves this crate
            Error::AuthenticationFailed(_) => f.write_str("PKE decryption failed"),
            Error::KeyDerivationFailed(reason) => {
                write!(f, "PKE key derivation failed: {}", reason)
            }
            Error::RandomnessFailed(reason) => write!(f, "PKE randomness failure: {}", reason),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Key(e) => Some(e),
            Error::Api(e) => Some(e),
            _ => None,
        }
    }
}

impl From<KeyError> for Error {
    fn from(err: KeyError) -> Self {
        match err {
            KeyError::Rng(e) => Error::RandomnessFailed(e.to_string()),
            other => Error::Key(other),
        }
    }
}

impl From<CoreError> for Error {
    fn from(err: CoreError) -> Self {
        Error::Api(err)
    }
}

impl From<base64::DecodeError> for Error {
    fn from(_: base64::DecodeError) -> Self {
        Error::InvalidCiphertextFormat("ciphertext is not valid base64")
    }
}

impl From<rand::Error> for Error {
    fn from(err: rand::Error) -> Self {
        Error::RandomnessFailed(err.to_string())
    }
}

// Conversion from PKE Error to API Error
impl From<Error> for CoreError {
    fn from(err: Error) -> Self {
        match err {
            Error::Key(e) => e.into(),
            Error::Api(e) => e,
            Error::InvalidCiphertextFormat(reason) => CoreError::Format {
                context: "ECIES ciphertext",
                message: reason.to_string(),
            },
            Error::AuthenticationFailed(_) => CoreError::AuthenticationFailed {
                context: "ECIES Decryption",
            },
            Error::KeyDerivationFailed(reason) => CoreError::Backend {
                context: "ECIES KDF",
                message: reason.to_string(),
            },
            Error::RandomnessFailed(reason) => CoreError::Backend {
                context: "ECIES RNG",
                message: reason,
            },
        }
    }
}

/// Result type for PKE operations.
pub type Result<T> = core::result::Result<T, Error>;
