//! Error handling for the key codec and key import.

use std::fmt;

use ecseal_api::error::Error as CoreError;
use thiserror::Error;

/// Which slot a key was requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Private,
    Public,
}

impl KeyKind {
    pub fn describe(self) -> &'static str {
        match self {
            KeyKind::Private => "EC private key",
            KeyKind::Public => "EC public key",
        }
    }
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Error type for key codec operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed PEM: {0}")]
    Pem(#[from] pem_rfc7468::Error),

    #[error("malformed DER: {0}")]
    Asn1(#[from] der::Error),

    #[error("invalid key structure: {0}")]
    Der(&'static str),

    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("invalid key material: {0}")]
    InvalidKey(&'static str),

    #[error("expected {expected}, found {found}")]
    KeyType { expected: KeyKind, found: String },

    #[error("expected curve {expected}, found {found}")]
    CurveMismatch { expected: &'static str, found: String },

    #[error("random number generator failed: {0}")]
    Rng(#[from] rand::Error),

    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for key codec operations.
pub type Result<T> = core::result::Result<T, Error>;

impl From<Error> for CoreError {
    fn from(err: Error) -> Self {
        match err {
            Error::Pem(e) => CoreError::Format {
                context: "PEM",
                message: e.to_string(),
            },
            Error::Asn1(e) => CoreError::Format {
                context: "DER",
                message: e.to_string(),
            },
            Error::Der(reason) => CoreError::Format {
                context: "DER",
                message: reason.to_string(),
            },
            Error::Base64(e) => CoreError::Format {
                context: "base64",
                message: e.to_string(),
            },
            Error::InvalidKey(reason) => CoreError::InvalidKey {
                context: "secp256k1",
                message: reason.to_string(),
            },
            Error::KeyType { expected, found } => CoreError::KeyType {
                expected: expected.describe(),
                found,
            },
            Error::CurveMismatch { expected, found } => {
                CoreError::CurveMismatch { expected, found }
            }
            Error::Rng(e) => CoreError::Backend {
                context: "RNG",
                message: e.to_string(),
            },
            Error::Io { path, source } => CoreError::Io {
                context: "reading key file",
                message: format!("{}: {}", path, source),
            },
        }
    }
}
