//! Error handling for the ecseal engine

pub mod traits;
pub mod types;

pub use traits::ResultExt;
pub use types::{Error, Result};

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io {
            context: "I/O operation",
            message: e.to_string(),
        }
    }
}
