//! Public Key Encryption (PKE) schemes for ecseal.

pub mod ecies;
pub mod error;

// Re-export key items
pub use ecies::{decrypt_base64, encrypt_base64, encrypt_base64_with_rng, EciesK256};
pub use error::{Error, Result};
