//! # ecseal
//!
//! Encrypts payloads to a secp256k1 public key with ECIES and decrypts
//! them with the matching private key. Keys are read from PEM files
//! (SEC1, PKCS#8 or SPKI) and checked for type and curve before use.
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports functionality from several sub-crates:
//!
//! - [`ecseal-api`]: Error taxonomy and the `Pke` trait
//! - [`ecseal-keys`]: PEM/DER/base64 codec and typed key import
//! - [`ecseal-pke`]: ECIES over secp256k1
//!
//! It also hosts the command-line front end used by the `ecseal` binary.

pub use ecseal_api as api;
pub use ecseal_internal as internal;
pub use ecseal_keys as keys;
pub use ecseal_pke as pke;

pub mod cli;
pub mod commands;

/// Common imports for ecseal users
pub mod prelude {
    // Re-export error types
    pub use crate::api::{Error, Result, ResultExt};

    // Re-export core traits
    pub use crate::api::Pke;

    // Key types and their encoded forms
    pub use crate::keys::{
        EncodedKey, EncodedPrivateKey, EncodedPublicKey, K256KeyPair, K256PublicKey,
        K256SecretKey,
    };

    // Engine
    pub use crate::pke::{decrypt_base64, encrypt_base64, EciesK256};
}
