//! Key handling for ecseal.
//!
//! PEM framing, DER key containers, and typed import of secp256k1 keys
//! from SEC1, PKCS#8 and SPKI containers. Keys cross into the encryption
//! engine as [`EncodedPrivateKey`] / [`EncodedPublicKey`], the base64 of
//! their canonical DER.

pub mod codec;
pub mod error;
pub mod import;
pub mod oid;
pub mod parse;
pub mod pem;
pub mod secp256k1;

pub use codec::{EncodedKey, EncodedPrivateKey, EncodedPublicKey};
pub use error::{Error, KeyKind, Result};
pub use import::{
    encoded_key_from_pem, import_private_key, import_public_key, read_private_key_file,
    read_public_key_file,
};
pub use oid::Curve;
pub use parse::{parse_der, ParsedKey};
pub use pem::{decode_pem, encode_pem, PemBlock};
pub use secp256k1::{K256KeyPair, K256PublicKey, K256SecretKey};
