//! Typed key import.
//!
//! Turns a [`ParsedKey`] into a secp256k1 key of the requested kind.
//! The PEM label is never trusted; only the DER content decides.

use std::path::Path;

use log::debug;

use crate::codec::{EncodedKey, EncodedPrivateKey, EncodedPublicKey};
use crate::error::{Error, KeyKind, Result};
use crate::oid::Curve;
use crate::parse::{parse_der, ParsedKey};
use crate::pem::{decode_pem, load_key_from_pem};
use crate::secp256k1::{K256PublicKey, K256SecretKey};

/// The only curve this crate accepts.
pub const EXPECTED_CURVE: &str = "secp256k1";

/// Extracts a secp256k1 private key.
pub fn import_private_key(parsed: ParsedKey) -> Result<K256SecretKey> {
    match &parsed {
        ParsedKey::EcPrivateKey {
            curve,
            scalar,
            public_key,
        } => {
            require_secp256k1(curve.as_ref())?;
            let secret = K256SecretKey::from_bytes(scalar)?;
            if let Some(embedded) = public_key {
                let embedded = K256PublicKey::from_sec1_bytes(embedded)?;
                if embedded != secret.public_key() {
                    return Err(Error::InvalidKey(
                        "embedded public key does not match private scalar",
                    ));
                }
            }
            Ok(secret)
        }
        ParsedKey::EcPublicKey { .. } => Err(Error::KeyType {
            expected: KeyKind::Private,
            found: parsed.describe(),
        }),
        ParsedKey::Other { .. } => Err(Error::KeyType {
            expected: KeyKind::Private,
            found: parsed.describe(),
        }),
    }
}

/// Extracts a secp256k1 public key.
pub fn import_public_key(parsed: ParsedKey) -> Result<K256PublicKey> {
    match &parsed {
        ParsedKey::EcPublicKey { curve, point } => {
            require_secp256k1(curve.as_ref())?;
            K256PublicKey::from_sec1_bytes(point)
        }
        ParsedKey::EcPrivateKey { .. } => Err(Error::KeyType {
            expected: KeyKind::Public,
            found: parsed.describe(),
        }),
        ParsedKey::Other { .. } => Err(Error::KeyType {
            expected: KeyKind::Public,
            found: parsed.describe(),
        }),
    }
}

fn require_secp256k1(curve: Option<&Curve>) -> Result<()> {
    match curve {
        Some(Curve::Secp256k1) => Ok(()),
        Some(other) => Err(Error::CurveMismatch {
            expected: EXPECTED_CURVE,
            found: other.to_string(),
        }),
        None => Err(Error::CurveMismatch {
            expected: EXPECTED_CURVE,
            found: "unspecified curve".to_string(),
        }),
    }
}

/// PEM text to private key.
pub fn load_private_key_pem(pem: &[u8]) -> Result<K256SecretKey> {
    let block = decode_pem(pem)?;
    import_private_key(parse_der(block.der())?)
}

/// PEM text to public key.
pub fn load_public_key_pem(pem: &[u8]) -> Result<K256PublicKey> {
    let block = decode_pem(pem)?;
    import_public_key(parse_der(block.der())?)
}

/// Reads and imports a private key file.
pub fn read_private_key_file(path: impl AsRef<Path>) -> Result<K256SecretKey> {
    let block = load_key_from_pem(path)?;
    let key = import_private_key(parse_der(block.der())?)?;
    debug!("imported private key for {}", key.public_key().fingerprint()?);
    Ok(key)
}

/// Reads and imports a public key file.
pub fn read_public_key_file(path: impl AsRef<Path>) -> Result<K256PublicKey> {
    let block = load_key_from_pem(path)?;
    let key = import_public_key(parse_der(block.der())?)?;
    debug!("imported public key {}", key.fingerprint()?);
    Ok(key)
}

/// Re-encodes a PEM key of either kind into its canonical base64 form.
/// PKCS#8 input comes out as SEC1.
pub fn encoded_key_from_pem(pem: &[u8]) -> Result<EncodedKey> {
    let block = decode_pem(pem)?;
    match parse_der(block.der())? {
        parsed @ ParsedKey::EcPrivateKey { .. } => {
            let key = import_private_key(parsed)?;
            Ok(EncodedKey::Private(EncodedPrivateKey::from_key(&key)?))
        }
        parsed @ ParsedKey::EcPublicKey { .. } => {
            let key = import_public_key(parsed)?;
            Ok(EncodedKey::Public(EncodedPublicKey::from_key(&key)?))
        }
        parsed @ ParsedKey::Other { .. } => Err(Error::KeyType {
            expected: KeyKind::Private,
            found: parsed.describe(),
        }),
    }
}

impl EncodedPrivateKey {
    /// PEM text to canonical encoded form.
    pub fn from_pem(pem: &[u8]) -> Result<Self> {
        Self::from_key(&load_private_key_pem(pem)?)
    }
}

impl EncodedPublicKey {
    /// PEM text to canonical encoded form.
    pub fn from_pem(pem: &[u8]) -> Result<Self> {
        Self::from_key(&load_public_key_pem(pem)?)
    }
}
