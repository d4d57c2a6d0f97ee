//! Canonical DER and base64 forms of secp256k1 keys.
//!
//! Private keys are written as SEC1 `ECPrivateKey` (RFC 5915) with the
//! named curve and public key present; public keys as X.509
//! `SubjectPublicKeyInfo` (RFC 5480) with an uncompressed point. The
//! base64 of those DER bytes is the `EncodedKey` form that crosses the
//! engine boundary.

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use der::asn1::{AnyRef, BitStringRef};
use der::Encode;
use spki::{AlgorithmIdentifierRef, SubjectPublicKeyInfoRef};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::Result;
use crate::import;
use crate::oid;
use crate::parse::parse_der;
use crate::secp256k1::{K256PublicKey, K256SecretKey};

/// Encoded size of a secp256k1 SEC1 private key.
pub const K256_SEC1_DER_SIZE: usize = 118;
/// Encoded size of a secp256k1 SPKI public key.
pub const K256_SPKI_DER_SIZE: usize = 88;

/// SEC1 DER for a private key, with the named curve and public key
/// present. The buffer is wiped on drop.
pub fn encode_private_key_der(key: &K256SecretKey) -> Result<Zeroizing<Vec<u8>>> {
    Ok(key.as_inner().to_sec1_der()?)
}

/// SPKI DER for a public key.
pub fn encode_public_key_der(key: &K256PublicKey) -> Result<Vec<u8>> {
    let point = key.to_uncompressed_bytes();
    let spki = SubjectPublicKeyInfoRef {
        algorithm: AlgorithmIdentifierRef {
            oid: oid::ID_EC_PUBLIC_KEY,
            parameters: Some(AnyRef::from(&oid::SECP256K1)),
        },
        subject_public_key: BitStringRef::from_bytes(&point)?,
    };
    Ok(spki.to_der()?)
}

/// Standard alphabet, padded.
pub fn to_base64(der: &[u8]) -> String {
    STANDARD.encode(der)
}

/// Strict inverse of [`to_base64`]: rejects bad alphabet, missing or
/// excess padding, and surrounding whitespace.
pub fn from_base64(encoded: &str) -> Result<Vec<u8>> {
    Ok(STANDARD.decode(encoded)?)
}

/// Canonical base64 SEC1 DER of a private key.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct EncodedPrivateKey(String);

impl EncodedPrivateKey {
    /// Wraps a caller-supplied string. Validation happens in [`decode`](Self::decode).
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn from_key(key: &K256SecretKey) -> Result<Self> {
        let der = encode_private_key_der(key)?;
        Ok(Self(to_base64(&der)))
    }

    /// Decodes, parses and imports the key. Accepts SEC1 and PKCS#8 DER.
    pub fn decode(&self) -> Result<K256SecretKey> {
        let der = Zeroizing::new(from_base64(&self.0)?);
        import::import_private_key(parse_der(&der)?)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for EncodedPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EncodedPrivateKey([REDACTED])")
    }
}

/// Canonical base64 SPKI DER of a public key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedPublicKey(String);

impl EncodedPublicKey {
    /// Wraps a caller-supplied string. Validation happens in [`decode`](Self::decode).
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn from_key(key: &K256PublicKey) -> Result<Self> {
        Ok(Self(to_base64(&encode_public_key_der(key)?)))
    }

    pub fn decode(&self) -> Result<K256PublicKey> {
        let der = from_base64(&self.0)?;
        import::import_public_key(parse_der(&der)?)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EncodedPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Either kind of encoded key, as found in a key file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EncodedKey {
    Private(EncodedPrivateKey),
    Public(EncodedPublicKey),
}

impl EncodedKey {
    pub fn as_str(&self) -> &str {
        match self {
            EncodedKey::Private(key) => key.as_str(),
            EncodedKey::Public(key) => key.as_str(),
        }
    }
}
