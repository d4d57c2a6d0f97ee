//! secp256k1 key types used across the engine.
//!
//! Keys are validated once at construction: a secret scalar lies in
//! `[1, n-1]` and a public key is a point on the curve other than the
//! identity. Everything downstream relies on that.

use std::fmt;

use k256::elliptic_curve::sec1::ToEncodedPoint;
use rand::{CryptoRng, RngCore};
use sha2::{Digest, Sha256};
use zeroize::{ZeroizeOnDrop, Zeroizing};

use crate::error::{Error, Result};

/// Size of a serialized secp256k1 scalar.
pub const K256_SCALAR_SIZE: usize = 32;
/// Size of an uncompressed SEC1 point (`0x04 || X || Y`).
pub const K256_POINT_UNCOMPRESSED_SIZE: usize = 65;
/// Size of a compressed SEC1 point.
pub const K256_POINT_COMPRESSED_SIZE: usize = 33;

/// Secret scalar `d`. Zeroized on drop; never printed.
#[derive(Clone)]
pub struct K256SecretKey(k256::SecretKey);

impl K256SecretKey {
    /// Draws a fresh scalar from `rng`, retrying candidates outside
    /// `[1, n-1]`. A failing generator is reported, not retried.
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self> {
        let mut candidate = Zeroizing::new([0u8; K256_SCALAR_SIZE]);
        loop {
            rng.try_fill_bytes(&mut candidate[..])?;
            if let Ok(key) = k256::SecretKey::from_slice(&candidate[..]) {
                return Ok(Self(key));
            }
        }
    }

    /// Loads a big-endian scalar. Encodings shorter than 32 bytes are
    /// left-padded, as some SEC1 writers drop leading zero octets.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() || bytes.len() > K256_SCALAR_SIZE {
            return Err(Error::InvalidKey("private scalar has the wrong length"));
        }
        let mut padded = Zeroizing::new([0u8; K256_SCALAR_SIZE]);
        padded[K256_SCALAR_SIZE - bytes.len()..].copy_from_slice(bytes);

        k256::SecretKey::from_slice(&padded[..])
            .map(Self)
            .map_err(|_| Error::InvalidKey("private scalar is zero or not below the group order"))
    }

    /// Big-endian scalar bytes in a self-wiping buffer.
    pub fn to_bytes(&self) -> Zeroizing<[u8; K256_SCALAR_SIZE]> {
        Zeroizing::new(self.0.to_bytes().into())
    }

    /// The matching public key `d*G`.
    pub fn public_key(&self) -> K256PublicKey {
        K256PublicKey(self.0.public_key())
    }

    /// Backend handle for ECDH.
    pub fn as_inner(&self) -> &k256::SecretKey {
        &self.0
    }
}

// k256::SecretKey wipes its scalar when dropped.
impl ZeroizeOnDrop for K256SecretKey {}

impl fmt::Debug for K256SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("K256SecretKey")
            .field("scalar", &"[REDACTED]")
            .finish()
    }
}

/// Public point on secp256k1.
#[derive(Clone, PartialEq, Eq)]
pub struct K256PublicKey(k256::PublicKey);

impl K256PublicKey {
    /// Parses a compressed or uncompressed SEC1 point.
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self> {
        k256::PublicKey::from_sec1_bytes(bytes)
            .map(Self)
            .map_err(|_| Error::InvalidKey("public key is not a valid secp256k1 point"))
    }

    /// `0x04 || X || Y`.
    pub fn to_uncompressed_bytes(&self) -> [u8; K256_POINT_UNCOMPRESSED_SIZE] {
        let encoded = self.0.to_encoded_point(false);
        let mut out = [0u8; K256_POINT_UNCOMPRESSED_SIZE];
        out.copy_from_slice(encoded.as_bytes());
        out
    }

    /// `0x02/0x03 || X`.
    pub fn to_compressed_bytes(&self) -> [u8; K256_POINT_COMPRESSED_SIZE] {
        let encoded = self.0.to_encoded_point(true);
        let mut out = [0u8; K256_POINT_COMPRESSED_SIZE];
        out.copy_from_slice(encoded.as_bytes());
        out
    }

    /// SHA-256 over the SPKI encoding, hex encoded. Safe to log.
    pub fn fingerprint(&self) -> Result<String> {
        let spki = crate::codec::encode_public_key_der(self)?;
        Ok(hex::encode(Sha256::digest(&spki)))
    }

    /// Backend handle for ECDH.
    pub fn as_inner(&self) -> &k256::PublicKey {
        &self.0
    }
}

impl fmt::Debug for K256PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "K256PublicKey({})", hex::encode(self.to_compressed_bytes()))
    }
}

/// A secret key together with its derived public key.
#[derive(Clone, Debug)]
pub struct K256KeyPair {
    secret: K256SecretKey,
    public: K256PublicKey,
}

impl K256KeyPair {
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self> {
        K256SecretKey::random(rng).map(Self::from_secret)
    }

    pub fn from_secret(secret: K256SecretKey) -> Self {
        let public = secret.public_key();
        Self { secret, public }
    }

    pub fn secret(&self) -> &K256SecretKey {
        &self.secret
    }

    pub fn public(&self) -> &K256PublicKey {
        &self.public
    }
}
