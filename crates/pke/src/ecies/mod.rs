//! Elliptic Curve Integrated Encryption Scheme (ECIES) generic components.

use hkdf::Hkdf;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Error as PkeError, Result as PkeResult};

pub mod encoded;
pub mod secp256k1;

pub use secp256k1::EciesK256;
pub use encoded::{decrypt_base64, encrypt_base64, encrypt_base64_with_rng};

pub(crate) const AES256_KEY_LEN: usize = 32;
pub(crate) const HMAC_SHA256_KEY_LEN: usize = 32;

/// AES-CTR initial counter block.
pub const IV_LEN: usize = 16;
/// HMAC-SHA256 tag.
pub const MAC_LEN: usize = 32;

type HmacSha256 = Hmac<Sha256>;

/// Encryption and MAC keys derived from one ECDH secret.
#[derive(Zeroize, ZeroizeOnDrop)]
pub(crate) struct DerivedKeys {
    pub enc_key: [u8; AES256_KEY_LEN],
    pub mac_key: [u8; HMAC_SHA256_KEY_LEN],
}

/// HKDF-SHA256 over the shared x-coordinate, salted with the ephemeral
/// public key. `scheme` prefixes the two info strings.
pub(crate) fn derive_keys_hkdf_sha256(
    shared_secret_z: &[u8],
    ephemeral_pk_bytes: &[u8],
    scheme: &str,
) -> PkeResult<DerivedKeys> {
    let hk = Hkdf::<Sha256>::new(Some(ephemeral_pk_bytes), shared_secret_z);
    let mut keys = DerivedKeys {
        enc_key: [0u8; AES256_KEY_LEN],
        mac_key: [0u8; HMAC_SHA256_KEY_LEN],
    };

    let enc_info = format!("{}-enc", scheme);
    let mac_info = format!("{}-mac", scheme);
    hk.expand(enc_info.as_bytes(), &mut keys.enc_key)
        .map_err(|_| PkeError::KeyDerivationFailed("HKDF output length rejected"))?;
    hk.expand(mac_info.as_bytes(), &mut keys.mac_key)
        .map_err(|_| PkeError::KeyDerivationFailed("HKDF output length rejected"))?;
    Ok(keys)
}

/// HMAC-SHA256 over `parts` in order.
pub(crate) fn compute_mac(mac_key: &[u8], parts: &[&[u8]]) -> PkeResult<[u8; MAC_LEN]> {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(mac_key)
        .map_err(|_| PkeError::KeyDerivationFailed("invalid HMAC key length"))?;
    for part in parts {
        mac.update(part);
    }
    Ok(mac.finalize().into_bytes().into())
}

/// Internal structure for ECIES ciphertext components.
/// Format on wire: R (fixed size) || IV (16) || C || T (32)
#[derive(Clone, Debug)]
pub(crate) struct EciesCiphertextComponents<'a> {
    pub ephemeral_public_key: &'a [u8], // R
    pub iv: &'a [u8],
    pub body: &'a [u8], // C
    pub tag: &'a [u8],  // T
}

impl<'a> EciesCiphertextComponents<'a> {
    /// Bytes covered by the tag.
    pub fn authenticated_parts(&self) -> [&'a [u8]; 3] {
        [self.ephemeral_public_key, self.iv, self.body]
    }

    pub fn serialize(&self) -> Vec<u8> {
        let total_len =
            self.ephemeral_public_key.len() + self.iv.len() + self.body.len() + self.tag.len();
        let mut serialized = Vec::with_capacity(total_len);
        serialized.extend_from_slice(self.ephemeral_public_key);
        serialized.extend_from_slice(self.iv);
        serialized.extend_from_slice(self.body);
        serialized.extend_from_slice(self.tag);
        serialized
    }

    /// Splits at fixed offsets. Only the total length is checked here.
    pub fn deserialize(bytes: &'a [u8], point_len: usize) -> PkeResult<Self> {
        if bytes.len() < point_len + IV_LEN + MAC_LEN {
            return Err(PkeError::InvalidCiphertextFormat("ciphertext too short"));
        }
        let (ephemeral_public_key, rest) = bytes.split_at(point_len);
        let (iv, rest) = rest.split_at(IV_LEN);
        let (body, tag) = rest.split_at(rest.len() - MAC_LEN);
        Ok(Self {
            ephemeral_public_key,
            iv,
            body,
            tag,
        })
    }
}
