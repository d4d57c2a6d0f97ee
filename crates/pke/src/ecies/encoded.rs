//! String-level ECIES: encoded keys in, base64 ciphertext out.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use ecseal_api::error::{Error as ApiError, Result as ApiResult};
use ecseal_api::traits::Pke;
use ecseal_keys::{EncodedPrivateKey, EncodedPublicKey};
use log::debug;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use super::EciesK256;
use crate::error::Error as PkeError;

/// Encrypts `plaintext` to `recipient` with the OS CSPRNG.
pub fn encrypt_base64(plaintext: &[u8], recipient: &EncodedPublicKey) -> ApiResult<String> {
    encrypt_base64_with_rng(plaintext, recipient, &mut OsRng)
}

/// Encrypts `plaintext` to `recipient` with a caller-supplied RNG.
pub fn encrypt_base64_with_rng<R: RngCore + CryptoRng>(
    plaintext: &[u8],
    recipient: &EncodedPublicKey,
    rng: &mut R,
) -> ApiResult<String> {
    let pk = recipient.decode().map_err(ApiError::from)?;
    debug!(
        "{}: encrypting {} bytes to {}",
        EciesK256::name(),
        plaintext.len(),
        pk.fingerprint()?
    );
    let ciphertext = EciesK256::encrypt(&pk, plaintext, rng)?;
    Ok(STANDARD.encode(ciphertext))
}

/// Decrypts a base64 ciphertext with `recipient`.
///
/// The key is decoded before the ciphertext, so a bad key is reported
/// even when the ciphertext is also malformed.
pub fn decrypt_base64(ciphertext_b64: &str, recipient: &EncodedPrivateKey) -> ApiResult<Vec<u8>> {
    let sk = recipient.decode().map_err(ApiError::from)?;
    let ciphertext = STANDARD
        .decode(ciphertext_b64.trim())
        .map_err(|e| ApiError::from(PkeError::from(e)))?;
    debug!(
        "{}: decrypting {} bytes for {}",
        EciesK256::name(),
        ciphertext.len(),
        sk.public_key().fingerprint()?
    );
    EciesK256::decrypt(&sk, &ciphertext)
}
