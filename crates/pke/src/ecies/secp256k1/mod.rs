//! ECIES implementation for secp256k1.
use aes::Aes256;
use ctr::cipher::{KeyIvInit, StreamCipher};
use ecseal_api::error::{Error as ApiError, Result as ApiResult};
use ecseal_api::traits::Pke;
use ecseal_internal::ct_eq;
use ecseal_keys::secp256k1::{K256PublicKey, K256SecretKey, K256_POINT_UNCOMPRESSED_SIZE};
use k256::ecdh::diffie_hellman;
use log::{debug, trace};
use rand::{CryptoRng, RngCore};

use super::{compute_mac, derive_keys_hkdf_sha256, EciesCiphertextComponents, IV_LEN, MAC_LEN};
use crate::error::{Error as PkeError, Result as PkeResult};

type Aes256Ctr = ctr::Ctr128BE<Aes256>;

/// Smallest valid ciphertext: ephemeral point, IV and tag around an empty body.
pub const MIN_CIPHERTEXT_LEN: usize = K256_POINT_UNCOMPRESSED_SIZE + IV_LEN + MAC_LEN;

/// ECIES over secp256k1 with HKDF-SHA256, AES-256-CTR and HMAC-SHA256.
///
/// Wire format: `R (65) || IV (16) || C || T (32)`, where `T` is the HMAC
/// of everything before it.
#[derive(Debug, Clone, Copy, Default)]
pub struct EciesK256;

impl EciesK256 {
    /// Ciphertext size for a plaintext of `plaintext_len` bytes.
    pub const fn ciphertext_len(plaintext_len: usize) -> usize {
        MIN_CIPHERTEXT_LEN + plaintext_len
    }

    fn seal<R: RngCore + CryptoRng>(
        pk_recipient: &K256PublicKey,
        plaintext: &[u8],
        rng: &mut R,
    ) -> PkeResult<Vec<u8>> {
        let ephemeral_sk = K256SecretKey::random(&mut *rng)?;
        let r_bytes_uncompressed = ephemeral_sk.public_key().to_uncompressed_bytes();

        let shared = diffie_hellman(
            ephemeral_sk.as_inner().to_nonzero_scalar(),
            pk_recipient.as_inner().as_affine(),
        );
        drop(ephemeral_sk);
        let keys = derive_keys_hkdf_sha256(
            shared.raw_secret_bytes().as_slice(),
            &r_bytes_uncompressed,
            Self::name(),
        )?;
        drop(shared);

        let mut iv = [0u8; IV_LEN];
        rng.try_fill_bytes(&mut iv)?;

        let mut body = plaintext.to_vec();
        let mut cipher = Aes256Ctr::new_from_slices(&keys.enc_key, &iv)
            .map_err(|_| PkeError::KeyDerivationFailed("AES-CTR key or IV length rejected"))?;
        cipher.apply_keystream(&mut body);

        let tag = compute_mac(&keys.mac_key, &[&r_bytes_uncompressed[..], &iv[..], &body[..]])?;

        let components = EciesCiphertextComponents {
            ephemeral_public_key: &r_bytes_uncompressed,
            iv: &iv,
            body: &body,
            tag: &tag,
        };
        trace!("sealed {} plaintext bytes", plaintext.len());
        Ok(components.serialize())
    }

    fn open(sk_recipient: &K256SecretKey, ciphertext: &[u8]) -> PkeResult<Vec<u8>> {
        let components =
            EciesCiphertextComponents::deserialize(ciphertext, K256_POINT_UNCOMPRESSED_SIZE)?;

        // The ephemeral key is attacker-controlled; a bad point is treated
        // the same as a bad tag.
        let r_point = K256PublicKey::from_sec1_bytes(components.ephemeral_public_key)
            .map_err(|_| PkeError::AuthenticationFailed("ephemeral key is not a valid point"))?;

        let shared = diffie_hellman(
            sk_recipient.as_inner().to_nonzero_scalar(),
            r_point.as_inner().as_affine(),
        );
        let keys = derive_keys_hkdf_sha256(
            shared.raw_secret_bytes().as_slice(),
            components.ephemeral_public_key,
            Self::name(),
        )?;
        drop(shared);

        let expected_tag = compute_mac(&keys.mac_key, &components.authenticated_parts())?;
        if !ct_eq(expected_tag, components.tag) {
            debug!("MAC verification failed for {}-byte ciphertext", ciphertext.len());
            return Err(PkeError::AuthenticationFailed("MAC mismatch"));
        }

        let mut plaintext = components.body.to_vec();
        let mut cipher = Aes256Ctr::new_from_slices(&keys.enc_key, components.iv)
            .map_err(|_| PkeError::KeyDerivationFailed("AES-CTR key or IV length rejected"))?;
        cipher.apply_keystream(&mut plaintext);
        trace!("opened {} plaintext bytes", plaintext.len());
        Ok(plaintext)
    }
}

impl Pke for EciesK256 {
    type PublicKey = K256PublicKey;
    type SecretKey = K256SecretKey;
    type Ciphertext = Vec<u8>;

    fn name() -> &'static str {
        "ECIES-secp256k1-HKDF-SHA256-AES256CTR-HMACSHA256"
    }

    fn keypair<R: RngCore + CryptoRng>(
        rng: &mut R,
    ) -> ApiResult<(Self::PublicKey, Self::SecretKey)> {
        let sk = K256SecretKey::random(rng).map_err(PkeError::from)?;
        Ok((sk.public_key(), sk))
    }

    fn encrypt<R: RngCore + CryptoRng>(
        pk_recipient: &Self::PublicKey,
        plaintext: &[u8],
        rng: &mut R,
    ) -> ApiResult<Self::Ciphertext> {
        Self::seal(pk_recipient, plaintext, rng).map_err(ApiError::from)
    }

    fn decrypt(
        sk_recipient: &Self::SecretKey,
        ciphertext: &Self::Ciphertext,
    ) -> ApiResult<Vec<u8>> {
        Self::open(sk_recipient, ciphertext).map_err(ApiError::from)
    }
}
