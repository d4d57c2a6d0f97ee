//! Shared fixtures for the ecseal integration tests
//!
//! Keys for foreign curves and algorithms are assembled byte by byte so
//! the tests do not depend on any other toolchain.

use ecseal_keys::pem::{encode_pem, LABEL_EC_PRIVATE_KEY, LABEL_PUBLIC_KEY};
use ecseal_keys::{EncodedPrivateKey, EncodedPublicKey, K256KeyPair};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// 1.2.840.10045.2.1
pub const OID_EC_PUBLIC_KEY: &[u8] = &[0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01];
/// 1.2.840.10045.3.1.7
pub const OID_PRIME256V1: &[u8] = &[0x2a, 0x86, 0x48, 0xce, 0x3d, 0x03, 0x01, 0x07];
/// 1.2.840.113549.1.1.1
pub const OID_RSA_ENCRYPTION: &[u8] = &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x01];

/// Deterministic secp256k1 key pair.
pub fn keypair(seed: u64) -> K256KeyPair {
    K256KeyPair::generate(&mut ChaCha20Rng::seed_from_u64(seed)).unwrap()
}

/// Deterministic key pair in its encoded forms.
pub fn encoded_keypair(seed: u64) -> (EncodedPublicKey, EncodedPrivateKey) {
    let pair = keypair(seed);
    (
        EncodedPublicKey::from_key(pair.public()).unwrap(),
        EncodedPrivateKey::from_key(pair.secret()).unwrap(),
    )
}

/// DER TLV for contents shorter than 256 bytes.
pub fn tlv(tag: u8, content: &[u8]) -> Vec<u8> {
    assert!(content.len() < 256, "fixture content too long");
    let mut out = vec![tag];
    if content.len() >= 0x80 {
        out.push(0x81);
    }
    out.push(content.len() as u8);
    out.extend_from_slice(content);
    out
}

fn concat(parts: &[&[u8]]) -> Vec<u8> {
    parts.concat()
}

/// SPKI for an arbitrary algorithm with optional parameters.
pub fn spki_der(algorithm: &[u8], params: Option<&[u8]>, key: &[u8]) -> Vec<u8> {
    let oid = tlv(0x06, algorithm);
    let alg = tlv(0x30, &concat(&[&oid[..], params.unwrap_or(&[])]));
    let bits = tlv(0x03, &concat(&[&[0x00u8][..], key]));
    tlv(0x30, &concat(&[&alg[..], &bits[..]]))
}

/// SEC1 ECPrivateKey with an arbitrary named curve.
pub fn sec1_der(curve: &[u8], scalar: &[u8], point: &[u8]) -> Vec<u8> {
    let version = tlv(0x02, &[0x01]);
    let private_key = tlv(0x04, scalar);
    let params = tlv(0xa0, &tlv(0x06, curve));
    let public_key = tlv(0xa1, &tlv(0x03, &concat(&[&[0x00u8][..], point])));
    tlv(
        0x30,
        &concat(&[&version[..], &private_key[..], &params[..], &public_key[..]]),
    )
}

/// Placeholder uncompressed point; only the container is inspected for
/// foreign curves.
fn dummy_point() -> Vec<u8> {
    let mut point = vec![0x04];
    point.extend(1..=64u8);
    point
}

/// A prime256v1 public key in PEM.
pub fn p256_public_pem() -> String {
    let der = spki_der(OID_EC_PUBLIC_KEY, Some(&tlv(0x06, OID_PRIME256V1)[..]), &dummy_point());
    encode_pem(LABEL_PUBLIC_KEY, &der).unwrap()
}

/// A prime256v1 private key in PEM.
pub fn p256_private_pem() -> String {
    let der = sec1_der(OID_PRIME256V1, &[0x11; 32], &dummy_point());
    encode_pem(LABEL_EC_PRIVATE_KEY, &der).unwrap()
}

/// An RSA public key in PEM. The modulus is not meaningful.
pub fn rsa_public_pem() -> String {
    let modulus = tlv(0x02, &[0x00, 0xc3, 0x5d]);
    let exponent = tlv(0x02, &[0x01, 0x00, 0x01]);
    let rsa_key = tlv(0x30, &concat(&[&modulus[..], &exponent[..]]));
    let der = spki_der(OID_RSA_ENCRYPTION, Some(&[0x05u8, 0x00][..]), &rsa_key);
    encode_pem(LABEL_PUBLIC_KEY, &der).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_p256_fixture_layout() {
        let der = spki_der(OID_EC_PUBLIC_KEY, Some(&tlv(0x06, OID_PRIME256V1)[..]), &dummy_point());
        assert_eq!(der.len(), 91);
        assert_eq!(&der[..4], &[0x30u8, 0x59, 0x30, 0x13]);

        let der = sec1_der(OID_PRIME256V1, &[0x11; 32], &dummy_point());
        assert_eq!(&der[..2], &[0x30u8, 0x77]);
    }
}
