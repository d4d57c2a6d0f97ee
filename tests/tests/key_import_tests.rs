use ecseal_api::error::Error as ApiError;
use ecseal_api::Pke;
use ecseal_keys::import::{load_private_key_pem, load_public_key_pem};
use ecseal_keys::pem::{encode_pem, LABEL_EC_PRIVATE_KEY, LABEL_PUBLIC_KEY};
use ecseal_keys::{
    decode_pem, encoded_key_from_pem, parse_der, EncodedKey, EncodedPrivateKey, EncodedPublicKey,
    Error, KeyKind, ParsedKey,
};
use ecseal_pke::{decrypt_base64, encrypt_base64, EciesK256};
use ecseal_tests::{
    encoded_keypair, keypair, p256_private_pem, p256_public_pem, rsa_public_pem, sec1_der,
    spki_der, tlv, OID_EC_PUBLIC_KEY,
};
use rand::rngs::OsRng;

/// 1.3.132.0.10
const OID_SECP256K1: &[u8] = &[0x2b, 0x81, 0x04, 0x00, 0x0a];

fn pems(seed: u64) -> (String, String) {
    let (pk, sk) = encoded_keypair(seed);
    let public = der_of(pk.as_str());
    let private = der_of(sk.as_str());
    (
        encode_pem(LABEL_PUBLIC_KEY, &public).unwrap(),
        encode_pem(LABEL_EC_PRIVATE_KEY, &private).unwrap(),
    )
}

fn der_of(encoded: &str) -> Vec<u8> {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    STANDARD.decode(encoded).unwrap()
}

#[test]
fn test_pem_files_drive_encryption() {
    let (public_pem, private_pem) = pems(200);
    let pk = EncodedPublicKey::from_pem(public_pem.as_bytes()).unwrap();
    let sk = EncodedPrivateKey::from_pem(private_pem.as_bytes()).unwrap();

    let ciphertext = encrypt_base64(b"from pem", &pk).unwrap();
    assert_eq!(decrypt_base64(&ciphertext, &sk).unwrap(), b"from pem");
}

#[test]
fn test_public_key_in_private_slot() {
    let (public_pem, _) = pems(201);
    match load_private_key_pem(public_pem.as_bytes()) {
        Err(Error::KeyType { expected, found }) => {
            assert_eq!(expected, KeyKind::Private);
            assert_eq!(found, "EC public key (secp256k1)");
        }
        other => panic!("Expected KeyType error, got {:?}", other),
    }
}

#[test]
fn test_private_key_in_public_slot() {
    let (_, private_pem) = pems(202);
    match load_public_key_pem(private_pem.as_bytes()) {
        Err(Error::KeyType { expected, .. }) => assert_eq!(expected, KeyKind::Public),
        other => panic!("Expected KeyType error, got {:?}", other),
    }
}

#[test]
fn test_prime256v1_keys_are_curve_mismatches() {
    match load_public_key_pem(p256_public_pem().as_bytes()) {
        Err(Error::CurveMismatch { expected, found }) => {
            assert_eq!(expected, "secp256k1");
            assert_eq!(found, "prime256v1");
        }
        other => panic!("Expected CurveMismatch, got {:?}", other),
    }
    assert!(matches!(
        load_private_key_pem(p256_private_pem().as_bytes()),
        Err(Error::CurveMismatch { .. })
    ));
}

#[test]
fn test_prime256v1_maps_to_exit_code_6() {
    let err: ApiError = EncodedPublicKey::from_pem(p256_public_pem().as_bytes())
        .unwrap_err()
        .into();
    assert!(matches!(err, ApiError::CurveMismatch { .. }));
    assert_eq!(err.exit_code(), 6);
}

#[test]
fn test_rsa_key_is_a_type_error() {
    match load_public_key_pem(rsa_public_pem().as_bytes()) {
        Err(Error::KeyType { found, .. }) => assert_eq!(found, "non-EC key (rsaEncryption)"),
        other => panic!("Expected KeyType error, got {:?}", other),
    }
    let block = decode_pem(rsa_public_pem().as_bytes()).unwrap();
    assert!(matches!(parse_der(block.der()).unwrap(), ParsedKey::Other { .. }));
}

#[test]
fn test_unspecified_curve_is_rejected() {
    let point = keypair(203).public().to_uncompressed_bytes();
    let der = spki_der(OID_EC_PUBLIC_KEY, None, &point);
    let pem = encode_pem(LABEL_PUBLIC_KEY, &der).unwrap();
    match load_public_key_pem(pem.as_bytes()) {
        Err(Error::CurveMismatch { found, .. }) => assert_eq!(found, "unspecified curve"),
        other => panic!("Expected CurveMismatch, got {:?}", other),
    }
}

#[test]
fn test_explicit_curve_parameters_are_format_errors() {
    let point = keypair(207).public().to_uncompressed_bytes();
    // SEQUENCE { INTEGER 1, ... } in place of a named curve
    let explicit = tlv(0x30, &tlv(0x02, &[0x01]));
    let der = spki_der(OID_EC_PUBLIC_KEY, Some(&explicit[..]), &point);
    let pem = encode_pem(LABEL_PUBLIC_KEY, &der).unwrap();

    let err: ApiError = EncodedPublicKey::from_pem(pem.as_bytes()).unwrap_err().into();
    assert!(matches!(err, ApiError::Format { .. }), "got {:?}", err);
    assert_eq!(err.exit_code(), 4);
}

#[test]
fn test_hand_built_secp256k1_keys_match_canonical_encoding() {
    let pair = keypair(204);
    let point = pair.public().to_uncompressed_bytes();
    let scalar = pair.secret().to_bytes();

    let spki = spki_der(OID_EC_PUBLIC_KEY, Some(&tlv(0x06, OID_SECP256K1)[..]), &point);
    let sec1 = sec1_der(OID_SECP256K1, &scalar[..], &point);

    let spki_pem = encode_pem(LABEL_PUBLIC_KEY, &spki).unwrap();
    let sec1_pem = encode_pem(LABEL_EC_PRIVATE_KEY, &sec1).unwrap();
    let pk = EncodedPublicKey::from_pem(spki_pem.as_bytes()).unwrap();
    let sk = EncodedPrivateKey::from_pem(sec1_pem.as_bytes()).unwrap();
    assert_eq!(pk, EncodedPublicKey::from_key(pair.public()).unwrap());
    assert_eq!(sk, EncodedPrivateKey::from_key(pair.secret()).unwrap());
}

#[test]
fn test_export_reports_kind() {
    let (public_pem, private_pem) = pems(205);
    assert!(matches!(
        encoded_key_from_pem(public_pem.as_bytes()).unwrap(),
        EncodedKey::Public(_)
    ));
    assert!(matches!(
        encoded_key_from_pem(private_pem.as_bytes()).unwrap(),
        EncodedKey::Private(_)
    ));
}

#[test]
fn test_typed_engine_with_imported_keys() {
    let (public_pem, private_pem) = pems(206);
    let pk = load_public_key_pem(public_pem.as_bytes()).unwrap();
    let sk = load_private_key_pem(private_pem.as_bytes()).unwrap();

    let ciphertext = EciesK256::encrypt(&pk, b"typed", &mut OsRng).unwrap();
    assert_eq!(ciphertext.len(), EciesK256::ciphertext_len(5));
    assert_eq!(EciesK256::decrypt(&sk, &ciphertext).unwrap(), b"typed");
}
