use base64::{engine::general_purpose::STANDARD, Engine as _};
use ecseal_api::error::Error as ApiError;
use ecseal_keys::{EncodedPrivateKey, EncodedPublicKey};
use ecseal_pke::{decrypt_base64, encrypt_base64_with_rng};
use ecseal_tests::{encoded_keypair, keypair};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn roundtrip_any_message(
        message in proptest::collection::vec(any::<u8>(), 0..512),
        seed in any::<u64>(),
    ) {
        let (pk, sk) = encoded_keypair(300);
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let ciphertext = encrypt_base64_with_rng(&message, &pk, &mut rng).unwrap();
        prop_assert_eq!(STANDARD.decode(&ciphertext).unwrap().len(), 65 + 16 + message.len() + 32);
        prop_assert_eq!(decrypt_base64(&ciphertext, &sk).unwrap(), message);
    }

    #[test]
    fn keys_survive_encoding(seed in any::<u64>()) {
        let pair = keypair(seed);
        let pk = EncodedPublicKey::from_key(pair.public()).unwrap();
        let sk = EncodedPrivateKey::from_key(pair.secret()).unwrap();
        prop_assert_eq!(pk.as_str().len(), 120);
        prop_assert_eq!(&pk.decode().unwrap(), pair.public());
        prop_assert_eq!(sk.decode().unwrap().public_key(), pair.public().clone());
    }

    #[test]
    fn arbitrary_input_never_decrypts(input in "[A-Za-z0-9+/=]{0,240}") {
        let (_pk, sk) = encoded_keypair(301);
        match decrypt_base64(&input, &sk) {
            Err(ApiError::Format { .. }) | Err(ApiError::AuthenticationFailed { .. }) => {}
            other => prop_assert!(false, "unexpected result {:?}", other),
        }
    }
}
