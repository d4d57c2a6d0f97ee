//! Object identifiers used by EC key containers.

use std::fmt;

use der::asn1::ObjectIdentifier;

/// id-ecPublicKey
pub const ID_EC_PUBLIC_KEY: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");
pub const SECP256K1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.10");
pub const PRIME256V1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7");
pub const SECP384R1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.34");
pub const SECP521R1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.35");
pub const RSA_ENCRYPTION: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");
pub const X25519: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.101.110");
pub const ED25519: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.101.112");

const KNOWN: [(ObjectIdentifier, &str); 8] = [
    (ID_EC_PUBLIC_KEY, "id-ecPublicKey"),
    (SECP256K1, "secp256k1"),
    (PRIME256V1, "prime256v1"),
    (SECP384R1, "secp384r1"),
    (SECP521R1, "secp521r1"),
    (RSA_ENCRYPTION, "rsaEncryption"),
    (X25519, "X25519"),
    (ED25519, "Ed25519"),
];

/// Registered name when known, dotted decimal otherwise.
pub fn describe(oid: &ObjectIdentifier) -> String {
    KNOWN
        .iter()
        .find(|(known, _)| known == oid)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| oid.to_string())
}

/// Named curve carried in EC key parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Curve {
    Secp256k1,
    NistP256,
    NistP384,
    NistP521,
    Other(ObjectIdentifier),
}

impl Curve {
    pub fn from_oid(oid: ObjectIdentifier) -> Self {
        if oid == SECP256K1 {
            Curve::Secp256k1
        } else if oid == PRIME256V1 {
            Curve::NistP256
        } else if oid == SECP384R1 {
            Curve::NistP384
        } else if oid == SECP521R1 {
            Curve::NistP521
        } else {
            Curve::Other(oid)
        }
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Curve::Secp256k1 => f.write_str("secp256k1"),
            Curve::NistP256 => f.write_str("prime256v1"),
            Curve::NistP384 => f.write_str("secp384r1"),
            Curve::NistP521 => f.write_str("secp521r1"),
            Curve::Other(oid) => write!(f, "{}", oid),
        }
    }
}
