//! Generic key parser.
//!
//! A DER blob is classified without knowing which slot the caller wants
//! to fill. The result is type-erased on purpose; [`crate::import`] is
//! the only place that turns it into a usable key.

use std::fmt;

use der::asn1::{AnyRef, ObjectIdentifier};
use der::{Decode, Reader, SliceReader, Tag, Tagged};
use pkcs8::PrivateKeyInfo;
use sec1::{EcParameters, EcPrivateKey};
use spki::{AlgorithmIdentifierRef, SubjectPublicKeyInfoRef};
use zeroize::Zeroizing;

use crate::error::{Error, Result};
use crate::oid::{self, Curve};

/// Output of [`parse_der`].
pub enum ParsedKey {
    /// SEC1 `ECPrivateKey`, bare or inside PKCS#8.
    EcPrivateKey {
        curve: Option<Curve>,
        scalar: Zeroizing<Vec<u8>>,
        public_key: Option<Vec<u8>>,
    },
    /// SPKI with `id-ecPublicKey`.
    EcPublicKey {
        curve: Option<Curve>,
        point: Vec<u8>,
    },
    /// Well-formed DER that is not an EC key.
    Other { algorithm: String },
}

impl ParsedKey {
    /// Human-readable kind, used in type errors.
    pub fn describe(&self) -> String {
        match self {
            ParsedKey::EcPrivateKey { curve, .. } => {
                format!("EC private key ({})", curve_name(curve))
            }
            ParsedKey::EcPublicKey { curve, .. } => {
                format!("EC public key ({})", curve_name(curve))
            }
            ParsedKey::Other { algorithm } => format!("non-EC key ({})", algorithm),
        }
    }
}

impl fmt::Debug for ParsedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParsedKey::EcPrivateKey { curve, public_key, .. } => f
                .debug_struct("EcPrivateKey")
                .field("curve", curve)
                .field("scalar", &"[REDACTED]")
                .field("has_public_key", &public_key.is_some())
                .finish(),
            ParsedKey::EcPublicKey { curve, point } => f
                .debug_struct("EcPublicKey")
                .field("curve", curve)
                .field("point_len", &point.len())
                .finish(),
            ParsedKey::Other { algorithm } => {
                f.debug_struct("Other").field("algorithm", algorithm).finish()
            }
        }
    }
}

fn curve_name(curve: &Option<Curve>) -> String {
    match curve {
        Some(c) => c.to_string(),
        None => "unspecified curve".to_string(),
    }
}

/// Classifies a DER key container.
///
/// Understands SEC1 `ECPrivateKey`, PKCS#8 `PrivateKeyInfo` and X.509
/// `SubjectPublicKeyInfo`. Valid DER of any other shape is returned as
/// [`ParsedKey::Other`]; invalid DER is an error.
pub fn parse_der(input: &[u8]) -> Result<ParsedKey> {
    let outer = AnyRef::from_der(input)?;
    if outer.tag() != Tag::Sequence {
        return Err(Error::Der("key is not a DER SEQUENCE"));
    }

    // The first two fields tell the containers apart.
    let mut fields = SliceReader::new(outer.value())?;
    let first = if fields.is_finished() {
        None
    } else {
        Some(AnyRef::decode(&mut fields)?.tag())
    };
    let second = if fields.is_finished() {
        None
    } else {
        Some(AnyRef::decode(&mut fields)?.tag())
    };

    match (first, second) {
        (Some(Tag::Integer), Some(Tag::OctetString)) => {
            Ok(from_sec1(EcPrivateKey::from_der(input)?))
        }
        (Some(Tag::Integer), Some(Tag::Sequence)) => from_pkcs8(PrivateKeyInfo::from_der(input)?),
        (Some(Tag::Sequence), _) => from_spki(SubjectPublicKeyInfoRef::from_der(input)?),
        (Some(Tag::Integer), _) => Ok(ParsedKey::Other {
            algorithm: "unrecognised private key structure".to_string(),
        }),
        _ => Ok(ParsedKey::Other {
            algorithm: "unrecognised key structure".to_string(),
        }),
    }
}

fn from_sec1(key: EcPrivateKey<'_>) -> ParsedKey {
    ParsedKey::EcPrivateKey {
        curve: named_curve(key.parameters),
        scalar: Zeroizing::new(key.private_key.to_vec()),
        public_key: key.public_key.map(<[u8]>::to_vec),
    }
}

fn from_pkcs8(info: PrivateKeyInfo<'_>) -> Result<ParsedKey> {
    if info.algorithm.oid != oid::ID_EC_PUBLIC_KEY {
        return Ok(other(&info.algorithm));
    }
    let outer_curve = curve_params(info.algorithm.parameters)?;
    let inner = EcPrivateKey::from_der(info.private_key)?;

    let curve = match (outer_curve, named_curve(inner.parameters)) {
        (Some(a), Some(b)) if a != b => return Err(Error::Der("conflicting curve parameters")),
        (a, b) => a.or(b),
    };
    // v2 OneAsymmetricKey may carry the point outside the SEC1 body.
    let public_key = inner.public_key.or(info.public_key);
    Ok(ParsedKey::EcPrivateKey {
        curve,
        scalar: Zeroizing::new(inner.private_key.to_vec()),
        public_key: public_key.map(<[u8]>::to_vec),
    })
}

fn from_spki(spki: SubjectPublicKeyInfoRef<'_>) -> Result<ParsedKey> {
    if spki.algorithm.oid != oid::ID_EC_PUBLIC_KEY {
        return Ok(other(&spki.algorithm));
    }
    let point = spki
        .subject_public_key
        .as_bytes()
        .ok_or(Error::Der("public key BIT STRING has unused bits"))?;
    Ok(ParsedKey::EcPublicKey {
        curve: curve_params(spki.algorithm.parameters)?,
        point: point.to_vec(),
    })
}

fn named_curve(params: Option<EcParameters>) -> Option<Curve> {
    params
        .and_then(|params| params.named_curve())
        .map(Curve::from_oid)
}

fn other(algorithm: &AlgorithmIdentifierRef<'_>) -> ParsedKey {
    ParsedKey::Other {
        algorithm: oid::describe(&algorithm.oid),
    }
}

/// `ECParameters` from an AlgorithmIdentifier. A named curve is
/// returned; absent or `implicitCurve` parameters leave the curve
/// unspecified; explicit curve parameters are rejected.
fn curve_params(params: Option<AnyRef<'_>>) -> Result<Option<Curve>> {
    let Some(params) = params else {
        return Ok(None);
    };
    match params.tag() {
        Tag::ObjectIdentifier => Ok(Some(Curve::from_oid(ObjectIdentifier::try_from(params)?))),
        Tag::Null => Ok(None),
        _ => Err(Error::Der("explicit curve parameters are not supported")),
    }
}
