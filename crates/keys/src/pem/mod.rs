//! RFC 7468 PEM framing.
//!
//! Only the first block of an input is considered. Text before the
//! `BEGIN` line is ignored, as RFC 7468 allows; encapsulated headers
//! (legacy encrypted keys) are rejected by the decoder.

use std::fs;
use std::path::Path;

use log::debug;
use pem_rfc7468::LineEnding;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Error, Result};

/// SEC1 `ECPrivateKey`.
pub const LABEL_EC_PRIVATE_KEY: &str = "EC PRIVATE KEY";
/// PKCS#8 `PrivateKeyInfo`.
pub const LABEL_PRIVATE_KEY: &str = "PRIVATE KEY";
/// X.509 `SubjectPublicKeyInfo`.
pub const LABEL_PUBLIC_KEY: &str = "PUBLIC KEY";

const BEGIN: &[u8] = b"-----BEGIN ";
const END: &[u8] = b"-----END ";
const DASHES: &[u8] = b"-----";

/// One decoded PEM block. The DER payload is wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PemBlock {
    label: String,
    der: Vec<u8>,
}

impl PemBlock {
    pub fn new(label: impl Into<String>, der: Vec<u8>) -> Self {
        Self {
            label: label.into(),
            der,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn der(&self) -> &[u8] {
        &self.der
    }
}

impl std::fmt::Debug for PemBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PemBlock")
            .field("label", &self.label)
            .field("der_len", &self.der.len())
            .finish()
    }
}

/// Parses the first PEM block in `input`.
pub fn decode_pem(input: &[u8]) -> Result<PemBlock> {
    let (label, der) = pem_rfc7468::decode_vec(first_block(input))?;
    Ok(PemBlock::new(label, der))
}

/// Wraps DER bytes in a PEM block with 64-column lines.
pub fn encode_pem(label: &'static str, der: &[u8]) -> Result<String> {
    Ok(pem_rfc7468::encode_string(label, LineEnding::LF, der)?)
}

/// Reads a file and returns its first PEM block.
pub fn load_key_from_pem(path: impl AsRef<Path>) -> Result<PemBlock> {
    let path = path.as_ref();
    let mut contents = fs::read(path).map_err(|source| Error::Io {
        path: path.display().to_string(),
        source,
    })?;
    let block = decode_pem(&contents);
    contents.zeroize();

    let block = block?;
    debug!(
        "loaded PEM block '{}' ({} DER bytes) from {}",
        block.label(),
        block.der().len(),
        path.display()
    );
    Ok(block)
}

/// Narrows `input` to its first block, from the `BEGIN` line through the
/// closing dashes of the `END` line. Input without a complete block is
/// passed through for the decoder to reject.
fn first_block(input: &[u8]) -> &[u8] {
    let Some(start) = find(input, BEGIN) else {
        return input;
    };
    let block = &input[start..];
    let end = find(block, END).and_then(|end_line| {
        let label_start = end_line + END.len();
        find(&block[label_start..], DASHES).map(|close| label_start + close + DASHES.len())
    });
    match end {
        Some(end) => &block[..end],
        None => block,
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}
