//! Execution of a parsed [`Config`].
//!
//! Each command computes its full output before writing anything, so a
//! failure never leaves partial output behind.

use std::fs::{self, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use log::info;
use rand::rngs::OsRng;
use zeroize::Zeroizing;

use crate::api::{Error, Result, ResultExt};
use crate::cli::{Config, Mode, Payload};
use crate::internal::secure_zero;
use crate::keys::codec::{encode_private_key_der, encode_public_key_der};
use crate::keys::pem::{encode_pem, LABEL_EC_PRIVATE_KEY, LABEL_PUBLIC_KEY};
use crate::keys::{
    encoded_key_from_pem, read_private_key_file, read_public_key_file, EncodedKey,
    EncodedPrivateKey, EncodedPublicKey, K256KeyPair,
};
use crate::pke::{decrypt_base64, encrypt_base64};

/// Runs one command. Results go to `out`, notes for the user to `diag`.
pub fn run<W: Write, D: Write>(config: &Config, out: &mut W, diag: &mut D) -> Result<()> {
    match &config.mode {
        Mode::Encrypt { key, payload } => encrypt(key, payload, out),
        Mode::Decrypt { key, payload } => decrypt(key, payload, out),
        Mode::Keygen { prefix } => keygen(prefix, out),
        Mode::Pubkey { key } => pubkey(key, out),
        Mode::Export { key } => export(key, out, diag),
    }
}

fn encrypt<W: Write>(key: &Path, payload: &Payload, out: &mut W) -> Result<()> {
    let recipient = EncodedPublicKey::from_key(&read_public_key_file(key)?)?;
    let plaintext = read_payload(payload)?;
    let ciphertext = encrypt_base64(&plaintext, &recipient)?;
    writeln!(out, "{}", ciphertext).with_context("writing ciphertext")?;
    out.flush().with_context("writing ciphertext")
}

fn decrypt<W: Write>(key: &Path, payload: &Payload, out: &mut W) -> Result<()> {
    let recipient = EncodedPrivateKey::from_key(&read_private_key_file(key)?)?;
    let input = read_payload(payload)?;
    let ciphertext = std::str::from_utf8(&input).map_err(|_| Error::Format {
        context: "ECIES ciphertext",
        message: "ciphertext is not valid base64".to_string(),
    })?;

    let mut plaintext = decrypt_base64(ciphertext, &recipient)?;
    let written = out
        .write_all(&plaintext)
        .and_then(|_| out.flush())
        .with_context("writing plaintext");
    secure_zero(&mut plaintext);
    written
}

fn keygen<W: Write>(prefix: &Path, out: &mut W) -> Result<()> {
    let pair = K256KeyPair::generate(&mut OsRng)?;
    let private_pem = Zeroizing::new(encode_pem(
        LABEL_EC_PRIVATE_KEY,
        &encode_private_key_der(pair.secret())?,
    )?);
    let public_pem = encode_pem(LABEL_PUBLIC_KEY, &encode_public_key_der(pair.public())?)?;
    let fingerprint = pair.public().fingerprint()?;

    let private_path = with_suffix(prefix, ".pem");
    let public_path = with_suffix(prefix, ".pub.pem");
    write_new_file(&private_path, private_pem.as_bytes(), true)?;
    if let Err(e) = write_new_file(&public_path, public_pem.as_bytes(), false) {
        let _ = fs::remove_file(&private_path);
        return Err(e);
    }

    info!("wrote {} and {}", private_path.display(), public_path.display());
    writeln!(out, "{}", fingerprint).with_context("writing fingerprint")?;
    out.flush().with_context("writing fingerprint")
}

fn pubkey<W: Write>(key: &Path, out: &mut W) -> Result<()> {
    let secret = read_private_key_file(key)?;
    let pem = encode_pem(LABEL_PUBLIC_KEY, &encode_public_key_der(&secret.public_key())?)?;
    out.write_all(pem.as_bytes()).with_context("writing public key")?;
    out.flush().with_context("writing public key")
}

fn export<W: Write, D: Write>(key: &Path, out: &mut W, diag: &mut D) -> Result<()> {
    let contents = Zeroizing::new(fs::read(key).map_err(|e| Error::Io {
        context: "reading key file",
        message: format!("{}: {}", key.display(), e),
    })?);
    let encoded = encoded_key_from_pem(&contents)?;

    let fingerprint = match &encoded {
        EncodedKey::Private(private) => private.decode()?.public_key().fingerprint()?,
        EncodedKey::Public(public) => public.decode()?.fingerprint()?,
    };
    writeln!(out, "{}", encoded.as_str()).with_context("writing encoded key")?;
    out.flush().with_context("writing encoded key")?;
    writeln!(diag, "fingerprint: {}", fingerprint).with_context("writing fingerprint")
}

fn read_payload(payload: &Payload) -> Result<Zeroizing<Vec<u8>>> {
    let bytes = match payload {
        Payload::Text(text) => text.as_bytes().to_vec(),
        Payload::File(path) => fs::read(path).map_err(|e| Error::Io {
            context: "reading input file",
            message: format!("{}: {}", path.display(), e),
        })?,
        Payload::Stdin => {
            let mut buf = Vec::new();
            io::stdin()
                .lock()
                .read_to_end(&mut buf)
                .with_context("reading standard input")?;
            buf
        }
    };
    Ok(Zeroizing::new(bytes))
}

fn with_suffix(prefix: &Path, suffix: &str) -> PathBuf {
    let mut name = prefix.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// Creates `path`, refusing to overwrite. Private files are owner-only on Unix.
fn write_new_file(path: &Path, contents: &[u8], private: bool) -> Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(if private { 0o600 } else { 0o644 });
    }
    #[cfg(not(unix))]
    let _ = private;

    let file = options.open(path).map_err(|e| Error::Io {
        context: "creating key file",
        message: format!("{}: {}", path.display(), e),
    })?;
    fill_or_remove(path, file, contents)
}

/// Writes `contents` to the freshly created `path`. A failed write removes
/// the file so no truncated key is left behind.
fn fill_or_remove<F: Write>(path: &Path, mut file: F, contents: &[u8]) -> Result<()> {
    if let Err(e) = file.write_all(contents).and_then(|_| file.flush()) {
        drop(file);
        let _ = fs::remove_file(path);
        return Err(Error::Io {
            context: "writing key file",
            message: format!("{}: {}", path.display(), e),
        });
    }
    Ok(())
}
