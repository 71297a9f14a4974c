/// String literal cipher shared by the encryption passes and the emitted Java runtime.
///
/// The envelope format is fixed because the injected `StringDecryptor` must be able to
/// open it:
///
/// ```text
/// base64( iv[16] || aes-256-cbc-pkcs7(utf8(plaintext)) )
/// ```
///
/// The key is the UTF-8 encoding of the key string, truncated or zero-padded to 32 bytes.
/// Failures never propagate out of [`encrypt`] / [`decrypt`]: they are logged and reported
/// as `None`, which callers read as "leave this literal alone".
use aes::Aes256;
use base64::{engine::general_purpose::STANDARD, Engine};
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::Rng;
use shroud_utils::errors::CipherError;
use tracing::warn;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Length of the derived AES-256 key in bytes.
pub const KEY_LEN: usize = 32;
/// Length of the CBC initialization vector in bytes.
pub const IV_LEN: usize = 16;
const BLOCK_LEN: usize = 16;

/// Derives the 32-byte AES key from a key string by truncating or zero-padding its bytes.
pub fn derive_key(key: &str) -> [u8; KEY_LEN] {
    let bytes = key.as_bytes();
    let len = bytes.len().min(KEY_LEN);
    let mut derived = [0u8; KEY_LEN];
    derived[..len].copy_from_slice(&bytes[..len]);
    derived
}

/// Encrypts `plaintext` under `key` with a fresh random IV and returns the Base64 envelope.
pub fn try_encrypt(plaintext: &str, key: &str) -> Result<String, CipherError> {
    let mut iv = [0u8; IV_LEN];
    rand::rng().fill(&mut iv[..]);

    let cipher = Aes256CbcEnc::new_from_slices(&derive_key(key), &iv)
        .map_err(|_| CipherError::InvalidLength)?;

    let data = plaintext.as_bytes();
    // PKCS#7 always adds between 1 and 16 bytes
    let mut buf = vec![0u8; (data.len() / BLOCK_LEN + 1) * BLOCK_LEN];
    buf[..data.len()].copy_from_slice(data);
    let ciphertext = cipher
        .encrypt_padded_mut::<Pkcs7>(&mut buf, data.len())
        .map_err(|_| CipherError::Padding)?;

    let mut envelope = Vec::with_capacity(IV_LEN + ciphertext.len());
    envelope.extend_from_slice(&iv);
    envelope.extend_from_slice(ciphertext);
    Ok(STANDARD.encode(envelope))
}

/// Opens a Base64 envelope produced by [`try_encrypt`].
pub fn try_decrypt(envelope: &str, key: &str) -> Result<String, CipherError> {
    let combined = STANDARD.decode(envelope)?;
    if combined.len() < IV_LEN + BLOCK_LEN || (combined.len() - IV_LEN) % BLOCK_LEN != 0 {
        return Err(CipherError::MalformedEnvelope(combined.len()));
    }

    let (iv, body) = combined.split_at(IV_LEN);
    let cipher = Aes256CbcDec::new_from_slices(&derive_key(key), iv)
        .map_err(|_| CipherError::InvalidLength)?;

    let mut buf = body.to_vec();
    let plaintext = cipher
        .decrypt_padded_mut::<Pkcs7>(&mut buf)
        .map_err(|_| CipherError::Padding)?;
    Ok(String::from_utf8(plaintext.to_vec())?)
}

/// Encrypts `plaintext`, returning `None` if anything went wrong.
pub fn encrypt(plaintext: &str, key: &str) -> Option<String> {
    match try_encrypt(plaintext, key) {
        Ok(envelope) => Some(envelope),
        Err(e) => {
            warn!("literal encryption failed: {e}");
            None
        }
    }
}

/// Decrypts `envelope`, returning `None` on a malformed envelope or a wrong key.
pub fn decrypt(envelope: &str, key: &str) -> Option<String> {
    match try_decrypt(envelope, key) {
        Ok(plaintext) => Some(plaintext),
        Err(e) => {
            warn!("envelope decryption failed: {e}");
            None
        }
    }
}
