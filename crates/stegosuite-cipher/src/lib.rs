//! # Message Sealing
//! Authenticated encryption for hidden messages. A fresh random key seals the
//! message into a base64 token, so the token never contains a `0x00` byte and
//! can be framed with a terminator by the carrier codec.

use std::fmt::{self, Debug, Formatter};

use base64::{engine::general_purpose::URL_SAFE as BASE64, Engine};
use chacha20poly1305::aead::{Aead, AeadCore};
use chacha20poly1305::{ChaCha20Poly1305, KeyInit};
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroize;

pub mod error;

pub use crate::error::CipherError;

const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;
pub const KEY_LEN: usize = 32;
/// bytes a sealed plaintext grows by before base64
pub const SEAL_OVERHEAD: usize = NONCE_LEN + TAG_LEN;

pub type Result<T> = std::result::Result<T, CipherError>;

/// raw symmetric key material, wiped on drop
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey([u8; KEY_LEN]);

impl SecretKey {
    /// generates a fresh key from the OS random source
    pub fn generate() -> Self {
        let mut key = [0u8; KEY_LEN];
        OsRng.fill_bytes(&mut key);
        Self(key)
    }

    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    /// url-safe base64 text of the key, 44 characters long
    pub fn to_base64(&self) -> String {
        BASE64.encode(self.0)
    }

    pub fn from_base64<S: AsRef<[u8]>>(text: S) -> Result<Self> {
        let mut decoded = BASE64
            .decode(text.as_ref())
            .map_err(|_| CipherError::InvalidKey { expected: KEY_LEN })?;
        if decoded.len() != KEY_LEN {
            decoded.zeroize();
            return Err(CipherError::InvalidKey { expected: KEY_LEN });
        }
        let mut key = [0u8; KEY_LEN];
        key.copy_from_slice(&decoded);
        decoded.zeroize();

        Ok(Self(key))
    }
}

impl Debug for SecretKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey({})", "*".repeat(8))
    }
}

impl Drop for SecretKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// encrypts `data` with ChaCha20Poly1305, the token is `base64(nonce || ciphertext || tag)`
pub fn seal(key: &SecretKey, data: &[u8]) -> Result<String> {
    let cipher = ChaCha20Poly1305::new(&(*key.as_bytes()).into());
    let nonce = ChaCha20Poly1305::generate_nonce(&mut OsRng);
    debug_assert_eq!(nonce.len(), NONCE_LEN);

    let cipher_data = cipher
        .encrypt(&nonce, data)
        .map_err(CipherError::EncryptionError)?;

    let mut token = Vec::with_capacity(NONCE_LEN + cipher_data.len());
    token.extend_from_slice(&nonce);
    token.extend_from_slice(&cipher_data);

    Ok(BASE64.encode(token))
}

/// decrypts a token produced by [`seal`], any tampering with key or token fails here
pub fn open(key: &SecretKey, token: &[u8]) -> Result<Vec<u8>> {
    let raw = BASE64.decode(token).map_err(CipherError::MalformedToken)?;
    if raw.len() < NONCE_LEN + TAG_LEN {
        return Err(CipherError::TokenTooShort);
    }
    let (nonce, cipher_data) = raw.split_at(NONCE_LEN);

    let cipher = ChaCha20Poly1305::new(&(*key.as_bytes()).into());
    cipher
        .decrypt(nonce.into(), cipher_data)
        .map_err(CipherError::DecryptionError)
}

/// length of the token [`seal`] produces for a plaintext of `plain_len` bytes
pub fn sealed_len(plain_len: usize) -> usize {
    (NONCE_LEN + plain_len + TAG_LEN).div_ceil(3) * 4
}
