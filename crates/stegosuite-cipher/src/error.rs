pub use base64::DecodeError as Base64Error;
pub use chacha20poly1305::Error as Chacha20Poly1305Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CipherError {
    #[error("Key material is not a valid {expected} byte base64 key")]
    InvalidKey { expected: usize },

    #[error("Token is not valid base64")]
    MalformedToken(Base64Error),

    #[error("Token is too short to contain a nonce and a tag")]
    TokenTooShort,

    #[error("Decryption error")]
    DecryptionError(Chacha20Poly1305Error),

    #[error("Encryption error")]
    EncryptionError(Chacha20Poly1305Error),
}
