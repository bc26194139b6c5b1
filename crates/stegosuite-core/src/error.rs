use std::path::PathBuf;
use thiserror::Error;

pub use stegosuite_cipher::CipherError;

#[derive(Error, Debug)]
pub enum SteganoError {
    /// Represents a message that does not fit into the carrier, `capacity` and `requested` are in characters
    #[error("Couldn't embed {requested} chars in the image. Max capacity is: {capacity}.")]
    CapacityExceeded { capacity: usize, requested: usize },

    /// Represents a carrier image that could not be read or decoded
    #[error("Image media {path:?} is invalid")]
    ImageDecodeFailed {
        path: PathBuf,
        source: image::ImageError,
    },

    /// Represents a failure when encoding the stego image
    #[error("Image encoding error")]
    ImageEncodingError(#[source] image::ImageError),

    /// Represents a side artifact file that does not exist
    #[error("Side artifact {0:?} not found")]
    ArtifactNotFound(PathBuf),

    /// Represents a side artifact whose content cannot be interpreted
    #[error("Side artifact is invalid: {0}")]
    InvalidArtifact(String),

    /// Represents a method that needs a side artifact for unveiling, but none or a foreign one was given
    #[error("The method requires its {0} side artifact")]
    MissingArtifact(&'static str),

    /// Represents two images that were expected to share their dimensions
    #[error("Image dimensions mismatch, expected {expected:?} but found {found:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        found: (u32, u32),
    },

    /// Represents an edge threshold search that cannot reproduce the stored edge count
    #[error("Cannot match edge positions with the required count of {expected}")]
    EdgeSetUnreproducible { expected: usize },

    /// Represents an authentication failure, for example a wrong or corrupted key
    #[error("Decryption error")]
    DecryptionFailed(#[source] CipherError),

    /// Represents an error when encrypting the data
    #[error("Encryption error")]
    EncryptionError(#[source] CipherError),

    /// Represents a scan that ran out of carriers before the terminator was found
    #[error("No end of message found, the hidden payload is truncated")]
    TruncatedPayload,

    /// Represents a character that has no single byte representation, or collides with the terminator
    #[error("Character {0:?} cannot be hidden")]
    UnsupportedCharacter(char),

    /// Represents a failure to read from input.
    #[error("Read error")]
    ReadError { source: std::io::Error },

    /// Represents a failure to write target file.
    #[error("Write error")]
    WriteError { source: std::io::Error },

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error("No carrier image set")]
    CarrierNotSet,

    #[error("No target file set")]
    TargetNotSet,

    #[error("API Error: Missing message")]
    MissingMessage,
}
