//! # Stegosuite Core API
//!
//! Hides a text message in the pixels of an image and unveils it again, with
//! one of seven [`Method`]s:
//! - `standard-lsb`, `blue-lsb` and `msb-difference` fill the pixels in raster order
//! - `improved-lsb` encrypts the message and routes its bits by the key
//! - `edge-lsb` hides along the edges of the red channel
//! - `chaotic-lsb` follows the orbit of a Hénon map
//! - `rdh` shifts gray level histograms and restores the cover on unveiling
//!
//! The builder functions in [`api`] cover file handling, including the side
//! artifacts some methods need for unveiling. The [`Steganography`] trait is
//! the in-memory surface.
//!
//! # Usage Examples
//!
//! ## Hide a message inside an image
//!
//! ```rust
//! use stegosuite_core::Method;
//! use tempfile::tempdir;
//!
//! let temp_dir = tempdir().expect("Failed to create temporary directory");
//! let carrier = temp_dir.path().join("carrier.png");
//! image::RgbImage::from_fn(64, 64, |x, y| image::Rgb([x as u8, y as u8, (x ^ y) as u8]))
//!     .save(&carrier)
//!     .expect("Failed to write carrier image");
//!
//! let hidden = stegosuite_core::api::hide::prepare()
//!     .with_method(Method::ImprovedLsb)
//!     .with_message("Hello, World!")
//!     .with_image(&carrier)
//!     .with_output(temp_dir.path().join("image-with-a-secret.png"))
//!     .execute()
//!     .expect("Failed to hide message in image");
//!
//! // the key that unveiling needs lands next to the image
//! assert!(hidden.artifact.expect("a key artifact").ends_with("image-with-a-secret.key.json"));
//! ```
//!
//! ## Unveil a message from an image
//!
//! ```rust
//! # use stegosuite_core::Method;
//! # use tempfile::tempdir;
//! # let temp_dir = tempdir().expect("Failed to create temporary directory");
//! # let carrier = temp_dir.path().join("carrier.png");
//! # image::RgbImage::from_fn(64, 64, |x, y| image::Rgb([x as u8, y as u8, 7]))
//! #     .save(&carrier)
//! #     .unwrap();
//! # let secret_image = temp_dir.path().join("image-with-a-secret.png");
//! # stegosuite_core::api::hide::prepare()
//! #     .with_method(Method::ImprovedLsb)
//! #     .with_message("Hello, World!")
//! #     .with_image(&carrier)
//! #     .with_output(&secret_image)
//! #     .execute()
//! #     .unwrap();
//! let unveiled = stegosuite_core::api::unveil::prepare()
//!     .with_method(Method::ImprovedLsb)
//!     .from_secret_file(&secret_image)
//!     .execute()
//!     .expect("Failed to unveil message from image");
//!
//! assert_eq!(unveiled.message, "Hello, World!");
//! ```

#![warn(
    // clippy::unwrap_used,
    // clippy::expect_used,
    clippy::redundant_else,
)]

pub mod bit_iterator;
pub use bit_iterator::BitIterator;

pub mod message;

pub mod api;
pub mod artifact;
pub mod codec;
pub mod commands;
pub mod error;
pub mod media;
pub mod options;
pub mod position;
pub mod result;

pub use crate::artifact::{ArtifactKind, SideArtifact};
pub use crate::codec::{Embedded, Method, Steganography, Strategy, Unveiled};
pub use crate::error::SteganoError;
pub use crate::media::{compare_images, ColorModel, ImageDifference, Media, Persist};
pub use crate::options::CodecOptions;
pub use crate::result::Result;

#[cfg(test)]
pub(crate) mod test_utils {
    use image::{Rgb, RgbImage};
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    /// random pixels, reproducible by `seed`
    pub fn noisy_rgb(width: u32, height: u32, seed: u64) -> RgbImage {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        RgbImage::from_fn(width, height, |_, _| Rgb(rng.gen::<[u8; 3]>()))
    }

    pub fn gradient_rgb(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x * 7) as u8, (y * 5) as u8, ((x + y) * 3) as u8])
        })
    }
}
