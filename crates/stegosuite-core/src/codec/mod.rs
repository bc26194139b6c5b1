//! The seven hiding methods behind one closed [`Strategy`] type.
//!
//! Every method works on an owned copy of the cover, a failing call never
//! leaves a half written image behind.

mod chaotic_lsb;
mod edge_lsb;
mod improved_lsb;
mod raster;
mod rdh;

use std::fmt::{Display, Formatter};

use enum_dispatch::enum_dispatch;

pub use chaotic_lsb::ChaoticLsb;
pub use edge_lsb::EdgeLsb;
pub use improved_lsb::ImprovedLsb;
pub use raster::{BlueLsb, MsbDifference, StandardLsb};
pub use rdh::{BlockCapacity, HistogramShift};

use crate::artifact::{ArtifactKind, SideArtifact};
use crate::media::{ColorModel, Media};
use crate::{CodecOptions, Result, SteganoError};

/// Outcome of hiding a message.
#[derive(Debug)]
pub struct Embedded {
    pub stego: Media,
    /// state that unveiling needs, it must be stored alongside the stego image
    pub artifact: Option<SideArtifact>,
}

/// Outcome of unveiling a message.
#[derive(Debug)]
pub struct Unveiled {
    pub message: String,
    /// the cover as it was before hiding, only reversible methods restore it
    pub restored: Option<Media>,
}

#[enum_dispatch]
pub trait Steganography {
    /// upper bound of hideable characters
    fn capacity(&self, cover: &Media) -> Result<usize>;

    /// a sentence about the capacity that can be shown to a user
    fn describe_capacity(&self, cover: &Media) -> Result<String> {
        Ok(format!(
            "Maximum message size is {} chars.",
            self.capacity(cover)?
        ))
    }

    fn embed(&self, cover: &Media, message: &str) -> Result<Embedded>;

    fn extract(&self, stego: &Media, artifact: Option<&SideArtifact>) -> Result<Unveiled>;
}

#[enum_dispatch(Steganography)]
#[derive(Debug, Clone)]
pub enum Strategy {
    StandardLsb,
    BlueLsb,
    ImprovedLsb,
    EdgeLsb,
    ChaoticLsb,
    MsbDifference,
    HistogramShift,
}

/// Names the hiding methods, it is what a user picks from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Method {
    #[default]
    StandardLsb,
    BlueLsb,
    ImprovedLsb,
    EdgeLsb,
    ChaoticLsb,
    MsbDifference,
    Rdh,
}

impl Method {
    pub const ALL: [Method; 7] = [
        Method::StandardLsb,
        Method::BlueLsb,
        Method::ImprovedLsb,
        Method::EdgeLsb,
        Method::ChaoticLsb,
        Method::MsbDifference,
        Method::Rdh,
    ];

    pub fn strategy(self, options: &CodecOptions) -> Strategy {
        match self {
            Method::StandardLsb => StandardLsb.into(),
            Method::BlueLsb => BlueLsb.into(),
            Method::ImprovedLsb => ImprovedLsb.into(),
            Method::EdgeLsb => EdgeLsb::new(options.edge_search.clone()).into(),
            Method::ChaoticLsb => ChaoticLsb::new(options.henon).into(),
            Method::MsbDifference => MsbDifference.into(),
            Method::Rdh => HistogramShift::new(options.block_search.clone()).into(),
        }
    }

    /// the side artifact the method produces, if any
    pub fn artifact_kind(self) -> Option<ArtifactKind> {
        match self {
            Method::ImprovedLsb => Some(ArtifactKind::Key),
            Method::EdgeLsb => Some(ArtifactKind::EdgeCount),
            Method::Rdh => Some(ArtifactKind::Histogram),
            _ => None,
        }
    }

    pub fn color_model(self) -> ColorModel {
        match self {
            Method::Rdh => ColorModel::Gray,
            _ => ColorModel::Rgb,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Method::StandardLsb => "standard-lsb",
            Method::BlueLsb => "blue-lsb",
            Method::ImprovedLsb => "improved-lsb",
            Method::EdgeLsb => "edge-lsb",
            Method::ChaoticLsb => "chaotic-lsb",
            Method::MsbDifference => "msb-difference",
            Method::Rdh => "rdh",
        }
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Rejects messages with more characters than `capacity`.
pub(crate) fn admit(capacity: usize, message: &str) -> Result<()> {
    let requested = message.chars().count();
    if requested > capacity {
        return Err(SteganoError::CapacityExceeded {
            capacity,
            requested,
        });
    }

    Ok(())
}

/// Rejects a framed payload that needs more carriers than available.
pub(crate) fn ensure_carriers(
    capacity: usize,
    message: &str,
    needed_bits: usize,
    carriers: usize,
) -> Result<()> {
    if needed_bits > carriers {
        return Err(SteganoError::CapacityExceeded {
            capacity,
            requested: message.chars().count(),
        });
    }

    Ok(())
}

/// `⌊carriers / 8⌋ - 1`, one byte is reserved for the terminator
pub(crate) fn chars_for_bits(carriers: usize) -> usize {
    (carriers / 8).saturating_sub(1)
}
