use image::{GrayImage, Luma, RgbImage};
use log::{debug, error, info};

use super::{admit, chars_for_bits, Embedded, Steganography, Unveiled};
use crate::artifact::{ArtifactKind, SideArtifact};
use crate::message::{to_bits, TerminatedReader};
use crate::options::EdgeSearchOptions;
use crate::position::EdgeMap;
use crate::{Media, Result, SteganoError};

/// One bit in the green low bit of every edge pixel.
///
/// Edges are detected on the red channel, which is never written, so
/// unveiling finds the same edge pixels again. Only their count is kept as
/// side artifact.
#[derive(Debug, Clone, Default)]
pub struct EdgeLsb {
    search: EdgeSearchOptions,
}

impl EdgeLsb {
    pub fn new(search: EdgeSearchOptions) -> Self {
        Self { search }
    }

    fn edge_map(image: &RgbImage) -> EdgeMap {
        let red = GrayImage::from_fn(image.width(), image.height(), |x, y| {
            Luma([image.get_pixel(x, y).0[0]])
        });
        EdgeMap::new(&red)
    }

    fn capacity_of(&self, map: &EdgeMap) -> usize {
        self.search
            .percents()
            .last()
            .map(|lowest| chars_for_bits(map.edges_at_percent(lowest).len()))
            .unwrap_or(0)
    }
}

impl Steganography for EdgeLsb {
    fn capacity(&self, cover: &Media) -> Result<usize> {
        Ok(self.capacity_of(&Self::edge_map(&cover.to_rgb8())))
    }

    fn describe_capacity(&self, cover: &Media) -> Result<String> {
        Ok(format!(
            "Maximum message size is {} chars (at the lowest edge threshold).",
            self.capacity(cover)?
        ))
    }

    fn embed(&self, cover: &Media, message: &str) -> Result<Embedded> {
        let mut image = cover.to_rgb8();
        let map = Self::edge_map(&image);
        let capacity = self.capacity_of(&map);
        admit(capacity, message)?;
        let bits = to_bits(message)?;

        let edges = map
            .search_at_least(bits.len(), &self.search)
            .ok_or_else(|| SteganoError::CapacityExceeded {
                capacity,
                requested: message.chars().count(),
            })?;
        debug!("hiding {} bits along {} edge pixels", bits.len(), edges.len());

        for ((x, y), bit) in edges.iter().zip(bits.iter()) {
            let green = &mut image.get_pixel_mut(*x, *y).0[1];
            *green = (*green & !1) | u8::from(*bit);
        }

        Ok(Embedded {
            stego: image.into(),
            artifact: Some(SideArtifact::EdgeCount(edges.len())),
        })
    }

    fn extract(&self, stego: &Media, artifact: Option<&SideArtifact>) -> Result<Unveiled> {
        let count = artifact
            .ok_or(SteganoError::MissingArtifact(ArtifactKind::EdgeCount.name()))?
            .as_edge_count()?;

        let image = stego.to_rgb8();
        let edges = Self::edge_map(&image)
            .search_exact(count, &self.search)
            .ok_or_else(|| {
                error!("No edge threshold reproduces {count} edge pixels");
                SteganoError::EdgeSetUnreproducible { expected: count }
            })?;

        let mut reader = TerminatedReader::default();
        for (x, y) in edges {
            if reader.push(image.get_pixel(x, y).0[1] & 1 == 1) {
                break;
            }
        }
        let message = reader.into_text()?;
        info!("unveiled {} chars", message.chars().count());

        Ok(Unveiled {
            message,
            restored: None,
        })
    }
}
