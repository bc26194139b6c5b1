//! Carrier location sequences.
//!
//! - [`Raster`] row major pixel order, a pure function of the geometry
//! - [`HenonPoints`] chaotic map scan, deduplicated in generation order
//! - [`EdgeMap`] edge pixels found by a threshold search, depends on content
//! - [`KeyRouter`] per pixel channel choice driven by a repeating key

mod chaotic;
mod edges;
mod raster;
mod routing;

pub use chaotic::*;
pub use edges::*;
pub use raster::*;
pub use routing::*;
