//! Side artifacts, the per method state that unveiling cannot re-derive from
//! the stego image alone.
//!
//! The file formats are plain JSON for the key and the histogram metadata and
//! a bare decimal integer for the edge count.

use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

use log::error;
use serde::{Deserialize, Serialize};

use crate::{Result, SteganoError};

/// key material of the encrypted method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyArtifact {
    /// base64 text of the 32 byte key
    pub secret_key: String,
}

/// metadata of the histogram shifting method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistogramArtifact {
    /// `(peak, zero)` for every block in scan order, `None` for unusable blocks
    pub peak_zero_positions: Vec<Option<(u8, u8)>>,
    /// count of embedded bits
    pub secret_length: usize,
    pub seed: u64,
    pub block_size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SideArtifact {
    Key(KeyArtifact),
    EdgeCount(usize),
    Histogram(HistogramArtifact),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Key,
    EdgeCount,
    Histogram,
}

impl ArtifactKind {
    pub fn name(self) -> &'static str {
        match self {
            ArtifactKind::Key => "key",
            ArtifactKind::EdgeCount => "edge count",
            ArtifactKind::Histogram => "histogram metadata",
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            ArtifactKind::Key => "key.json",
            ArtifactKind::EdgeCount => "edges.txt",
            ArtifactKind::Histogram => "rdh.json",
        }
    }

    /// the artifact path that belongs to a stego image, `out.png` becomes `out.key.json`
    pub fn default_path(self, stego_image: &Path) -> PathBuf {
        stego_image.with_extension(self.suffix())
    }
}

impl Display for ArtifactKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl SideArtifact {
    pub fn kind(&self) -> ArtifactKind {
        match self {
            SideArtifact::Key(_) => ArtifactKind::Key,
            SideArtifact::EdgeCount(_) => ArtifactKind::EdgeCount,
            SideArtifact::Histogram(_) => ArtifactKind::Histogram,
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        match self {
            SideArtifact::Key(key) => to_json(key),
            SideArtifact::EdgeCount(count) => Ok(count.to_string().into_bytes()),
            SideArtifact::Histogram(meta) => to_json(meta),
        }
    }

    pub fn from_bytes(kind: ArtifactKind, data: &[u8]) -> Result<Self> {
        match kind {
            ArtifactKind::Key => from_json(data).map(SideArtifact::Key),
            ArtifactKind::EdgeCount => std::str::from_utf8(data)
                .ok()
                .and_then(|text| text.trim().parse().ok())
                .map(SideArtifact::EdgeCount)
                .ok_or_else(|| {
                    SteganoError::InvalidArtifact("edge count is not an integer".into())
                }),
            ArtifactKind::Histogram => from_json(data).map(SideArtifact::Histogram),
        }
    }

    /// reads an artifact of the given kind from a file
    pub fn load(kind: ArtifactKind, path: &Path) -> Result<Self> {
        if !path.exists() {
            error!("Side artifact {path:?} does not exist");
            return Err(SteganoError::ArtifactNotFound(path.to_path_buf()));
        }
        let data = fs::read(path).map_err(|source| SteganoError::ReadError { source })?;

        Self::from_bytes(kind, &data)
    }

    pub fn save_as(&self, path: &Path) -> Result<()> {
        let data = self.to_bytes()?;
        fs::write(path, data).map_err(|source| {
            error!("Error writing side artifact {path:?}: {source}");
            SteganoError::WriteError { source }
        })
    }

    pub fn as_key(&self) -> Result<&KeyArtifact> {
        match self {
            SideArtifact::Key(key) => Ok(key),
            _ => Err(SteganoError::MissingArtifact(ArtifactKind::Key.name())),
        }
    }

    pub fn as_edge_count(&self) -> Result<usize> {
        match self {
            SideArtifact::EdgeCount(count) => Ok(*count),
            _ => Err(SteganoError::MissingArtifact(ArtifactKind::EdgeCount.name())),
        }
    }

    pub fn as_histogram(&self) -> Result<&HistogramArtifact> {
        match self {
            SideArtifact::Histogram(meta) => Ok(meta),
            _ => Err(SteganoError::MissingArtifact(ArtifactKind::Histogram.name())),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec_pretty(value).map_err(|e| SteganoError::InvalidArtifact(e.to_string()))
}

fn from_json<T: for<'de> Deserialize<'de>>(data: &[u8]) -> Result<T> {
    serde_json::from_slice(data).map_err(|e| SteganoError::InvalidArtifact(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn should_write_histogram_metadata_with_nulls() {
        let meta = SideArtifact::Histogram(HistogramArtifact {
            peak_zero_positions: vec![Some((128, 129)), None],
            secret_length: 16,
            seed: 42,
            block_size: 1000,
        });

        let json: serde_json::Value = serde_json::from_slice(&meta.to_bytes().unwrap()).unwrap();
        assert_eq!(json["peak_zero_positions"], serde_json::json!([[128, 129], null]));
        assert_eq!(json["secret_length"], 16);
        assert_eq!(json["seed"], 42);
        assert_eq!(json["block_size"], 1000);
    }

    #[test]
    fn should_read_key_json() {
        let raw = br#"{"secret_key": "abc="}"#;
        let artifact = SideArtifact::from_bytes(ArtifactKind::Key, raw).unwrap();

        assert_eq!(artifact.as_key().unwrap().secret_key, "abc=");
    }

    #[test]
    fn should_read_edge_count_with_whitespace() {
        let artifact = SideArtifact::from_bytes(ArtifactKind::EdgeCount, b" 1234\n").unwrap();
        assert_eq!(artifact.as_edge_count().unwrap(), 1234);

        assert!(matches!(
            SideArtifact::from_bytes(ArtifactKind::EdgeCount, b"many"),
            Err(SteganoError::InvalidArtifact(_))
        ));
    }

    #[test]
    fn should_reject_foreign_artifact() {
        let artifact = SideArtifact::EdgeCount(3);
        assert!(matches!(
            artifact.as_key(),
            Err(SteganoError::MissingArtifact("key"))
        ));
    }

    #[test]
    fn should_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.edges.txt");
        SideArtifact::EdgeCount(77).save_as(&path).unwrap();

        let loaded = SideArtifact::load(ArtifactKind::EdgeCount, &path).unwrap();
        assert_eq!(loaded, SideArtifact::EdgeCount(77));
    }

    #[test]
    fn should_report_missing_file() {
        let result = SideArtifact::load(ArtifactKind::Histogram, Path::new("nope.rdh.json"));
        assert!(matches!(result, Err(SteganoError::ArtifactNotFound(_))));
    }

    #[test]
    fn should_derive_default_paths() {
        let stego = Path::new("/tmp/out.png");
        assert_eq!(
            ArtifactKind::Key.default_path(stego),
            PathBuf::from("/tmp/out.key.json")
        );
        assert_eq!(
            ArtifactKind::Histogram.default_path(stego),
            PathBuf::from("/tmp/out.rdh.json")
        );
    }
}
