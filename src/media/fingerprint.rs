// SPDX-License-Identifier: MPL-2.0
//! Image fingerprints for spotting identical or near-identical files across
//! comparison folders.
//!
//! A fingerprint pairs a cryptographic content hash of the file bytes with a
//! 64-bit average hash of the pixels. Fingerprints are computed on demand
//! and memoized per path by [`FingerprintCache`].

use crate::application::port::ImageLoader;
use crate::error::{Error, Result};
use crate::media::{ImageData, ResizeFilter};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Side of the grayscale thumbnail used by the average hash.
const HASH_SIDE: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComparisonFingerprint {
    pub content_hash: [u8; 32],
    pub perceptual_hash: u64,
}

impl ComparisonFingerprint {
    /// Builds a fingerprint from raw file bytes and the decoded pixels.
    pub fn from_parts(file_bytes: &[u8], image: &ImageData) -> Result<Self> {
        Ok(Self {
            content_hash: *blake3::hash(file_bytes).as_bytes(),
            perceptual_hash: average_hash(image)?,
        })
    }

    /// True when both files have byte-identical content.
    #[must_use]
    pub fn same_content(&self, other: &Self) -> bool {
        self.content_hash == other.content_hash
    }

    /// Number of differing perceptual bits (0 = visually same, 64 = opposite).
    #[must_use]
    pub fn perceptual_distance(&self, other: &Self) -> u32 {
        (self.perceptual_hash ^ other.perceptual_hash).count_ones()
    }

    /// Short hex prefix of the content hash for display.
    #[must_use]
    pub fn short_hex(&self) -> String {
        self.content_hash[..6]
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect()
    }
}

impl fmt::Display for ComparisonFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {:016x}", self.short_hex(), self.perceptual_hash)
    }
}

/// Average hash: one bit per cell of an 8x8 luma thumbnail, set when the
/// cell is brighter than the mean.
pub fn average_hash(image: &ImageData) -> Result<u64> {
    let thumb = image.resized(HASH_SIDE, HASH_SIDE, ResizeFilter::Smooth)?;
    let luma: Vec<u32> = thumb
        .rgba_bytes()
        .chunks_exact(4)
        .map(|px| (299 * u32::from(px[0]) + 587 * u32::from(px[1]) + 114 * u32::from(px[2])) / 1000)
        .collect();

    let count = luma.len().max(1) as u32;
    let mean = luma.iter().sum::<u32>() / count;

    Ok(luma
        .iter()
        .enumerate()
        .filter(|(_, value)| **value > mean)
        .fold(0u64, |hash, (i, _)| hash | (1u64 << i)))
}

/// Per-path memo of computed fingerprints.
#[derive(Debug, Default)]
pub struct FingerprintCache {
    entries: HashMap<PathBuf, ComparisonFingerprint>,
}

impl FingerprintCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the memoized fingerprint or computes it through `loader`.
    pub fn get_or_compute(
        &mut self,
        path: &Path,
        loader: &dyn ImageLoader,
    ) -> Result<ComparisonFingerprint> {
        if let Some(fp) = self.entries.get(path) {
            return Ok(*fp);
        }

        let bytes = fs::read(path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => Error::NotFound(path.to_path_buf()),
            _ => Error::from(err),
        })?;
        let image = loader.load(path)?;
        let fp = ComparisonFingerprint::from_parts(&bytes, &image)?;

        log::debug!("fingerprint {} = {fp}", path.display());
        self.entries.insert(path.to_path_buf(), fp);
        Ok(fp)
    }

    #[must_use]
    pub fn get(&self, path: &Path) -> Option<ComparisonFingerprint> {
        self.entries.get(path).copied()
    }

    /// Drops every memoized value; called when folders are re-listed.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
