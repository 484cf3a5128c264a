//! Encoding cache for incremental asset builds.
//!
//! AVIF encoding dominates the assets stage; a full-width hero photo can take
//! several seconds through rav1e. This module lets the stage skip an encode
//! when neither the source image nor the encoding parameters changed since the
//! last run.
//!
//! ## Cache keys
//!
//! Each output file (relative to the output directory) maps to a
//! [`CacheEntry`] of two hashes:
//!
//! - **`source_hash`**: SHA-256 of the source file contents. Content-based
//!   rather than mtime-based so it survives `git checkout` (which resets
//!   modification times).
//! - **`params_hash`**: SHA-256 of the operation parameters: target size,
//!   quality and output format for resizes; crop region, icon size and
//!   format for icons.
//!
//! An output is fresh when its recorded entry equals the current one **and**
//! the file is still on disk.
//!
//! ## Storage
//!
//! The manifest is a JSON file at `<output_dir>/.cache-manifest.json`, so it
//! travels with the output directory when `dist/` is cached in CI.
//!
//! ## Bypassing the cache
//!
//! `--no-cache` on `build` or `assets` starts from an empty manifest, so every
//! output is re-encoded and overwritten.

use crate::imaging::{IconParams, ResizeParams};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::Path;

/// Name of the cache manifest file within the output directory.
pub const MANIFEST_FILENAME: &str = ".cache-manifest.json";

/// Bump to invalidate every existing manifest when the key computation changes.
const MANIFEST_VERSION: u32 = 1;

/// Hashes an output was produced from.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct CacheEntry {
    pub source_hash: String,
    pub params_hash: String,
}

/// On-disk manifest mapping output paths to the hashes they were built from.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CacheManifest {
    pub version: u32,
    pub entries: BTreeMap<String, CacheEntry>,
}

impl CacheManifest {
    /// Create an empty manifest (used for `--no-cache` or first build).
    pub fn empty() -> Self {
        Self {
            version: MANIFEST_VERSION,
            entries: BTreeMap::new(),
        }
    }

    /// Load from the output directory. Returns an empty manifest if the
    /// file doesn't exist or can't be parsed (version mismatch, corruption).
    pub fn load(output_dir: &Path) -> Self {
        let path = output_dir.join(MANIFEST_FILENAME);
        let Ok(content) = std::fs::read_to_string(&path) else {
            return Self::empty();
        };
        match serde_json::from_str::<Self>(&content) {
            Ok(manifest) if manifest.version == MANIFEST_VERSION => manifest,
            Ok(_) => {
                tracing::debug!("cache manifest version mismatch, starting fresh");
                Self::empty()
            }
            Err(e) => {
                tracing::debug!(error = %e, "unreadable cache manifest, starting fresh");
                Self::empty()
            }
        }
    }

    /// Save to the output directory.
    pub fn save(&self, output_dir: &Path) -> io::Result<()> {
        let path = output_dir.join(MANIFEST_FILENAME);
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }

    /// Whether `output` (relative to `output_dir`) was built from `entry`
    /// and still exists.
    pub fn is_fresh(&self, output: &str, entry: &CacheEntry, output_dir: &Path) -> bool {
        self.entries.get(output) == Some(entry) && output_dir.join(output).exists()
    }

    /// Record the hashes an output was built from.
    pub fn record(&mut self, output: String, entry: CacheEntry) {
        self.entries.insert(output, entry);
    }
}

/// SHA-256 hash of a file's contents, returned as a hex string.
pub fn hash_file(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    let digest = Sha256::digest(&bytes);
    Ok(format!("{:x}", digest))
}

fn output_format(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}

/// SHA-256 of the parameters that shape a resize output.
pub fn hash_resize_params(params: &ResizeParams) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"resize\0");
    hasher.update(params.width.to_le_bytes());
    hasher.update(params.height.to_le_bytes());
    hasher.update(params.quality.value().to_le_bytes());
    hasher.update(output_format(&params.output).as_bytes());
    format!("{:x}", hasher.finalize())
}

/// SHA-256 of the parameters that shape an icon output.
pub fn hash_icon_params(params: &IconParams) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"icon\0");
    for v in [
        params.crop.x,
        params.crop.y,
        params.crop.width,
        params.crop.height,
        params.size,
    ] {
        hasher.update(v.to_le_bytes());
    }
    hasher.update(output_format(&params.output).as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Summary of cache performance for a build run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u32,
    pub misses: u32,
}

impl CacheStats {
    pub fn hit(&mut self) {
        self.hits += 1;
    }

    pub fn miss(&mut self) {
        self.misses += 1;
    }

    pub fn total(&self) -> u32 {
        self.hits + self.misses
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hits > 0 {
            write!(
                f,
                "{} cached, {} encoded ({} total)",
                self.hits,
                self.misses,
                self.total()
            )
        } else {
            write!(f, "{} encoded", self.misses)
        }
    }
}
