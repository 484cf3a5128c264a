//! Icon generation and image optimization.
//!
//! The assets stage of the build. Reads the source artwork in `public/` and
//! writes everything the pages reference into the output directory:
//!
//! ```text
//! public/                      dist/
//! ├── logo.png          ──►    ├── favicon-32x32.png   (left-square crop)
//! │                            ├── favicon-16x16.png
//! │                            ├── apple-touch-icon.png
//! │                            ├── favicon.ico
//! │                            ├── icon-192.png, icon-512.png
//! │                            ├── bloomsberry-logo.avif  (≤ 400px wide)
//! │                            ├── bloomsberry-logo.png   (compressed fallback)
//! ├── hero-bg.png       ──►    ├── hero-bg.avif
//! ├── gallery-1.png     ──►    ├── gallery-1.avif
//! └── robots.txt        ──►    └── (originals copied as-is)
//! ```
//!
//! Listed images that don't exist are skipped with a warning. A source that
//! fails to decode is reported as failed and the rest of the stage carries on.
//!
//! ## Parallel Processing
//!
//! Sources are identified and hashed up front, then every output file is
//! produced on the rayon pool. Progress streams over an optional `mpsc`
//! channel as each output lands.

use crate::cache::{self, CacheEntry, CacheManifest, CacheStats};
use crate::config::SiteConfig;
use crate::imaging::{
    BackendError, IconParams, ImageBackend, LogoConfig, Quality, ResizeParams, RustBackend,
    get_dimensions, plan_conversion, plan_icons, plan_logo, savings_percent,
};
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::sync::{Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image processing failed: {0}")]
    Imaging(#[from] BackendError),
    #[error("Source directory not found: {0}")]
    SourceNotFound(PathBuf),
}

/// Configuration for the assets stage.
#[derive(Debug, Clone)]
pub struct AssetConfig {
    /// Logo filename within the source directory.
    pub logo: String,
    pub logo_config: LogoConfig,
    /// AVIF quality for the listed images.
    pub quality: Quality,
    /// Images converted to AVIF, in order.
    pub optimize: Vec<String>,
}

impl AssetConfig {
    /// Build an AssetConfig from SiteConfig values.
    pub fn from_site_config(config: &SiteConfig) -> Self {
        let quality = Quality::new(config.images.quality);
        Self {
            logo: config.images.logo.clone(),
            logo_config: LogoConfig {
                max_width: config.images.logo_width,
                quality,
            },
            quality,
            optimize: config.images.optimize.clone(),
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self::from_site_config(&SiteConfig::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Icon,
    Optimized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStatus {
    Encoded,
    Cached,
}

/// One file written to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    /// Path relative to the output directory.
    pub name: String,
    pub kind: OutputKind,
    pub bytes: u64,
    pub status: OutputStatus,
}

/// Everything produced from one source image.
#[derive(Debug, Clone)]
pub struct SourceReport {
    pub source: String,
    pub original_bytes: u64,
    pub outputs: Vec<WrittenFile>,
}

impl SourceReport {
    /// Outputs that replace the source on the page (not icons).
    pub fn optimized(&self) -> impl Iterator<Item = &WrittenFile> {
        self.outputs
            .iter()
            .filter(|f| f.kind == OutputKind::Optimized)
    }

    /// Percentage saved by `file` relative to the source.
    pub fn savings(&self, file: &WrittenFile) -> f64 {
        savings_percent(self.original_bytes, file.bytes)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedOutput {
    /// Output file name, or the source name when the source itself failed.
    pub output: String,
    pub error: String,
}

/// Result of the assets stage.
#[derive(Debug, Default)]
pub struct AssetReport {
    pub sources: Vec<SourceReport>,
    /// Listed sources that do not exist.
    pub skipped: Vec<String>,
    pub failed: Vec<FailedOutput>,
    /// Originals copied from the source directory.
    pub copied: usize,
    pub cache_stats: CacheStats,
}

/// Progress events streamed while the stage runs.
#[derive(Debug, Clone)]
pub enum AssetEvent {
    Copied { count: usize },
    Written { source: String, file: WrittenFile },
    Skipped { source: String },
    Failed { output: String, error: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceRole {
    Logo,
    Image,
}

enum Operation {
    Icon(IconParams),
    Resize(ResizeParams),
}

impl Operation {
    fn output(&self) -> &Path {
        match self {
            Operation::Icon(p) => &p.output,
            Operation::Resize(p) => &p.output,
        }
    }

    fn kind(&self) -> OutputKind {
        match self {
            Operation::Icon(_) => OutputKind::Icon,
            Operation::Resize(_) => OutputKind::Optimized,
        }
    }

    fn params_hash(&self) -> String {
        match self {
            Operation::Icon(p) => cache::hash_icon_params(p),
            Operation::Resize(p) => cache::hash_resize_params(p),
        }
    }

    fn run(&self, backend: &impl ImageBackend) -> Result<(), BackendError> {
        match self {
            Operation::Icon(p) => backend.icon(p),
            Operation::Resize(p) => backend.resize(p),
        }
    }
}

struct PlannedSource {
    name: String,
    hash: String,
    original_bytes: u64,
}

struct PlannedOutput {
    source_index: usize,
    operation: Operation,
}

pub fn process_assets(
    source_dir: &Path,
    output_dir: &Path,
    config: &AssetConfig,
    use_cache: bool,
    progress: Option<Sender<AssetEvent>>,
) -> Result<AssetReport, AssetError> {
    let backend = RustBackend::new();
    process_assets_with_backend(&backend, source_dir, output_dir, config, use_cache, progress)
}

/// Run the assets stage with a specific backend (allows testing with mock).
pub fn process_assets_with_backend(
    backend: &impl ImageBackend,
    source_dir: &Path,
    output_dir: &Path,
    config: &AssetConfig,
    use_cache: bool,
    progress: Option<Sender<AssetEvent>>,
) -> Result<AssetReport, AssetError> {
    if !source_dir.is_dir() {
        return Err(AssetError::SourceNotFound(source_dir.to_path_buf()));
    }
    std::fs::create_dir_all(output_dir)?;

    let mut report = AssetReport::default();
    let mut sources: Vec<PlannedSource> = Vec::new();
    let mut planned: Vec<PlannedOutput> = Vec::new();

    let inputs = std::iter::once((config.logo.as_str(), SourceRole::Logo)).chain(
        config
            .optimize
            .iter()
            .map(|name| (name.as_str(), SourceRole::Image)),
    );

    for (name, role) in inputs {
        let path = source_dir.join(name);
        if !path.is_file() {
            tracing::warn!(source = name, "not found, skipping");
            emit(&progress, AssetEvent::Skipped {
                source: name.to_string(),
            });
            report.skipped.push(name.to_string());
            continue;
        }

        let dims = match get_dimensions(backend, &path) {
            Ok(dims) => dims,
            Err(e) => {
                tracing::warn!(source = name, error = %e, "unreadable image");
                emit(&progress, AssetEvent::Failed {
                    output: name.to_string(),
                    error: e.to_string(),
                });
                report.failed.push(FailedOutput {
                    output: name.to_string(),
                    error: e.to_string(),
                });
                continue;
            }
        };

        let source_index = sources.len();
        sources.push(PlannedSource {
            name: name.to_string(),
            hash: cache::hash_file(&path)?,
            original_bytes: std::fs::metadata(&path)?.len(),
        });

        let operations: Vec<Operation> = match role {
            SourceRole::Logo => plan_icons(&path, output_dir, dims)
                .into_iter()
                .map(Operation::Icon)
                .chain(
                    plan_logo(&path, output_dir, dims, &config.logo_config)
                        .into_iter()
                        .map(Operation::Resize),
                )
                .collect(),
            SourceRole::Image => vec![Operation::Resize(plan_conversion(
                &path,
                output_dir,
                dims,
                config.quality,
            ))],
        };
        planned.extend(operations.into_iter().map(|operation| PlannedOutput {
            source_index,
            operation,
        }));
    }

    let generated: HashSet<PathBuf> = planned
        .iter()
        .filter_map(|p| p.operation.output().strip_prefix(output_dir).ok())
        .map(Path::to_path_buf)
        .collect();
    report.copied = copy_sources(source_dir, output_dir, &generated)?;
    emit(&progress, AssetEvent::Copied {
        count: report.copied,
    });

    let manifest = Mutex::new(if use_cache {
        CacheManifest::load(output_dir)
    } else {
        CacheManifest::empty()
    });
    let stats = Mutex::new(CacheStats::default());

    tracing::info!(outputs = planned.len(), "producing assets");
    let results: Vec<(usize, String, Result<WrittenFile, AssetError>)> = planned
        .par_iter()
        .map(|p| {
            let source = &sources[p.source_index];
            let name = relative_name(p.operation.output(), output_dir);
            let result = produce(backend, &p.operation, source, &name, output_dir, &manifest, &stats);
            match &result {
                Ok(file) => emit(&progress, AssetEvent::Written {
                    source: source.name.clone(),
                    file: file.clone(),
                }),
                Err(e) => {
                    tracing::warn!(output = %name, error = %e, "asset failed");
                    emit(&progress, AssetEvent::Failed {
                        output: name.clone(),
                        error: e.to_string(),
                    });
                }
            }
            (p.source_index, name, result)
        })
        .collect();

    report.sources = sources
        .iter()
        .map(|s| SourceReport {
            source: s.name.clone(),
            original_bytes: s.original_bytes,
            outputs: Vec::new(),
        })
        .collect();
    for (index, name, result) in results {
        match result {
            Ok(file) => report.sources[index].outputs.push(file),
            Err(e) => report.failed.push(FailedOutput {
                output: name,
                error: e.to_string(),
            }),
        }
    }

    lock(&manifest).save(output_dir)?;
    report.cache_stats = *lock(&stats);
    Ok(report)
}

fn produce(
    backend: &impl ImageBackend,
    operation: &Operation,
    source: &PlannedSource,
    name: &str,
    output_dir: &Path,
    manifest: &Mutex<CacheManifest>,
    stats: &Mutex<CacheStats>,
) -> Result<WrittenFile, AssetError> {
    let entry = CacheEntry {
        source_hash: source.hash.clone(),
        params_hash: operation.params_hash(),
    };
    let fresh = lock(manifest).is_fresh(name, &entry, output_dir);
    let status = if fresh {
        tracing::debug!(output = name, "cache hit");
        lock(stats).hit();
        OutputStatus::Cached
    } else {
        operation.run(backend)?;
        lock(manifest).record(name.to_string(), entry);
        lock(stats).miss();
        OutputStatus::Encoded
    };
    let bytes = std::fs::metadata(operation.output())?.len();
    Ok(WrittenFile {
        name: name.to_string(),
        kind: operation.kind(),
        bytes,
        status,
    })
}

/// Copy every non-hidden file from the source tree, except paths the stage
/// generates itself. Returns the number of files copied.
fn copy_sources(
    source_dir: &Path,
    output_dir: &Path,
    generated: &HashSet<PathBuf>,
) -> std::io::Result<usize> {
    let mut copied = 0;
    let walker = WalkDir::new(source_dir)
        .min_depth(1)
        .into_iter()
        .filter_entry(|e| {
            let hidden = e.depth() > 0 && e.file_name().to_string_lossy().starts_with('.');
            !hidden && !e.path().starts_with(output_dir)
        });
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(source_dir)
            .map_err(std::io::Error::other)?;
        if generated.contains(relative) {
            tracing::debug!(path = %relative.display(), "generated output shadows original");
            continue;
        }
        let dest = output_dir.join(relative);
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::copy(entry.path(), &dest)?;
        copied += 1;
    }
    Ok(copied)
}

fn relative_name(output: &Path, output_dir: &Path) -> String {
    output
        .strip_prefix(output_dir)
        .unwrap_or(output)
        .to_string_lossy()
        .replace('\\', "/")
}

fn emit(progress: &Option<Sender<AssetEvent>>, event: AssetEvent) {
    if let Some(tx) = progress {
        // A closed receiver only means nobody is printing.
        let _ = tx.send(event);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::Dimensions;
    use crate::imaging::backend::tests::{MOCK_OUTPUT, MockBackend, RecordedOp};
    use crate::test_helpers::{LOGO_DIMS, PHOTO_DIMS, setup_public_dir};
    use std::fs;

    fn dims((width, height): (u32, u32)) -> Dimensions {
        Dimensions { width, height }
    }

    /// Identify results for `setup_public_dir`: logo first, then four photos.
    /// The mock pops from the back.
    fn fixture_backend() -> MockBackend {
        MockBackend::writing(vec![
            dims(PHOTO_DIMS),
            dims(PHOTO_DIMS),
            dims(PHOTO_DIMS),
            dims(PHOTO_DIMS),
            dims(LOGO_DIMS),
        ])
    }

    #[test]
    fn processes_logo_and_listed_images() {
        let tmp = setup_public_dir();
        let public = tmp.path().join("public");
        let dist = tmp.path().join("dist");

        let backend = fixture_backend();
        let report = process_assets_with_backend(
            &backend,
            &public,
            &dist,
            &AssetConfig::default(),
            true,
            None,
        )
        .unwrap();

        assert!(report.failed.is_empty());
        assert_eq!(report.skipped, vec!["gallery-3.png".to_string()]);
        assert_eq!(report.sources.len(), 5);

        let logo = &report.sources[0];
        assert_eq!(logo.source, "logo.png");
        let names: Vec<&str> = logo.outputs.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "favicon-32x32.png",
                "favicon-16x16.png",
                "apple-touch-icon.png",
                "favicon.ico",
                "icon-192.png",
                "icon-512.png",
                "bloomsberry-logo.avif",
                "bloomsberry-logo.png",
            ]
        );
        assert_eq!(logo.optimized().count(), 2);

        assert_eq!(report.sources[1].outputs[0].name, "hero-bg.avif");
        assert!(dist.join("gallery-2.avif").exists());
        assert!(!dist.join("gallery-3.avif").exists());
    }

    #[test]
    fn icons_use_left_square_of_logo() {
        let tmp = setup_public_dir();
        let backend = fixture_backend();
        process_assets_with_backend(
            &backend,
            &tmp.path().join("public"),
            &tmp.path().join("dist"),
            &AssetConfig::default(),
            true,
            None,
        )
        .unwrap();

        let side = LOGO_DIMS.1;
        let icons: Vec<RecordedOp> = backend
            .get_operations()
            .into_iter()
            .filter(|op| matches!(op, RecordedOp::Icon { .. }))
            .collect();
        assert_eq!(icons.len(), 6);
        assert!(icons.iter().all(|op| matches!(
            op,
            RecordedOp::Icon { crop, .. } if *crop == (0, 0, side, side)
        )));
    }

    #[test]
    fn copies_originals() {
        let tmp = setup_public_dir();
        let dist = tmp.path().join("dist");
        let report = process_assets_with_backend(
            &fixture_backend(),
            &tmp.path().join("public"),
            &dist,
            &AssetConfig::default(),
            true,
            None,
        )
        .unwrap();

        // logo + four photos + robots.txt
        assert_eq!(report.copied, 6);
        assert!(dist.join("logo.png").exists());
        assert!(dist.join("robots.txt").exists());
    }

    #[test]
    fn generated_outputs_win_over_same_named_originals() {
        let tmp = setup_public_dir();
        let public = tmp.path().join("public");
        let dist = tmp.path().join("dist");
        fs::write(public.join("favicon.ico"), b"stale icon").unwrap();

        process_assets_with_backend(
            &fixture_backend(),
            &public,
            &dist,
            &AssetConfig::default(),
            true,
            None,
        )
        .unwrap();

        assert_eq!(fs::read(dist.join("favicon.ico")).unwrap(), MOCK_OUTPUT);
    }

    #[test]
    fn second_run_hits_cache() {
        let tmp = setup_public_dir();
        let public = tmp.path().join("public");
        let dist = tmp.path().join("dist");
        let config = AssetConfig::default();

        let first =
            process_assets_with_backend(&fixture_backend(), &public, &dist, &config, true, None)
                .unwrap();
        assert_eq!(first.cache_stats.misses, 12);
        assert_eq!(first.cache_stats.hits, 0);

        let backend = fixture_backend();
        let second =
            process_assets_with_backend(&backend, &public, &dist, &config, true, None).unwrap();
        assert_eq!(second.cache_stats.hits, 12);
        assert_eq!(second.cache_stats.misses, 0);
        assert!(
            backend
                .get_operations()
                .iter()
                .all(|op| matches!(op, RecordedOp::Identify(_)))
        );
        assert!(
            second.sources[0]
                .outputs
                .iter()
                .all(|f| f.status == OutputStatus::Cached)
        );
    }

    #[test]
    fn no_cache_reencodes_everything() {
        let tmp = setup_public_dir();
        let public = tmp.path().join("public");
        let dist = tmp.path().join("dist");
        let config = AssetConfig::default();

        process_assets_with_backend(&fixture_backend(), &public, &dist, &config, true, None)
            .unwrap();
        let second =
            process_assets_with_backend(&fixture_backend(), &public, &dist, &config, false, None)
                .unwrap();
        assert_eq!(second.cache_stats.hits, 0);
        assert_eq!(second.cache_stats.misses, 12);
    }

    #[test]
    fn changed_quality_invalidates_conversions_only() {
        let tmp = setup_public_dir();
        let public = tmp.path().join("public");
        let dist = tmp.path().join("dist");

        let mut config = AssetConfig::default();
        process_assets_with_backend(&fixture_backend(), &public, &dist, &config, true, None)
            .unwrap();

        config.quality = Quality::new(60);
        let second =
            process_assets_with_backend(&fixture_backend(), &public, &dist, &config, true, None)
                .unwrap();
        // six icons and two logo outputs are untouched
        assert_eq!(second.cache_stats.hits, 8);
        assert_eq!(second.cache_stats.misses, 4);
    }

    #[test]
    fn unreadable_source_is_reported_and_others_continue() {
        let tmp = setup_public_dir();
        // Only the logo identifies; every photo fails.
        let backend = MockBackend::writing(vec![dims(LOGO_DIMS)]);
        let report = process_assets_with_backend(
            &backend,
            &tmp.path().join("public"),
            &tmp.path().join("dist"),
            &AssetConfig::default(),
            true,
            None,
        )
        .unwrap();

        assert_eq!(report.sources.len(), 1);
        assert_eq!(report.failed.len(), 4);
        assert_eq!(report.failed[0].output, "hero-bg.png");
    }

    #[test]
    fn missing_source_dir_errors() {
        let tmp = tempfile::TempDir::new().unwrap();
        let result = process_assets_with_backend(
            &MockBackend::new(),
            &tmp.path().join("nope"),
            &tmp.path().join("dist"),
            &AssetConfig::default(),
            true,
            None,
        );
        assert!(matches!(result, Err(AssetError::SourceNotFound(_))));
    }

    #[test]
    fn streams_progress_events() {
        let tmp = setup_public_dir();
        let (tx, rx) = std::sync::mpsc::channel();
        process_assets_with_backend(
            &fixture_backend(),
            &tmp.path().join("public"),
            &tmp.path().join("dist"),
            &AssetConfig::default(),
            true,
            Some(tx),
        )
        .unwrap();

        let events: Vec<AssetEvent> = rx.iter().collect();
        let written = events
            .iter()
            .filter(|e| matches!(e, AssetEvent::Written { .. }))
            .count();
        assert_eq!(written, 12);
        assert!(events.iter().any(
            |e| matches!(e, AssetEvent::Skipped { source } if source == "gallery-3.png")
        ));
        assert!(
            events
                .iter()
                .any(|e| matches!(e, AssetEvent::Copied { count: 6 }))
        );
    }

    #[test]
    fn savings_relative_to_source_size() {
        let report = SourceReport {
            source: "hero-bg.png".into(),
            original_bytes: 4000,
            outputs: vec![WrittenFile {
                name: "hero-bg.avif".into(),
                kind: OutputKind::Optimized,
                bytes: 1000,
                status: OutputStatus::Encoded,
            }],
        };
        let file = report.optimized().next().unwrap();
        assert!((report.savings(file) - 75.0).abs() < 1e-9);
    }

    #[test]
    fn from_site_config_maps_image_settings() {
        let mut site = SiteConfig::default();
        site.images.quality = 70;
        site.images.logo_width = 250;
        let config = AssetConfig::from_site_config(&site);
        assert_eq!(config.quality.value(), 70);
        assert_eq!(config.logo_config.max_width, 250);
        assert_eq!(config.logo_config.quality.value(), 70);
        assert_eq!(config.optimize.len(), 5);
    }

    // =========================================================================
    // Real backend
    // =========================================================================

    #[test]
    fn real_backend_writes_decodable_outputs() {
        let tmp = setup_public_dir();
        let dist = tmp.path().join("dist");
        let report = process_assets(
            &tmp.path().join("public"),
            &dist,
            &AssetConfig::default(),
            true,
            None,
        )
        .unwrap();

        assert!(report.failed.is_empty(), "{:?}", report.failed);
        assert_eq!(
            image::image_dimensions(dist.join("apple-touch-icon.png")).unwrap(),
            (180, 180)
        );
        // Narrower than the 400px limit: kept at its own size
        assert_eq!(
            image::image_dimensions(dist.join("bloomsberry-logo.png")).unwrap(),
            LOGO_DIMS
        );
        assert!(fs::metadata(dist.join("hero-bg.avif")).unwrap().len() > 0);
        assert!(dist.join(cache::MANIFEST_FILENAME).exists());
    }
}
