// ─── Sorting pipeline ───
// Sequential composition root: hash → registry lookup (with fallback)
// → classify → copy. One file is fully settled before the next starts,
// so no two registry calls are ever in flight at once.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::core::error::{SorterError, SorterResult};
use crate::core::hash::{digest_file, HashAlgorithm};
use crate::core::registry::{Registry, VersionMetadata};

use super::classify::{classify, Category};
use super::progress::{NullObserver, SortObserver};
use super::report::SortReport;

const MOD_EXTENSION: &str = "jar";
const OUTPUT_DIR_NAME: &str = "sorted_mods";

/// Cooperative cancellation handle, polled once per file boundary.
/// Cloning hands out another view of the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Tunables for a sorting run.
#[derive(Debug, Clone)]
pub struct SortOptions {
    /// Explicit output root. Defaults to a `sorted_mods` folder next to
    /// the mods directory.
    pub output_dir: Option<PathBuf>,
    /// Pause between files so the registry's rate limits are respected.
    /// `Duration::ZERO` disables the pause.
    pub delay: Duration,
}

impl Default for SortOptions {
    fn default() -> Self {
        Self {
            output_dir: None,
            delay: Duration::from_millis(500),
        }
    }
}

/// Sorts a folder of mod jars into per-side output folders.
pub struct ModSorter<R> {
    registry: R,
    options: SortOptions,
    observer: Box<dyn SortObserver>,
    cancel: CancelFlag,
}

impl<R: Registry> ModSorter<R> {
    pub fn new(registry: R) -> Self {
        Self {
            registry,
            options: SortOptions::default(),
            observer: Box::new(NullObserver),
            cancel: CancelFlag::new(),
        }
    }

    pub fn with_options(mut self, options: SortOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_observer(mut self, observer: Box<dyn SortObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    /// Run the pipeline over every mod file in `mods_dir`.
    ///
    /// The only fatal error is an invalid input directory; anything that
    /// goes wrong for a single file downgrades that file, not the run.
    /// Sources are read-only throughout — copies land in the output
    /// tree, originals stay where they are.
    pub async fn run(&self, mods_dir: &Path) -> SorterResult<SortReport> {
        if !mods_dir.is_dir() {
            return Err(SorterError::InvalidModsDir(mods_dir.to_path_buf()));
        }

        let destination = self.destination_root(mods_dir);
        let mut report = SortReport::new(destination.clone());

        create_category_dirs(&destination).await?;

        let files = scan_mod_files(mods_dir).await?;
        if files.is_empty() {
            self.observer.on_status(&format!(
                "No .{} files found in {}",
                MOD_EXTENSION,
                mods_dir.display()
            ));
            self.observer.on_summary(&report);
            return Ok(report);
        }

        info!("Sorting {} mod files from {:?}", files.len(), mods_dir);
        self.observer
            .on_status(&format!("Found {} mod files", files.len()));

        let total = files.len();
        for (index, path) in files.iter().enumerate() {
            if self.cancel.is_cancelled() {
                info!("Cancelled after {} of {} files", index, total);
                self.observer.on_status("Sorting cancelled");
                report.cancelled = true;
                self.observer.on_summary(&report);
                return Ok(report);
            }

            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            self.observer.on_status(&format!(
                "[{}/{}] Checking: {}",
                index + 1,
                total,
                file_name
            ));

            let category = self.categorize(path).await;
            self.observer.on_status(&format!("  > {}", category.label()));

            let target = destination.join(category.folder_name()).join(&file_name);
            if let Err(e) = copy_preserving_mtime(path, &target).await {
                // The classification stands; only the copy is missing.
                warn!("Copy failed for {:?}: {}", path, e);
                self.observer.on_status(&format!("  Copy failed: {e}"));
            }
            report.record(category, file_name);

            self.observer.on_progress(index + 1, total);

            if !self.options.delay.is_zero() && index + 1 < total {
                tokio::time::sleep(self.options.delay).await;
            }
        }

        self.observer.on_summary(&report);
        Ok(report)
    }

    /// Resolve one file to its category: primary hash lookup, fallback
    /// hash lookup, then optional project enrichment.
    async fn categorize(&self, path: &Path) -> Category {
        let version = match self.resolve_version(path).await {
            Ok(Some(version)) => version,
            Ok(None) => {
                self.observer.on_status("  Not found in the registry");
                return Category::Unknown;
            }
            Err(e) => {
                // Unreadable file: keep the run going, sort it with the
                // other unidentified mods.
                warn!("Cannot hash {:?}: {}", path, e);
                self.observer.on_status(&format!("  Unreadable file: {e}"));
                return Category::Unknown;
            }
        };

        let project = match version.project_id.as_deref() {
            Some(id) => self.registry.lookup_project(id).await,
            None => None,
        };
        if let Some(title) = project.as_ref().and_then(|p| p.title.as_deref()) {
            debug!("Matched project '{}'", title);
        }

        let (client_side, server_side) = version.merged_sides(project.as_ref());
        self.observer.on_status(&format!(
            "  Client: {client_side}, Server: {server_side}"
        ));

        classify(client_side, server_side)
    }

    /// Hash lookup with the SHA-512 fallback when SHA-1 finds nothing.
    async fn resolve_version(&self, path: &Path) -> SorterResult<Option<VersionMetadata>> {
        let sha1 = digest_file(path, HashAlgorithm::Sha1).await?;
        if let Some(version) = self.registry.lookup_by_hash(&sha1, HashAlgorithm::Sha1).await {
            return Ok(Some(version));
        }

        self.observer.on_status("  SHA1 not found, trying SHA512...");
        let sha512 = digest_file(path, HashAlgorithm::Sha512).await?;
        Ok(self
            .registry
            .lookup_by_hash(&sha512, HashAlgorithm::Sha512)
            .await)
    }

    fn destination_root(&self, mods_dir: &Path) -> PathBuf {
        match &self.options.output_dir {
            Some(dir) => dir.clone(),
            None => mods_dir.parent().unwrap_or(mods_dir).join(OUTPUT_DIR_NAME),
        }
    }
}

/// List `*.jar` files directly inside `dir`, sorted by file name for a
/// deterministic processing order.
async fn scan_mod_files(dir: &Path) -> SorterResult<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|source| SorterError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

    let mut files = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|source| SorterError::Io {
            path: dir.to_path_buf(),
            source,
        })?
    {
        let path = entry.path();
        let is_mod = path.is_file()
            && path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(MOD_EXTENSION));
        if is_mod {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Create the four category folders up front, idempotently.
async fn create_category_dirs(destination: &Path) -> SorterResult<()> {
    for category in Category::ALL {
        let dir = destination.join(category.folder_name());
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|source| SorterError::Io {
                path: dir.clone(),
                source,
            })?;
    }
    Ok(())
}

/// Copy `src` to `dest`, carrying the source modification time across.
async fn copy_preserving_mtime(src: &Path, dest: &Path) -> SorterResult<()> {
    tokio::fs::copy(src, dest)
        .await
        .map_err(|source| SorterError::Io {
            path: src.to_path_buf(),
            source,
        })?;

    let metadata = tokio::fs::metadata(src)
        .await
        .map_err(|source| SorterError::Io {
            path: src.to_path_buf(),
            source,
        })?;
    let mtime = filetime::FileTime::from_last_modification_time(&metadata);
    filetime::set_file_mtime(dest, mtime).map_err(|source| SorterError::Io {
        path: dest.to_path_buf(),
        source,
    })?;

    Ok(())
}
