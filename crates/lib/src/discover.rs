//! Module discovery.
//!
//! Walks the source tree depth-first and collects every entry whose extension
//! is allowed. Entries without an extension are treated as directories and
//! expanded in place, so a subdirectory's modules sit contiguously where the
//! subdirectory itself was listed. Order is whatever the filesystem reports;
//! nothing is sorted.

use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

use crate::module::{ModuleList, ModuleRef};

#[derive(Debug, Error)]
pub enum DiscoverError {
  #[error("source directory not found: {}", path.display())]
  RootNotFound { path: PathBuf },

  #[error("failed to walk {}: {source}", path.display())]
  Walk { path: PathBuf, source: walkdir::Error },
}

/// Collect the modules under `root/relative`.
///
/// Returned modules carry paths relative to `root`. Names in `ignore` are
/// skipped wherever they appear, together with everything beneath them.
///
/// # Errors
///
/// Returns [`DiscoverError::RootNotFound`] if `root/relative` is not a
/// directory, and [`DiscoverError::Walk`] if part of the tree cannot be read.
pub fn discover(
  root: &Path,
  relative: &Path,
  ignore: &BTreeSet<String>,
  extensions: &BTreeSet<String>,
) -> Result<ModuleList, DiscoverError> {
  let start = root.join(relative);
  if !start.is_dir() {
    return Err(DiscoverError::RootNotFound { path: start });
  }

  let mut modules = ModuleList::new();
  let mut walker = WalkDir::new(&start)
    .follow_links(true)
    .min_depth(1)
    .into_iter()
    .filter_entry(|entry| !is_ignored(entry, ignore));

  while let Some(entry) = walker.next() {
    let entry = entry.map_err(|source| DiscoverError::Walk {
      path: source.path().map(Path::to_path_buf).unwrap_or_else(|| start.clone()),
      source,
    })?;
    let is_dir = entry.file_type().is_dir();

    let Some(ext) = extension_of(entry.file_name()) else {
      if !is_dir {
        debug!(path = %entry.path().display(), "skipping extensionless file");
      }
      continue;
    };

    // Only extensionless directories are expanded.
    if is_dir {
      walker.skip_current_dir();
    }

    if extensions.contains(&ext) {
      let rel = entry.path().strip_prefix(root).unwrap_or(entry.path());
      trace!(module = %rel.display(), "discovered module");
      modules.push(ModuleRef::new(root, rel));
    }
  }

  debug!(root = %start.display(), count = modules.len(), "discovery complete");
  Ok(modules)
}

fn is_ignored(entry: &DirEntry, ignore: &BTreeSet<String>) -> bool {
  entry.file_name().to_str().is_some_and(|name| ignore.contains(name))
}

/// Extension including the leading dot, or `None` for names like `lib` or
/// `.gitignore`.
fn extension_of(name: &OsStr) -> Option<String> {
  Path::new(name)
    .extension()
    .map(|ext| format!(".{}", ext.to_string_lossy()))
}
