//! Module identities and the ordered build list.

use std::fmt;
use std::path::{Path, PathBuf};

/// One source unit of the bundle.
///
/// Holds both the path relative to the source root (used for reporting) and
/// the resolved location on disk (used for I/O).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleRef {
  relative: PathBuf,
  path: PathBuf,
}

impl ModuleRef {
  pub fn new(root: &Path, relative: impl Into<PathBuf>) -> Self {
    let relative = relative.into();
    let path = root.join(&relative);
    Self { relative, path }
  }

  /// Path relative to the source root.
  pub fn relative(&self) -> &Path {
    &self.relative
  }

  /// Resolved location on disk.
  pub fn path(&self) -> &Path {
    &self.path
  }
}

impl fmt::Display for ModuleRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.relative.display())
  }
}

/// Ordered sequence of modules. Insertion order is build order.
///
/// Entries are never de-duplicated: a module listed twice is built twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleList(Vec<ModuleRef>);

impl ModuleList {
  pub fn new() -> Self {
    Self::default()
  }

  /// Build a list from explicit paths relative to `root`, keeping their order.
  pub fn from_listed<S: AsRef<str>>(root: &Path, entries: &[S]) -> Self {
    entries.iter().map(|entry| ModuleRef::new(root, entry.as_ref())).collect()
  }

  pub fn push(&mut self, module: ModuleRef) {
    self.0.push(module);
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn get(&self, index: usize) -> Option<&ModuleRef> {
    self.0.get(index)
  }

  pub fn iter(&self) -> std::slice::Iter<'_, ModuleRef> {
    self.0.iter()
  }

  /// Relative paths in build order.
  pub fn relative_paths(&self) -> Vec<&Path> {
    self.0.iter().map(ModuleRef::relative).collect()
  }
}

impl FromIterator<ModuleRef> for ModuleList {
  fn from_iter<I: IntoIterator<Item = ModuleRef>>(iter: I) -> Self {
    Self(iter.into_iter().collect())
  }
}

impl<'a> IntoIterator for &'a ModuleList {
  type Item = &'a ModuleRef;
  type IntoIter = std::slice::Iter<'a, ModuleRef>;

  fn into_iter(self) -> Self::IntoIter {
    self.0.iter()
  }
}
