//! The bundle file.
//!
//! An [`Artifact`] is created (or truncated) once per run, then only ever
//! appended to. Appends never create the file again, so a bundle that
//! disappears mid-run is reported instead of silently restarted.

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::ModuleFault;

#[derive(Debug, Clone)]
pub struct Artifact {
  path: PathBuf,
}

impl Artifact {
  /// Create `path` as an empty file, truncating any previous bundle.
  pub async fn create(path: impl Into<PathBuf>) -> io::Result<Self> {
    let path = path.into();
    fs::File::create(&path).await?;
    debug!(path = %path.display(), "build file truncated");
    Ok(Self { path })
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Append `content` at the current end of the bundle.
  ///
  /// # Errors
  ///
  /// [`ModuleFault::ArtifactMissing`] if the bundle no longer exists,
  /// [`ModuleFault::AppendFailed`] for any other I/O failure.
  pub async fn append(&self, content: &str) -> Result<(), ModuleFault> {
    let mut file = match OpenOptions::new().append(true).open(&self.path).await {
      Ok(file) => file,
      Err(e) if e.kind() == io::ErrorKind::NotFound => {
        return Err(ModuleFault::ArtifactMissing { path: self.path.clone() });
      }
      Err(source) => {
        return Err(ModuleFault::AppendFailed {
          path: self.path.clone(),
          source,
        });
      }
    };

    file
      .write_all(content.as_bytes())
      .await
      .map_err(|source| self.append_failed(source))?;
    file.flush().await.map_err(|source| self.append_failed(source))?;

    Ok(())
  }

  fn append_failed(&self, source: io::Error) -> ModuleFault {
    ModuleFault::AppendFailed {
      path: self.path.clone(),
      source,
    }
  }
}
