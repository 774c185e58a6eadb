//! Module loading.

use std::future::Future;
use std::io;

use tokio::fs;
use tracing::trace;

use crate::error::ModuleFault;
use crate::module::ModuleRef;

/// Reads the raw content of a module.
///
/// Implementations must not cache or mutate anything; the sequencer calls
/// `load` exactly once per list entry.
pub trait Loader {
  fn load(&self, module: &ModuleRef) -> impl Future<Output = Result<String, ModuleFault>> + Send;
}

/// Loads modules from the local filesystem as UTF-8 text.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLoader;

impl Loader for FsLoader {
  async fn load(&self, module: &ModuleRef) -> Result<String, ModuleFault> {
    let path = module.path();

    match fs::try_exists(path).await {
      Ok(true) => {}
      Ok(false) => return Err(ModuleFault::NotFound { path: path.to_path_buf() }),
      Err(source) => {
        return Err(ModuleFault::Unreadable {
          path: path.to_path_buf(),
          source,
        });
      }
    }

    let content = fs::read_to_string(path).await.map_err(|source| match source.kind() {
      // Removed between the existence check and the read.
      io::ErrorKind::NotFound => ModuleFault::NotFound { path: path.to_path_buf() },
      _ => ModuleFault::Unreadable {
        path: path.to_path_buf(),
        source,
      },
    })?;

    trace!(module = %module, bytes = content.len(), "module loaded");
    Ok(content)
  }
}
