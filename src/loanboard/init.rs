use crate::api::CatalogApi;
use crate::error::{CatalogError, Result};
use crate::store::fs::FileStore;
use crate::sync::{GistHost, Syncer};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Overrides the platform data directory.
pub const HOME_ENV: &str = "LOANBOARD_HOME";

pub struct CatalogContext {
    pub api: CatalogApi<FileStore>,
    pub data_dir: PathBuf,
}

/// Picks the data directory: explicit flag, then `$LOANBOARD_HOME`, then the
/// platform data dir.
pub fn resolve_data_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "loanboard", "loanboard")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| CatalogError::Store("Could not determine data directory".to_string()))
}

pub fn initialize(data_dir: &Path) -> Result<CatalogContext> {
    tracing::debug!(data_dir = %data_dir.display(), "initializing catalog");
    let store = FileStore::new(data_dir);
    let syncer = Syncer::new(Arc::new(GistHost::new()?));
    let api = CatalogApi::new(store, syncer)?;

    Ok(CatalogContext {
        api,
        data_dir: data_dir.to_path_buf(),
    })
}
