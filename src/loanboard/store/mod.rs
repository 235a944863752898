//! # Storage Layer
//!
//! The catalog persists four independent JSON documents, each under a fixed
//! key. The [`DataStore`] trait only knows how to read and write the raw text
//! of a document; the typed `load_*`/`save_*` helpers on top of it handle
//! serialization and first-run defaults.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: one file per key in the data directory
//! - [`memory::InMemoryStore`]: for tests, with write-error simulation
//!
//! ## Storage Format
//!
//! ```text
//! <data dir>/
//! ├── products.json   # ordered array of products
//! ├── presets.json    # the six pick-lists
//! ├── settings.json   # remote mirroring settings
//! └── sync.json       # last remote sync status
//! ```
//!
//! A missing document is not an error: it loads as the type's default.
//! Stores never write implicitly. The API layer decides when to persist.

use crate::config::Settings;
use crate::error::{CatalogError, Result};
use crate::model::{PresetSet, ProductStore};
use crate::sync::SyncStatus;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub mod fs;
pub mod memory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKey {
    Products,
    Presets,
    Settings,
    Sync,
}

impl DocumentKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKey::Products => "products",
            DocumentKey::Presets => "presets",
            DocumentKey::Settings => "settings",
            DocumentKey::Sync => "sync",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.json", self.as_str())
    }
}

/// Raw key → document storage.
pub trait DataStore {
    /// Returns `Ok(None)` when the document was never written.
    fn read(&self, key: DocumentKey) -> Result<Option<String>>;

    /// Replaces the whole document.
    fn write(&mut self, key: DocumentKey, content: &str) -> Result<()>;

    fn load_products(&self) -> Result<ProductStore> {
        load_or_default(self, DocumentKey::Products)
    }

    fn save_products(&mut self, products: &ProductStore) -> Result<()> {
        save_document(self, DocumentKey::Products, products)
    }

    fn load_presets(&self) -> Result<PresetSet> {
        load_or_default(self, DocumentKey::Presets)
    }

    fn save_presets(&mut self, presets: &PresetSet) -> Result<()> {
        save_document(self, DocumentKey::Presets, presets)
    }

    fn load_settings(&self) -> Result<Settings> {
        load_or_default(self, DocumentKey::Settings)
    }

    fn save_settings(&mut self, settings: &Settings) -> Result<()> {
        save_document(self, DocumentKey::Settings, settings)
    }

    fn load_sync_status(&self) -> Result<SyncStatus> {
        load_or_default(self, DocumentKey::Sync)
    }

    fn save_sync_status(&mut self, status: &SyncStatus) -> Result<()> {
        save_document(self, DocumentKey::Sync, status)
    }
}

fn load_or_default<S, T>(store: &S, key: DocumentKey) -> Result<T>
where
    S: DataStore + ?Sized,
    T: DeserializeOwned + Default,
{
    match store.read(key)? {
        Some(content) if !content.trim().is_empty() => serde_json::from_str(&content)
            .map_err(|e| CatalogError::Store(format!("{} is corrupt: {}", key.file_name(), e))),
        _ => Ok(T::default()),
    }
}

fn save_document<S, T>(store: &mut S, key: DocumentKey, value: &T) -> Result<()>
where
    S: DataStore + ?Sized,
    T: Serialize,
{
    let content = serde_json::to_string_pretty(value)?;
    store.write(key, &content)
}
