//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every catalog operation, whatever the UI.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Owns the state**: the product list, presets, settings and the last sync status
//! - **Normalizes inputs**: display indexes become product ids before any command runs
//! - **Persists explicitly**: a command runs on a copy, and the copy replaces the
//!   live state only once the store accepted it. A failed write therefore leaves
//!   memory and storage in agreement.
//! - **Dispatches sync**: every product mutation spawns a background push
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: that belongs in `commands/*.rs`
//! - **Presentation**: no stdout or stderr, results are data structures
//!
//! ## Background Sync
//!
//! Pushes run as tokio tasks. Their handles are kept so a short-lived process
//! can [`wait_for_sync`](CatalogApi::wait_for_sync) before exiting; the final
//! status is recorded in the store at that point. Without a runtime the push is
//! skipped with a warning.
//!
//! ## Generic Over DataStore
//!
//! `CatalogApi<S: DataStore>` is generic over the storage backend:
//! - Production: `CatalogApi<FileStore>`
//! - Testing: `CatalogApi<InMemoryStore>`

use crate::commands::{self, presets::PresetEditor, settings::SettingsAction};
use crate::config::Settings;
use crate::error::{CatalogError, Result};
use crate::index::{DisplayIndex, DisplayProduct};
use crate::model::{AmountField, MoveDirection, PresetCategory, PresetSet, Product, ProductStore};
use crate::selection::ProductDraft;
use crate::store::DataStore;
use crate::sync::{SyncJob, SyncStatus, Syncer};
use chrono::Utc;
use std::str::FromStr;
use tokio::task::JoinHandle;
use uuid::Uuid;

pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};

pub struct CatalogApi<S: DataStore> {
    store: S,
    products: ProductStore,
    presets: PresetSet,
    settings: Settings,
    sync_status: SyncStatus,
    syncer: Syncer,
    pending: Vec<JoinHandle<SyncStatus>>,
}

impl<S: DataStore> CatalogApi<S> {
    /// Loads every document from `store`. Missing documents start as defaults.
    pub fn new(store: S, syncer: Syncer) -> Result<Self> {
        let products = store.load_products()?;
        let presets = store.load_presets()?;
        let settings = store.load_settings()?;
        let sync_status = store.load_sync_status()?;
        tracing::debug!(products = products.len(), "catalog loaded");

        Ok(Self {
            store,
            products,
            presets,
            settings,
            sync_status,
            syncer,
            pending: Vec::new(),
        })
    }

    pub fn products(&self) -> &ProductStore {
        &self.products
    }

    pub fn presets(&self) -> &PresetSet {
        &self.presets
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn sync_status(&self) -> &SyncStatus {
        &self.sync_status
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    // --- products ---

    /// An empty form with the first preset of every category chosen.
    pub fn new_draft(&self) -> ProductDraft {
        ProductDraft::new(&self.presets)
    }

    pub fn edit_draft(&self, index: &str) -> Result<ProductDraft> {
        let id = self.resolve(index)?;
        commands::edit::run(&self.products, &self.presets, &id)
    }

    pub fn save_product(&mut self, draft: &ProductDraft) -> Result<CmdResult> {
        let mut products = self.products.clone();
        let result = commands::save::run(&mut products, draft)?;
        self.commit_products(products, &result)?;
        Ok(result)
    }

    pub fn delete_product<F>(&mut self, index: &str, confirm: F) -> Result<CmdResult>
    where
        F: FnOnce(&Product) -> bool,
    {
        let id = self.resolve(index)?;
        let mut products = self.products.clone();
        let result = commands::delete::run(&mut products, &id, confirm)?;
        self.commit_products(products, &result)?;
        Ok(result)
    }

    pub fn move_product(&mut self, index: &str, direction: MoveDirection) -> Result<CmdResult> {
        let id = self.resolve(index)?;
        let mut products = self.products.clone();
        let result = commands::move_product::run(&mut products, &id, direction)?;
        self.commit_products(products, &result)?;
        Ok(result)
    }

    pub fn list_products(&self) -> CmdResult {
        commands::list::run(&self.products)
    }

    pub fn show_product(&self, index: &str) -> Result<CmdResult> {
        let id = self.resolve(index)?;
        let pos = self
            .products
            .position(&id)
            .ok_or(CatalogError::ProductNotFound(id))?;
        let product = self
            .products
            .at(pos)
            .cloned()
            .ok_or(CatalogError::ProductNotFound(id))?;
        Ok(CmdResult::default().with_listed_products(vec![DisplayProduct {
            product,
            index: DisplayIndex::from_position(pos),
        }]))
    }

    // --- presets ---

    pub fn list_presets(&self) -> CmdResult {
        commands::presets::list(&self.presets)
    }

    pub fn add_preset(&mut self, category: PresetCategory) -> Result<CmdResult> {
        let mut presets = self.presets.clone();
        let result = commands::presets::add(&mut presets, category);
        self.commit_presets(presets)?;
        Ok(result)
    }

    pub fn set_preset(
        &mut self,
        category: PresetCategory,
        number: usize,
        field: Option<AmountField>,
        value: &str,
    ) -> Result<CmdResult> {
        let mut presets = self.presets.clone();
        let result = commands::presets::set(&mut presets, category, number, field, value)?;
        self.commit_presets(presets)?;
        Ok(result)
    }

    pub fn remove_preset(&mut self, category: PresetCategory, number: usize) -> Result<CmdResult> {
        let mut presets = self.presets.clone();
        let result = commands::presets::remove(&mut presets, category, number)?;
        self.commit_presets(presets)?;
        Ok(result)
    }

    /// Starts an interactive session on a copy of the presets.
    pub fn preset_editor(&self) -> PresetEditor {
        PresetEditor::open(&self.presets)
    }

    /// Saves an editor session. An untouched session writes nothing.
    pub fn commit_preset_editor(&mut self, editor: PresetEditor) -> Result<CmdResult> {
        match editor.finish() {
            Some(presets) => {
                self.commit_presets(presets)?;
                Ok(CmdResult::default()
                    .with_message(CmdMessage::success("Presets saved."))
                    .with_presets(self.presets.clone())
                    .mark_mutated())
            }
            None => Ok(CmdResult::default().with_message(CmdMessage::info("No preset changes."))),
        }
    }

    // --- settings and status ---

    pub fn settings_action(&mut self, action: SettingsAction) -> Result<CmdResult> {
        let mut settings = self.settings.clone();
        let result = commands::settings::run(&mut settings, action)?;
        if result.mutated {
            self.store.save_settings(&settings)?;
            self.settings = settings;
        }
        Ok(result)
    }

    pub fn status(&self) -> CmdResult {
        commands::status::run(&self.products, &self.settings, &self.sync_status)
    }

    // --- remote sync ---

    /// Pushes right now and waits for the outcome. Unlike the background push
    /// after a mutation, failures are returned to the caller.
    pub async fn push_now(&mut self) -> Result<CmdResult> {
        self.wait_for_sync().await;

        let job = match SyncJob::prepare(&self.settings, &self.products) {
            Ok(Some(job)) => job,
            Ok(None) => {
                return Err(CatalogError::Api(
                    "Remote sync is not configured (set api-url and token)".to_string(),
                ))
            }
            Err(e) => {
                self.record_sync(SyncStatus::Failed {
                    at: Utc::now(),
                    attempts: 0,
                    error: e.to_string(),
                });
                return Err(e);
            }
        };
        let target = job.target.id.clone();

        self.record_sync(SyncStatus::Pending { since: Utc::now() });
        let status = self.syncer.run(job).await;
        self.record_sync(status.clone());

        match status {
            SyncStatus::Synced { products, .. } => Ok(CmdResult::default().with_message(
                CmdMessage::success(format!("Pushed {} products to gist {}", products, target)),
            )),
            SyncStatus::Failed {
                attempts, error, ..
            } => Err(CatalogError::Remote(format!(
                "push failed after {} attempt(s): {}",
                attempts, error
            ))),
            _ => Ok(CmdResult::default()),
        }
    }

    /// Number of background pushes not yet drained.
    pub fn pending_syncs(&self) -> usize {
        self.pending.len()
    }

    /// Awaits every outstanding background push and records the final status.
    /// Returns that status, or `None` when nothing was pending.
    pub async fn wait_for_sync(&mut self) -> Option<SyncStatus> {
        let handles = std::mem::take(&mut self.pending);
        let mut last = None;
        for handle in handles {
            match handle.await {
                Ok(status) => last = Some(status),
                Err(e) => tracing::warn!("sync task did not complete: {e}"),
            }
        }
        if let Some(status) = &last {
            self.record_sync(status.clone());
        }
        last
    }

    // --- internals ---

    fn resolve(&self, index: &str) -> Result<Uuid> {
        let index = DisplayIndex::from_str(index).map_err(CatalogError::Api)?;
        commands::helpers::resolve_index(&self.products, index)
    }

    fn commit_products(&mut self, products: ProductStore, result: &CmdResult) -> Result<()> {
        if !result.mutated {
            return Ok(());
        }
        self.store.save_products(&products)?;
        self.products = products;
        tracing::debug!(products = self.products.len(), "products persisted");
        self.dispatch_sync();
        Ok(())
    }

    fn commit_presets(&mut self, presets: PresetSet) -> Result<()> {
        self.store.save_presets(&presets)?;
        self.presets = presets;
        Ok(())
    }

    fn dispatch_sync(&mut self) {
        let job = match SyncJob::prepare(&self.settings, &self.products) {
            Ok(Some(job)) => job,
            Ok(None) => {
                tracing::debug!("remote not configured, skipping sync");
                return;
            }
            Err(e) => {
                tracing::warn!("remote sync skipped: {e}");
                self.record_sync(SyncStatus::Failed {
                    at: Utc::now(),
                    attempts: 0,
                    error: e.to_string(),
                });
                return;
            }
        };

        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                tracing::warn!("no async runtime available, skipping remote sync");
                return;
            }
        };

        self.record_sync(SyncStatus::Pending { since: Utc::now() });
        let syncer = self.syncer.clone();
        self.pending
            .push(runtime.spawn(async move { syncer.run(job).await }));
    }

    fn record_sync(&mut self, status: SyncStatus) {
        if let Err(e) = self.store.save_sync_status(&status) {
            tracing::warn!("could not record sync status: {e}");
        }
        self.sync_status = status;
    }
}
