use crate::commands::CmdResult;
use crate::config::Settings;
use crate::model::ProductStore;
use crate::sync::{GistTarget, SyncStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub generated_at: DateTime<Utc>,
    pub total_products: usize,
    pub remote_configured: bool,
    /// Gist id the catalog mirrors to, when the address parses.
    pub remote_target: Option<String>,
    /// Why the configured address was rejected.
    pub remote_error: Option<String>,
    pub file_name: String,
    pub sync: SyncStatus,
}

pub fn run(products: &ProductStore, settings: &Settings, sync: &SyncStatus) -> CmdResult {
    let remote_configured = settings.remote_configured();
    let (remote_target, remote_error) = if settings.api_url.trim().is_empty() {
        (None, None)
    } else {
        match GistTarget::parse(&settings.api_url) {
            Ok(target) => (Some(target.id), None),
            Err(e) => (None, Some(e.to_string())),
        }
    };

    CmdResult::default().with_status(StatusReport {
        generated_at: Utc::now(),
        total_products: products.len(),
        remote_configured,
        remote_target,
        remote_error,
        file_name: settings.file_name.clone(),
        sync: sync.clone(),
    })
}
