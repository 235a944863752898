//! # Remote Sync
//!
//! The local store is the source of truth. After every catalog mutation the
//! API hands the full product list to a [`Syncer`], which mirrors it into one
//! file of a gist in the background.
//!
//! A push is skipped entirely while the remote address or token is unset.
//! Otherwise it is retried with exponential backoff, and its progress is
//! tracked as a [`SyncStatus`]:
//!
//! ```text
//! idle ──dispatch──▶ pending ──ok──▶ synced
//!                        └──retries exhausted──▶ failed
//! ```
//!
//! Failures are logged and recorded in the status, never returned to the
//! command that triggered the push. Concurrent pushes are not coordinated:
//! whichever completes last decides the remote content.

use crate::config::Settings;
use crate::error::{CatalogError, Result};
use crate::model::{ProductStore, RemoteDocument};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

pub mod gist;

pub use gist::{GistHost, GistTarget, RemoteHost};

const MAX_ATTEMPTS: u32 = 3;
const INITIAL_RETRY_DELAY: Duration = Duration::from_secs(1);
const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum SyncStatus {
    #[default]
    Idle,
    Pending {
        since: DateTime<Utc>,
    },
    Synced {
        at: DateTime<Utc>,
        products: usize,
    },
    Failed {
        at: DateTime<Utc>,
        attempts: u32,
        error: String,
    },
}

impl SyncStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SyncStatus::Idle => "idle",
            SyncStatus::Pending { .. } => "pending",
            SyncStatus::Synced { .. } => "synced",
            SyncStatus::Failed { .. } => "failed",
        }
    }

    /// When the status last changed. `None` while idle.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            SyncStatus::Idle => None,
            SyncStatus::Pending { since } => Some(*since),
            SyncStatus::Synced { at, .. } | SyncStatus::Failed { at, .. } => Some(*at),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            initial_delay: INITIAL_RETRY_DELAY,
            max_delay: MAX_RETRY_DELAY,
        }
    }
}

impl RetryPolicy {
    /// No waiting between attempts. Used by tests.
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            initial_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }
}

/// Everything one push needs, detached from the catalog so it can move into a task.
#[derive(Debug, Clone)]
pub struct SyncJob {
    pub target: GistTarget,
    pub token: String,
    pub file_name: String,
    pub document: RemoteDocument,
}

impl SyncJob {
    /// `Ok(None)` when the remote is not configured.
    pub fn prepare(settings: &Settings, products: &ProductStore) -> Result<Option<Self>> {
        if !settings.remote_configured() {
            return Ok(None);
        }
        let target = GistTarget::parse(&settings.api_url)?;
        Ok(Some(Self {
            target,
            token: settings.github_token.trim().to_string(),
            file_name: settings.file_name.clone(),
            document: RemoteDocument::new(products),
        }))
    }
}

#[derive(Clone)]
pub struct Syncer {
    host: Arc<dyn RemoteHost>,
    policy: RetryPolicy,
}

impl Syncer {
    pub fn new(host: Arc<dyn RemoteHost>) -> Self {
        Self {
            host,
            policy: RetryPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Pushes with exponential backoff and returns the final status.
    /// Never fails: errors end up in [`SyncStatus::Failed`].
    pub async fn run(&self, job: SyncJob) -> SyncStatus {
        let products = job.document.products.len();
        match self.push_with_retry(&job).await {
            Ok(attempts) => {
                tracing::info!(
                    gist = %job.target.id,
                    file = %job.file_name,
                    products,
                    attempts,
                    "remote sync complete"
                );
                SyncStatus::Synced {
                    at: Utc::now(),
                    products,
                }
            }
            Err((attempts, e)) => {
                tracing::warn!(
                    gist = %job.target.id,
                    attempts,
                    "remote sync failed: {e}"
                );
                SyncStatus::Failed {
                    at: Utc::now(),
                    attempts,
                    error: e.to_string(),
                }
            }
        }
    }

    async fn push_with_retry(
        &self,
        job: &SyncJob,
    ) -> std::result::Result<u32, (u32, CatalogError)> {
        let content = serde_json::to_string_pretty(&job.document)
            .map_err(|e| (0u32, CatalogError::from(e)))?;
        let max_attempts = self.policy.max_attempts.max(1);
        let mut delay = self.policy.initial_delay;
        let mut attempt = 0;

        loop {
            attempt += 1;
            match self
                .host
                .replace_file(&job.target, &job.token, &job.file_name, content.clone())
                .await
            {
                Ok(()) => return Ok(attempt),
                Err(e) if attempt < max_attempts => {
                    tracing::warn!(
                        attempt,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        "remote sync attempt failed, retrying: {e}"
                    );
                    tokio::time::sleep(delay).await;
                    delay = (delay * 2).min(self.policy.max_delay);
                }
                Err(e) => return Err((attempt, e)),
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::FakeHost;
    use super::*;
    use crate::model::Product;

    fn configured() -> Settings {
        Settings {
            api_url: "https://api.github.com/gists/abc123".into(),
            github_token: "tok".into(),
            ..Default::default()
        }
    }

    fn store() -> ProductStore {
        ProductStore::new(vec![Product {
            name: "Cayvang".into(),
            ..Default::default()
        }])
    }

    #[test]
    fn unconfigured_remote_prepares_nothing() {
        let settings = Settings {
            api_url: "https://api.github.com/gists/abc123".into(),
            ..Default::default()
        };
        assert!(SyncJob::prepare(&settings, &store()).unwrap().is_none());
        assert!(SyncJob::prepare(&Settings::default(), &store())
            .unwrap()
            .is_none());
    }

    #[test]
    fn invalid_url_fails_to_prepare() {
        let mut settings = configured();
        settings.api_url = "https://example.com/whatever".into();
        assert!(SyncJob::prepare(&settings, &store()).is_err());
    }

    #[tokio::test]
    async fn pushes_full_document() {
        let host = Arc::new(FakeHost::default());
        let syncer = Syncer::new(host.clone()).with_policy(RetryPolicy::immediate(3));
        let job = SyncJob::prepare(&configured(), &store()).unwrap().unwrap();

        let status = syncer.run(job).await;
        assert!(matches!(status, SyncStatus::Synced { products: 1, .. }));

        let pushes = host.pushes.lock().unwrap();
        let (id, token, file, content) = &pushes[0];
        assert_eq!(id, "abc123");
        assert_eq!(token, "tok");
        assert_eq!(file, "zalocash");
        let doc: serde_json::Value = serde_json::from_str(content).unwrap();
        assert_eq!(doc["version"], "1.0");
        assert_eq!(doc["products"][0]["name"], "Cayvang");
        assert!(doc["last_updated"].is_string());
    }

    #[tokio::test]
    async fn retries_until_success() {
        let host = Arc::new(FakeHost::failing(2));
        let syncer = Syncer::new(host.clone()).with_policy(RetryPolicy::immediate(3));
        let job = SyncJob::prepare(&configured(), &store()).unwrap().unwrap();

        let status = syncer.run(job).await;
        assert_eq!(status.label(), "synced");
        assert_eq!(host.push_count(), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let host = Arc::new(FakeHost::failing(10));
        let syncer = Syncer::new(host.clone()).with_policy(RetryPolicy::immediate(2));
        let job = SyncJob::prepare(&configured(), &store()).unwrap().unwrap();

        match syncer.run(job).await {
            SyncStatus::Failed {
                attempts, error, ..
            } => {
                assert_eq!(attempts, 2);
                assert!(error.contains("503"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
        assert_eq!(host.push_count(), 2);
    }

    #[tokio::test]
    async fn server_errors_are_retried_then_recorded() {
        let server = crate::http_fake::FakeServer::start(500, "down").await;
        let host = Arc::new(GistHost::with_api_base(&server.base).unwrap());
        let syncer = Syncer::new(host).with_policy(RetryPolicy::immediate(3));
        let job = SyncJob::prepare(&configured(), &store()).unwrap().unwrap();

        match syncer.run(job).await {
            SyncStatus::Failed {
                attempts, error, ..
            } => {
                assert_eq!(attempts, 3);
                assert!(error.contains("500"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
        assert_eq!(server.requests().len(), 3);
    }

    #[test]
    fn status_serializes_with_state_tag() {
        let json = serde_json::to_value(SyncStatus::Idle).unwrap();
        assert_eq!(json["state"], "idle");
        let parsed: SyncStatus = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, SyncStatus::Idle);
    }
}
