//! Gist addressing and the HTTP client that replaces one file of a gist.

use crate::error::{CatalogError, Result};
use async_trait::async_trait;
use reqwest::Url;
use serde::Serialize;
use std::collections::BTreeMap;

pub const GITHUB_API_BASE: &str = "https://api.github.com";
const API_HOST: &str = "api.github.com";
const RAW_HOST: &str = "gist.githubusercontent.com";

/// A gist identified by its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GistTarget {
    pub id: String,
}

impl GistTarget {
    /// Extracts the gist id from a configured address.
    ///
    /// Accepted shapes:
    /// - `https://api.github.com/gists/<id>`
    /// - `https://gist.githubusercontent.com/<user>/<id>/raw[/...]`
    /// - a bare hexadecimal id
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if is_gist_id(input) {
            return Ok(Self {
                id: input.to_string(),
            });
        }

        let invalid = |why: &str| CatalogError::InvalidRemoteUrl(format!("{} ({})", input, why));
        let url = Url::parse(input).map_err(|e| invalid(&e.to_string()))?;
        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();

        let id = match url.host_str() {
            Some(API_HOST) => match segments.as_slice() {
                ["gists", id] => *id,
                _ => return Err(invalid("expected /gists/<id>")),
            },
            Some(RAW_HOST) => match segments.as_slice() {
                [_user, id, "raw", ..] => *id,
                _ => return Err(invalid("expected /<user>/<id>/raw")),
            },
            _ => return Err(invalid("not a gist address")),
        };

        if !is_gist_id(id) {
            return Err(invalid("gist id must be hexadecimal"));
        }
        Ok(Self { id: id.to_string() })
    }
}

fn is_gist_id(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_hexdigit())
}

/// Body of a gist update: file name → new content.
#[derive(Debug, Serialize)]
pub struct GistPatch {
    pub files: BTreeMap<String, GistFile>,
}

#[derive(Debug, Serialize)]
pub struct GistFile {
    pub content: String,
}

impl GistPatch {
    pub fn single(file_name: &str, content: String) -> Self {
        let mut files = BTreeMap::new();
        files.insert(file_name.to_string(), GistFile { content });
        Self { files }
    }
}

/// A document host that accepts full-file replacement.
#[async_trait]
pub trait RemoteHost: Send + Sync {
    async fn replace_file(
        &self,
        target: &GistTarget,
        token: &str,
        file_name: &str,
        content: String,
    ) -> Result<()>;
}

/// GitHub gist API client.
#[derive(Debug, Clone)]
pub struct GistHost {
    client: reqwest::Client,
    api_base: String,
}

impl GistHost {
    pub fn new() -> Result<Self> {
        Self::with_api_base(GITHUB_API_BASE)
    }

    /// Points the client at another API root (GitHub Enterprise, test servers).
    pub fn with_api_base(api_base: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("loanboard/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self, target: &GistTarget) -> String {
        format!("{}/gists/{}", self.api_base, target.id)
    }
}

#[async_trait]
impl RemoteHost for GistHost {
    async fn replace_file(
        &self,
        target: &GistTarget,
        token: &str,
        file_name: &str,
        content: String,
    ) -> Result<()> {
        let endpoint = self.endpoint(target);
        tracing::debug!(%endpoint, file_name, "patching gist");

        let response = self
            .client
            .patch(&endpoint)
            .header(reqwest::header::AUTHORIZATION, format!("token {}", token))
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .json(&GistPatch::single(file_name, content))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Remote(format!(
                "gist update returned {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }
        Ok(())
    }
}
