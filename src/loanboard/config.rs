use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_FILE_NAME: &str = "zalocash";

/// User-editable keys, in display order.
pub const SETTING_KEYS: [&str; 4] = ["api-url", "token", "file-name", "storefront-url"];

/// Remote mirroring settings, persisted under the `settings` key.
///
/// Field names keep the camelCase keys of earlier documents so existing
/// settings files load unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Gist address: API URL, raw content URL, or bare id
    #[serde(default)]
    pub api_url: String,

    #[serde(default)]
    pub github_token: String,

    /// File inside the gist that receives the catalog
    #[serde(default = "default_file_name")]
    pub file_name: String,

    /// Where the storefront reads the published document from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storefront_url: Option<String>,
}

fn default_file_name() -> String {
    DEFAULT_FILE_NAME.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            github_token: String::new(),
            file_name: default_file_name(),
            storefront_url: None,
        }
    }
}

impl Settings {
    /// Sync only runs when both the address and the token are present.
    pub fn remote_configured(&self) -> bool {
        !self.api_url.trim().is_empty() && !self.github_token.trim().is_empty()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "api-url" => Some(self.api_url.clone()),
            "token" => Some(mask_token(&self.github_token)),
            "file-name" => Some(self.file_name.clone()),
            "storefront-url" => Some(self.storefront_url.clone().unwrap_or_default()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "api-url" => self.api_url = value.to_string(),
            "token" => self.github_token = value.to_string(),
            "file-name" => {
                if value.is_empty() {
                    return Err(CatalogError::Validation(
                        "file-name cannot be empty".to_string(),
                    ));
                }
                self.file_name = value.to_string();
            }
            "storefront-url" => {
                self.storefront_url = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }
            other => {
                return Err(CatalogError::Api(format!(
                    "Unknown setting: {} (expected one of {})",
                    other,
                    SETTING_KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }

    pub fn list_all(&self) -> Vec<(String, String)> {
        SETTING_KEYS
            .iter()
            .map(|k| (k.to_string(), self.get(k).unwrap_or_default()))
            .collect()
    }
}

/// Keeps the last four characters so users can tell tokens apart.
pub fn mask_token(token: &str) -> String {
    let count = token.chars().count();
    if count == 0 {
        return String::new();
    }
    if count <= 4 {
        return "*".repeat(count);
    }
    let tail: String = token.chars().skip(count - 4).collect();
    format!("{}{}", "*".repeat(count - 4), tail)
}
