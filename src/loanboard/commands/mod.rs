//! # Command Layer
//!
//! Business logic for every catalog operation. Commands work on the in-memory
//! stores they are handed ([`ProductStore`](crate::model::ProductStore),
//! [`PresetSet`], [`Settings`]) and return a [`CmdResult`]. They never read or
//! write storage, never print, and never talk to the network: persisting and
//! syncing after a successful command is the API layer's job, driven by
//! [`CmdResult::mutated`].

use crate::config::Settings;
use crate::index::DisplayProduct;
use crate::model::PresetSet;

pub mod delete;
pub mod edit;
pub mod helpers;
pub mod list;
pub mod move_product;
pub mod presets;
pub mod save;
pub mod settings;
pub mod status;

pub use status::StatusReport;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub listed_products: Vec<DisplayProduct>,
    pub presets: Option<PresetSet>,
    pub settings: Option<Settings>,
    pub status: Option<StatusReport>,
    pub messages: Vec<CmdMessage>,
    /// Whether the command changed the store it was given.
    pub mutated: bool,
}

impl CmdResult {
    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_listed_products(mut self, products: Vec<DisplayProduct>) -> Self {
        self.listed_products = products;
        self
    }

    pub fn with_presets(mut self, presets: PresetSet) -> Self {
        self.presets = Some(presets);
        self
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn with_status(mut self, status: StatusReport) -> Self {
        self.status = Some(status);
        self
    }

    pub fn mark_mutated(mut self) -> Self {
        self.mutated = true;
        self
    }
}
