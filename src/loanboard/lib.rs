//! # Loanboard Architecture
//!
//! Loanboard is a **UI-agnostic catalog library** for loan product listings. The
//! terminal client is one consumer of it; nothing below the API layer knows a
//! terminal exists.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders templates, prompts             │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the catalog state, resolves indexes to ids          │
//! │  - Persists after successful mutations, dispatches sync     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Pure business logic over in-memory stores                │
//! │  - Returns CmdResult, never does I/O                        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)          Remote Layer (sync/)       │
//! │  - JSON documents by key         - Gist mirroring, retries  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The storefront ([`storefront`]) sits beside all of this: it reads the
//! published remote document and renders HTML, and never touches local state.
//!
//! ## Ids and Indexes
//!
//! Every product has a stable UUID. Users address products by their 1-based
//! position in the list; the API turns that position into the id before a
//! command runs. See [`index`].
//!
//! ## Testing Strategy
//!
//! 1. **Commands**: thorough unit tests of the business rules.
//! 2. **API**: persistence and sync dispatch, against `InMemoryStore` and a fake remote host.
//! 3. **CLI**: end-to-end runs of the binary in `tests/`.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Business logic per operation
//! - [`model`]: Products, presets, and the remote document
//! - [`selection`]: Per-category picks and the product draft
//! - [`index`]: Display indexes
//! - [`store`]: Storage abstraction and implementations
//! - [`sync`]: Remote mirroring to a gist
//! - [`storefront`]: Read-only HTML renderer of the published catalog
//! - [`config`]: Remote settings
//! - [`init`]: Data directory resolution and wiring
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
#[cfg(test)]
pub(crate) mod http_fake;
pub mod index;
pub mod init;
pub mod model;
pub mod selection;
pub mod store;
pub mod storefront;
pub mod sync;
