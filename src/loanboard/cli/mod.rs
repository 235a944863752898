//! # CLI Behavior
//!
//! The terminal client for the catalog. Running `loanboard` with no command
//! lists the products.
//!
//! Every mutating command (`add`, `edit`, `delete`, `move`) persists right away
//! and then pushes the catalog to the configured gist in the background. The
//! process waits for that push before exiting; a failed push is logged and
//! recorded for `status`, but the command itself still succeeds. `push` runs
//! the same sync in the foreground and does report failures.
//!
//! Deleting asks for confirmation unless `--yes` is given. Anything other than
//! `y`/`yes`, including end of input, cancels.
//!
//! ## Module Structure
//!
//! - `commands`: Per-command handlers that call the API and print results
//! - `render`: Template rendering and layout math
//! - `setup`: Argument parsing via clap
//! - `styles`: Named terminal styles
//! - `templates`: Output templates
//! - `preset_shell`: The interactive preset manager

mod commands;
mod preset_shell;
mod render;
pub mod setup;
mod styles;
mod templates;

pub use commands::run;
