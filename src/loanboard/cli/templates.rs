//! # CLI Templates
//!
//! Terminal output is rendered from minijinja templates kept as standalone
//! files, so they are easy to edit and diff. They are included here as string
//! constants.
//!
//! Conventions:
//!
//! 1. Line breaks are explicit. Block tags use `-` whitespace control so the
//!    only newlines in the output are the ones written in the template text.
//! 2. Templates pick styles by name through the `style` filter. When the style
//!    depends on data, Rust computes the style name and the template uses the
//!    variable, instead of branching on flags.
//! 3. Layout math (widths, truncation, padding) happens in Rust.

pub const LIST_TEMPLATE: &str = include_str!("templates/list.tmp");
pub const PRODUCT_TEMPLATE: &str = include_str!("templates/product.tmp");
pub const PRESETS_TEMPLATE: &str = include_str!("templates/presets.tmp");
pub const SETTINGS_TEMPLATE: &str = include_str!("templates/settings.tmp");
pub const STATUS_TEMPLATE: &str = include_str!("templates/status.tmp");
pub const MESSAGES_TEMPLATE: &str = include_str!("templates/messages.tmp");

pub const ALL: [(&str, &str); 6] = [
    ("list", LIST_TEMPLATE),
    ("product", PRODUCT_TEMPLATE),
    ("presets", PRESETS_TEMPLATE),
    ("settings", SETTINGS_TEMPLATE),
    ("status", STATUS_TEMPLATE),
    ("messages", MESSAGES_TEMPLATE),
];
