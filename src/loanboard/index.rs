//! # Display Indexes
//!
//! Products carry a stable UUID, but users pick them by their position in the
//! list (`1`, `2`, ...). A [`DisplayIndex`] is that 1-based position. It is
//! only ever used to *find* a product: the API resolves it to the UUID first
//! and every command then works on the UUID, so a reorder between listing and
//! acting cannot retarget a different record.

use crate::model::{Product, ProductStore};
use std::str::FromStr;

/// A user-facing, 1-based list position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayIndex(pub usize);

impl DisplayIndex {
    pub fn from_position(position: usize) -> Self {
        DisplayIndex(position + 1)
    }

    /// Zero-based position, `None` for `0`.
    pub fn position(&self) -> Option<usize> {
        self.0.checked_sub(1)
    }
}

impl std::fmt::Display for DisplayIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DisplayIndex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches('.');
        match trimmed.parse::<usize>() {
            Ok(0) => Err("Indexes start at 1".to_string()),
            Ok(n) => Ok(DisplayIndex(n)),
            Err(_) => Err(format!("Invalid index format: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DisplayProduct {
    pub product: Product,
    pub index: DisplayIndex,
}

pub fn index_products(store: &ProductStore) -> Vec<DisplayProduct> {
    store
        .iter()
        .enumerate()
        .map(|(pos, product)| DisplayProduct {
            product: product.clone(),
            index: DisplayIndex::from_position(pos),
        })
        .collect()
}
