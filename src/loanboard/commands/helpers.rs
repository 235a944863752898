use crate::error::{CatalogError, Result};
use crate::index::DisplayIndex;
use crate::model::ProductStore;
use uuid::Uuid;

/// Maps a list position to the id of the product currently there.
pub fn resolve_index(products: &ProductStore, index: DisplayIndex) -> Result<Uuid> {
    index
        .position()
        .and_then(|pos| products.at(pos))
        .map(|p| p.id)
        .ok_or_else(|| {
            CatalogError::NotFound(format!(
                "Product {} (there are {})",
                index,
                products.len()
            ))
        })
}

/// Maps a 1-based preset number to its 0-based position.
pub fn preset_position(number: usize) -> Result<usize> {
    number
        .checked_sub(1)
        .ok_or_else(|| CatalogError::Api("Preset numbers start at 1".to_string()))
}
