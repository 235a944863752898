use crate::error::{CatalogError, Result};
use crate::model::{PresetSet, ProductStore};
use crate::selection::ProductDraft;
use uuid::Uuid;

/// Opens a stored product as a draft, re-resolving its picks against the
/// current presets.
pub fn run(products: &ProductStore, presets: &PresetSet, id: &Uuid) -> Result<ProductDraft> {
    let product = products.get(id).ok_or(CatalogError::ProductNotFound(*id))?;
    Ok(ProductDraft::for_product(product, presets))
}
