use crate::commands::{CmdMessage, CmdResult};
use crate::error::{CatalogError, Result};
use crate::model::{Product, ProductStore};
use uuid::Uuid;

/// Removes one product after `confirm` approves it.
///
/// A declined confirmation is not an error: the result just carries an
/// informational message and is not marked as mutated.
pub fn run<F>(products: &mut ProductStore, id: &Uuid, confirm: F) -> Result<CmdResult>
where
    F: FnOnce(&Product) -> bool,
{
    let target = products
        .get(id)
        .cloned()
        .ok_or(CatalogError::ProductNotFound(*id))?;

    if !confirm(&target) {
        return Ok(CmdResult::default().with_message(CmdMessage::info("Delete cancelled.")));
    }

    let removed = products.remove(id)?;
    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Product deleted: {}",
            removed.name
        )))
        .mark_mutated())
}
