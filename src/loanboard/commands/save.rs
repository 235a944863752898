use crate::commands::{CmdMessage, CmdResult};
use crate::error::{CatalogError, Result};
use crate::index::DisplayIndex;
use crate::model::ProductStore;
use crate::selection::ProductDraft;

/// Commits a draft: appends it, or overwrites the record it was opened from.
///
/// Name, image and link must be non-blank. On failure nothing is written.
pub fn run(products: &mut ProductStore, draft: &ProductDraft) -> Result<CmdResult> {
    let missing = draft.missing_fields();
    if !missing.is_empty() {
        return Err(CatalogError::Validation(format!(
            "Name, image and link are required (missing: {})",
            missing.join(", ")
        )));
    }

    let product = draft.to_product();
    let message = match draft.editing {
        Some(_) => {
            let pos = products.replace(product.clone())?;
            format!(
                "Product updated ({}): {}",
                DisplayIndex::from_position(pos),
                product.name
            )
        }
        None => {
            products.append(product.clone());
            format!(
                "Product saved ({}): {}",
                DisplayIndex(products.len()),
                product.name
            )
        }
    };

    Ok(CmdResult::default()
        .with_message(CmdMessage::success(message))
        .mark_mutated())
}
