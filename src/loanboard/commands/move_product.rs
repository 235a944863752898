use crate::commands::{CmdMessage, CmdResult};
use crate::error::{CatalogError, Result};
use crate::index::DisplayIndex;
use crate::model::{MoveDirection, ProductStore};
use uuid::Uuid;

/// Swaps a product with its neighbour. At either end of the list this is a
/// no-op and the result is not marked as mutated.
pub fn run(products: &mut ProductStore, id: &Uuid, direction: MoveDirection) -> Result<CmdResult> {
    let name = products
        .get(id)
        .map(|p| p.name.clone())
        .ok_or(CatalogError::ProductNotFound(*id))?;

    if !products.move_by(id, direction)? {
        let edge = match direction {
            MoveDirection::Up => "top",
            MoveDirection::Down => "bottom",
        };
        return Ok(CmdResult::default()
            .with_message(CmdMessage::info(format!("{} is already at the {}", name, edge))));
    }

    let pos = products
        .position(id)
        .ok_or(CatalogError::ProductNotFound(*id))?;
    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Moved {} to {}",
            name,
            DisplayIndex::from_position(pos)
        )))
        .mark_mutated())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Product;

    fn store() -> ProductStore {
        ProductStore::new(
            ["a", "b", "c"]
                .iter()
                .map(|n| Product {
                    id: Uuid::new_v4(),
                    name: n.to_string(),
                    ..Default::default()
                })
                .collect(),
        )
    }

    fn names(products: &ProductStore) -> Vec<String> {
        products.iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn swaps_with_neighbour() {
        let mut products = store();
        let id = products.at(1).unwrap().id;

        run(&mut products, &id, MoveDirection::Up).unwrap();
        assert_eq!(names(&products), ["b", "a", "c"]);

        let result = run(&mut products, &id, MoveDirection::Down).unwrap();
        assert_eq!(names(&products), ["a", "b", "c"]);
        assert!(result.mutated);
    }

    #[test]
    fn boundaries_are_noops() {
        let mut products = store();
        let first = products.at(0).unwrap().id;
        let last = products.at(2).unwrap().id;

        let up = run(&mut products, &first, MoveDirection::Up).unwrap();
        let down = run(&mut products, &last, MoveDirection::Down).unwrap();

        assert!(!up.mutated);
        assert!(!down.mutated);
        assert_eq!(names(&products), ["a", "b", "c"]);
    }
}
