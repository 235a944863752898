use crate::commands::CmdResult;
use crate::index::index_products;
use crate::model::ProductStore;

pub fn run(products: &ProductStore) -> CmdResult {
    CmdResult::default().with_listed_products(index_products(products))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::DisplayIndex;
    use crate::model::Product;

    #[test]
    fn lists_in_store_order() {
        let products = ProductStore::new(vec![
            Product {
                name: "a".into(),
                ..Default::default()
            },
            Product {
                name: "b".into(),
                ..Default::default()
            },
        ]);
        let result = run(&products);
        assert_eq!(result.listed_products.len(), 2);
        assert_eq!(result.listed_products[0].index, DisplayIndex(1));
        assert_eq!(result.listed_products[1].product.name, "b");
        assert!(!result.mutated);
    }
}
