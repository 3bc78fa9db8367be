use crate::grid::Sheet;
use crate::types::{Placement, Product};

/// Best-Fit-Decreasing: the largest remaining product at its least wasteful position.
///
/// Products are tried in descending area order (stable on ties). The first one
/// with any feasible position wins; positions are compared by waste and ties
/// keep the first in scan order (sheet, then x, then y).
pub fn plan(products: &[Product], sheets: &[Sheet]) -> Option<Placement> {
    let mut order: Vec<usize> = (0..products.len())
        .filter(|&i| products[i].quantity > 0)
        .collect();
    order.sort_by(|&a, &b| products[b].size.area().cmp(&products[a].size.area()));

    order
        .into_iter()
        .find_map(|product_idx| best_fit(product_idx, &products[product_idx], sheets))
}

fn best_fit(product_idx: usize, product: &Product, sheets: &[Sheet]) -> Option<Placement> {
    let mut best: Option<(i64, Placement)> = None;

    for (stock_idx, sheet) in sheets.iter().enumerate() {
        for position in sheet.candidates(product.size) {
            let waste = sheet.waste(position, product.size);
            if best.is_none_or(|(best_waste, _)| waste < best_waste) {
                best = Some((
                    waste,
                    Placement {
                        stock_idx,
                        product_idx,
                        size: product.size,
                        position,
                    },
                ));
            }
        }
    }

    if let Some((waste, p)) = &best {
        tracing::debug!(
            product = product_idx,
            stock = p.stock_idx,
            size = %p.size,
            position = %p.position,
            waste,
            "bfd placement"
        );
    }
    best.map(|(_, p)| p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Position, Rect};

    #[test]
    fn test_largest_product_first() {
        let products = vec![
            Product::new(Rect::new(1, 1), 4),
            Product::new(Rect::new(2, 2), 1),
        ];
        let p = plan(&products, &[Sheet::new(4, 4)]).unwrap();
        assert_eq!(p.product_idx, 1);
        assert_eq!(p.size, Rect::new(2, 2));
        assert_eq!(p.position, Position::new(0, 0));
    }

    #[test]
    fn test_equal_area_keeps_input_order() {
        let products = vec![
            Product::new(Rect::new(2, 1), 1),
            Product::new(Rect::new(1, 2), 1),
        ];
        let p = plan(&products, &[Sheet::new(3, 3)]).unwrap();
        assert_eq!(p.product_idx, 0);
    }

    #[test]
    fn test_skips_exhausted_products() {
        let products = vec![
            Product::new(Rect::new(3, 3), 0),
            Product::new(Rect::new(1, 1), 1),
        ];
        let p = plan(&products, &[Sheet::new(3, 3)]).unwrap();
        assert_eq!(p.product_idx, 1);
    }

    #[test]
    fn test_falls_through_to_smaller_product() {
        // 5x5 fits nowhere, the 1x1 does
        let products = vec![
            Product::new(Rect::new(5, 5), 1),
            Product::new(Rect::new(1, 1), 1),
        ];
        let p = plan(&products, &[Sheet::new(2, 2)]).unwrap();
        assert_eq!(p.product_idx, 1);
    }

    #[test]
    fn test_first_sheet_with_room() {
        let mut full = Sheet::new(2, 2);
        full.place(&Placement {
            stock_idx: 0,
            product_idx: 0,
            size: Rect::new(2, 2),
            position: Position::new(0, 0),
        });
        let products = vec![Product::new(Rect::new(1, 2), 1)];
        let p = plan(&products, &[full, Sheet::new(3, 3), Sheet::new(2, 2)]).unwrap();
        assert_eq!(p.stock_idx, 1);
        assert_eq!(p.position, Position::new(0, 0));
    }

    #[test]
    fn test_scan_goes_down_column_first() {
        let mut sheet = Sheet::new(3, 3);
        sheet.place(&Placement {
            stock_idx: 0,
            product_idx: 9,
            size: Rect::new(1, 1),
            position: Position::new(0, 0),
        });
        let products = vec![Product::new(Rect::new(1, 1), 1)];
        let p = plan(&products, &[sheet]).unwrap();
        assert_eq!(p.position, Position::new(0, 1));
    }

    #[test]
    fn test_nothing_fits() {
        let products = vec![Product::new(Rect::new(4, 1), 2)];
        assert_eq!(plan(&products, &[Sheet::new(3, 3)]), None);
        assert_eq!(plan(&products, &[]), None);
        assert_eq!(plan(&[], &[Sheet::new(3, 3)]), None);
    }
}
