use crate::grid::Sheet;
use crate::types::{Placement, Position, Product, Rect};

/// Remaining demand for one product still tracked by the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Demand {
    pub product_idx: usize,
    pub size: Rect,
    pub remaining: u32,
}

/// A search node. Each state owns its sheets and demand outright; children are
/// produced by copying and then mutating, so siblings never see each other.
#[derive(Debug, Clone)]
pub struct SearchState {
    pub sheets: Vec<Sheet>,
    pub demand: Vec<Demand>,
    pub trail: Vec<Placement>,
}

impl SearchState {
    /// Root node. Only products with remaining quantity are tracked.
    pub fn root(products: &[Product], sheets: &[Sheet]) -> Self {
        let demand = products
            .iter()
            .enumerate()
            .filter(|(_, p)| p.quantity > 0)
            .map(|(product_idx, p)| Demand {
                product_idx,
                size: p.size,
                remaining: p.quantity,
            })
            .collect();
        Self {
            sheets: sheets.to_vec(),
            demand,
            trail: Vec::new(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.demand.iter().all(|d| d.remaining == 0)
    }

    pub fn remaining_quantity(&self) -> u64 {
        self.demand.iter().map(|d| d.remaining as u64).sum()
    }

    pub fn empty_cells(&self) -> u64 {
        self.sheets.iter().map(Sheet::empty_cells).sum()
    }

    /// Empty cells left across all sheets.
    pub fn trim_loss(&self) -> u64 {
        self.empty_cells()
    }

    /// Packing pressure: remaining demand per empty cell. Lower is explored first.
    pub fn bound(&self) -> f64 {
        self.remaining_quantity() as f64 / self.empty_cells().max(1) as f64
    }

    /// Every placement reachable in one step, in generation order
    /// (demand, then sheet, then x, then y).
    pub fn moves(&self) -> Vec<(usize, Placement)> {
        let mut moves = Vec::new();
        for (slot, d) in self.demand.iter().enumerate() {
            if d.remaining == 0 {
                continue;
            }
            for (stock_idx, sheet) in self.sheets.iter().enumerate() {
                moves.extend(sheet.candidates(d.size).map(|position| {
                    (
                        slot,
                        Placement {
                            stock_idx,
                            product_idx: d.product_idx,
                            size: d.size,
                            position,
                        },
                    )
                }));
            }
        }
        moves
    }

    /// Child state with one instance of `demand[slot]` placed.
    pub fn branch(&self, slot: usize, placement: Placement) -> Self {
        let mut child = self.clone();
        child.sheets[placement.stock_idx].place(&placement);
        child.demand[slot].remaining -= 1;
        child.trail.push(placement);
        child
    }

    pub fn branch_at(&self, slot: usize, stock_idx: usize, position: Position) -> Self {
        let d = self.demand[slot];
        self.branch(
            slot,
            Placement {
                stock_idx,
                product_idx: d.product_idx,
                size: d.size,
                position,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;

    fn root_2x2() -> SearchState {
        SearchState::root(
            &[
                Product::new(Rect::new(1, 1), 0),
                Product::new(Rect::new(1, 2), 1),
                Product::new(Rect::new(1, 1), 2),
            ],
            &[Sheet::new(2, 2)],
        )
    }

    #[test]
    fn test_root_filters_exhausted() {
        let root = root_2x2();
        assert_eq!(root.demand.len(), 2);
        assert_eq!(root.demand[0].product_idx, 1);
        assert_eq!(root.demand[1].product_idx, 2);
        assert_eq!(root.remaining_quantity(), 3);
        assert!(!root.is_terminal());
        assert!(root.trail.is_empty());
    }

    #[test]
    fn test_bound() {
        let root = root_2x2();
        assert!((root.bound() - 0.75).abs() < 1e-12);

        let full = SearchState::root(&[Product::new(Rect::new(1, 1), 3)], &[]);
        assert!((full.bound() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_branch_leaves_parent_untouched() {
        let root = root_2x2();
        let child = root.branch_at(0, 0, Position::new(1, 0));

        assert_eq!(root.sheets[0].empty_cells(), 4);
        assert_eq!(root.demand[0].remaining, 1);
        assert!(root.trail.is_empty());

        assert_eq!(child.sheets[0].get(1, 0), Some(Cell::Occupied(1)));
        assert_eq!(child.sheets[0].get(1, 1), Some(Cell::Occupied(1)));
        assert_eq!(child.demand[0].remaining, 0);
        assert_eq!(child.trail.len(), 1);
        assert_eq!(child.trim_loss(), 2);
    }

    #[test]
    fn test_siblings_independent() {
        let root = root_2x2();
        let a = root.branch_at(1, 0, Position::new(0, 0));
        let b = root.branch_at(1, 0, Position::new(1, 1));
        assert_eq!(a.sheets[0].get(1, 1), Some(Cell::Empty));
        assert_eq!(b.sheets[0].get(0, 0), Some(Cell::Empty));
    }

    #[test]
    fn test_moves_order() {
        let root = root_2x2();
        let moves = root.moves();
        // 1x2 has two columns, 1x1 has four cells
        assert_eq!(moves.len(), 6);
        assert_eq!(moves[0].0, 0);
        assert_eq!(moves[0].1.position, Position::new(0, 0));
        assert_eq!(moves[1].1.position, Position::new(1, 0));
        assert_eq!(moves[2].0, 1);
        assert_eq!(moves[3].1.position, Position::new(0, 1));
    }

    #[test]
    fn test_terminal_after_all_placed() {
        let state = SearchState::root(&[Product::new(Rect::new(2, 2), 1)], &[Sheet::new(2, 2)])
            .branch_at(0, 0, Position::new(0, 0));
        assert!(state.is_terminal());
        assert_eq!(state.trim_loss(), 0);
        assert!(state.moves().is_empty());
    }
}
