use crate::frontier::Frontier;
use crate::grid::Sheet;
use crate::search::SearchState;
use crate::types::{Placement, Product};

/// Outcome of one branch-and-bound run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchReport {
    /// Action trail of the lowest trim-loss complete packing found.
    pub best: Option<Vec<Placement>>,
    pub trim_loss: Option<u64>,
    pub nodes_expanded: u64,
    pub nodes_generated: u64,
    /// The node budget ran out before the frontier was exhausted.
    pub budget_exhausted: bool,
}

impl SearchReport {
    pub fn first_action(&self) -> Option<Placement> {
        self.best.as_ref().and_then(|trail| trail.first().copied())
    }
}

/// Best-first branch and bound over complete packings.
///
/// Without a node budget the whole placement tree is explored; nothing is cut
/// off by the bound, which only decides exploration order.
#[derive(Debug, Clone, Copy, Default)]
pub struct BranchAndBound {
    node_budget: Option<u64>,
}

impl BranchAndBound {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop after popping `budget` nodes and keep the best packing seen so far.
    pub fn with_node_budget(budget: Option<u64>) -> Self {
        Self {
            node_budget: budget,
        }
    }

    pub fn solve(&self, products: &[Product], sheets: &[Sheet]) -> Option<Placement> {
        self.search(products, sheets).first_action()
    }

    pub fn search(&self, products: &[Product], sheets: &[Sheet]) -> SearchReport {
        let mut report = SearchReport::default();
        let mut frontier = Frontier::new();
        frontier.push(0.0, SearchState::root(products, sheets));

        while let Some((_, state)) = frontier.pop() {
            if self
                .node_budget
                .is_some_and(|budget| report.nodes_expanded >= budget)
            {
                report.budget_exhausted = true;
                tracing::warn!(
                    budget = report.nodes_expanded,
                    pending = frontier.len() + 1,
                    "node budget exhausted, returning best packing so far"
                );
                break;
            }
            report.nodes_expanded += 1;

            if state.is_terminal() {
                let trim_loss = state.trim_loss();
                if report.trim_loss.is_none_or(|best| trim_loss < best) {
                    tracing::debug!(
                        trim_loss,
                        depth = state.trail.len(),
                        expanded = report.nodes_expanded,
                        "improved packing"
                    );
                    report.trim_loss = Some(trim_loss);
                    report.best = Some(state.trail);
                }
                continue;
            }

            for (slot, placement) in state.moves() {
                let child = state.branch(slot, placement);
                let bound = child.bound();
                frontier.push(bound, child);
            }
        }

        // The root is not a generated node
        report.nodes_generated = frontier.pushed() - 1;
        tracing::debug!(
            expanded = report.nodes_expanded,
            generated = report.nodes_generated,
            trim_loss = ?report.trim_loss,
            "branch and bound finished"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Position, Rect};

    /// Replays a trail onto fresh copies of the sheets, checking every step is
    /// feasible, and returns the resulting sheets.
    fn replay(sheets: &[Sheet], trail: &[Placement]) -> Vec<Sheet> {
        let mut sheets = sheets.to_vec();
        for (i, p) in trail.iter().enumerate() {
            assert!(
                sheets[p.stock_idx].can_place(p.position, p.size),
                "step {i}: {} @ {} on stock {} is not feasible",
                p.size,
                p.position,
                p.stock_idx
            );
            sheets[p.stock_idx].place(p);
        }
        sheets
    }

    fn assert_trail_satisfies(products: &[Product], trail: &[Placement]) {
        for (idx, product) in products.iter().enumerate() {
            let placed = trail.iter().filter(|p| p.product_idx == idx).count();
            assert_eq!(placed, product.quantity as usize, "product {idx} count");
        }
    }

    #[test]
    fn test_two_unit_products() {
        let products = vec![
            Product::new(Rect::new(1, 1), 1),
            Product::new(Rect::new(1, 1), 1),
        ];
        let sheets = vec![Sheet::new(2, 2)];
        let report = BranchAndBound::new().search(&products, &sheets);

        let trail = report.best.as_ref().unwrap();
        assert_trail_satisfies(&products, trail);
        replay(&sheets, trail);
        // Two of four cells stay empty in every complete packing
        assert_eq!(report.trim_loss, Some(2));
        assert!(!report.budget_exhausted);
    }

    #[test]
    fn test_finds_zero_trim_loss() {
        let products = vec![
            Product::new(Rect::new(1, 1), 2),
            Product::new(Rect::new(1, 2), 1),
        ];
        let sheets = vec![Sheet::new(2, 2)];
        let report = BranchAndBound::new().search(&products, &sheets);

        assert_eq!(report.trim_loss, Some(0));
        let trail = report.best.as_ref().unwrap();
        assert_trail_satisfies(&products, trail);
        let packed = replay(&sheets, trail);
        assert_eq!(packed[0].empty_cells(), 0);
    }

    #[test]
    fn test_equal_trim_loss_keeps_first_found() {
        // Trim loss counts every sheet: any placement leaves 9 + 4 - 4 empty cells
        let products = vec![Product::new(Rect::new(2, 2), 1)];
        let sheets = vec![Sheet::new(3, 3), Sheet::new(2, 2)];
        let report = BranchAndBound::new().search(&products, &sheets);
        assert_eq!(report.trim_loss, Some(9));
        assert_eq!(report.nodes_generated, 5);
        let first = report.first_action().unwrap();
        assert_eq!(first.stock_idx, 0);
        assert_eq!(first.position, Position::new(0, 0));
    }

    #[test]
    fn test_unplaceable_product_exhausts() {
        let products = vec![
            Product::new(Rect::new(1, 1), 1),
            Product::new(Rect::new(3, 1), 1),
        ];
        let sheets = vec![Sheet::new(2, 2)];
        let report = BranchAndBound::new().search(&products, &sheets);
        assert_eq!(report.best, None);
        assert_eq!(report.first_action(), None);
        assert!(report.nodes_expanded > 1);
    }

    #[test]
    fn test_no_demand_is_noop() {
        let products = vec![Product::new(Rect::new(1, 1), 0)];
        let report = BranchAndBound::new().search(&products, &[Sheet::new(2, 2)]);
        assert_eq!(report.best, Some(vec![]));
        assert_eq!(report.first_action(), None);
        assert_eq!(report.nodes_generated, 0);
    }

    #[test]
    fn test_existing_occupancy_respected() {
        let mut sheet = Sheet::new(2, 1);
        sheet.place(&Placement {
            stock_idx: 0,
            product_idx: 3,
            size: Rect::new(1, 1),
            position: Position::new(0, 0),
        });
        let products = vec![Product::new(Rect::new(1, 1), 1)];
        let first = BranchAndBound::new().solve(&products, &[sheet]).unwrap();
        assert_eq!(first.position, Position::new(1, 0));
    }

    #[test]
    fn test_node_budget_stops_early() {
        let products = vec![Product::new(Rect::new(1, 1), 3)];
        let sheets = vec![Sheet::new(3, 3)];
        let report = BranchAndBound::with_node_budget(Some(2)).search(&products, &sheets);
        assert!(report.budget_exhausted);
        assert_eq!(report.nodes_expanded, 2);
        assert_eq!(report.best, None);
    }

    #[test]
    fn test_unbounded_matches_large_budget() {
        let products = vec![
            Product::new(Rect::new(2, 1), 1),
            Product::new(Rect::new(1, 1), 2),
        ];
        let sheets = vec![Sheet::with_usable(3, 3, Rect::new(2, 2))];
        let unbounded = BranchAndBound::new().search(&products, &sheets);
        let budgeted = BranchAndBound::with_node_budget(Some(1_000_000)).search(&products, &sheets);
        assert_eq!(unbounded, budgeted);
        assert_eq!(unbounded.trim_loss, Some(0));
    }
}
