/// Errors raised at the edges of the planner.
///
/// Searching never fails: a missing placement is reported as [`crate::types::Action::NOOP`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    #[error("invalid strategy '{0}', expected: bfd, bb, 1 or 2")]
    InvalidStrategy(String),

    #[error("stock {stock} is not rectangular")]
    RaggedStock { stock: usize },

    #[error("stock {stock} has invalid cell label {label} at ({x}, {y})")]
    InvalidCell {
        stock: usize,
        x: usize,
        y: usize,
        label: i32,
    },

    #[error("product {index} has a zero dimension")]
    ZeroSizedProduct { index: usize },
}

pub type Result<T> = std::result::Result<T, PlanError>;
