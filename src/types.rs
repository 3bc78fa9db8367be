use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(u32, u32)", into = "(u32, u32)")]
pub struct Rect {
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    pub fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }

    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }
}

impl From<(u32, u32)> for Rect {
    fn from((w, h): (u32, u32)) -> Self {
        Self { w, h }
    }
}

impl From<Rect> for (u32, u32) {
    fn from(r: Rect) -> Self {
        (r.w, r.h)
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.w, self.h)
    }
}

/// Top-left corner of a placement. `x` runs along the first axis of a stock array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "(u32, u32)", into = "(u32, u32)")]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

impl Position {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl From<(u32, u32)> for Position {
    fn from((x, y): (u32, u32)) -> Self {
        Self { x, y }
    }
}

impl From<Position> for (u32, u32) {
    fn from(p: Position) -> Self {
        (p.x, p.y)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub size: Rect,
    pub quantity: u32,
}

impl Product {
    pub fn new(size: Rect, quantity: u32) -> Self {
        Self { size, quantity }
    }
}

/// One product instance assigned to a position on a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    pub stock_idx: usize,
    /// Index into the observation's product list; written into occupied cells.
    pub product_idx: usize,
    pub size: Rect,
    pub position: Position,
}

impl Placement {
    pub fn x_end(&self) -> u32 {
        self.position.x + self.size.w
    }

    pub fn y_end(&self) -> u32 {
        self.position.y + self.size.h
    }
}

/// The decision handed back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub stock_idx: i32,
    pub size: Rect,
    pub position: Position,
}

impl Action {
    /// No feasible placement was found.
    pub const NOOP: Action = Action {
        stock_idx: -1,
        size: Rect { w: 0, h: 0 },
        position: Position { x: 0, y: 0 },
    };

    pub fn is_noop(&self) -> bool {
        self.stock_idx < 0
    }
}

impl From<Option<Placement>> for Action {
    fn from(placement: Option<Placement>) -> Self {
        match placement {
            Some(p) => Action {
                stock_idx: p.stock_idx as i32,
                size: p.size,
                position: p.position,
            },
            None => Action::NOOP,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_noop() {
            write!(f, "no-op")
        } else {
            write!(f, "stock {}: {} @ {}", self.stock_idx, self.size, self.position)
        }
    }
}

/// Decision input as it arrives over the wire.
///
/// Stocks are indexed `stocks[i][x][y]` with labels `-2` (unusable),
/// `-1` (empty) and `n >= 0` (occupied by product `n`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub products: Vec<Product>,
    pub stocks: Vec<Vec<Vec<i32>>>,
}
