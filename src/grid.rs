use crate::error::{PlanError, Result};
use crate::types::{Placement, Position, Rect};

const LABEL_UNUSABLE: i32 = -2;
const LABEL_EMPTY: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    /// Outside the usable shape of the sheet.
    Unusable,
    Occupied(u32),
}

impl Cell {
    pub fn from_label(label: i32) -> Option<Self> {
        match label {
            LABEL_UNUSABLE => Some(Cell::Unusable),
            LABEL_EMPTY => Some(Cell::Empty),
            n if n >= 0 => Some(Cell::Occupied(n as u32)),
            _ => None,
        }
    }

    pub fn label(self) -> i32 {
        match self {
            Cell::Empty => LABEL_EMPTY,
            Cell::Unusable => LABEL_UNUSABLE,
            Cell::Occupied(n) => n as i32,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// A stock sheet as a `width x height` cell array, stored column by column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl Sheet {
    /// A fully usable, empty sheet.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width as usize * height as usize],
        }
    }

    /// A `width x height` array whose usable part is the top-left `usable` corner.
    pub fn with_usable(width: u32, height: u32, usable: Rect) -> Self {
        let mut sheet = Self::new(width, height);
        for x in 0..width {
            for y in 0..height {
                if x >= usable.w || y >= usable.h {
                    sheet.set(x, y, Cell::Unusable);
                }
            }
        }
        sheet
    }

    /// Builds a sheet from wire labels indexed `columns[x][y]`.
    pub fn from_columns(stock: usize, columns: &[Vec<i32>]) -> Result<Self> {
        let width = columns.len();
        let height = columns.first().map_or(0, |c| c.len());
        let mut cells = Vec::with_capacity(width * height);
        for (x, column) in columns.iter().enumerate() {
            if column.len() != height {
                return Err(PlanError::RaggedStock { stock });
            }
            for (y, &label) in column.iter().enumerate() {
                let cell = Cell::from_label(label).ok_or(PlanError::InvalidCell {
                    stock,
                    x,
                    y,
                    label,
                })?;
                cells.push(cell);
            }
        }
        Ok(Self {
            width: width as u32,
            height: height as u32,
            cells,
        })
    }

    pub fn to_columns(&self) -> Vec<Vec<i32>> {
        if self.height == 0 {
            return vec![Vec::new(); self.width as usize];
        }
        self.cells
            .chunks(self.height as usize)
            .map(|column| column.iter().map(|c| c.label()).collect())
            .collect()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, x: u32, y: u32) -> usize {
        x as usize * self.height as usize + y as usize
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Cell> {
        if x < self.width && y < self.height {
            Some(self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    pub fn set(&mut self, x: u32, y: u32, cell: Cell) {
        let idx = self.index(x, y);
        self.cells[idx] = cell;
    }

    /// Exclusive extent `(x_end, y_end)` of all cells that are not `Unusable`.
    pub fn usable_bounds(&self) -> (u32, u32) {
        let mut x_end = 0;
        let mut y_end = 0;
        for x in 0..self.width {
            for y in 0..self.height {
                if self.cells[self.index(x, y)] != Cell::Unusable {
                    x_end = x_end.max(x + 1);
                    y_end = y_end.max(y + 1);
                }
            }
        }
        (x_end, y_end)
    }

    pub fn empty_cells(&self) -> u64 {
        self.cells.iter().filter(|c| c.is_empty()).count() as u64
    }

    /// True iff the rectangle lies inside the sheet and covers only `Empty` cells.
    pub fn can_place(&self, pos: Position, size: Rect) -> bool {
        let (x_end, y_end) = (
            pos.x as u64 + size.w as u64,
            pos.y as u64 + size.h as u64,
        );
        if x_end > self.width as u64 || y_end > self.height as u64 {
            return false;
        }
        (pos.x..pos.x + size.w)
            .all(|x| (pos.y..pos.y + size.h).all(|y| self.cells[self.index(x, y)].is_empty()))
    }

    /// Cells in the rectangle that are not `Unusable`, minus the rectangle's area.
    ///
    /// Zero for every feasible placement; negative when the rectangle crosses
    /// unusable cells or the sheet edge.
    pub fn waste(&self, pos: Position, size: Rect) -> i64 {
        let mut usable = 0i64;
        for x in pos.x..pos.x.saturating_add(size.w).min(self.width) {
            for y in pos.y..pos.y.saturating_add(size.h).min(self.height) {
                if self.cells[self.index(x, y)] != Cell::Unusable {
                    usable += 1;
                }
            }
        }
        usable - size.area() as i64
    }

    /// Feasible top-left positions for `size`, x ascending then y ascending.
    pub fn candidates(&self, size: Rect) -> impl Iterator<Item = Position> + '_ {
        let (x_end, y_end) = self.usable_bounds();
        let xs = 0..(x_end + 1).saturating_sub(size.w);
        let ys = 0..(y_end + 1).saturating_sub(size.h);
        xs.flat_map(move |x| ys.clone().map(move |y| Position::new(x, y)))
            .filter(move |&pos| self.can_place(pos, size))
    }

    /// Marks the placement's cells as occupied by its product.
    pub fn place(&mut self, placement: &Placement) {
        debug_assert!(self.can_place(placement.position, placement.size));
        for x in placement.position.x..placement.x_end() {
            for y in placement.position.y..placement.y_end() {
                self.set(x, y, Cell::Occupied(placement.product_idx as u32));
            }
        }
    }
}
