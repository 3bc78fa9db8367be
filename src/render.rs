use crate::grid::{Cell, Sheet};

const MAX_WIDTH: u32 = 80;
const MAX_HEIGHT: u32 = 40;

const LABELS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

fn cell_char(cell: Cell) -> char {
    match cell {
        Cell::Empty => '.',
        Cell::Unusable => ' ',
        Cell::Occupied(n) => LABELS[n as usize % LABELS.len()] as char,
    }
}

/// ASCII view of a sheet, one text row per `y`, `x` running left to right.
///
/// Sheets larger than the terminal budget are sampled down; each character then
/// stands for the top-left cell of its block.
pub fn render_sheet(sheet: &Sheet) -> String {
    if sheet.width() == 0 || sheet.height() == 0 {
        return String::new();
    }

    let step = sheet
        .width()
        .div_ceil(MAX_WIDTH)
        .max(sheet.height().div_ceil(MAX_HEIGHT));

    let mut result = String::new();
    for y in (0..sheet.height()).step_by(step as usize) {
        let line: String = (0..sheet.width())
            .step_by(step as usize)
            .filter_map(|x| sheet.get(x, y))
            .map(cell_char)
            .collect();
        result.push_str(line.trim_end());
        result.push('\n');
    }
    result
}
