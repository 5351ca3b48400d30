//! Plain-text fretboard drawing for the command line.
//!
//! ```text
//!      0    1    2    3
//! A |  ·    ·    ·    ◎
//! E |  ●    ·    ·    ●
//! C |  ◎    ·    ·    ·
//! G |  ●    ·    ·    ·
//! ```
//!
//! Dots mode draws `◎` for the root and `●` for other chord tones. When a cell
//! carries a label, active cells are bracketed instead: `[C]` for the root and
//! `(E)` for the rest.

use crate::fretboard::{CellRender, Projection};

const CELL_WIDTH: usize = 5;

fn cell_text(cell: &CellRender) -> String {
    match (cell.has_label, cell.is_root, cell.active) {
        (true, true, _) => format!("[{}]", cell.label),
        (true, false, true) => format!("({})", cell.label),
        (true, false, false) => cell.label.clone(),
        (false, true, _) => "◎".to_string(),
        (false, false, true) => "●".to_string(),
        (false, false, false) => "·".to_string(),
    }
}

/// Draw a projection as a header row of fret numbers plus one row per string.
pub fn render_board(projection: &Projection) -> String {
    let mut lines = Vec::with_capacity(5);

    let mut header = String::from("   ");
    for fret in projection.range.frets() {
        header.push_str(&format!("{:^width$}", fret, width = CELL_WIDTH));
    }
    lines.push(header.trim_end().to_string());

    for (string, cells) in projection.rows() {
        let mut row = format!("{} |", string.label);
        for cell in cells {
            row.push_str(&format!("{:^width$}", cell_text(cell), width = CELL_WIDTH));
        }
        lines.push(row.trim_end().to_string());
    }

    lines.join("\n")
}
