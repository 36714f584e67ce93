//! Text rendering and coordinate parsing for the CLI front end.

use crate::grid::{row_col_to_index, Cell, CellIndex, BOARD_SIZE};
use crate::state::PlayerState;

/// Format a flat index as `A1`-style text (column letter, 1-based row).
pub fn coord_to_string(index: CellIndex) -> String {
    let (r, c) = crate::grid::index_to_row_col(index);
    format!("{}{}", (b'A' + c as u8) as char, r + 1)
}

/// Parse `A1`-style input into a flat index. Accepts lowercase and
/// surrounding whitespace; returns `None` for anything off the board.
pub fn parse_coord(input: &str) -> Option<CellIndex> {
    let input = input.trim();
    let mut chars = input.chars();
    let col_ch = chars.next()?.to_ascii_uppercase();
    if !col_ch.is_ascii_uppercase() {
        return None;
    }
    let col = (col_ch as u8 - b'A') as usize;
    let row: usize = chars.as_str().parse::<usize>().ok()?.checked_sub(1)?;
    if row >= BOARD_SIZE || col >= BOARD_SIZE {
        return None;
    }
    Some(row_col_to_index(row, col))
}

/// Parse a placement line like `A1 h` or `b4 v` into an origin index and
/// orientation.
pub fn parse_placement_args(input: &str) -> Option<(CellIndex, crate::ship::Orientation)> {
    let mut parts = input.split_whitespace();
    let origin = parse_coord(parts.next()?)?;
    let orientation = match parts.next()? {
        "h" | "H" => crate::ship::Orientation::Horizontal,
        "v" | "V" => crate::ship::Orientation::Vertical,
        _ => return None,
    };
    if parts.next().is_some() {
        return None;
    }
    Some((origin, orientation))
}

fn cell_char(cell: Cell, reveal: bool) -> char {
    match cell {
        Cell::Hit => 'X',
        Cell::Miss => 'o',
        Cell::Occupied if reveal => 'S',
        _ => '.',
    }
}

/// Print one player's board. `reveal` shows unhit ship cells, used for the
/// local player's own fleet; the opponent view shows only hits and misses.
pub fn print_board(player: &PlayerState, reveal: bool) {
    print!("   ");
    for c in 0..BOARD_SIZE {
        print!(" {}", (b'A' + c as u8) as char);
    }
    println!();
    for r in 0..BOARD_SIZE {
        print!("{:2} ", r + 1);
        for c in 0..BOARD_SIZE {
            let cell = player.cell(row_col_to_index(r, c));
            print!(" {}", cell_char(cell, reveal));
        }
        println!();
    }
}
