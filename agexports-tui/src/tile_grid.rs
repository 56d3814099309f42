//! Tile-grid cartogram of the US: every state is one equal-size cell.
//!
//! Positions follow the common 12x8 layout (Alaska top-left, Hawaii
//! bottom-left, DC tucked next to Maryland).

/// Grid width in tiles.
pub const GRID_COLS: u16 = 12;
/// Grid height in tiles.
pub const GRID_ROWS: u16 = 8;

/// (code, column, row)
pub const TILES: &[(&str, u16, u16)] = &[
    ("AK", 0, 0),
    ("ME", 11, 0),
    ("WI", 6, 1),
    ("VT", 10, 1),
    ("NH", 11, 1),
    ("WA", 1, 2),
    ("ID", 2, 2),
    ("MT", 3, 2),
    ("ND", 4, 2),
    ("MN", 5, 2),
    ("IL", 6, 2),
    ("MI", 7, 2),
    ("NY", 9, 2),
    ("MA", 10, 2),
    ("OR", 1, 3),
    ("NV", 2, 3),
    ("WY", 3, 3),
    ("SD", 4, 3),
    ("IA", 5, 3),
    ("IN", 6, 3),
    ("OH", 7, 3),
    ("PA", 8, 3),
    ("NJ", 9, 3),
    ("CT", 10, 3),
    ("RI", 11, 3),
    ("CA", 1, 4),
    ("UT", 2, 4),
    ("CO", 3, 4),
    ("NE", 4, 4),
    ("MO", 5, 4),
    ("KY", 6, 4),
    ("WV", 7, 4),
    ("VA", 8, 4),
    ("MD", 9, 4),
    ("DE", 10, 4),
    ("AZ", 2, 5),
    ("NM", 3, 5),
    ("KS", 4, 5),
    ("AR", 5, 5),
    ("TN", 6, 5),
    ("NC", 7, 5),
    ("SC", 8, 5),
    ("DC", 9, 5),
    ("OK", 4, 6),
    ("LA", 5, 6),
    ("MS", 6, 6),
    ("AL", 7, 6),
    ("GA", 8, 6),
    ("HI", 0, 7),
    ("TX", 4, 7),
    ("FL", 9, 7),
];

/// Tile position of a state code.
pub fn position(code: &str) -> Option<(u16, u16)> {
    TILES
        .iter()
        .find(|(c, _, _)| *c == code)
        .map(|&(_, col, row)| (col, row))
}

/// State code occupying a tile, if any.
pub fn code_at(col: u16, row: u16) -> Option<&'static str> {
    TILES
        .iter()
        .find(|&&(_, c, r)| c == col && r == row)
        .map(|&(code, _, _)| code)
}

/// Cursor movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    fn delta(self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }
}

/// Nearest tile from `code` in `dir`. Straight-line neighbours win over
/// diagonal ones. Returns `None` at the edge of the map.
pub fn neighbor(code: &str, dir: Direction) -> Option<&'static str> {
    let (col, row) = position(code)?;
    let (dx, dy) = dir.delta();
    let (col, row) = (col as i32, row as i32);

    TILES
        .iter()
        .filter_map(|&(c, tc, tr)| {
            let (ddx, ddy) = (tc as i32 - col, tr as i32 - row);
            let primary = ddx * dx + ddy * dy;
            if primary <= 0 {
                return None;
            }
            let secondary = (ddx * dy).abs() + (ddy * dx).abs();
            Some((primary + 2 * secondary, secondary, c))
        })
        .min_by_key(|&(score, secondary, _)| (score, secondary))
        .map(|(_, _, c)| c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn fifty_states_plus_dc_without_overlap() {
        assert_eq!(TILES.len(), 51);
        let codes: HashSet<&str> = TILES.iter().map(|t| t.0).collect();
        assert_eq!(codes.len(), 51);
        let cells: HashSet<(u16, u16)> = TILES.iter().map(|t| (t.1, t.2)).collect();
        assert_eq!(cells.len(), 51);
        assert!(TILES.iter().all(|t| t.1 < GRID_COLS && t.2 < GRID_ROWS));
    }

    #[test]
    fn lookup_both_ways() {
        assert_eq!(position("CA"), Some((1, 4)));
        assert_eq!(code_at(1, 4), Some("CA"));
        assert_eq!(code_at(0, 3), None);
        assert_eq!(position("ZZ"), None);
    }

    #[test]
    fn neighbors_prefer_straight_lines() {
        assert_eq!(neighbor("CA", Direction::Right), Some("UT"));
        assert_eq!(neighbor("CA", Direction::Up), Some("OR"));
        assert_eq!(neighbor("KS", Direction::Down), Some("OK"));
        assert_eq!(neighbor("OK", Direction::Down), Some("TX"));
        assert_eq!(neighbor("ME", Direction::Right), None);
        assert_eq!(neighbor("ZZ", Direction::Left), None);
    }
}
