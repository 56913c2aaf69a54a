//! Pattern module - deterministic target grids
//!
//! Each [`PatternId`] is a closed-form function of the cell coordinates, the
//! grid centre `c = size / 2` and the tile-type count `t`. Generation never
//! consults a random source, so the same inputs always give the same target.

use crate::grid::Grid;
use crate::types::{PatternId, MAX_GRID_SIZE};

/// Build the target grid for a pattern.
///
/// `grid_size` is clamped to `1..=5`; `tile_types` is treated as at least 2 so
/// the two-colour patterns stay in range.
///
/// # Examples
///
/// ```
/// use tile_swap_core::pattern::generate;
/// use tile_swap_core::types::{PatternId, TilePosition};
///
/// let grid = generate(PatternId::Cross, 3, 3);
/// assert_eq!(grid.row(0), &[0, 1, 0]);
/// assert_eq!(grid.row(1), &[1, 1, 1]);
/// assert_eq!(grid.get(TilePosition::new(2, 2)), Some(0));
/// ```
pub fn generate(pattern: PatternId, grid_size: u8, tile_types: u8) -> Grid {
    let size = grid_size.clamp(1, MAX_GRID_SIZE);
    let t = tile_types.max(2);
    let c = (size / 2) as i32;
    let last = size - 1;

    Grid::from_fn(size, |row, col| {
        let i = row as i32;
        let j = col as i32;
        let di = (i - c).abs();
        let dj = (j - c).abs();

        match pattern {
            PatternId::Checkerboard => ((i + j) % 2) as u8,
            PatternId::Stripes => row % t.min(3),
            PatternId::Corners => {
                let corner = (row == 0 || row == last) && (col == 0 || col == last);
                corner as u8
            }
            PatternId::Diagonal => (row == col) as u8,
            PatternId::DiagonalStripes => ((i + j) % t.min(3) as i32) as u8,
            PatternId::Cross => (i == c || j == c) as u8,
            PatternId::Spiral => (di.max(dj) % t.min(3) as i32) as u8,
            PatternId::Diamond => (di + dj <= c) as u8,
            PatternId::ComplexMandala => mandala_cell(i - c, j - c, t.min(4)),
        }
    })
}

/// Build the target grid from a pattern name; unknown names give the
/// checkerboard.
pub fn generate_named(name: &str, grid_size: u8, tile_types: u8) -> Grid {
    generate(PatternId::from_name(name), grid_size, tile_types)
}

fn mandala_cell(di: i32, dj: i32, modulus: u8) -> u8 {
    let (di, dj) = (di as f64, dj as f64);
    let dist = (di * di + dj * dj).sqrt();
    let angle = dj.atan2(di);
    let raw = (2.0 * dist + 4.0 * angle).round() as i64;
    raw.rem_euclid(modulus as i64) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TilePosition, MAX_TILE_TYPES, MIN_GRID_SIZE, MIN_TILE_TYPES};

    #[test]
    fn test_every_cell_in_tile_range() {
        for pattern in PatternId::ALL {
            for size in MIN_GRID_SIZE..=MAX_GRID_SIZE {
                for t in MIN_TILE_TYPES..=MAX_TILE_TYPES {
                    let grid = generate(pattern, size, t);
                    assert_eq!(grid.size(), size);
                    assert!(
                        grid.cells().iter().all(|&v| v < t),
                        "{} size {size} types {t}: {:?}",
                        pattern.as_str(),
                        grid.cells()
                    );
                }
            }
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        for pattern in PatternId::ALL {
            assert_eq!(generate(pattern, 5, 7), generate(pattern, 5, 7));
        }
    }

    #[test]
    fn test_checkerboard() {
        let grid = generate(PatternId::Checkerboard, 3, 3);
        assert_eq!(grid.row(0), &[0, 1, 0]);
        assert_eq!(grid.row(1), &[1, 0, 1]);
    }

    #[test]
    fn test_stripes_and_diagonal_stripes_cap_at_three_colours() {
        let stripes = generate(PatternId::Stripes, 5, 7);
        let firsts: Vec<u8> = (0..5).map(|r| stripes.row(r)[0]).collect();
        assert_eq!(firsts, vec![0, 1, 2, 0, 1]);

        let two = generate(PatternId::Stripes, 4, 2);
        assert_eq!(two.row(2), &[0, 0, 0, 0]);

        let diag = generate(PatternId::DiagonalStripes, 4, 5);
        assert_eq!(diag.row(0), &[0, 1, 2, 0]);
        assert_eq!(diag.row(1), &[1, 2, 0, 1]);
    }

    #[test]
    fn test_corners() {
        let grid = generate(PatternId::Corners, 4, 5);
        assert_eq!(grid.row(0), &[1, 0, 0, 1]);
        assert_eq!(grid.row(1), &[0, 0, 0, 0]);
        assert_eq!(grid.row(3), &[1, 0, 0, 1]);
    }

    #[test]
    fn test_diagonal() {
        let grid = generate(PatternId::Diagonal, 4, 5);
        for p in grid.positions() {
            assert_eq!(grid.get(p), Some((p.row == p.col) as u8));
        }
    }

    #[test]
    fn test_even_grid_centre_is_half_size() {
        // c = 4 / 2 = 2, so the cross sits on row/col 2.
        let grid = generate(PatternId::Cross, 4, 5);
        assert_eq!(grid.row(2), &[1, 1, 1, 1]);
        assert_eq!(grid.row(0), &[0, 0, 1, 0]);
    }

    #[test]
    fn test_spiral_rings() {
        let grid = generate(PatternId::Spiral, 5, 7);
        assert_eq!(grid.row(0), &[2, 2, 2, 2, 2]);
        assert_eq!(grid.row(1), &[2, 1, 1, 1, 2]);
        assert_eq!(grid.row(2), &[2, 1, 0, 1, 2]);
    }

    #[test]
    fn test_diamond() {
        let grid = generate(PatternId::Diamond, 5, 7);
        assert_eq!(grid.row(0), &[0, 0, 1, 0, 0]);
        assert_eq!(grid.row(1), &[0, 1, 1, 1, 0]);
        assert_eq!(grid.row(2), &[1, 1, 1, 1, 1]);
    }

    #[test]
    fn test_mandala_wraps_negative_angles() {
        // Centre: dist 0, atan2(0, 0) = 0.
        assert_eq!(mandala_cell(0, 0, 4), 0);
        // Straight up: angle pi, round(2 + 4pi) = 15 -> 3.
        assert_eq!(mandala_cell(-1, 0, 4), 3);
        // Left: angle -pi/2, round(2 - 2pi) = -4 -> 0 (Euclidean).
        assert_eq!(mandala_cell(0, -1, 4), 0);
        // Right: angle pi/2, round(2 + 2pi) = 8 -> 0.
        assert_eq!(mandala_cell(0, 1, 4), 0);
        // Below: angle 0, round(2) = 2.
        assert_eq!(mandala_cell(1, 0, 4), 2);

        let grid = generate(PatternId::ComplexMandala, 5, 3);
        assert!(grid.cells().iter().all(|&v| v < 3));
        assert_eq!(grid.get(TilePosition::new(2, 2)), Some(0));
    }

    #[test]
    fn test_unknown_name_falls_back_to_checkerboard() {
        assert_eq!(
            generate_named("zigzag", 4, 4),
            generate(PatternId::Checkerboard, 4, 4)
        );
        assert_eq!(
            generate_named("diamond", 5, 4),
            generate(PatternId::Diamond, 5, 4)
        );
    }
}
