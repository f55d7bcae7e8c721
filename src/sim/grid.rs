//! Row-major brick grid with clamped window queries
//!
//! Cells are addressed `(x, y)` with `x < cells_x`, `y < cells_y`. Window
//! queries take signed centers so callers can ask about the ring of cells just
//! outside the board; the window is clipped rather than rejected.

use super::state::Brick;
use crate::error::{Result, SimError};

/// Inclusive, already-clipped cell rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellWindow {
    pub x1: usize,
    pub x2: usize,
    pub y1: usize,
    pub y2: usize,
}

impl CellWindow {
    /// Cell coordinates row by row, left to right
    pub fn cells(self) -> impl Iterator<Item = (usize, usize)> {
        (self.y1..=self.y2).flat_map(move |y| (self.x1..=self.x2).map(move |x| (x, y)))
    }

    pub fn columns(&self) -> usize {
        self.x2 - self.x1 + 1
    }

    pub fn rows(&self) -> usize {
        self.y2 - self.y1 + 1
    }
}

/// Fixed-size mapping from cell to optional brick
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    cells_x: usize,
    cells_y: usize,
    cells: Vec<Option<Brick>>,
}

impl SpatialGrid {
    /// Empty grid
    pub fn new(cells_x: usize, cells_y: usize) -> Self {
        Self {
            cells_x,
            cells_y,
            cells: vec![None; cells_x * cells_y],
        }
    }

    /// Build from `cells_y` rows of `cells_x` cells each
    pub fn from_rows(cells_x: usize, cells_y: usize, rows: Vec<Vec<Option<Brick>>>) -> Result<Self> {
        check_shape(cells_x, cells_y, rows.iter().map(Vec::len))?;
        Ok(Self {
            cells_x,
            cells_y,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    #[inline]
    pub fn cells_x(&self) -> usize {
        self.cells_x
    }

    #[inline]
    pub fn cells_y(&self) -> usize {
        self.cells_y
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.cells_x && y < self.cells_y).then(|| y * self.cells_x + x)
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&Brick> {
        self.index(x, y).and_then(|i| self.cells[i].as_ref())
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut Brick> {
        self.index(x, y).and_then(|i| self.cells[i].as_mut())
    }

    /// Replace a cell's contents, returning what was there
    pub fn set(&mut self, x: usize, y: usize, brick: Option<Brick>) -> Option<Brick> {
        let i = self.index(x, y)?;
        std::mem::replace(&mut self.cells[i], brick)
    }

    /// Clip the square of `radius` cells around `(cx, cy)` to the board.
    ///
    /// Returns `None` when nothing of the square lies on the board.
    pub fn window(&self, cx: isize, cy: isize, radius: usize) -> Option<CellWindow> {
        let r = radius as isize;
        let x1 = (cx - r).max(0);
        let x2 = (cx + r).min(self.cells_x as isize - 1);
        let y1 = (cy - r).max(0);
        let y2 = (cy + r).min(self.cells_y as isize - 1);

        (x1 <= x2 && y1 <= y2).then(|| CellWindow {
            x1: x1 as usize,
            x2: x2 as usize,
            y1: y1 as usize,
            y2: y2 as usize,
        })
    }

    /// Contents of the clipped window, one inner vec per row
    pub fn cell_region(&self, cx: isize, cy: isize, radius: usize) -> Vec<Vec<Option<&Brick>>> {
        let Some(window) = self.window(cx, cy, radius) else {
            return Vec::new();
        };

        (window.y1..=window.y2)
            .map(|y| (window.x1..=window.x2).map(|x| self.get(x, y)).collect())
            .collect()
    }

    /// Occupied cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &Brick)> {
        let cells_x = self.cells_x;
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, cell)| cell.as_ref().map(|b| ((i % cells_x, i / cells_x), b)))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Brick> {
        self.cells.iter_mut().flatten()
    }

    /// Number of bricks still on the board
    pub fn brick_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Empty every cell whose brick is marked destroyed; returns how many
    pub fn purge_destroyed(&mut self) -> usize {
        let mut removed = 0;
        for cell in &mut self.cells {
            if cell.as_ref().is_some_and(|b| b.destroyed) {
                *cell = None;
                removed += 1;
            }
        }
        removed
    }

    /// Rows of cells, for export
    pub fn rows(&self) -> impl Iterator<Item = &[Option<Brick>]> {
        self.cells.chunks(self.cells_x.max(1))
    }
}

/// Reject anything other than `cells_y` rows of exactly `cells_x` cells
pub(crate) fn check_shape(
    cells_x: usize,
    cells_y: usize,
    row_lengths: impl ExactSizeIterator<Item = usize>,
) -> Result<()> {
    let rows = row_lengths.len();
    if rows != cells_y {
        return Err(SimError::GridShape {
            expected_rows: cells_y,
            expected_cols: cells_x,
            row: rows,
            found: 0,
        });
    }
    for (row, found) in row_lengths.enumerate() {
        if found != cells_x {
            return Err(SimError::GridShape {
                expected_rows: cells_y,
                expected_cols: cells_x,
                row,
                found,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::BrickRecord;
    use glam::Vec2;
    use proptest::prelude::*;

    fn brick_at(x: usize, y: usize) -> Brick {
        Brick::from_record(BrickRecord::default(), Vec2::new(x as f32 * 8.0, y as f32 * 4.0), 1.0)
    }

    fn filled(cells_x: usize, cells_y: usize) -> SpatialGrid {
        let mut grid = SpatialGrid::new(cells_x, cells_y);
        for y in 0..cells_y {
            for x in 0..cells_x {
                grid.set(x, y, Some(brick_at(x, y)));
            }
        }
        grid
    }

    #[test]
    fn test_region_interior() {
        let grid = filled(5, 4);
        let region = grid.cell_region(2, 2, 1);
        assert_eq!(region.len(), 3);
        assert!(region.iter().all(|row| row.len() == 3));
        // Row-major: first entry is the top-left of the window
        let first = region[0][0].unwrap();
        assert_eq!(first.collider.position, Vec2::new(8.0, 4.0));
    }

    #[test]
    fn test_region_clipped_at_origin() {
        let grid = filled(5, 4);
        let window = grid.window(0, 0, 1).unwrap();
        assert_eq!(window, CellWindow { x1: 0, x2: 1, y1: 0, y2: 1 });
        assert_eq!(grid.cell_region(0, 0, 1).len(), 2);
    }

    #[test]
    fn test_region_outside_ring() {
        let grid = filled(5, 4);
        // One cell past the right/bottom border still sees the border cells
        let window = grid.window(5, 4, 1).unwrap();
        assert_eq!(window, CellWindow { x1: 4, x2: 4, y1: 3, y2: 3 });
        assert!(grid.window(-2, 0, 1).is_none());
        assert!(grid.cell_region(20, 20, 1).is_empty());
    }

    #[test]
    fn test_region_keeps_empty_cells() {
        let mut grid = SpatialGrid::new(3, 3);
        grid.set(1, 1, Some(brick_at(1, 1)));
        let region = grid.cell_region(1, 1, 1);
        assert!(region[0][0].is_none());
        assert!(region[1][1].is_some());
    }

    #[test]
    fn test_purge_destroyed() {
        let mut grid = filled(3, 2);
        grid.get_mut(1, 0).unwrap().destroyed = true;
        grid.get_mut(2, 1).unwrap().destroyed = true;
        assert_eq!(grid.purge_destroyed(), 2);
        assert_eq!(grid.brick_count(), 4);
        assert!(grid.get(1, 0).is_none());
        assert_eq!(grid.purge_destroyed(), 0);
    }

    #[test]
    fn test_iter_reports_coordinates() {
        let mut grid = SpatialGrid::new(4, 3);
        grid.set(3, 2, Some(brick_at(3, 2)));
        let cells: Vec<_> = grid.iter().map(|(cell, _)| cell).collect();
        assert_eq!(cells, vec![(3, 2)]);
    }

    #[test]
    fn test_from_rows_rejects_bad_shape() {
        let rows = vec![vec![None, None], vec![None]];
        let err = SpatialGrid::from_rows(2, 2, rows).unwrap_err();
        assert!(matches!(err, SimError::GridShape { row: 1, found: 1, .. }));

        let err = SpatialGrid::from_rows(2, 3, vec![vec![None, None]]).unwrap_err();
        assert!(matches!(err, SimError::GridShape { expected_rows: 3, .. }));
    }

    #[test]
    fn test_out_of_bounds_access() {
        let mut grid = SpatialGrid::new(2, 2);
        assert!(grid.get(2, 0).is_none());
        assert!(grid.set(0, 5, Some(brick_at(0, 0))).is_none());
        assert_eq!(grid.brick_count(), 0);
    }

    proptest! {
        #[test]
        fn prop_window_stays_on_board(cx in -3isize..12, cy in -3isize..12, radius in 0usize..3) {
            let grid = SpatialGrid::new(7, 5);
            if let Some(w) = grid.window(cx, cy, radius) {
                prop_assert!(w.x1 <= w.x2 && w.x2 < 7);
                prop_assert!(w.y1 <= w.y2 && w.y2 < 5);
                prop_assert!(w.columns() <= 2 * radius + 1);
                prop_assert_eq!(w.cells().count(), w.columns() * w.rows());
            }
        }
    }
}
