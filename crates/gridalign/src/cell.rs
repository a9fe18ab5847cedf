use crate::{Columns, RasterSize, Rows};

/// Represents a position in the grid using row, col coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub const fn from_row_col(row: i32, col: i32) -> Self {
        Cell { row, col }
    }

    /// The cell located `d_row` rows and `d_col` columns away from this one
    pub const fn offset(&self, d_row: i32, d_col: i32) -> Cell {
        Cell::from_row_col(self.row + d_row, self.col + d_col)
    }

    pub const fn is_in_raster(&self, size: RasterSize) -> bool {
        self.row >= 0 && self.col >= 0 && self.row < size.rows.count() && self.col < size.cols.count()
    }

    /// Row-major index of the cell, only meaningful for cells inside the raster
    pub const fn index_in_raster(&self, cols_in_grid: i32) -> usize {
        (self.row * cols_in_grid + self.col) as usize
    }

    pub const fn from_index(index: usize, cols_in_grid: i32) -> Self {
        let cols = cols_in_grid as usize;
        Cell::from_row_col((index / cols) as i32, (index % cols) as i32)
    }

    fn increment(&mut self, cols_in_grid: i32) {
        self.col += 1;
        if self.col >= cols_in_grid {
            self.col = 0;
            self.row += 1;
        }
    }
}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cell {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

/// Iterator over the cells in a raster
/// Iteration will occur from the top-left cell to the bottom-right cell in row-major order.
pub struct CellIterator {
    rows: Rows,
    cols: Columns,
    current: Cell,
}

impl CellIterator {
    pub fn for_raster_with_size(size: RasterSize) -> Self {
        CellIterator {
            rows: size.rows,
            cols: size.cols,
            current: Cell::from_row_col(0, 0),
        }
    }
}

impl Iterator for CellIterator {
    type Item = Cell;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cols.count() <= 0 || self.current.row >= self.rows.count() {
            return None;
        }

        let current = self.current;
        self.current.increment(self.cols.count());
        Some(current)
    }
}
