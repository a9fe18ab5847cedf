use crate::{Cell, Diagnostic, Diagnostics, Error, GridNum, RasterSize, Result, nodata};

/// Neighbour search order as (row offset, column offset).
///
/// The direction names follow a grid whose row index decreases towards the bottom:
/// right, left, bottom, top, bottom-right, bottom-left, top-left, top-right.
pub const NEIGHBOUR_PRIORITY: [(i32, i32); 8] = [
    (0, 1),   // right
    (0, -1),  // left
    (-1, 0),  // bottom
    (1, 0),   // top
    (-1, 1),  // bottom-right
    (-1, -1), // bottom-left
    (1, -1),  // top-left
    (1, 1),   // top-right
];

/// Fills the listed cells with the value of the first neighbour in [`NEIGHBOUR_PRIORITY`]
/// order that lies inside the grid and does not contain nodata.
///
/// Cells are processed in the order they are listed and the values are updated in place, so
/// a cell filled earlier can provide the value for a cell later in the list.
/// Cells without a valid neighbour are left untouched and reported as
/// [`Diagnostic::IsolatedCell`]. Returns the number of cells that were filled.
pub fn fill_isolated<T: GridNum>(
    values: &mut [T],
    size: RasterSize,
    nodata: f64,
    cells: &[Cell],
    diagnostics: &mut Diagnostics,
) -> Result<usize> {
    if values.len() != size.cell_count() {
        return Err(Error::InvalidArgument(format!(
            "Grid of size {size} can not hold {} values",
            values.len()
        )));
    }

    if let Some(cell) = cells.iter().find(|cell| !cell.is_in_raster(size)) {
        return Err(Error::InvalidArgument(format!(
            "Cell (row {}, col {}) is outside of the grid {size}",
            cell.row, cell.col
        )));
    }

    let cols = size.cols.count();
    let mut filled = 0;
    for &cell in cells {
        let replacement = NEIGHBOUR_PRIORITY
            .iter()
            .map(|&(d_row, d_col)| cell.offset(d_row, d_col))
            .filter(|neighbour| neighbour.is_in_raster(size))
            .map(|neighbour| values[neighbour.index_in_raster(cols)])
            .find(|val| !nodata::is_close(val.as_f64(), nodata));

        match replacement {
            Some(val) => {
                values[cell.index_in_raster(cols)] = val;
                filled += 1;
            }
            None => diagnostics.push(Diagnostic::IsolatedCell(cell)),
        }
    }

    Ok(filled)
}
