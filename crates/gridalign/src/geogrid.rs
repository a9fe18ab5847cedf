use crate::{Cell, Columns, Diagnostics, Epsg, Error, GeoReference, GeoTransform, GridNum, Point, RasterSize, Rect, Result, Rows, algo};

/// A georeferenced two dimensional grid with a dense, row-major value buffer.
///
/// Nodata cells are stored in place using the nodata value of the [`GeoReference`],
/// no additional data is allocated for tracking them.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoGrid<T: GridNum> {
    meta: GeoReference,
    data: Vec<T>,
}

impl<T: GridNum> GeoGrid<T> {
    pub fn new(meta: GeoReference, data: Vec<T>) -> Result<Self> {
        if meta.size().cell_count() != data.len() {
            return Err(Error::InvalidArgument(format!(
                "Grid of size {} can not hold {} values",
                meta.size(),
                data.len()
            )));
        }

        Ok(GeoGrid { meta, data })
    }

    pub fn filled_with(val: T, meta: GeoReference) -> Self {
        GeoGrid {
            data: vec![val; meta.size().cell_count()],
            meta,
        }
    }

    /// Every cell contains the nodata value, or the default value when no nodata is configured
    pub fn filled_with_nodata(meta: GeoReference) -> Result<Self> {
        let fill = match meta.nodata() {
            Some(nodata) => T::nodata_value(nodata)?,
            None => T::default(),
        };

        Ok(Self::filled_with(fill, meta))
    }

    pub fn metadata(&self) -> &GeoReference {
        &self.meta
    }

    pub fn crs(&self) -> Option<Epsg> {
        self.meta.crs()
    }

    pub fn size(&self) -> RasterSize {
        self.meta.size()
    }

    pub fn rows(&self) -> Rows {
        self.meta.rows()
    }

    pub fn columns(&self) -> Columns {
        self.meta.columns()
    }

    pub fn geo_transform(&self) -> GeoTransform {
        self.meta.geo_transform()
    }

    pub fn nodata(&self) -> Option<f64> {
        self.meta.nodata()
    }

    pub fn values(&self) -> &[T] {
        &self.data
    }

    pub fn values_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// The values of a single row
    ///
    /// # Panics
    ///
    /// Panics when `row` is outside of the grid.
    pub fn row_slice(&self, row: i32) -> &[T] {
        assert!((0..self.rows().count()).contains(&row), "row {row} is outside of the {} grid", self.size());
        let cols = self.columns().count() as usize;
        let start = row as usize * cols;
        &self.data[start..start + cols]
    }

    pub fn into_raw_parts(self) -> (GeoReference, Vec<T>) {
        (self.meta, self.data)
    }

    /// # Panics
    ///
    /// Panics when `cell` is outside of the grid, use [`GeoReference::is_cell_on_map`] to check first.
    pub fn cell_value(&self, cell: Cell) -> T {
        self.data[self.checked_index(cell)]
    }

    /// # Panics
    ///
    /// Panics when `cell` is outside of the grid.
    pub fn set_cell_value(&mut self, cell: Cell, val: T) {
        let index = self.checked_index(cell);
        self.data[index] = val;
    }

    fn checked_index(&self, cell: Cell) -> usize {
        // a column beyond the last one would otherwise address the next row
        assert!(self.meta.is_cell_on_map(cell), "{cell:?} is outside of the {} grid", self.size());
        cell.index_in_raster(self.columns().count())
    }

    pub fn is_nodata(&self, val: T) -> bool {
        val.is_nodata_value(self.nodata())
    }

    pub fn is_nodata_cell(&self, cell: Cell) -> bool {
        self.is_nodata(self.cell_value(cell))
    }

    pub fn nodata_count(&self) -> usize {
        self.data.iter().filter(|&&v| self.is_nodata(v)).count()
    }

    pub fn cell_center(&self, cell: Cell) -> Point {
        self.meta.cell_center(cell)
    }

    pub fn bounding_box(&self) -> Rect {
        self.meta.bounding_box()
    }

    /// Replaces the listed nodata cells with the value of their first valid neighbour.
    /// Returns the number of filled cells, cells without valid neighbours are reported in `diagnostics`.
    pub fn fill_isolated_cells(&mut self, cells: &[Cell], diagnostics: &mut Diagnostics) -> Result<usize> {
        let nodata = self
            .nodata()
            .ok_or_else(|| Error::MissingNoDataValue("Filling isolated cells requires a nodata value".to_string()))?;
        let size = self.size();
        algo::fill_isolated(&mut self.data, size, nodata, cells, diagnostics)
    }
}

/// Input for operations accepting both georeferenced grids and plain arrays.
#[derive(Debug, Clone, Copy)]
pub enum RasterInput<'a, T: GridNum> {
    Grid(&'a GeoGrid<T>),
    RawArray {
        values: &'a [T],
        size: RasterSize,
        nodata: Option<f64>,
    },
}

impl<'a, T: GridNum> RasterInput<'a, T> {
    pub fn raw(values: &'a [T], size: RasterSize, nodata: Option<f64>) -> Self {
        RasterInput::RawArray { values, size, nodata }
    }

    pub fn is_georeferenced(&self) -> bool {
        matches!(self, RasterInput::Grid(_))
    }

    /// Canonical view on the input, raw arrays get a georeference without spatial reference.
    pub(crate) fn resolve(&self) -> Result<GridView<'a, T>> {
        match *self {
            RasterInput::Grid(grid) => Ok(GridView {
                meta: *grid.metadata(),
                values: grid.values(),
                georeferenced: true,
            }),
            RasterInput::RawArray { values, size, nodata } => {
                if size.cell_count() != values.len() {
                    return Err(Error::InvalidArgument(format!(
                        "Array of size {size} can not hold {} values",
                        values.len()
                    )));
                }

                Ok(GridView {
                    meta: GeoReference::without_spatial_reference(size, nodata),
                    values,
                    georeferenced: false,
                })
            }
        }
    }
}

impl<'a, T: GridNum> From<&'a GeoGrid<T>> for RasterInput<'a, T> {
    fn from(grid: &'a GeoGrid<T>) -> Self {
        RasterInput::Grid(grid)
    }
}

pub(crate) struct GridView<'a, T: GridNum> {
    pub(crate) meta: GeoReference,
    pub(crate) values: &'a [T],
    pub(crate) georeferenced: bool,
}

impl<T: GridNum> GridView<'_, T> {
    pub(crate) fn is_nodata(&self, val: T) -> bool {
        val.is_nodata_value(self.meta.nodata())
    }
}
