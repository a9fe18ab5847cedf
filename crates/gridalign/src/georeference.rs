use crate::{Cell, Columns, Epsg, Error, GeoTransform, Point, RasterSize, Rect, Result, Rows};

/// Georeferencing information of a grid: the coordinate reference system, the grid size,
/// the transform from cell indices to world coordinates and the optional nodata value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoReference {
    crs: Option<Epsg>,
    size: RasterSize,
    geo_transform: GeoTransform,
    nodata: Option<f64>,
}

impl GeoReference {
    pub fn new(crs: impl Into<Option<Epsg>>, size: RasterSize, geo_transform: GeoTransform, nodata: Option<f64>) -> Self {
        GeoReference {
            crs: crs.into(),
            size,
            geo_transform,
            nodata,
        }
    }

    /// Metadata for a plain array: no coordinate system and a unit cell size (north up)
    pub fn without_spatial_reference(size: RasterSize, nodata: Option<f64>) -> Self {
        GeoReference {
            crs: None,
            size,
            geo_transform: GeoTransform::new([0.0, 1.0, 0.0, size.rows.count() as f64, 0.0, -1.0]),
            nodata,
        }
    }

    pub fn crs(&self) -> Option<Epsg> {
        self.crs
    }

    /// The coordinate system, required for every operation that transforms coordinates
    pub fn epsg(&self) -> Result<Epsg> {
        self.crs
            .ok_or_else(|| Error::InvalidCrs("Grid has no coordinate reference system".to_string()))
    }

    pub fn size(&self) -> RasterSize {
        self.size
    }

    pub fn rows(&self) -> Rows {
        self.size.rows
    }

    pub fn columns(&self) -> Columns {
        self.size.cols
    }

    pub fn geo_transform(&self) -> GeoTransform {
        self.geo_transform
    }

    pub fn nodata(&self) -> Option<f64> {
        self.nodata
    }

    pub fn set_nodata(&mut self, nodata: Option<f64>) {
        self.nodata = nodata;
    }

    pub fn copy_with_nodata(&self, nodata: Option<f64>) -> Self {
        GeoReference { nodata, ..*self }
    }

    pub fn cell_center(&self, cell: Cell) -> Point {
        self.geo_transform.cell_center(cell)
    }

    /// Bounding box of the grid, taking rotation and the sign of the pixel sizes into account
    pub fn bounding_box(&self) -> Rect {
        let rows = self.size.rows.count() as f64;
        let cols = self.size.cols.count() as f64;
        let trans = &self.geo_transform;

        let corners = [trans.apply(0.0, 0.0), trans.apply(cols, 0.0), trans.apply(0.0, rows), trans.apply(cols, rows)];
        Rect::enclosing(corners).unwrap_or_else(|| Rect::from_points(trans.top_left(), trans.top_left()))
    }

    /// The cell containing the point, the result can be outside of the raster
    pub fn point_to_cell(&self, point: Point) -> Result<Cell> {
        let pos = self.geo_transform.invert()?.apply(point.x(), point.y());
        Ok(Cell::from_row_col(pos.y().floor() as i32, pos.x().floor() as i32))
    }

    pub fn is_cell_on_map(&self, cell: Cell) -> bool {
        cell.is_in_raster(self.size)
    }

    /// Grids are aligned when they share the raster size, the transform and the coordinate system
    pub fn is_aligned_with(&self, other: &GeoReference) -> bool {
        self.check_aligned_with(other).is_ok()
    }

    pub fn check_aligned_with(&self, other: &GeoReference) -> Result<()> {
        if self.size != other.size {
            return Err(Error::MisalignedGrids(format!("grid sizes differ: {} <-> {}", self.size, other.size)));
        }

        if self.geo_transform != other.geo_transform {
            return Err(Error::MisalignedGrids(format!(
                "{:?} <-> {:?}",
                self.geo_transform, other.geo_transform
            )));
        }

        if self.crs != other.crs {
            return Err(Error::MisalignedGrids(format!(
                "coordinate systems differ: {:?} <-> {:?}",
                self.crs, other.crs
            )));
        }

        Ok(())
    }
}

impl std::fmt::Display for GeoReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let crs = self.crs.map_or_else(|| "no crs".to_string(), |epsg| epsg.to_string());
        write!(f, "{crs} {} {:?} nodata: {:?}", self.size, self.geo_transform, self.nodata)
    }
}
