use crate::{Epsg, GeoGrid, GridNum, Point, Result};

/// Resampling strategy used when cell values are moved onto another grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResampleAlgorithm {
    #[default]
    NearestNeighbour,
    Bilinear,
    Cubic,
}

/// The projection and raster resampling operations the alignment algorithms rely on.
///
/// Implementations perform the actual map projection mathematics, the algorithms in this crate
/// only decide which coordinates and grids to feed it.
pub trait ProjectionService {
    /// Returns true for longitude/latitude coordinate systems.
    /// Fails with [`crate::Error::InvalidCrs`] if the coordinate system is unknown.
    fn is_geographic(&self, crs: Epsg) -> Result<bool>;

    /// Transforms the points in place from `source` to `target`.
    /// Geographic coordinates are expressed as (longitude, latitude) in degrees.
    fn transform_points(&self, source: Epsg, target: Epsg, points: &mut [Point]) -> Result<()>;

    /// Ground distance in meters between two (longitude, latitude) points
    fn geodesic_distance(&self, p1: Point, p2: Point) -> Result<f64>;

    /// Resamples `src` onto the grid described by the metadata of `dst`.
    /// Cells of `dst` that are not covered by `src` keep their value.
    fn resample<T: GridNum>(&self, src: &GeoGrid<T>, dst: &mut GeoGrid<T>, algo: ResampleAlgorithm) -> Result<()>;
}
