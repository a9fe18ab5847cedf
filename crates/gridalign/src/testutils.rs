use crate::{
    Epsg, Error, GeoGrid, GeoReference, GeoTransform, GridNum, Point, ProjectionService, RasterSize, ResampleAlgorithm, Result,
    algo, crs::epsg, nodata,
};

pub const NOD: f64 = -9999.0;

/// Meters per degree at the equator for the plate carrée test projection
pub const METERS_PER_DEGREE: f64 = 111_319.490_793_273_57;

pub fn create_vec<T: GridNum>(data: &[f64]) -> Vec<T> {
    data.iter()
        .map(|&v| {
            if nodata::is_close(v, NOD) {
                T::nodata_value(NOD).expect("Test nodata value is not representable")
            } else {
                T::from_interpolated(v).expect("f64 could not be converted to the specified type")
            }
        })
        .collect()
}

pub fn create_grid<T: GridNum>(crs: Epsg, size: RasterSize, trans: [f64; 6], data: &[f64]) -> GeoGrid<T> {
    GeoGrid::new(GeoReference::new(crs, size, GeoTransform::new(trans), Some(NOD)), create_vec(data)).expect("Invalid test grid")
}

/// Deterministic projection service for testing the algorithms without a projection backend.
///
/// Geographic systems (EPSG:4326, EPSG:4258) are mapped onto web mercator (EPSG:3857) using a
/// plate carrée projection: x = lon * METERS_PER_DEGREE, y = lat * METERS_PER_DEGREE.
/// Ground distances are the planar distances in that projection.
pub struct PlateCarreeService;

impl PlateCarreeService {
    fn check_known(crs: Epsg) -> Result<()> {
        match crs {
            epsg::WGS84 | epsg::ETRS89 | epsg::WGS84_WEB_MERCATOR => Ok(()),
            _ => Err(Error::unknown_epsg(crs)),
        }
    }
}

impl ProjectionService for PlateCarreeService {
    fn is_geographic(&self, crs: Epsg) -> Result<bool> {
        Self::check_known(crs)?;
        Ok(crs != epsg::WGS84_WEB_MERCATOR)
    }

    fn transform_points(&self, source: Epsg, target: Epsg, points: &mut [Point]) -> Result<()> {
        let scale = match (self.is_geographic(source)?, self.is_geographic(target)?) {
            (true, false) => METERS_PER_DEGREE,
            (false, true) => 1.0 / METERS_PER_DEGREE,
            _ => return Ok(()),
        };

        points.iter_mut().for_each(|p| *p = Point::new(p.x() * scale, p.y() * scale));
        Ok(())
    }

    fn geodesic_distance(&self, p1: Point, p2: Point) -> Result<f64> {
        Ok(crate::point::euclidean_distance(p1, p2) * METERS_PER_DEGREE)
    }

    fn resample<T: GridNum>(&self, src: &GeoGrid<T>, dst: &mut GeoGrid<T>, algo: ResampleAlgorithm) -> Result<()> {
        let src_crs = src.metadata().epsg()?;
        let dst_crs = dst.metadata().epsg()?;
        let src_is_geographic = self.is_geographic(src_crs)?;
        let extent = src.bounding_box();

        algo::warp(src, dst, algo, |points: &mut [Point]| {
            self.transform_points(dst_crs, src_crs, points)?;
            if src_is_geographic {
                algo::wrap_longitudes(points, &extent);
            }
            Ok(())
        })
    }
}
