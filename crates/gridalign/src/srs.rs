//! Spatial reference system handling and the projection service on top of the enabled projection backend.

cfg_if::cfg_if! {
    if #[cfg(feature = "proj")] {
        mod proj;

        #[cfg_attr(docsrs, doc(cfg(feature = "proj")))]
        pub use self::proj::{CoordinateTransformer, SpatialReference};
    } else if #[cfg(feature = "proj4rs")] {
        mod proj4rs;

        #[cfg_attr(docsrs, doc(cfg(feature = "proj4rs")))]
        pub use self::proj4rs::{CoordinateTransformer, SpatialReference};
    }
}

#[cfg(any(feature = "proj", feature = "proj4rs"))]
mod native {
    use super::{CoordinateTransformer, SpatialReference};
    use crate::{Epsg, GeoGrid, GridNum, Point, ProjectionService, ResampleAlgorithm, Result, algo, point};

    /// [`ProjectionService`] implementation using the enabled projection backend (`proj` or `proj4rs`)
    /// and the resampling kernel of this crate.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct NativeProjectionService;

    impl ProjectionService for NativeProjectionService {
        fn is_geographic(&self, crs: Epsg) -> Result<bool> {
            Ok(SpatialReference::from_epsg(crs)?.is_geographic())
        }

        fn transform_points(&self, source: Epsg, target: Epsg, points: &mut [Point]) -> Result<()> {
            if source == target {
                return Ok(());
            }

            CoordinateTransformer::from_epsg(source, target)?.transform_points_in_place(points)
        }

        fn geodesic_distance(&self, p1: Point, p2: Point) -> Result<f64> {
            Ok(point::haversine_distance(p1, p2))
        }

        fn resample<T: GridNum>(&self, src: &GeoGrid<T>, dst: &mut GeoGrid<T>, algo: ResampleAlgorithm) -> Result<()> {
            let src_crs = src.metadata().epsg()?;
            let dst_crs = dst.metadata().epsg()?;
            let src_is_geographic = self.is_geographic(src_crs)?;
            let extent = src.bounding_box();

            let transformer = if src_crs == dst_crs {
                None
            } else {
                Some(CoordinateTransformer::from_epsg(dst_crs, src_crs)?)
            };

            algo::warp(src, dst, algo, |points: &mut [Point]| {
                if let Some(transformer) = &transformer {
                    transformer.transform_points_in_place(points)?;
                }

                if src_is_geographic {
                    algo::wrap_longitudes(points, &extent);
                }
                Ok(())
            })
        }
    }

}

#[cfg(any(feature = "proj", feature = "proj4rs"))]
pub use native::NativeProjectionService;
