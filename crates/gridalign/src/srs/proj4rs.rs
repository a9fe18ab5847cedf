use proj4rs::Proj;
use proj4rs::transform::transform;

use crate::{Epsg, Error, Point, Result};

/// Coordinate reference system resolved from its EPSG code using the bundled definitions
#[derive(Debug, Clone)]
pub struct SpatialReference {
    srs: Proj,
    epsg: Epsg,
}

impl SpatialReference {
    pub fn from_epsg(epsg: Epsg) -> Result<Self> {
        let proj_str = crs_definitions::from_code(epsg.code())
            .map(|def| def.proj4)
            .ok_or_else(|| Error::unknown_epsg(epsg))?;

        let srs = Proj::from_proj_string(proj_str).map_err(|err| Error::InvalidCrs(format!("{epsg}: {err}")))?;
        Ok(Self { srs, epsg })
    }

    pub fn epsg(&self) -> Epsg {
        self.epsg
    }

    pub fn is_geographic(&self) -> bool {
        self.srs.is_latlong()
    }

    pub fn is_projected(&self) -> bool {
        !self.is_geographic()
    }

    fn proj(&self) -> &Proj {
        &self.srs
    }
}

/// Transforms points between two coordinate systems.
/// Geographic coordinates are (longitude, latitude) in degrees, both on input and on output.
pub struct CoordinateTransformer {
    source: SpatialReference,
    target: SpatialReference,
}

impl CoordinateTransformer {
    pub fn from_epsg(source_epsg: Epsg, target_epsg: Epsg) -> Result<Self> {
        Ok(CoordinateTransformer {
            source: SpatialReference::from_epsg(source_epsg)?,
            target: SpatialReference::from_epsg(target_epsg)?,
        })
    }

    pub fn transform_point(&self, point: Point) -> Result<Point> {
        // proj4rs works in radians for geographic systems
        let mut p = if self.source.is_geographic() { point.to_radians() } else { point };
        transform(self.source.proj(), self.target.proj(), &mut p)?;
        if self.target.is_geographic() {
            p = p.to_degrees();
        }

        Ok(p)
    }

    pub fn transform_point_in_place(&self, point: &mut Point) -> Result<()> {
        *point = self.transform_point(*point)?;
        Ok(())
    }

    pub fn transform_points_in_place(&self, points: &mut [Point]) -> Result<()> {
        for point in points.iter_mut() {
            self.transform_point_in_place(point)?;
        }
        Ok(())
    }

    pub fn source_epsg(&self) -> Epsg {
        self.source.epsg()
    }

    pub fn target_epsg(&self) -> Epsg {
        self.target.epsg()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::crs::epsg;

    #[test]
    fn proj4rs_projection_point() -> Result<()> {
        let trans = CoordinateTransformer::from_epsg(epsg::WGS84, epsg::BELGIAN_LAMBERT72)?;
        let p = trans.transform_point(Point::new(3.5713882022278653, 51.04223683846715))?;
        assert_relative_eq!(p, Point::new(94079.44534873398, 192751.6060780408), epsilon = 1e-1);
        assert_eq!(trans.source_epsg(), epsg::WGS84);
        assert_eq!(trans.target_epsg(), epsg::BELGIAN_LAMBERT72);
        Ok(())
    }

    #[test]
    fn proj4rs_projection_to_geographic() -> Result<()> {
        let trans = CoordinateTransformer::from_epsg(epsg::BELGIAN_LAMBERT72, epsg::WGS84)?;
        let p = trans.transform_point(Point::new(94079.44534873398, 192751.6060780408))?;
        assert_relative_eq!(p, Point::new(3.5713882022278653, 51.04223683846715), epsilon = 1e-5);
        Ok(())
    }

    #[test]
    fn epsg_import() -> Result<()> {
        let srs = SpatialReference::from_epsg(epsg::BELGIAN_LAMBERT72)?;
        assert!(srs.is_projected());
        assert!(!srs.is_geographic());
        assert_eq!(srs.epsg(), epsg::BELGIAN_LAMBERT72);

        let srs = SpatialReference::from_epsg(epsg::WGS84)?;
        assert!(srs.is_geographic());

        assert!(matches!(SpatialReference::from_epsg(Epsg::new(1)), Err(Error::InvalidCrs(_))));
        Ok(())
    }
}
