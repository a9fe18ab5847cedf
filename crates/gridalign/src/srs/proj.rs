use proj::Proj;

use crate::{Epsg, Error, Point, Result};

/// Coordinate reference system resolved from its EPSG code.
/// The bundled definitions decide whether an EPSG code is known and whether it is geographic.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialReference {
    epsg: Epsg,
    geographic: bool,
}

impl SpatialReference {
    pub fn from_epsg(epsg: Epsg) -> Result<Self> {
        let def = crs_definitions::from_code(epsg.code()).ok_or_else(|| Error::unknown_epsg(epsg))?;
        let geographic = def
            .proj4
            .split_whitespace()
            .any(|param| matches!(param, "+proj=longlat" | "+proj=latlong" | "+proj=lonlat" | "+proj=latlon"));

        Ok(SpatialReference { epsg, geographic })
    }

    pub fn epsg(&self) -> Epsg {
        self.epsg
    }

    pub fn is_geographic(&self) -> bool {
        self.geographic
    }

    pub fn is_projected(&self) -> bool {
        !self.geographic
    }
}

/// Transforms points between two coordinate systems using the PROJ library.
/// The axis order is normalized to (longitude, latitude) for geographic systems.
pub struct CoordinateTransformer {
    transformer: Proj,
    source: Epsg,
    target: Epsg,
}

impl CoordinateTransformer {
    pub fn from_epsg(source_epsg: Epsg, target_epsg: Epsg) -> Result<Self> {
        SpatialReference::from_epsg(source_epsg)?;
        SpatialReference::from_epsg(target_epsg)?;

        let transformer = Proj::new_known_crs(&source_epsg.to_string(), &target_epsg.to_string(), None)?;
        Ok(CoordinateTransformer {
            transformer,
            source: source_epsg,
            target: target_epsg,
        })
    }

    pub fn transform_point(&self, point: Point) -> Result<Point> {
        Ok(self.transformer.convert(point)?)
    }

    pub fn transform_point_in_place(&self, point: &mut Point) -> Result<()> {
        *point = self.transformer.convert(*point)?;
        Ok(())
    }

    pub fn transform_points_in_place(&self, points: &mut [Point]) -> Result<()> {
        self.transformer.convert_array(points)?;
        Ok(())
    }

    pub fn source_epsg(&self) -> Epsg {
        self.source
    }

    pub fn target_epsg(&self) -> Epsg {
        self.target
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::crs::epsg;

    #[test]
    fn test_projection_point() -> Result<()> {
        let trans = CoordinateTransformer::from_epsg(epsg::WGS84, epsg::BELGIAN_LAMBERT72)?;
        let p = trans.transform_point(Point::new(3.5713882022278653, 51.04223683846715))?;
        assert_relative_eq!(p, Point::new(94079.44534873398, 192751.6060780408), epsilon = 1e-1);
        Ok(())
    }

    #[test]
    fn epsg_import() -> Result<()> {
        let srs = SpatialReference::from_epsg(epsg::BELGIAN_LAMBERT72)?;
        assert!(srs.is_projected());
        assert!(SpatialReference::from_epsg(epsg::WGS84)?.is_geographic());
        assert!(matches!(SpatialReference::from_epsg(Epsg::new(1)), Err(Error::InvalidCrs(_))));
        Ok(())
    }
}
