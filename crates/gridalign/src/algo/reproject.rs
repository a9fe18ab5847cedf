use crate::{
    Cell, Columns, Epsg, Error, GeoGrid, GeoReference, GeoTransform, GridNum, Point, ProjectionService, RasterSize, Rect,
    ResampleAlgorithm, Result, Rows,
};

#[derive(Debug, Clone, PartialEq, bon::Builder)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReprojectOptions {
    /// The coordinate system of the result
    pub target_crs: Epsg,
    /// Cell size of the result in units of the target coordinate system.
    /// When not provided the cell size is derived from the source grid: a geographic source projected
    /// to a projected system gets the ground distance between two adjacent cell centers,
    /// every other combination (geographic to geographic included) keeps the source cell size.
    pub target_pixel_size: Option<f64>,
    /// Resampling used to obtain the cell values (default = `ResampleAlgorithm::NearestNeighbour`)
    #[builder(default)]
    pub resample: ResampleAlgorithm,
}

impl ReprojectOptions {
    /// Reprojection to `target_crs` with a derived cell size and nearest neighbour resampling
    pub fn for_crs(target_crs: Epsg) -> Self {
        ReprojectOptions {
            target_crs,
            target_pixel_size: None,
            resample: ResampleAlgorithm::NearestNeighbour,
        }
    }
}

/// Reproject a grid to a different coordinate system and/or cell size.
///
/// A grid that is already in the target coordinate system is returned unchanged when no target pixel size is requested.
/// Any other reprojection needs a source nodata value to mark the cells that are not covered by the source.
pub fn reproject<T: GridNum, S: ProjectionService>(src: &GeoGrid<T>, opts: &ReprojectOptions, service: &S) -> Result<GeoGrid<T>> {
    let src_crs = src.metadata().epsg()?;
    if opts.target_crs == src_crs && opts.target_pixel_size.is_none() {
        log::debug!("Grid is already in {src_crs}, no resampling needed");
        return Ok(src.clone());
    }

    if src.nodata().is_none() {
        return Err(Error::MissingNoDataValue(
            "Reprojecting requires a source nodata value for the uncovered cells".to_string(),
        ));
    }

    let target_georef = reproject_georeference(src.metadata(), opts.target_crs, opts.target_pixel_size, service)?;
    log::debug!("Reproject {} -> {target_georef}", src.metadata());

    let mut result = GeoGrid::filled_with_nodata(target_georef)?;
    service.resample(src, &mut result, opts.resample)?;
    Ok(result)
}

/// Compute the georeference of the reprojection result: the extent of the transformed grid corners,
/// covered by square cells of the requested or derived pixel size.
pub fn reproject_georeference<S: ProjectionService>(
    georef: &GeoReference,
    target_crs: Epsg,
    target_pixel_size: Option<f64>,
    service: &S,
) -> Result<GeoReference> {
    georef.geo_transform().validate()?;
    let src_crs = georef.epsg()?;
    let src_is_geographic = service.is_geographic(src_crs)?;
    let target_is_geographic = service.is_geographic(target_crs)?;

    let bbox = georef.bounding_box();
    let mut corners = [bbox.top_left(), bbox.bottom_right()];
    if src_is_geographic && bbox.min_x() > 180.0 {
        log::debug!("Left edge longitude {} exceeds 180 degrees, shifting the grid extent by -360", bbox.min_x());
        for corner in &mut corners {
            *corner = Point::new(corner.x() - 360.0, corner.y());
        }
    }

    service.transform_points(src_crs, target_crs, &mut corners)?;
    let dst_bbox = Rect::from_points(corners[0], corners[1]);

    let pixel_size = match target_pixel_size {
        Some(size) => size,
        None => derive_pixel_size(georef, src_is_geographic, target_is_geographic, service)?,
    };

    if !pixel_size.is_finite() || pixel_size <= 0.0 {
        return Err(Error::DegenerateGeometry(format!("Invalid target pixel size: {pixel_size}")));
    }

    let cols = (dst_bbox.width() / pixel_size).round();
    let rows = (dst_bbox.height() / pixel_size).round();
    if !(1.0..=i32::MAX as f64).contains(&cols) || !(1.0..=i32::MAX as f64).contains(&rows) {
        return Err(Error::DegenerateGeometry(format!(
            "Reprojecting to {target_crs} with pixel size {pixel_size} results in {rows} rows and {cols} columns"
        )));
    }

    Ok(GeoReference::new(
        target_crs,
        RasterSize::with_rows_cols(Rows(rows as i32), Columns(cols as i32)),
        GeoTransform::new([dst_bbox.min_x(), pixel_size, 0.0, dst_bbox.max_y(), 0.0, -pixel_size]),
        georef.nodata(),
    ))
}

/// Geographic grids projected to a projected system get a cell size equal to the ground distance between
/// two horizontally adjacent cell centers. Otherwise the source cell size is kept.
fn derive_pixel_size<S: ProjectionService>(
    georef: &GeoReference,
    src_is_geographic: bool,
    target_is_geographic: bool,
    service: &S,
) -> Result<f64> {
    let trans = georef.geo_transform();
    if src_is_geographic && !target_is_geographic {
        let center = trans.cell_center(Cell::from_row_col(0, 0));
        let adjacent_center = trans.cell_center(Cell::from_row_col(0, 1));
        let pixel_size = service.geodesic_distance(center, adjacent_center)?;
        log::debug!("Derived pixel size {pixel_size} from the ground distance between adjacent cells");
        return Ok(pixel_size);
    }

    Ok(trans.pixel_width().abs())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::{
        crs::epsg,
        testutils::{METERS_PER_DEGREE, NOD, PlateCarreeService, create_grid},
    };

    fn wgs84_grid(origin_x: f64) -> GeoGrid<f64> {
        create_grid(
            epsg::WGS84,
            RasterSize::square(2),
            [origin_x, 1.0, 0.0, 52.0, 0.0, -1.0],
            &[1.0, 2.0, 3.0, NOD],
        )
    }

    #[test_log::test]
    fn same_crs_without_pixel_size_is_identity() -> Result<()> {
        let src = wgs84_grid(4.0);
        let result = reproject(&src, &ReprojectOptions::for_crs(epsg::WGS84), &PlateCarreeService)?;
        assert_eq!(result, src);
        Ok(())
    }

    #[test_log::test]
    fn same_crs_with_pixel_size_changes_shape() -> Result<()> {
        let src = wgs84_grid(4.0);
        let opts = ReprojectOptions::builder()
            .target_crs(epsg::WGS84)
            .target_pixel_size(0.5)
            .build();

        let result = reproject(&src, &opts, &PlateCarreeService)?;
        assert_eq!(result.size(), RasterSize::square(4));
        assert_eq!(result.crs(), Some(epsg::WGS84));
        assert_eq!(result.nodata(), Some(NOD));
        assert_relative_eq!(result.bounding_box(), src.bounding_box(), epsilon = 1e-9);

        #[rustfmt::skip]
        assert_eq!(result.values(), &[
            1.0, 1.0, 2.0, 2.0,
            1.0, 1.0, 2.0, 2.0,
            3.0, 3.0, NOD, NOD,
            3.0, 3.0, NOD, NOD,
        ]);
        Ok(())
    }

    #[test_log::test]
    fn geographic_to_projected_uses_ground_distance() -> Result<()> {
        let src = wgs84_grid(4.0);
        let result = reproject(&src, &ReprojectOptions::for_crs(epsg::WGS84_WEB_MERCATOR), &PlateCarreeService)?;

        assert_eq!(result.crs(), Some(epsg::WGS84_WEB_MERCATOR));
        assert_eq!(result.size(), RasterSize::square(2));
        assert_relative_eq!(result.geo_transform().pixel_width(), METERS_PER_DEGREE, epsilon = 1e-6);
        assert_relative_eq!(result.geo_transform().pixel_height(), -METERS_PER_DEGREE, epsilon = 1e-6);
        assert_relative_eq!(result.geo_transform().origin_x(), 4.0 * METERS_PER_DEGREE, epsilon = 1e-6);
        assert_relative_eq!(result.geo_transform().origin_y(), 52.0 * METERS_PER_DEGREE, epsilon = 1e-6);
        assert_eq!(result.values(), src.values());
        Ok(())
    }

    #[test_log::test]
    fn antimeridian_correction() -> Result<()> {
        let shifted = reproject(&wgs84_grid(190.0), &ReprojectOptions::for_crs(epsg::WGS84_WEB_MERCATOR), &PlateCarreeService)?;
        let normalized = reproject(&wgs84_grid(-170.0), &ReprojectOptions::for_crs(epsg::WGS84_WEB_MERCATOR), &PlateCarreeService)?;

        assert_relative_eq!(shifted.bounding_box(), normalized.bounding_box(), epsilon = 1e-6);
        assert_relative_eq!(shifted.bounding_box().min_x(), -170.0 * METERS_PER_DEGREE, epsilon = 1e-6);
        assert_eq!(shifted.values(), normalized.values());
        assert_eq!(shifted.values(), &[1.0, 2.0, 3.0, NOD]);
        Ok(())
    }

    #[test_log::test]
    fn projected_source_keeps_pixel_size() -> Result<()> {
        let src = create_grid::<f32>(
            epsg::WGS84_WEB_MERCATOR,
            RasterSize::square(2),
            [0.0, 1000.0, 0.0, 2000.0, 0.0, -1000.0],
            &[1.0, 2.0, 3.0, 4.0],
        );

        // the projected cell size of 1000 is far too large for degrees
        let res = reproject(&src, &ReprojectOptions::for_crs(epsg::WGS84), &PlateCarreeService);
        assert!(matches!(res, Err(Error::DegenerateGeometry(_))));

        let georef = reproject_georeference(src.metadata(), epsg::WGS84_WEB_MERCATOR, None, &PlateCarreeService)?;
        assert_eq!(georef.geo_transform(), src.geo_transform());
        assert_eq!(georef.size(), src.size());
        Ok(())
    }

    #[test]
    fn unknown_target_crs() {
        let res = reproject(&wgs84_grid(4.0), &ReprojectOptions::for_crs(epsg::BELGIAN_LAMBERT72), &PlateCarreeService);
        assert!(matches!(res, Err(Error::InvalidCrs(_))));
    }

    #[test]
    fn grid_without_crs() {
        let grid = GeoGrid::new(GeoReference::without_spatial_reference(RasterSize::square(1), None), vec![1u8]).unwrap();
        let res = reproject(&grid, &ReprojectOptions::for_crs(epsg::WGS84), &PlateCarreeService);
        assert!(matches!(res, Err(Error::InvalidCrs(_))));
    }

    #[test]
    fn invalid_pixel_size() {
        let opts = ReprojectOptions::builder()
            .target_crs(epsg::WGS84)
            .target_pixel_size(-0.5)
            .build();
        let res = reproject(&wgs84_grid(4.0), &opts, &PlateCarreeService);
        assert!(matches!(res, Err(Error::DegenerateGeometry(_))));

        let opts = ReprojectOptions::builder().target_crs(epsg::WGS84).target_pixel_size(10.0).build();
        let res = reproject(&wgs84_grid(4.0), &opts, &PlateCarreeService);
        assert!(matches!(res, Err(Error::DegenerateGeometry(_))));
    }

    #[test_log::test]
    fn source_without_nodata() -> Result<()> {
        let meta = GeoReference::new(epsg::WGS84, RasterSize::square(2), GeoTransform::new([4.0, 1.0, 0.0, 52.0, 0.0, -1.0]), None);
        let src = GeoGrid::<u8>::new(meta, vec![1, 2, 3, 4])?;

        // uncovered cells can not be distinguished from valid zeros
        let opts = ReprojectOptions::builder().target_crs(epsg::WGS84).target_pixel_size(0.5).build();
        assert!(matches!(reproject(&src, &opts, &PlateCarreeService), Err(Error::MissingNoDataValue(_))));
        assert!(matches!(
            reproject(&src, &ReprojectOptions::for_crs(epsg::WGS84_WEB_MERCATOR), &PlateCarreeService),
            Err(Error::MissingNoDataValue(_))
        ));

        assert_eq!(reproject(&src, &ReprojectOptions::for_crs(epsg::WGS84), &PlateCarreeService)?, src);
        Ok(())
    }

    #[test_log::test]
    fn geographic_to_geographic_keeps_pixel_size() -> Result<()> {
        let georef = reproject_georeference(wgs84_grid(4.0).metadata(), epsg::ETRS89, None, &PlateCarreeService)?;
        assert_eq!(georef.crs(), Some(epsg::ETRS89));
        assert_relative_eq!(georef.geo_transform().pixel_width(), 1.0);
        assert_eq!(georef.size(), RasterSize::square(2));
        Ok(())
    }

    #[test_log::test]
    fn uncovered_cells_contain_nodata() -> Result<()> {
        let src = wgs84_grid(4.0);
        let opts = ReprojectOptions::builder()
            .target_crs(epsg::WGS84)
            .target_pixel_size(0.5)
            .resample(ResampleAlgorithm::Bilinear)
            .build();

        let result = reproject(&src, &opts, &PlateCarreeService)?;
        // the lower right quadrant only has nodata source cells in reach
        assert_eq!(result.cell_value(Cell::from_row_col(3, 3)), NOD);
        assert_eq!(result.cell_value(Cell::from_row_col(0, 0)), 1.0);
        Ok(())
    }
}
