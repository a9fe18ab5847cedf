use crate::{Diagnostics, Error, GeoGrid, GridNum, ProjectionService, ResampleAlgorithm, Result};

use super::{AlignmentResult, CropOptions, MismatchDetection, ReprojectOptions, crop_aligned_with_options, reproject};

/// Produces a grid with the structure (raster size, transform and coordinate system) of `structure_src`
/// containing the values of `value_src`.
///
/// `value_src` is first reprojected to the coordinate system of `structure_src`, the result is then
/// resampled with nearest neighbour onto the exact grid of `structure_src`.
/// The result uses the nodata value of `value_src`, which is required unless both grids are already aligned.
pub fn align<T: GridNum, S: ProjectionService>(structure_src: &GeoGrid<T>, value_src: &GeoGrid<T>, service: &S) -> Result<GeoGrid<T>> {
    if value_src.metadata().is_aligned_with(structure_src.metadata()) {
        log::debug!("Value grid is already aligned with the structure grid");
        return Ok(value_src.clone());
    }

    if value_src.nodata().is_none() {
        return Err(Error::MissingNoDataValue(
            "Aligning requires a nodata value on the value grid for the uncovered cells".to_string(),
        ));
    }

    let structure_crs = structure_src.metadata().epsg()?;
    let reprojected = reproject(value_src, &ReprojectOptions::for_crs(structure_crs), service)?;

    let mut result = GeoGrid::filled_with_nodata(structure_src.metadata().copy_with_nodata(value_src.nodata()))?;
    service.resample(&reprojected, &mut result, ResampleAlgorithm::NearestNeighbour)?;
    Ok(result)
}

/// Aligns `src` onto the structure of `mask` and propagates the nodata cells of the mask onto the result.
/// Cells that only lost their value because of the alignment are filled from their neighbours,
/// the artifacts are detected with [`MismatchDetection::SetDifference`].
pub fn align_and_crop<T: GridNum, S: ProjectionService>(
    src: &GeoGrid<T>,
    mask: &GeoGrid<T>,
    service: &S,
    diagnostics: &mut Diagnostics,
) -> Result<AlignmentResult<T>> {
    let aligned = align(mask, src, service)?;
    let opts = CropOptions {
        mismatch_detection: MismatchDetection::SetDifference,
    };

    crop_aligned_with_options(&aligned, mask, &opts, diagnostics)
}
