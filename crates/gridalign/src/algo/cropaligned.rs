#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::{Cell, Diagnostics, Error, GeoGrid, GridNum, RasterInput, Result, nodata};

/// How cells that lost their value during alignment are detected
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MismatchDetection {
    /// Repair only when the mask contains more nodata cells than the normalized source.
    /// The normalized source always holds the nodata cells of the mask, so this never triggers a repair
    /// for inputs with a matching layout.
    #[default]
    NodataCount,
    /// Repair every cell that is nodata in the normalized source but valid in the mask
    SetDifference,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CropOptions {
    pub mismatch_detection: MismatchDetection,
}

/// Outcome of [`crop_aligned_with_options`]
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentResult<T: GridNum> {
    pub grid: GeoGrid<T>,
    /// Cells that are nodata in the mask
    pub out_of_domain: usize,
    /// Cells that are valid in the mask but lost their value in the source, whether repaired or not
    pub alignment_artifacts: usize,
    /// Alignment artifacts that were filled from a neighbour
    pub repaired: usize,
}

/// Propagates the nodata cells of `mask` onto `src` using the default [`CropOptions`].
pub fn crop_aligned<'a, T: GridNum>(
    src: impl Into<RasterInput<'a, T>>,
    mask: impl Into<RasterInput<'a, T>>,
    diagnostics: &mut Diagnostics,
) -> Result<GeoGrid<T>> {
    Ok(crop_aligned_with_options(src, mask, &CropOptions::default(), diagnostics)?.grid)
}

/// Propagates the nodata cells of `mask` onto `src`, both inputs must share the same raster layout.
///
/// Every cell that is nodata in the mask or in the source becomes the nodata value of the mask.
/// Cells that are valid in the mask but nodata in the source are considered alignment artifacts
/// and are filled from their neighbours (see [`super::fill_isolated`]) when the selected
/// [`MismatchDetection`] triggers a repair. They are counted in [`AlignmentResult::alignment_artifacts`]
/// either way.
///
/// The result carries the georeference of the mask, or the one of the source when the mask is a plain array,
/// with the nodata value of the mask.
pub fn crop_aligned_with_options<'a, T: GridNum>(
    src: impl Into<RasterInput<'a, T>>,
    mask: impl Into<RasterInput<'a, T>>,
    opts: &CropOptions,
    diagnostics: &mut Diagnostics,
) -> Result<AlignmentResult<T>> {
    let src: RasterInput<'a, T> = src.into();
    let mask: RasterInput<'a, T> = mask.into();
    let src = src.resolve()?;
    let mask = mask.resolve()?;

    if src.meta.size() != mask.meta.size() {
        return Err(Error::MisalignedGrids(format!(
            "Raster sizes differ: {} vs {}",
            src.meta.size(),
            mask.meta.size()
        )));
    }

    if src.georeferenced && mask.georeferenced {
        src.meta.check_aligned_with(&mask.meta)?;
    }

    let mask_nodata = mask
        .meta
        .nodata()
        .ok_or_else(|| Error::MissingNoDataValue("The mask needs a nodata value to crop with".to_string()))?;
    let sentinel = T::nodata_value(mask_nodata)?;

    let mut values: Vec<T> = src
        .values
        .iter()
        .zip(mask.values)
        .map(|(&val, &mask_val)| {
            if mask.is_nodata(mask_val) || src.is_nodata(val) {
                sentinel
            } else {
                val
            }
        })
        .collect();

    let is_sentinel = |val: T| nodata::is_close(val.as_f64(), mask_nodata);
    let count_src_nodata = values.iter().filter(|&&val| is_sentinel(val)).count();
    let count_mask_nodata = mask.values.iter().filter(|&&val| mask.is_nodata(val)).count();

    let mut artifacts = Vec::new();
    let cols = mask.meta.columns().count() as usize;
    if cols > 0 {
        let is_artifact = |val: T, mask_val: T| is_sentinel(val) && !mask.is_nodata(mask_val);

        #[cfg(feature = "rayon")]
        {
            artifacts = values
                .par_chunks(cols)
                .zip(mask.values.par_chunks(cols))
                .enumerate()
                .flat_map_iter(|(row, (src_row, mask_row))| row_artifacts(row, src_row, mask_row, is_artifact))
                .collect();
        }

        #[cfg(not(feature = "rayon"))]
        {
            artifacts = values
                .chunks(cols)
                .zip(mask.values.chunks(cols))
                .enumerate()
                .flat_map(|(row, (src_row, mask_row))| row_artifacts(row, src_row, mask_row, is_artifact))
                .collect();
        }
    }

    let repair = match opts.mismatch_detection {
        MismatchDetection::NodataCount => count_mask_nodata > count_src_nodata,
        MismatchDetection::SetDifference => !artifacts.is_empty(),
    };

    log::debug!(
        "Crop: {count_mask_nodata} nodata cells in mask, {count_src_nodata} in source, {} alignment artifacts (repair: {repair})",
        artifacts.len()
    );

    let repaired = if !repair || artifacts.is_empty() {
        0
    } else {
        super::fill_isolated(&mut values, mask.meta.size(), mask_nodata, &artifacts, diagnostics)?
    };

    let meta = if mask.georeferenced || !src.georeferenced {
        mask.meta
    } else {
        src.meta.copy_with_nodata(Some(mask_nodata))
    };

    Ok(AlignmentResult {
        grid: GeoGrid::new(meta, values)?,
        out_of_domain: count_mask_nodata,
        alignment_artifacts: artifacts.len(),
        repaired,
    })
}

fn row_artifacts<'a, T: GridNum>(
    row: usize,
    src_row: &'a [T],
    mask_row: &'a [T],
    is_artifact: impl Fn(T, T) -> bool + 'a,
) -> impl Iterator<Item = Cell> + 'a {
    src_row
        .iter()
        .zip(mask_row)
        .enumerate()
        .filter(move |(_, (val, mask_val))| is_artifact(**val, **mask_val))
        .map(move |(col, _)| Cell::from_row_col(row as i32, col as i32))
}
