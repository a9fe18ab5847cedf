//! Resampling kernel used by the native projection service.
//!
//! The destination cell centers are transformed to the source coordinate system one row at a time,
//! afterwards every destination cell is sampled independently from the source grid.

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::{Cell, GeoGrid, GridNum, Point, Rect, ResampleAlgorithm, Result};

/// Cubic convolution parameter
const CUBIC_A: f64 = -0.5;
const MIN_WEIGHT: f64 = 1e-12;

/// Resample `src` onto the grid of `dst`.
///
/// `transform` converts points from the coordinate system of `dst` to the one of `src` in place.
/// Destination cells that are not covered by valid source data keep their current value.
pub fn warp<T, F>(src: &GeoGrid<T>, dst: &mut GeoGrid<T>, algo: ResampleAlgorithm, mut transform: F) -> Result<()>
where
    T: GridNum,
    F: FnMut(&mut [Point]) -> Result<()>,
{
    let dst_meta = *dst.metadata();
    let rows = dst_meta.rows().count();
    let cols = dst_meta.columns().count();
    if rows <= 0 || cols <= 0 || src.size().is_empty() {
        return Ok(());
    }

    let world_to_pixel = src.geo_transform().invert()?;

    // fractional (col, row) position in the source grid for every destination cell center
    let mut positions = Vec::with_capacity(dst_meta.size().cell_count());
    let mut points = Vec::with_capacity(cols as usize);
    for row in 0..rows {
        points.clear();
        points.extend((0..cols).map(|col| dst_meta.cell_center(Cell::from_row_col(row, col))));
        transform(&mut points)?;
        positions.extend(points.iter().map(|p| world_to_pixel.apply(p.x(), p.y())));
    }

    let sampler = Sampler { src, algo };
    let row_len = cols as usize;

    #[cfg(feature = "rayon")]
    dst.values_mut()
        .par_chunks_mut(row_len)
        .zip(positions.par_chunks(row_len))
        .for_each(|(values, positions)| sampler.sample_row(values, positions));

    #[cfg(not(feature = "rayon"))]
    dst.values_mut()
        .chunks_mut(row_len)
        .zip(positions.chunks(row_len))
        .for_each(|(values, positions)| sampler.sample_row(values, positions));

    Ok(())
}

/// Shifts longitudes by a full turn when that moves them inside the extent of a geographic source grid.
/// Used for grids with longitudes outside of [-180, 180].
pub fn wrap_longitudes(points: &mut [Point], extent: &Rect) {
    let lon_range = extent.min_x()..extent.max_x();
    for point in points.iter_mut() {
        if lon_range.contains(&point.x()) {
            continue;
        }

        for shift in [360.0, -360.0] {
            if lon_range.contains(&(point.x() + shift)) {
                *point = Point::new(point.x() + shift, point.y());
                break;
            }
        }
    }
}

struct Sampler<'a, T: GridNum> {
    src: &'a GeoGrid<T>,
    algo: ResampleAlgorithm,
}

impl<T: GridNum> Sampler<'_, T> {
    fn sample_row(&self, values: &mut [T], positions: &[Point]) {
        for (val, pos) in values.iter_mut().zip(positions) {
            if let Some(sample) = self.sample(*pos) {
                *val = sample;
            }
        }
    }

    fn sample(&self, pos: Point) -> Option<T> {
        let size = self.src.size();
        if !pos.x().is_finite()
            || !pos.y().is_finite()
            || pos.x() < 0.0
            || pos.y() < 0.0
            || pos.x() >= size.cols.count() as f64
            || pos.y() >= size.rows.count() as f64
        {
            return None;
        }

        match self.algo {
            ResampleAlgorithm::NearestNeighbour => self.nearest(pos),
            ResampleAlgorithm::Bilinear => self.bilinear(pos),
            ResampleAlgorithm::Cubic => self.cubic(pos),
        }
    }

    fn valid_value(&self, cell: Cell) -> Option<f64> {
        if !cell.is_in_raster(self.src.size()) {
            return None;
        }

        let val = self.src.cell_value(cell);
        if self.src.is_nodata(val) { None } else { Some(val.as_f64()) }
    }

    fn nearest(&self, pos: Point) -> Option<T> {
        let cell = Cell::from_row_col(pos.y().floor() as i32, pos.x().floor() as i32);
        let val = self.src.cell_value(cell);
        if self.src.is_nodata(val) { None } else { Some(val) }
    }

    fn bilinear(&self, pos: Point) -> Option<T> {
        let px = pos.x() - 0.5;
        let py = pos.y() - 0.5;
        let col = px.floor();
        let row = py.floor();
        let fx = px - col;
        let fy = py - row;

        let weights = [
            (0, 0, (1.0 - fx) * (1.0 - fy)),
            (0, 1, fx * (1.0 - fy)),
            (1, 0, (1.0 - fx) * fy),
            (1, 1, fx * fy),
        ];

        self.weighted_sum(
            weights
                .iter()
                .map(|&(d_row, d_col, weight)| (Cell::from_row_col(row as i32 + d_row, col as i32 + d_col), weight)),
        )
    }

    fn cubic(&self, pos: Point) -> Option<T> {
        let px = pos.x() - 0.5;
        let py = pos.y() - 0.5;
        let col = px.floor();
        let row = py.floor();
        let fx = px - col;
        let fy = py - row;

        let neighbours = itertools::iproduct!(-1..=2, -1..=2).map(|(d_row, d_col)| {
            let weight = cubic_kernel(d_col as f64 - fx) * cubic_kernel(d_row as f64 - fy);
            (Cell::from_row_col(row as i32 + d_row, col as i32 + d_col), weight)
        });

        self.weighted_sum(neighbours)
    }

    /// Weighted average over the valid source cells, the weights are renormalized
    /// so nodata and out of bounds cells do not pull the result towards zero.
    fn weighted_sum(&self, neighbours: impl Iterator<Item = (Cell, f64)>) -> Option<T> {
        let (sum, weight_sum) = neighbours
            .filter(|(_, weight)| *weight != 0.0)
            .filter_map(|(cell, weight)| self.valid_value(cell).map(|val| (val * weight, weight)))
            .fold((0.0, 0.0), |(sum, weight_sum), (val, weight)| (sum + val, weight_sum + weight));

        if weight_sum.abs() < MIN_WEIGHT {
            return None;
        }

        T::from_interpolated(sum / weight_sum)
    }
}

/// Keys cubic convolution kernel
fn cubic_kernel(x: f64) -> f64 {
    let x = x.abs();
    if x <= 1.0 {
        ((CUBIC_A + 2.0) * x - (CUBIC_A + 3.0)) * x * x + 1.0
    } else if x < 2.0 {
        ((CUBIC_A * x - 5.0 * CUBIC_A) * x + 8.0 * CUBIC_A) * x - 4.0 * CUBIC_A
    } else {
        0.0
    }
}
