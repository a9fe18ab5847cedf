use std::fmt::Debug;

use approx::{AbsDiffEq, RelativeEq};

use crate::{Cell, Error, Point, Result};

/// Affine mapping from grid cell indices to world coordinates.
///
/// The coefficients are stored in the order:
/// `[origin x, pixel width, row rotation, origin y, column rotation, pixel height]`.
/// The pixel height is negative for north-up grids.
#[derive(Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoTransform([f64; 6]);

impl GeoTransform {
    pub const fn new(coefficients: [f64; 6]) -> Self {
        GeoTransform(coefficients)
    }

    /// Creates a north-up transform without rotation
    pub fn north_up(origin: Point, pixel_width: f64, pixel_height: f64) -> Self {
        Self::new([origin.x(), pixel_width, 0.0, origin.y(), 0.0, pixel_height])
    }

    pub const fn origin_x(&self) -> f64 {
        self.0[0]
    }

    pub const fn pixel_width(&self) -> f64 {
        self.0[1]
    }

    pub const fn row_rotation(&self) -> f64 {
        self.0[2]
    }

    pub const fn origin_y(&self) -> f64 {
        self.0[3]
    }

    pub const fn col_rotation(&self) -> f64 {
        self.0[4]
    }

    pub const fn pixel_height(&self) -> f64 {
        self.0[5]
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.origin_x(), self.origin_y())
    }

    pub fn has_rotation(&self) -> bool {
        self.row_rotation() != 0.0 || self.col_rotation() != 0.0
    }

    /// Returns the coefficients of the transformation.
    pub const fn coefficients(&self) -> [f64; 6] {
        self.0
    }

    /// Both pixel sizes have to be finite and non zero
    pub fn validate(&self) -> Result<()> {
        let valid = |v: f64| v.is_finite() && v != 0.0;
        if !valid(self.pixel_width()) || !valid(self.pixel_height()) {
            return Err(Error::DegenerateGeometry(format!("Invalid pixel size in {self:?}")));
        }

        if self.0.iter().any(|v| !v.is_finite()) {
            return Err(Error::DegenerateGeometry(format!("Non finite coefficient in {self:?}")));
        }

        Ok(())
    }

    /// Translates fractional cell coordinates to a point.
    /// Position (0, 0) is the upper left corner of the upper left cell.
    pub fn apply(&self, col: f64, row: f64) -> Point {
        let x = self.0[0] + self.0[1] * col + self.0[2] * row;
        let y = self.0[3] + self.0[4] * col + self.0[5] * row;
        Point::new(x, y)
    }

    /// The upper left corner of the cell
    pub fn apply_to_cell(&self, cell: Cell) -> Point {
        self.apply(cell.col as f64, cell.row as f64)
    }

    pub fn cell_center(&self, cell: Cell) -> Point {
        self.apply(cell.col as f64 + 0.5, cell.row as f64 + 0.5)
    }

    pub fn invert(&self) -> Result<Self> {
        let gt_in = &self.0;

        if gt_in[2] == 0.0 && gt_in[4] == 0.0 && gt_in[1] != 0.0 && gt_in[5] != 0.0 {
            // No rotation, avoid the determinant to keep full precision
            return Ok(GeoTransform([
                -gt_in[0] / gt_in[1],
                1.0 / gt_in[1],
                0.0,
                -gt_in[3] / gt_in[5],
                0.0,
                1.0 / gt_in[5],
            ]));
        }

        let det = gt_in[1] * gt_in[5] - gt_in[2] * gt_in[4];
        let magnitude = f64::max(f64::max(gt_in[1].abs(), gt_in[2].abs()), f64::max(gt_in[4].abs(), gt_in[5].abs()));

        if det.abs() <= 1e-10 * magnitude * magnitude {
            return Err(Error::DegenerateGeometry(format!(
                "Determinant of {self:?} is too small, cannot compute inverse"
            )));
        }

        let inv_det = 1.0 / det;

        let mut gt_out = [0.0; 6];
        gt_out[1] = gt_in[5] * inv_det;
        gt_out[4] = -gt_in[4] * inv_det;

        gt_out[2] = -gt_in[2] * inv_det;
        gt_out[5] = gt_in[1] * inv_det;

        gt_out[0] = (gt_in[2] * gt_in[3] - gt_in[0] * gt_in[5]) * inv_det;
        gt_out[3] = (-gt_in[1] * gt_in[3] + gt_in[0] * gt_in[4]) * inv_det;

        Ok(gt_out.into())
    }
}

impl From<[f64; 6]> for GeoTransform {
    fn from(coefficients: [f64; 6]) -> Self {
        GeoTransform(coefficients)
    }
}

impl From<GeoTransform> for [f64; 6] {
    fn from(geo_trans: GeoTransform) -> [f64; 6] {
        geo_trans.0
    }
}

impl Debug for GeoTransform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "GeoTransform(origin: ({}, {}), pixel_width: {}, pixel_height: {}, rotation: ({}, {}))",
            self.0[0], self.0[3], self.0[1], self.0[5], self.0[2], self.0[4]
        )
    }
}

impl AbsDiffEq for GeoTransform {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.0.abs_diff_eq(&other.0, epsilon)
    }
}

impl RelativeEq for GeoTransform {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: Self::Epsilon, max_relative: Self::Epsilon) -> bool {
        self.0.relative_eq(&other.0, epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn cell_center_adds_half_a_pixel() {
        let trans = GeoTransform::new([0.0, 10.0, 0.0, 100.0, 0.0, -10.0]);
        assert_eq!(trans.cell_center(Cell::from_row_col(0, 0)), Point::new(5.0, 95.0));
        assert_eq!(trans.cell_center(Cell::from_row_col(2, 1)), Point::new(15.0, 75.0));
        assert_eq!(trans.apply_to_cell(Cell::from_row_col(2, 1)), Point::new(10.0, 80.0));
        assert_eq!(GeoTransform::north_up(Point::new(0.0, 100.0), 10.0, -10.0), trans);
        assert!(!trans.has_rotation());
    }

    #[test]
    fn rotation_terms() {
        let trans = GeoTransform::new([100.0, 2.0, 0.5, 200.0, 0.25, -2.0]);
        // x = origin_x + col * pixel_width + row * row_rotation
        // y = origin_y + col * col_rotation + row * pixel_height
        assert_eq!(trans.apply(3.0, 4.0), Point::new(100.0 + 6.0 + 2.0, 200.0 + 0.75 - 8.0));
        assert!(trans.has_rotation());
    }

    #[test]
    fn invert_round_trip() {
        for trans in [
            GeoTransform::new([22000.0, 100.0, 0.0, 245000.0, 0.0, -100.0]),
            GeoTransform::new([100.0, 2.0, 0.5, 200.0, 0.25, -2.0]),
        ] {
            let inv = trans.invert().unwrap();
            let p = trans.apply(12.5, 7.25);
            assert_relative_eq!(inv.apply(p.x(), p.y()), Point::new(12.5, 7.25), epsilon = 1e-9);
        }
    }

    #[test]
    fn invert_degenerate() {
        let trans = GeoTransform::new([0.0, 1.0, 1.0, 0.0, 1.0, 1.0]);
        assert!(matches!(trans.invert(), Err(Error::DegenerateGeometry(_))));
    }

    #[test]
    fn validate_pixel_size() {
        assert!(GeoTransform::new([0.0, 10.0, 0.0, 100.0, 0.0, -10.0]).validate().is_ok());
        assert!(GeoTransform::new([0.0, 0.0, 0.0, 100.0, 0.0, -10.0]).validate().is_err());
        assert!(GeoTransform::new([0.0, 10.0, 0.0, 100.0, 0.0, 0.0]).validate().is_err());
        assert!(GeoTransform::new([f64::NAN, 10.0, 0.0, 100.0, 0.0, -10.0]).validate().is_err());
    }
}
