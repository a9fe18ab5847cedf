//! No-data comparison semantics.
//!
//! A value is considered no-data when it is close to the no-data value:
//! `|value - nodata| <= ABSOLUTE_TOLERANCE + RELATIVE_TOLERANCE * |nodata|`,
//! or when both are NaN.

pub const RELATIVE_TOLERANCE: f64 = 1e-3;
pub const ABSOLUTE_TOLERANCE: f64 = 1e-8;

#[inline]
pub fn is_close(value: f64, nodata: f64) -> bool {
    if value.is_nan() || nodata.is_nan() {
        return value.is_nan() && nodata.is_nan();
    }

    if value == nodata {
        // also covers matching infinities
        return true;
    }

    if value.is_infinite() || nodata.is_infinite() {
        return false;
    }

    (value - nodata).abs() <= ABSOLUTE_TOLERANCE + RELATIVE_TOLERANCE * nodata.abs()
}

/// Always false when no nodata value is set
#[inline]
pub fn is_nodata(value: f64, nodata: Option<f64>) -> bool {
    nodata.is_some_and(|nod| is_close(value, nod))
}
