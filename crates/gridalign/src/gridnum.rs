use std::fmt::Debug;

use num::{NumCast, ToPrimitive};

use crate::{Error, Result, nodata};

/// Cell value types that can be stored in a [`crate::GeoGrid`].
pub trait GridNum: Copy + PartialEq + PartialOrd + Debug + Default + NumCast + ToPrimitive + Send + Sync + 'static {
    const TYPE_NAME: &'static str;
    const IS_INTEGER: bool;

    /// Lossless for all integer types up to 2^53, the precision used for all no-data comparisons
    #[inline]
    fn as_f64(self) -> f64 {
        self.to_f64().unwrap_or(f64::NAN)
    }

    #[inline]
    fn is_nodata_value(self, nodata: Option<f64>) -> bool {
        nodata::is_nodata(self.as_f64(), nodata)
    }

    /// Checks if the nodata value can be stored in this type before it is written to a grid.
    fn nodata_value(nodata: f64) -> Result<Self>;

    /// Converts a resampled value to this type, rounding for integer types.
    /// Returns None when the value does not fit.
    fn from_interpolated(val: f64) -> Option<Self>;
}

macro_rules! impl_gridnum_integer {
    ( $t:ident ) => {
        impl GridNum for $t {
            const TYPE_NAME: &'static str = stringify!($t);
            const IS_INTEGER: bool = true;

            fn nodata_value(nodata: f64) -> Result<Self> {
                if !nodata.is_finite() || nodata.fract() != 0.0 {
                    return Err(Error::NodataNotRepresentable {
                        nodata,
                        dtype: Self::TYPE_NAME,
                    });
                }

                <$t as NumCast>::from(nodata).ok_or(Error::NodataNotRepresentable {
                    nodata,
                    dtype: Self::TYPE_NAME,
                })
            }

            fn from_interpolated(val: f64) -> Option<Self> {
                <$t as NumCast>::from(val.round())
            }
        }
    };
}

macro_rules! impl_gridnum_floating_point {
    ( $t:ident ) => {
        impl GridNum for $t {
            const TYPE_NAME: &'static str = stringify!($t);
            const IS_INTEGER: bool = false;

            fn nodata_value(nodata: f64) -> Result<Self> {
                if nodata.is_finite() && nodata.abs() > $t::MAX as f64 {
                    return Err(Error::NodataNotRepresentable {
                        nodata,
                        dtype: Self::TYPE_NAME,
                    });
                }

                Ok(nodata as $t)
            }

            fn from_interpolated(val: f64) -> Option<Self> {
                if val.is_finite() && val.abs() > $t::MAX as f64 {
                    return None;
                }

                Some(val as $t)
            }
        }
    };
}

impl_gridnum_integer!(u8);
impl_gridnum_integer!(u16);
impl_gridnum_integer!(u32);
impl_gridnum_integer!(u64);
impl_gridnum_integer!(i8);
impl_gridnum_integer!(i16);
impl_gridnum_integer!(i32);
impl_gridnum_integer!(i64);

impl_gridnum_floating_point!(f32);
impl_gridnum_floating_point!(f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_nodata_capability() {
        assert_eq!(u8::nodata_value(255.0).unwrap(), 255);
        assert_eq!(i16::nodata_value(-9999.0).unwrap(), -9999);
        assert!(matches!(u8::nodata_value(-9999.0), Err(Error::NodataNotRepresentable { dtype: "u8", .. })));
        assert!(u8::nodata_value(256.0).is_err());
        assert!(i32::nodata_value(0.5).is_err());
        assert!(i32::nodata_value(f64::NAN).is_err());
    }

    #[test]
    fn float_nodata_capability() {
        assert_eq!(f32::nodata_value(-9999.0).unwrap(), -9999.0);
        assert!(f32::nodata_value(f64::NAN).unwrap().is_nan());
        assert!(f32::nodata_value(1e300).is_err());
        assert_eq!(f64::nodata_value(1e300).unwrap(), 1e300);
    }

    #[test]
    fn interpolated_values() {
        assert_eq!(u8::from_interpolated(2.6), Some(3));
        assert_eq!(u8::from_interpolated(-1.0), None);
        assert_eq!(i32::from_interpolated(f64::NAN), None);
        assert_eq!(f64::from_interpolated(2.6), Some(2.6));
    }
}
