#![warn(clippy::unwrap_used)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Raster grid alignment and reprojection.
//!
//! Reprojects grids to another coordinate reference system or pixel size, resamples one grid
//! onto the layout of another and propagates no-data masks between aligned grids.

pub type Result<T = ()> = std::result::Result<T, Error>;

pub mod algo;
mod cell;
pub mod crs;
mod diagnostics;
mod error;
mod geogrid;
mod georeference;
mod geotransform;
mod gridnum;
pub mod nodata;
pub mod point;
mod rastersize;
mod rect;
mod service;
pub mod srs;
#[cfg(test)]
mod testutils;

#[doc(inline)]
pub use cell::{Cell, CellIterator};
#[doc(inline)]
pub use crs::Epsg;
#[doc(inline)]
pub use diagnostics::{Diagnostic, Diagnostics};
#[doc(inline)]
pub use error::Error;
#[doc(inline)]
pub use geogrid::{GeoGrid, RasterInput};
#[doc(inline)]
pub use georeference::GeoReference;
#[doc(inline)]
pub use geotransform::GeoTransform;
#[doc(inline)]
pub use gridnum::GridNum;
#[doc(inline)]
pub use point::Point;
#[doc(inline)]
pub use rastersize::{Columns, RasterSize, Rows};
#[doc(inline)]
pub use rect::Rect;
#[doc(inline)]
pub use service::{ProjectionService, ResampleAlgorithm};
#[cfg(any(feature = "proj", feature = "proj4rs"))]
#[doc(inline)]
pub use srs::NativeProjectionService;
