use thiserror::Error;

use crate::{Cell, Epsg};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid coordinate reference system: {0}")]
    InvalidCrs(String),
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),
    #[error("Grids are not aligned: {0}")]
    MisalignedGrids(String),
    #[error("Missing nodata value: {0}")]
    MissingNoDataValue(String),
    #[error("Nodata value {nodata} can not be represented as {dtype}")]
    NodataNotRepresentable { nodata: f64, dtype: &'static str },
    #[error("{} isolated cell(s) could not be filled (first: {:?})", .0.len(), .0.first())]
    IsolatedCells(Vec<Cell>),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Runtime error: {0}")]
    Runtime(String),
    #[cfg(feature = "proj4rs")]
    #[error("Proj4rs error: {0}")]
    Proj4rs(#[from] proj4rs::errors::Error),
    #[cfg(feature = "proj")]
    #[error("Proj error: {0}")]
    Proj(#[from] proj::ProjError),
    #[cfg(feature = "proj")]
    #[error("Proj creation error: {0}")]
    ProjCreate(#[from] proj::ProjCreateError),
}

impl Error {
    pub(crate) fn unknown_epsg(epsg: Epsg) -> Self {
        Error::InvalidCrs(format!("{epsg} could not be resolved"))
    }
}
