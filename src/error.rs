use thiserror::Error;

/// Everything that can go wrong before or around a flow direction sweep.
#[derive(Error, Debug)]
pub enum Error {
    #[error("grid has no cells: {width}x{height}")]
    EmptyGrid { width: usize, height: usize },

    #[error("flow direction grid is {found:?} (rows, cols) but the DEM is {expected:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TIFF error: {0}")]
    Tiff(#[from] tiff::TiffError),

    #[error("raster data does not fit its dimensions: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("raster is missing the {0} tag")]
    MissingTag(&'static str),

    #[error("raster sample cannot be represented in the requested type")]
    SampleCast,

    #[error("GeoKey value {0} does not fit in a TIFF SHORT")]
    GeoKey(u64),
}

pub type Result<T> = std::result::Result<T, Error>;
