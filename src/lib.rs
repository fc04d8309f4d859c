//! # dinf-flow
//!
//! `dinf-flow` computes D-infinity flow directions
//! ([Tarboton, 1997](https://doi.org/10.1029/96WR03137)) for digital elevation models held
//! in `ndarray` arrays. Every cell gets a continuous flow angle in radians, 0 pointing east
//! and increasing anticlockwise (north is π/2), instead of one of eight D8 codes.  Cells on
//! the edge of the grid drain straight off it, cells with nothing lower around them get
//! [`NO_FLOW`] and no-data cells get [`NODATA_DIR`].
//!
//! The grid is swept in parallel with rayon.  GeoTIFF helpers are included so DEMs can be
//! read from, and directions written to, files.
//!
//! ## Example
//!
//! ```
//! use ndarray::Array2;
//! use dinf_flow::dinf_pointer;
//!
//! let dem = Array2::from_shape_vec(
//!     (3, 4),
//!     vec![
//!         9.0, 8.0, 7.0, 6.0,
//!         9.0, 8.0, 7.0, 6.0,
//!         9.0, 8.0, 7.0, 6.0,
//!     ],
//! ).expect("Failed to create DEM");
//!
//! let (dirs, _nodata) = dinf_pointer(&dem, -9999.0).expect("Failed to compute directions");
//! // interior cells drain east, down the ramp
//! assert_eq!(dirs[[1, 1]], 0.0);
//! ```
pub mod dinf;
pub mod error;
pub mod grid;
pub mod progress;
pub mod raster;

pub use dinf::{dinf_flow_dir, dinf_flow_directions, dinf_pointer, Facet, FACETS};
pub use error::{Error, Result};
pub use grid::{Dem, FlowDirGrid, FlowDirection, NODATA_DIR, NO_FLOW};
pub use progress::{LogProgress, NoProgress, Progress};
pub use raster::{array_to_rasterfile, rasterfile_to_array, RasterSample};
