//! Grid types shared by the D-infinity solver and its callers.
//!
//! Cells are addressed as `(x, y)` with `x` the column and `y` the row, row 0
//! being the northern edge of the raster. The underlying arrays are indexed the
//! ndarray way, `[[row, column]]`.
use ndarray::{Array2, ArrayView2};

use crate::error::{Error, Result};

/// Value stored for cells that had no elevation.
pub const NODATA_DIR: f64 = -2.0;

/// Value stored for cells with no downslope facet (pits and flats).
pub const NO_FLOW: f64 = -1.0;

/// Read-only view of an elevation raster together with its no-data value.
#[derive(Debug, Clone, Copy)]
pub struct Dem<'a, T> {
    cells: ArrayView2<'a, T>,
    no_data: T,
}

impl<'a, T: Copy + PartialEq> Dem<'a, T> {
    /// Wraps `cells`, refusing rasters without any cells.
    pub fn new(cells: ArrayView2<'a, T>, no_data: T) -> Result<Self> {
        let (height, width) = cells.dim();
        if width == 0 || height == 0 {
            return Err(Error::EmptyGrid { width, height });
        }
        Ok(Dem { cells, no_data })
    }

    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    pub fn no_data(&self) -> T {
        self.no_data
    }

    /// Elevation at column `x`, row `y`. Panics when out of range.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        self.cells[[y, x]]
    }

    #[inline]
    pub fn is_no_data(&self, x: usize, y: usize) -> bool {
        self.get(x, y) == self.no_data
    }

    /// True when `(x, y)` lies on the outer ring of the raster.
    #[inline]
    pub fn is_edge(&self, x: usize, y: usize) -> bool {
        x == 0 || y == 0 || x == self.width() - 1 || y == self.height() - 1
    }
}

/// Outcome of the flow direction computation for one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlowDirection {
    /// Radians in `[0, 2π)`, 0 pointing east and increasing anticlockwise.
    Angle(f64),
    /// Valid elevation but nothing lower in any facet.
    NoFlow,
    /// The elevation was no-data.
    NoData,
}

impl FlowDirection {
    /// Numeric encoding used in a [`FlowDirGrid`] whose no-data value is `no_data`.
    pub fn to_cell(self, no_data: f64) -> f64 {
        match self {
            FlowDirection::Angle(a) => a,
            FlowDirection::NoFlow => NO_FLOW,
            FlowDirection::NoData => no_data,
        }
    }

    pub fn from_cell(value: f64, no_data: f64) -> Self {
        if value == no_data {
            FlowDirection::NoData
        } else if value == NO_FLOW {
            FlowDirection::NoFlow
        } else {
            FlowDirection::Angle(value)
        }
    }
}

/// Output raster of D-infinity flow directions.
///
/// The storage is always in standard (row-major) layout, which lets the sweep hand
/// each worker a whole row.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowDirGrid {
    dirs: Array2<f64>,
    pub no_data: f64,
}

impl FlowDirGrid {
    /// New grid with `no_data` set to [`NODATA_DIR`] and every cell at [`NO_FLOW`].
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::EmptyGrid { width, height });
        }
        Ok(FlowDirGrid {
            dirs: Array2::from_elem((height, width), NO_FLOW),
            no_data: NODATA_DIR,
        })
    }

    /// Grid with the same dimensions as `dem`.
    pub fn like<T: Copy + PartialEq>(dem: &Dem<'_, T>) -> Self {
        FlowDirGrid {
            dirs: Array2::from_elem((dem.height(), dem.width()), NO_FLOW),
            no_data: NODATA_DIR,
        }
    }

    pub fn width(&self) -> usize {
        self.dirs.ncols()
    }

    pub fn height(&self) -> usize {
        self.dirs.nrows()
    }

    /// Sets every cell to `value`.
    pub fn init(&mut self, value: f64) {
        self.dirs.fill(value);
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.dirs[[y, x]]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: f64) {
        self.dirs[[y, x]] = value;
    }

    pub fn direction(&self, x: usize, y: usize) -> FlowDirection {
        FlowDirection::from_cell(self.get(x, y), self.no_data)
    }

    pub fn dirs(&self) -> &Array2<f64> {
        &self.dirs
    }

    pub(crate) fn dirs_mut(&mut self) -> &mut Array2<f64> {
        &mut self.dirs
    }

    /// Splits the grid into its array and no-data value.
    pub fn into_parts(self) -> (Array2<f64>, f64) {
        (self.dirs, self.no_data)
    }
}
