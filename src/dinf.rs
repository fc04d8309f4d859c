//! D-infinity flow directions.
//!
//! Each cell drains along the steepest downslope direction found over eight
//! triangular facets, each formed by the cell, one cardinal neighbour and the
//! diagonal neighbour next to it. The direction is a continuous angle rather than
//! one of eight codes.
//!
//! Tarboton, D.G. (1997). A new method for the determination of flow directions
//! and upslope areas in grid digital elevation models. *Water Resources Research*,
//! 33(2), 309-319.
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI, SQRT_2};
use std::sync::atomic::{AtomicUsize, Ordering};

use ndarray::parallel::prelude::*;
use ndarray::{Array2, Axis};
use num::traits::AsPrimitive;

use crate::error::{Error, Result};
use crate::grid::{Dem, FlowDirGrid, FlowDirection, NODATA_DIR, NO_FLOW};
use crate::progress::{LogProgress, Progress};

/// One triangular facet of the 3x3 neighbourhood.
#[derive(Debug, Clone, Copy)]
pub struct Facet {
    /// `(dx, dy)` of the cardinal neighbour, at distance 1.
    pub e1: (isize, isize),
    /// `(dx, dy)` of the diagonal neighbour, at distance 1 from `e1`.
    pub e2: (isize, isize),
    /// Multiple of π/2 added to the facet angle.
    pub quadrant: f64,
    /// Whether the facet angle turns anticlockwise (+1) or clockwise (-1).
    pub sign: f64,
}

/// Table 1 of Tarboton (1997), `dy` negative towards the north.
pub const FACETS: [Facet; 8] = [
    Facet { e1: (1, 0), e2: (1, -1), quadrant: 0.0, sign: 1.0 },
    Facet { e1: (0, -1), e2: (1, -1), quadrant: 1.0, sign: -1.0 },
    Facet { e1: (0, -1), e2: (-1, -1), quadrant: 1.0, sign: 1.0 },
    Facet { e1: (-1, 0), e2: (-1, -1), quadrant: 2.0, sign: -1.0 },
    Facet { e1: (-1, 0), e2: (-1, 1), quadrant: 2.0, sign: 1.0 },
    Facet { e1: (0, 1), e2: (-1, 1), quadrant: 3.0, sign: -1.0 },
    Facet { e1: (0, 1), e2: (1, 1), quadrant: 3.0, sign: 1.0 },
    Facet { e1: (1, 0), e2: (1, 1), quadrant: 4.0, sign: -1.0 },
];

/// Angle pointing off the grid for a cell on its outer ring.
fn edge_angle(x: usize, y: usize, width: usize, height: usize) -> f64 {
    let (west, east) = (x == 0, x == width - 1);
    let (north, south) = (y == 0, y == height - 1);
    if west && north {
        3.0 * FRAC_PI_4
    } else if west && south {
        5.0 * FRAC_PI_4
    } else if east && north {
        FRAC_PI_4
    } else if east && south {
        7.0 * FRAC_PI_4
    } else if west {
        PI
    } else if east {
        0.0
    } else if north {
        FRAC_PI_2
    } else {
        3.0 * FRAC_PI_2
    }
}

/// D-infinity flow direction of cell `(x, y)`.
///
/// The cell must hold a valid elevation. Cells on the edge of the grid drain
/// straight off it and never look at their neighbours, so no-data around the edge
/// does not matter. Interior neighbours are used as they are, which means a very
/// negative no-data value acts as a sink.
///
/// Returns [`FlowDirection::NoFlow`] when no facet slopes downwards.
pub fn dinf_flow_dir<T>(dem: &Dem<'_, T>, x: usize, y: usize) -> FlowDirection
where
    T: AsPrimitive<f64> + PartialEq,
{
    if dem.is_edge(x, y) {
        return FlowDirection::Angle(edge_angle(x, y, dem.width(), dem.height()));
    }

    let at = |(dx, dy): (isize, isize)| -> f64 {
        dem.get((x as isize + dx) as usize, (y as isize + dy) as usize).as_()
    };

    let e0: f64 = dem.get(x, y).as_();
    let mut smax = 0.0;
    let mut steepest: Option<(usize, f64)> = None;
    for (n, facet) in FACETS.iter().enumerate() {
        let e1 = at(facet.e1);
        let e2 = at(facet.e2);
        let s1 = e0 - e1;
        let s2 = e1 - e2;
        let mut r = s2.atan2(s1);
        let s;
        if r < 0.0 {
            // steepest line runs outside the facet, along e1
            r = 0.0;
            s = s1;
        } else if r > FRAC_PI_4 {
            // outside on the diagonal side
            r = FRAC_PI_4;
            s = (e0 - e2) / SQRT_2;
        } else {
            s = (s1 * s1 + s2 * s2).sqrt();
        }
        if s > smax {
            smax = s;
            steepest = Some((n, r));
        }
    }

    match steepest {
        Some((n, r)) => FlowDirection::Angle(FACETS[n].sign * r + FACETS[n].quadrant * FRAC_PI_2),
        None => FlowDirection::NoFlow,
    }
}

/// Fills `flowdirs` with the D-infinity flow direction of every cell of `dem`.
///
/// `flowdirs` must already have the dimensions of `dem`; its no-data value is reset
/// to [`NODATA_DIR`] and every cell is overwritten. Rows are processed in parallel
/// on the current rayon pool.
pub fn dinf_flow_directions<T, P>(
    dem: &Dem<'_, T>, flowdirs: &mut FlowDirGrid, progress: &P
) -> Result<()>
where
    T: AsPrimitive<f64> + PartialEq + Sync,
    P: Progress + ?Sized,
{
    let (width, height) = (dem.width(), dem.height());
    if (flowdirs.height(), flowdirs.width()) != (height, width) {
        return Err(Error::ShapeMismatch {
            expected: (height, width),
            found: (flowdirs.height(), flowdirs.width()),
        });
    }

    log::info!("Calculating Dinf flow directions for a {width}x{height} grid");
    flowdirs.no_data = NODATA_DIR;
    flowdirs.init(NO_FLOW);
    let no_data = flowdirs.no_data;

    let done = AtomicUsize::new(0);
    progress.start(width * height);
    flowdirs
        .dirs_mut()
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(y, mut row)| {
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = if dem.is_no_data(x, y) {
                    no_data
                } else {
                    dinf_flow_dir(dem, x, y).to_cell(no_data)
                };
            }
            progress.update(done.fetch_add(width, Ordering::Relaxed) + width);
        });
    let elapsed = progress.stop();
    log::info!("Dinf flow directions succeeded in {:.3}s", elapsed.as_secs_f64());

    Ok(())
}

/// D-infinity flow directions (in radians) from a DEM.
///
/// Returns the direction grid and its no-data value. Cells that drain nowhere hold
/// [`NO_FLOW`].
///
/// # Parameters
///
/// - `dem`: elevations, indexed `[[row, column]]` with row 0 to the north.
/// - `nodata`: the value marking no-data cells in `dem`.
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use dinf_flow::{dinf_pointer, NO_FLOW};
///
/// let dem = array![
///     [5.0, 5.0, 5.0],
///     [5.0, 1.0, 5.0],
///     [5.0, 5.0, 5.0],
/// ];
/// let (dirs, _nd) = dinf_pointer(&dem, -9999.0).expect("non-empty DEM");
/// assert_eq!(dirs[[1, 1]], NO_FLOW);
/// ```
pub fn dinf_pointer<T>(dem: &Array2<T>, nodata: T) -> Result<(Array2<f64>, f64)>
where
    T: AsPrimitive<f64> + PartialEq + Sync,
{
    let dem = Dem::new(dem.view(), nodata)?;
    let mut flowdirs = FlowDirGrid::like(&dem);
    dinf_flow_directions(&dem, &mut flowdirs, &LogProgress::new())?;
    Ok(flowdirs.into_parts())
}
