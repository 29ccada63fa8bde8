//! Multilinear interpolation on rectilinear grids for value-function iteration.
//!
//! The engine locates the cell of a query in each dimension, weights the `2^D` corners and sums
//! them. Queries outside the grid are extrapolated with the slope of the boundary cell.
//!
//! Entry points differ only in which searches they reuse:
//!
//! * [`RectilinearGrid::interp`] / [`RectilinearGrid::interp_vec`] bisect every dimension,
//! * a [`Preparation`] caches the brackets of all but the last dimension,
//! * [`RectilinearGrid::interp_vec_mon`] walks the last dimension of a sorted batch,
//! * [`RectilinearGrid::interp_vec_mon_rep`] replays those brackets against new values.
//!
//! All of them produce identical results for the same query.

pub mod algorithms;
pub mod errors;
pub mod grids;
pub mod interp;
pub mod preparation;
pub mod serialization;

pub use errors::InterpError;
pub use grids::interpolant::Interpolant;
pub use grids::rectilinear::{Grid1D, Grid2D, Grid3D, Grid4D, RectilinearGrid};
pub use preparation::Preparation;
