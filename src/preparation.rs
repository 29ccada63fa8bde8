//! Reusable bracket state for batches that share all but the last coordinate.
//!
//! A [`Preparation`] is built by [`RectilinearGrid::prepare`] and then passed by reference to the
//! prepared entry points. It holds
//!
//! * one bracket per fixed dimension (`0..D-1`), searched once,
//! * one last-dimension bracket per batch point, filled by
//!   [`RectilinearGrid::interp_vec_mon`] and replayed by [`RectilinearGrid::interp_vec_mon_rep`].
//!
//! The state records the axis lengths of the grid it was built on, and every prepared entry point
//! rejects a grid of another shape with [`InterpError::PreparationMismatch`]. It does not remember
//! which coordinates produced it: after changing any fixed coordinate the caller must call
//! [`Preparation::refix`] (or prepare again); a stale preparation interpolates at the old fixed
//! coordinates.

use num_traits::Float;
use tracing::trace;

use crate::algorithms::blend::Bracket;
use crate::errors::InterpError;
use crate::grids::rectilinear::RectilinearGrid;

#[derive(Clone, Debug)]
pub struct Preparation<T, const D: usize>
{
    /// Brackets for dimensions `0..D-1`; slot `D-1` is scratch.
    pub(crate) fixed: [Bracket<T>; D],
    pub(crate) last: Vec<Bracket<T>>,
    pub(crate) cached: bool,
    dims: [usize; D],
}

impl<T: Float, const D: usize> Preparation<T, D>
{
    pub(crate) fn new(grid: &RectilinearGrid<'_, T, D>, fixed: &[T], batch_size: usize) -> Result<Self, InterpError>
    {
        let empty = Bracket { index: 0, weight: T::zero() };
        let mut prep = Self { fixed: [empty; D], last: vec![empty; batch_size], cached: false, dims: *grid.dims() };
        prep.refix(grid, fixed)?;
        trace!(dims = D, batch_size, "prepared fixed-dimension brackets");
        Ok(prep)
    }

    ///
    /// Search the fixed dimensions again for new coordinates, keeping the allocation.
    /// Cached last-dimension brackets depend only on the last coordinates and stay usable.
    ///
    pub fn refix(&mut self, grid: &RectilinearGrid<'_, T, D>, fixed: &[T]) -> Result<(), InterpError>
    {
        self.check_grid(grid)?;
        if fixed.len() + 1 != D
        {
            return Err(InterpError::DimensionMismatch);
        }
        for (k, &x) in fixed.iter().enumerate()
        {
            self.fixed[k] = Bracket::locate(grid.axis(k), x);
        }
        Ok(())
    }

    /// Fails unless `grid` has the axis lengths this state was prepared on.
    #[inline]
    pub(crate) fn check_grid(&self, grid: &RectilinearGrid<'_, T, D>) -> Result<(), InterpError>
    {
        if self.dims == *grid.dims()
        {
            Ok(())
        }
        else
        {
            Err(InterpError::PreparationMismatch)
        }
    }

    /// Axis lengths of the grid this state was prepared on.
    pub fn dims(&self) -> &[usize; D]
    {
        &self.dims
    }

    /// Number of points the last-dimension buffer holds.
    pub fn batch_size(&self) -> usize
    {
        self.last.len()
    }

    /// Whether a monotonic call has filled the last-dimension buffer.
    pub fn is_cached(&self) -> bool
    {
        self.cached
    }

    pub fn fixed_brackets(&self) -> &[Bracket<T>]
    {
        &self.fixed[..D - 1]
    }

    pub fn last_brackets(&self) -> &[Bracket<T>]
    {
        &self.last
    }

    #[inline]
    pub(crate) fn with_last(&self, last: Bracket<T>) -> [Bracket<T>; D]
    {
        let mut brackets = self.fixed;
        brackets[D - 1] = last;
        brackets
    }
}

#[test]
fn check_prepare_locates_fixed_dimensions()
{
    let x = [0.0, 1.0, 2.0, 3.0];
    let y = [0.0, 10.0, 20.0];
    let z = [5.0, 6.0];
    let grid = RectilinearGrid::new([&x[..], &y[..], &z[..]]).unwrap();
    let prep = grid.prepare(&[2.5, 5.0], 8).unwrap();
    assert_eq!(prep.batch_size(), 8);
    assert!(!prep.is_cached());
    assert_eq!(prep.fixed_brackets(), &[Bracket { index: 2, weight: 0.5 }, Bracket { index: 0, weight: 0.5 }]);
}

#[test]
fn check_prepare_rejects_wrong_fixed_count()
{
    let x = [0.0, 1.0];
    let y = [0.0, 1.0];
    let grid = RectilinearGrid::new([&x[..], &y[..]]).unwrap();
    assert_eq!(grid.prepare(&[], 4).unwrap_err(), InterpError::DimensionMismatch);
    assert_eq!(grid.prepare(&[0.5, 0.5], 4).unwrap_err(), InterpError::DimensionMismatch);
    let grid_1d = RectilinearGrid::new([&x[..]]).unwrap();
    assert!(grid_1d.prepare(&[], 4).is_ok());
}

#[test]
fn check_refix_keeps_cached_last_dimension()
{
    let x = [0.0, 1.0, 2.0];
    let y = [0.0, 1.0, 2.0, 3.0];
    let values: Vec<f64> = (0..12).map(|i| i as f64).collect();
    let grid = RectilinearGrid::new([&x[..], &y[..]]).unwrap();
    let mut prep = grid.prepare(&[0.5], 3).unwrap();
    let mut out = [0.0; 3];
    grid.interp_vec_mon(&mut prep, &values, &[0.5, 1.5, 2.5], &mut out).unwrap();
    prep.refix(&grid, &[1.5]).unwrap();
    assert!(prep.is_cached());
    assert_eq!(prep.fixed_brackets()[0], Bracket { index: 1, weight: 0.5 });
    grid.interp_vec_mon_rep(&prep, &values, &mut out).unwrap();
    for (i, &y) in [0.5, 1.5, 2.5].iter().enumerate()
    {
        assert_eq!(out[i], grid.interp(&values, [1.5, y]).unwrap());
    }
}

#[test]
fn check_refix_rejects_other_grid_shape()
{
    let x = [0.0, 1.0, 2.0];
    let y = [0.0, 1.0, 2.0, 3.0];
    let grid = RectilinearGrid::new([&x[..], &y[..]]).unwrap();
    let transposed = RectilinearGrid::new([&y[..], &x[..]]).unwrap();
    let mut prep = grid.prepare(&[0.5], 2).unwrap();
    assert_eq!(prep.dims(), &[3, 4]);
    assert_eq!(prep.refix(&transposed, &[1.5]).unwrap_err(), InterpError::PreparationMismatch);
    assert_eq!(prep.fixed_brackets()[0], Bracket { index: 0, weight: 0.5 });
}
