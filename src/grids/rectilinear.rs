//! Multilinear interpolation and extrapolation on a rectilinear grid.
//!
//! ```rust
//! use gridinterp::grids::rectilinear::RectilinearGrid;
//!
//! let x = [0.0_f64, 1.0, 3.0];
//! let y = [0.0_f64, 2.0];
//! let grid = RectilinearGrid::new([&x[..], &y[..]]).unwrap();
//!
//! // values at (x_i, y_j), last dimension fastest
//! let values = [0.0, 2.0, 1.0, 3.0, 3.0, 5.0];
//! assert_eq!(grid.interp(&values, [2.0, 1.0]).unwrap(), 3.0);
//!
//! // batch sharing x, with sorted y
//! let ys = [0.0, 0.5, 1.0, 4.0];
//! let mut prep = grid.prepare(&[2.0], ys.len()).unwrap();
//! let mut out = [0.0; 4];
//! grid.interp_vec_mon(&mut prep, &values, &ys, &mut out).unwrap();
//! assert_eq!(out, [2.0, 2.5, 3.0, 6.0]);
//! ```

use num_traits::Float;
use tracing::debug;

use crate::algorithms::blend::{blend, row_major_strides, Bracket};
use crate::errors::InterpError;
use crate::preparation::Preparation;

/// Highest dimension count the interpolator is instantiated for.
pub const MAX_DIM: usize = 4;

/// Borrowed view of `D` sorted axes plus the row-major layout of the value array that goes with them.
///
/// Values are not stored here; every entry point takes them as an argument so the caller can update
/// them between calls (value-function iteration) while the grid and any [`Preparation`] stay valid.
///
/// All entry points give bit-identical results for the same query: the prepared and monotonic
/// variants only skip searches, they compute the same brackets and call the same blend.
#[derive(Copy, Clone, Debug)]
pub struct RectilinearGrid<'a, T, const D: usize>
{
    grids: [&'a [T]; D],
    dims: [usize; D],
    strides: [usize; D],
    num_values: usize,
}

pub type Grid1D<'a, T> = RectilinearGrid<'a, T, 1>;
pub type Grid2D<'a, T> = RectilinearGrid<'a, T, 2>;
pub type Grid3D<'a, T> = RectilinearGrid<'a, T, 3>;
pub type Grid4D<'a, T> = RectilinearGrid<'a, T, 4>;

impl<'a, T: Float, const D: usize> RectilinearGrid<'a, T, D>
{
    ///
    /// Build a grid, checking that every axis has at least two strictly increasing entries.
    /// The monotonicity scan is linear in the axis length; build the grid once and reuse it.
    ///
    pub fn new(grids: [&'a [T]; D]) -> Result<Self, InterpError>
    {
        for (k, axis) in grids.iter().enumerate()
        {
            if !axis.windows(2).all(|w| w[0] < w[1])
            {
                debug!(dim = k, len = axis.len(), "rejected axis that is not strictly increasing");
                return Err(InterpError::GridNotIncreasing);
            }
        }
        let grid = Self::from_sorted(grids)?;
        debug!(dims = ?grid.dims, "built rectilinear grid");
        Ok(grid)
    }

    ///
    /// Build a grid from axes the caller already knows to be strictly increasing.
    /// Only the axis lengths are checked; ordering is debug-asserted.
    ///
    pub fn from_sorted(grids: [&'a [T]; D]) -> Result<Self, InterpError>
    {
        const {
            assert!(D > 0 && D <= MAX_DIM, "RectilinearGrid supports 1 to 4 dimensions");
        }
        for (k, axis) in grids.iter().enumerate()
        {
            if axis.len() < 2
            {
                debug!(dim = k, len = axis.len(), "rejected axis with fewer than two nodes");
                return Err(InterpError::GridTooShort);
            }
            debug_assert!(axis.windows(2).all(|w| w[0] < w[1]), "axis {k} is not strictly increasing");
        }
        Ok(Self::from_parts(grids))
    }

    /// Layout for axes that have already passed [`Self::new`].
    pub(crate) fn from_parts(grids: [&'a [T]; D]) -> Self
    {
        let dims = std::array::from_fn(|k| grids[k].len());
        let strides = row_major_strides(&dims);
        let num_values = dims.iter().product();
        Self { grids, dims, strides, num_values }
    }

    pub fn axis(&self, dim: usize) -> &'a [T]
    {
        self.grids[dim]
    }

    pub fn dims(&self) -> &[usize; D]
    {
        &self.dims
    }

    pub fn strides(&self) -> &[usize; D]
    {
        &self.strides
    }

    /// Length the value array must have.
    pub fn num_values(&self) -> usize
    {
        self.num_values
    }

    /// Flat position of grid node `index` in the value array.
    pub fn flat_index(&self, index: [usize; D]) -> usize
    {
        index.iter().zip(self.strides.iter()).map(|(i, s)| i * s).sum()
    }

    #[inline]
    fn check_values(&self, values: &[T]) -> Result<(), InterpError>
    {
        if values.len() != self.num_values
        {
            Err(InterpError::ValuesShapeMismatch)
        }
        else
        {
            Ok(())
        }
    }

    #[inline]
    fn check_batch(xi: &[&[T]; D], out: &[T]) -> Result<(), InterpError>
    {
        if xi.iter().all(|x| x.len() == out.len())
        {
            Ok(())
        }
        else
        {
            Err(InterpError::BatchSizeMismatch)
        }
    }

    #[inline]
    fn locate(&self, x: &[T; D]) -> [Bracket<T>; D]
    {
        std::array::from_fn(|k| Bracket::locate(self.grids[k], x[k]))
    }

    /// Interpolate a single point, bisecting every dimension.
    #[inline]
    pub fn interp(&self, values: &[T], x: [T; D]) -> Result<T, InterpError>
    {
        self.check_values(values)?;
        Ok(blend(values, &self.strides, &self.locate(&x)))
    }

    /// Interpolate a single point without checking the length of `values`.
    #[inline]
    pub fn interp_unchecked(&self, values: &[T], x: [T; D]) -> T
    {
        blend(values, &self.strides, &self.locate(&x))
    }

    /// Interpolate a batch given as one coordinate column per dimension, bisecting every point.
    pub fn interp_vec(&self, values: &[T], xi: [&[T]; D], out: &mut [T]) -> Result<(), InterpError>
    {
        self.check_values(values)?;
        Self::check_batch(&xi, out)?;
        for (i, y) in out.iter_mut().enumerate()
        {
            let x = std::array::from_fn(|k| xi[k][i]);
            *y = blend(values, &self.strides, &self.locate(&x));
        }
        Ok(())
    }

    ///
    /// Interpolate a batch, starting each dimension's search from the previous point's bracket.
    /// Correct for any ordering; fastest when consecutive points are close or sorted.
    ///
    pub fn interp_vec_mon_noprep(&self, values: &[T], xi: [&[T]; D], out: &mut [T]) -> Result<(), InterpError>
    {
        self.check_values(values)?;
        Self::check_batch(&xi, out)?;
        self.eval_following(values, xi, out);
        Ok(())
    }

    fn eval_following(&self, values: &[T], xi: [&[T]; D], out: &mut [T])
    {
        if out.is_empty()
        {
            return;
        }
        let mut brackets: [Bracket<T>; D] = std::array::from_fn(|k| Bracket::locate(self.grids[k], xi[k][0]));
        out[0] = blend(values, &self.strides, &brackets);
        for i in 1..out.len()
        {
            for k in 0..D
            {
                brackets[k] = Bracket::follow(self.grids[k], xi[k][i], brackets[k].index);
            }
            out[i] = blend(values, &self.strides, &brackets);
        }
    }

    ///
    /// Parallel batch interpolation. The batch is split into chunks, each searched with its own
    /// cursor as in [`Self::interp_vec_mon_noprep`], and written to disjoint parts of `out`.
    ///
    #[cfg(feature = "rayon")]
    pub fn interp_vec_par(&self, values: &[T], xi: [&[T]; D], out: &mut [T]) -> Result<(), InterpError>
    where
        T: Send + Sync,
    {
        use rayon::iter::{IndexedParallelIterator, ParallelIterator};
        use rayon::slice::ParallelSliceMut;
        const CHUNK: usize = 1024;
        self.check_values(values)?;
        Self::check_batch(&xi, out)?;
        out.par_chunks_mut(CHUNK).enumerate().for_each(|(c, out_chunk)| {
            let start = c * CHUNK;
            let end = start + out_chunk.len();
            let xi_chunk = std::array::from_fn(|k| &xi[k][start..end]);
            self.eval_following(values, xi_chunk, out_chunk);
        });
        Ok(())
    }

    /// Search the fixed dimensions `0..D-1` at `fixed` and size the last-dimension buffer.
    pub fn prepare(&self, fixed: &[T], batch_size: usize) -> Result<Preparation<T, D>, InterpError>
    {
        Preparation::new(self, fixed, batch_size)
    }

    /// Interpolate one point at the prepared fixed coordinates, bisecting only the last dimension.
    #[inline]
    pub fn interp_prepared(&self, prep: &Preparation<T, D>, values: &[T], x_last: T) -> Result<T, InterpError>
    {
        self.check_values(values)?;
        prep.check_grid(self)?;
        let last = Bracket::locate(self.grids[D - 1], x_last);
        Ok(blend(values, &self.strides, &prep.with_last(last)))
    }

    /// Interpolate a batch at the prepared fixed coordinates, bisecting the last dimension per point.
    pub fn interp_vec_prepared(&self, prep: &Preparation<T, D>, values: &[T], xi_last: &[T], out: &mut [T]) -> Result<(), InterpError>
    {
        self.check_values(values)?;
        prep.check_grid(self)?;
        if xi_last.len() != out.len()
        {
            return Err(InterpError::BatchSizeMismatch);
        }
        let axis = self.grids[D - 1];
        for (y, &x) in out.iter_mut().zip(xi_last)
        {
            *y = blend(values, &self.strides, &prep.with_last(Bracket::locate(axis, x)));
        }
        Ok(())
    }

    ///
    /// Interpolate a batch at the prepared fixed coordinates whose last coordinates are
    /// non-decreasing. The first point is bisected, later points walk on from the previous
    /// bracket. The brackets are kept in `prep` for [`Self::interp_vec_mon_rep`].
    ///
    /// `xi_last` and `out` must both have `prep.batch_size()` entries.
    ///
    pub fn interp_vec_mon(&self, prep: &mut Preparation<T, D>, values: &[T], xi_last: &[T], out: &mut [T]) -> Result<(), InterpError>
    {
        self.check_values(values)?;
        prep.check_grid(self)?;
        if xi_last.len() != prep.batch_size() || out.len() != prep.batch_size()
        {
            return Err(InterpError::BatchSizeMismatch);
        }
        let axis = self.grids[D - 1];
        let mut previous = None;
        for i in 0..xi_last.len()
        {
            let last = match previous
            {
                None => Bracket::locate(axis, xi_last[i]),
                Some(index) => Bracket::follow(axis, xi_last[i], index),
            };
            previous = Some(last.index);
            prep.last[i] = last;
            out[i] = blend(values, &self.strides, &prep.with_last(last));
        }
        prep.cached = true;
        Ok(())
    }

    ///
    /// Repeat the last [`Self::interp_vec_mon`] call against new `values` without any search.
    /// Fails with [`InterpError::PreparationNotCached`] if no monotonic call has filled `prep`.
    ///
    pub fn interp_vec_mon_rep(&self, prep: &Preparation<T, D>, values: &[T], out: &mut [T]) -> Result<(), InterpError>
    {
        self.check_values(values)?;
        prep.check_grid(self)?;
        if !prep.is_cached()
        {
            return Err(InterpError::PreparationNotCached);
        }
        if out.len() != prep.batch_size()
        {
            return Err(InterpError::BatchSizeMismatch);
        }
        for (y, &last) in out.iter_mut().zip(prep.last.iter())
        {
            *y = blend(values, &self.strides, &prep.with_last(last));
        }
        Ok(())
    }

    ///
    /// For each dimension, report whether any coordinate in `xi` lies outside the axis by more
    /// than `atol`, i.e. whether that dimension will be extrapolated. Coordinates on an end node
    /// are in range.
    ///
    pub fn check_bounds(&self, xi: [&[T]; D], atol: T) -> [bool; D]
    {
        std::array::from_fn(|k| {
            let axis = self.grids[k];
            let lo = axis[0];
            let hi = axis[axis.len() - 1];
            xi[k].iter().any(|&x| x - lo < -atol || x - hi > atol)
        })
    }
}


#[cfg(test)]
mod property_tests
{
    use super::tests::reference;
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn axis(max_len: usize) -> impl Strategy<Value = Vec<f64>>
    {
        prop::collection::vec(0.05..3.0_f64, 1..max_len).prop_map(|steps| {
            let mut x = -1.0;
            let mut axis = vec![x];
            for step in steps
            {
                x += step;
                axis.push(x);
            }
            axis
        })
    }

    fn grid_and_values() -> impl Strategy<Value = ([Vec<f64>; 2], Vec<f64>)>
    {
        (axis(8), axis(8)).prop_flat_map(|(a, b)| {
            let n = a.len() * b.len();
            (Just([a, b]), prop::collection::vec(-50.0..50.0_f64, n))
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn interp_matches_reference((axes, values) in grid_and_values(), x in -5.0..25.0_f64, y in -5.0..25.0_f64)
        {
            let grid = Grid2D::new([&axes[0][..], &axes[1][..]]).unwrap();
            let r = grid.interp(&values, [x, y]).unwrap();
            assert_relative_eq!(r, reference(&axes, &values, [x, y]), epsilon = 1e-8, max_relative = 1e-10);
        }

        #[test]
        fn monotonic_matches_bisection((axes, values) in grid_and_values(), x in -5.0..25.0_f64, mut ys in prop::collection::vec(-5.0..25.0_f64, 0..60))
        {
            ys.sort_by(|a, b| a.partial_cmp(b).unwrap());
            let grid = Grid2D::new([&axes[0][..], &axes[1][..]]).unwrap();
            let mut prep = grid.prepare(&[x], ys.len()).unwrap();
            let mut mon = vec![0.0; ys.len()];
            let mut binary = vec![0.0; ys.len()];
            grid.interp_vec_mon(&mut prep, &values, &ys, &mut mon).unwrap();
            grid.interp_vec_prepared(&prep, &values, &ys, &mut binary).unwrap();
            prop_assert_eq!(mon, binary);
        }

        #[test]
        fn nodes_reproduce_values((axes, values) in grid_and_values())
        {
            let grid = Grid2D::new([&axes[0][..], &axes[1][..]]).unwrap();
            for (i, &a) in axes[0].iter().enumerate()
            {
                for (j, &b) in axes[1].iter().enumerate()
                {
                    prop_assert_eq!(grid.interp(&values, [a, b]).unwrap(), values[grid.flat_index([i, j])]);
                }
            }
        }
    }
}
