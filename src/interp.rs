//! Free-function entry points for fixed dimension counts.
//!
//! These wrap [`RectilinearGrid::from_sorted`], so axes are only length-checked. Callers that
//! cannot vouch for ordering should build a [`RectilinearGrid`] with [`RectilinearGrid::new`] once
//! and call its methods instead.

use num_traits::Float;

use crate::errors::InterpError;
use crate::grids::rectilinear::RectilinearGrid;
use crate::preparation::Preparation;

#[inline]
pub fn interp_1d<T: Float>(grid: &[T], values: &[T], x: T) -> Result<T, InterpError>
{
    RectilinearGrid::from_sorted([grid])?.interp(values, [x])
}

#[inline]
pub fn interp_2d<T: Float>(grid1: &[T], grid2: &[T], values: &[T], x1: T, x2: T) -> Result<T, InterpError>
{
    RectilinearGrid::from_sorted([grid1, grid2])?.interp(values, [x1, x2])
}

#[inline]
#[allow(clippy::too_many_arguments)]
pub fn interp_3d<T: Float>(grid1: &[T], grid2: &[T], grid3: &[T], values: &[T], x1: T, x2: T, x3: T) -> Result<T, InterpError>
{
    RectilinearGrid::from_sorted([grid1, grid2, grid3])?.interp(values, [x1, x2, x3])
}

#[inline]
#[allow(clippy::too_many_arguments)]
pub fn interp_4d<T: Float>(grid1: &[T], grid2: &[T], grid3: &[T], grid4: &[T], values: &[T], x1: T, x2: T, x3: T, x4: T) -> Result<T, InterpError>
{
    RectilinearGrid::from_sorted([grid1, grid2, grid3, grid4])?.interp(values, [x1, x2, x3, x4])
}

pub fn interp_1d_vec<T: Float>(grid: &[T], values: &[T], xi: &[T], out: &mut [T]) -> Result<(), InterpError>
{
    RectilinearGrid::from_sorted([grid])?.interp_vec(values, [xi], out)
}

pub fn interp_2d_vec<T: Float>(grid1: &[T], grid2: &[T], values: &[T], xi1: &[T], xi2: &[T], out: &mut [T]) -> Result<(), InterpError>
{
    RectilinearGrid::from_sorted([grid1, grid2])?.interp_vec(values, [xi1, xi2], out)
}

#[allow(clippy::too_many_arguments)]
pub fn interp_3d_vec<T: Float>(grid1: &[T], grid2: &[T], grid3: &[T], values: &[T], xi1: &[T], xi2: &[T], xi3: &[T], out: &mut [T]) -> Result<(), InterpError>
{
    RectilinearGrid::from_sorted([grid1, grid2, grid3])?.interp_vec(values, [xi1, xi2, xi3], out)
}

/// Sorted 1D batch; `prep` comes from `RectilinearGrid::prepare(&[], xi.len())` on the same axis.
pub fn interp_1d_vec_mon<T: Float>(prep: &mut Preparation<T, 1>, grid: &[T], values: &[T], xi: &[T], out: &mut [T]) -> Result<(), InterpError>
{
    RectilinearGrid::from_sorted([grid])?.interp_vec_mon(prep, values, xi, out)
}

/// Replays the brackets cached by [`interp_1d_vec_mon`] against new `values`.
pub fn interp_1d_vec_mon_rep<T: Float>(prep: &Preparation<T, 1>, grid: &[T], values: &[T], out: &mut [T]) -> Result<(), InterpError>
{
    RectilinearGrid::from_sorted([grid])?.interp_vec_mon_rep(prep, values, out)
}

#[test]
fn check_free_functions()
{
    let x = [1.0, 2.0, 3.0, 4.0, 5.0];
    let squares = [1.0, 4.0, 9.0, 16.0, 25.0];
    assert_eq!(interp_1d(&x, &squares, 2.5).unwrap(), 6.5);
    assert_eq!(interp_1d(&x, &squares, 0.0).unwrap(), -2.0);
    assert_eq!(interp_1d(&x, &squares, 6.0).unwrap(), 34.0);

    let unit = [0.0, 1.0];
    assert_eq!(interp_2d(&unit, &unit, &[0.0, 1.0, 1.0, 2.0], 0.5, 0.5).unwrap(), 1.0);
    let sum3: Vec<f64> = (0..8).map(|c: usize| c.count_ones() as f64).collect();
    assert_eq!(interp_3d(&unit, &unit, &unit, &sum3, 0.5, 0.5, 0.5).unwrap(), 1.5);
    let sum4: Vec<f64> = (0..16).map(|c: usize| c.count_ones() as f64).collect();
    assert_eq!(interp_4d(&unit, &unit, &unit, &unit, &sum4, 0.25, 0.25, 0.25, 0.25).unwrap(), 1.0);
}

#[test]
fn check_free_vector_functions()
{
    let x = [1.0, 2.0, 3.0, 4.0, 5.0];
    let squares = [1.0, 4.0, 9.0, 16.0, 25.0];
    let xi = [0.0, 1.5, 2.5, 6.0];
    let mut out = [0.0; 4];
    interp_1d_vec(&x, &squares, &xi, &mut out).unwrap();
    assert_eq!(out, [-2.0, 2.5, 6.5, 34.0]);

    let mut prep = RectilinearGrid::new([&x[..]]).unwrap().prepare(&[], xi.len()).unwrap();
    let mut mon = [0.0; 4];
    interp_1d_vec_mon(&mut prep, &x, &squares, &xi, &mut mon).unwrap();
    assert_eq!(mon, out);

    let doubled: Vec<f64> = squares.iter().map(|v| 2.0 * v).collect();
    interp_1d_vec_mon_rep(&prep, &x, &doubled, &mut mon).unwrap();
    assert_eq!(mon, [-4.0, 5.0, 13.0, 68.0]);

    let unit = [0.0, 1.0];
    let mut out2 = [0.0; 2];
    interp_2d_vec(&unit, &unit, &[0.0, 1.0, 1.0, 2.0], &[0.5, 2.0], &[0.5, 2.0], &mut out2).unwrap();
    assert_eq!(out2, [1.0, 4.0]);

    let sum3: Vec<f64> = (0..8).map(|c: usize| c.count_ones() as f64).collect();
    let mut out3 = [0.0; 2];
    interp_3d_vec(&unit, &unit, &unit, &sum3, &[0.0, 1.0], &[0.5, 1.0], &[-1.0, 1.0], &mut out3).unwrap();
    assert_eq!(out3, [-0.5, 3.0]);
}

#[test]
fn check_free_functions_reject_short_grid()
{
    assert_eq!(interp_1d(&[1.0], &[1.0], 0.5).unwrap_err(), InterpError::GridTooShort);
}
