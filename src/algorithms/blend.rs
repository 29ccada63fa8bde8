//! Corner weights and the weighted sum over the `2^D` vertices of a grid cell.

use num_traits::Float;

use super::search::{binary_search, monotonic_search};

/// Cell index along one dimension together with the fractional position of the query inside it.
///
/// `weight` is the weight of the upper node, `t = (x - grid[index]) / (grid[index+1] - grid[index])`.
/// It is left unclamped, so values outside `[0, 1]` extrapolate linearly.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Bracket<T>
{
    pub index: usize,
    pub weight: T,
}

impl<T: Float> Bracket<T>
{
    #[inline]
    pub fn at(grid: &[T], index: usize, x: T) -> Self
    {
        let lower = grid[index];
        let weight = (x - lower) / (grid[index + 1] - lower);
        Self { index, weight }
    }

    /// Bisect for the cell of `x`.
    #[inline]
    pub fn locate(grid: &[T], x: T) -> Self
    {
        Self::at(grid, binary_search(grid, x), x)
    }

    /// Search for the cell of `x` starting from the cell of a previous query.
    #[inline]
    pub fn follow(grid: &[T], x: T, previous: usize) -> Self
    {
        Self::at(grid, monotonic_search(grid, x, previous), x)
    }
}

/// Weighted sum of the corner values of the cell selected by `brackets`.
///
/// `strides[k]` is the distance in `values` between neighbours along dimension `k`. Bit `k` of a
/// corner number selects the upper node along dimension `k`; its weight is the product of `t_k`
/// or `1 - t_k` over all dimensions, taken in dimension order.
#[inline]
pub fn blend<T: Float, const D: usize>(values: &[T], strides: &[usize; D], brackets: &[Bracket<T>; D]) -> T
{
    let mut origin = 0;
    for k in 0..D
    {
        origin += brackets[k].index * strides[k];
    }
    let mut result = T::zero();
    for corner in 0..(1_usize << D)
    {
        let mut weight = T::one();
        let mut offset = origin;
        for k in 0..D
        {
            if (corner >> k) & 1 == 1
            {
                weight = weight * brackets[k].weight;
                offset += strides[k];
            }
            else
            {
                weight = weight * (T::one() - brackets[k].weight);
            }
        }
        result = result + weight * values[offset];
    }
    result
}

/// Row-major strides for a value array with the given dimension sizes.
pub(crate) fn row_major_strides<const D: usize>(dims: &[usize; D]) -> [usize; D]
{
    let mut strides = [1_usize; D];
    for k in (0..D.saturating_sub(1)).rev()
    {
        strides[k] = strides[k + 1] * dims[k + 1];
    }
    strides
}

#[test]
fn check_bracket_weight_unclamped()
{
    let grid = [1.0, 2.0, 4.0];
    let below = Bracket::locate(&grid, 0.0);
    assert_eq!(below, Bracket { index: 0, weight: -1.0 });
    let above = Bracket::locate(&grid, 8.0);
    assert_eq!(above, Bracket { index: 1, weight: 3.0 });
    let inside = Bracket::locate(&grid, 3.0);
    assert_eq!(inside, Bracket { index: 1, weight: 0.5 });
}

#[test]
fn check_strides()
{
    assert_eq!(row_major_strides(&[7]), [1]);
    assert_eq!(row_major_strides(&[3, 4]), [4, 1]);
    assert_eq!(row_major_strides(&[2, 3, 5]), [15, 5, 1]);
}

#[test]
fn check_blend_1d()
{
    let values = [1.0, 4.0, 9.0, 16.0, 25.0];
    let grid = [1.0, 2.0, 3.0, 4.0, 5.0];
    let strides = [1];
    assert_eq!(blend(&values, &strides, &[Bracket::locate(&grid, 2.5)]), 6.5);
    assert_eq!(blend(&values, &strides, &[Bracket::locate(&grid, 0.0)]), -2.0);
    assert_eq!(blend(&values, &strides, &[Bracket::locate(&grid, 6.0)]), 34.0);
}

#[test]
fn check_blend_bilinear()
{
    let grid = [0.0, 1.0];
    let values = [0.0, 1.0, 1.0, 2.0];
    let strides = row_major_strides(&[2, 2]);
    let brackets = [Bracket::locate(&grid, 0.5), Bracket::locate(&grid, 0.5)];
    assert_eq!(blend(&values, &strides, &brackets), 1.0);
}

#[test]
fn check_blend_at_corners_is_exact()
{
    let x = [0.0, 0.3, 1.1];
    let y = [-2.0, 5.0];
    let z = [1.0, 2.0, 3.0];
    let strides = row_major_strides(&[3, 2, 3]);
    let values: Vec<f64> = (0..18).map(|i| (i as f64).sin() * 10.0).collect();
    for (i, &xi) in x.iter().enumerate()
    {
        for (j, &yj) in y.iter().enumerate()
        {
            for (k, &zk) in z.iter().enumerate()
            {
                let brackets = [Bracket::locate(&x, xi), Bracket::locate(&y, yj), Bracket::locate(&z, zk)];
                let expected = values[i * strides[0] + j * strides[1] + k];
                assert_eq!(blend(&values, &strides, &brackets), expected);
            }
        }
    }
}

#[test]
fn check_blend_nan_propagates()
{
    let grid = [0.0, 1.0, 2.0];
    let values = [0.0, 1.0, 2.0];
    let r = blend(&values, &[1], &[Bracket::locate(&grid, f64::NAN)]);
    assert!(r.is_nan());
}
