//! Bracket location on a sorted one-dimensional grid.
//!
//! Both searches return the index `i` of the left node of the cell used for a query `x`,
//! always in `0..=n-2`. Queries below the grid use the first cell and queries above use the
//! last one, so the caller extrapolates with the boundary slope.

use num_traits::Float;

/// Bisection search for the cell containing `x`.
///
/// A query equal to an interior node `grid[k]` returns `k`; the last node returns `n-2`.
/// `grid` must hold at least two strictly increasing entries.
#[inline]
pub fn binary_search<T: Float>(grid: &[T], x: T) -> usize
{
    let n = grid.len();
    debug_assert!(n >= 2);
    if x <= grid[0]
    {
        return 0;
    }
    if x >= grid[n - 2]
    {
        return n - 2;
    }
    // invariant: grid[lo] <= x
    let mut lo = 0;
    let mut len = n;
    let mut half = len / 2;
    while half > 0
    {
        let mid = lo + half;
        if grid[mid] <= x
        {
            lo = mid;
        }
        len -= half;
        half = len / 2;
    }
    lo
}

/// Local search starting from a previous bracket `hint`.
///
/// Walks backward while `x < grid[i]` and forward while `x >= grid[i+1]`. For a query that is
/// not smaller than the one that produced `hint` this is one comparison plus the cells crossed.
/// The hint is never trusted: the result matches [`binary_search`] for every non-NaN `x`.
#[inline]
pub fn monotonic_search<T: Float>(grid: &[T], x: T, hint: usize) -> usize
{
    let last = grid.len() - 2;
    let mut i = hint.min(last);
    while i > 0 && x < grid[i]
    {
        i -= 1;
    }
    while i < last && x >= grid[i + 1]
    {
        i += 1;
    }
    i
}

#[test]
fn check_binary_search_interior()
{
    let grid = [1.0, 2.0, 3.0, 4.0, 5.0];
    assert_eq!(binary_search(&grid, 2.5), 1);
    assert_eq!(binary_search(&grid, 1.5), 0);
    assert_eq!(binary_search(&grid, 4.5), 3);
}

#[test]
fn check_binary_search_clamps_out_of_range()
{
    let grid = [1.0, 2.0, 3.0, 4.0, 5.0];
    assert_eq!(binary_search(&grid, -100.0), 0);
    assert_eq!(binary_search(&grid, 0.0), 0);
    assert_eq!(binary_search(&grid, 6.0), 3);
    assert_eq!(binary_search(&grid, 1e300), 3);
}

#[test]
fn check_binary_search_nodes()
{
    let grid = [0.0, 0.1, 0.5, 2.0, 7.0, 7.5];
    for (k, &node) in grid.iter().enumerate()
    {
        let expected = k.min(grid.len() - 2);
        assert_eq!(binary_search(&grid, node), expected);
    }
}

#[test]
fn check_two_point_grid()
{
    let grid = [0.0, 1.0];
    for x in [-3.0, 0.0, 0.3, 1.0, 4.0]
    {
        assert_eq!(binary_search(&grid, x), 0);
        assert_eq!(monotonic_search(&grid, x, 0), 0);
        assert_eq!(monotonic_search(&grid, x, 5), 0);
    }
}

#[test]
fn check_monotonic_search_advances()
{
    let grid = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
    let queries = [-1.0, 0.0, 0.5, 0.5, 1.0, 2.7, 2.7, 4.9, 5.0, 8.0];
    let mut i = 0;
    for x in queries
    {
        i = monotonic_search(&grid, x, i);
        assert_eq!(i, binary_search(&grid, x), "x={x}");
    }
}

#[test]
fn check_monotonic_search_stale_hint()
{
    let grid = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
    assert_eq!(monotonic_search(&grid, 0.5, 4), 0);
    assert_eq!(monotonic_search(&grid, -2.0, 3), 0);
    assert_eq!(monotonic_search(&grid, 3.0, 100), 3);
}

#[test]
fn check_nan_query_stays_in_range()
{
    let grid = [0.0, 1.0, 2.0, 3.0];
    assert!(binary_search(&grid, f64::NAN) <= 2);
    assert!(monotonic_search(&grid, f64::NAN, 1) <= 2);
}
