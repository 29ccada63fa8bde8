use gridinterp::{errors::InterpError, Interpolant};

///
/// A small cake-eating problem solved by value-function iteration on a non-uniform wealth grid.
/// Consumption choices are searched on a fixed sorted grid of savings shares, so the next-period
/// wealth levels for each node form a sorted batch and their brackets can be cached once.
///
fn main() -> Result<(), InterpError>
{
    let beta = 0.95;
    let n = 100;
    let wealth: Vec<f64> = (0..n).map(|i| 0.01 + 10.0 * (i as f64 / (n - 1) as f64).powi(2)).collect();
    let shares: Vec<f64> = (1..200).map(|j| j as f64 / 200.0).collect();

    let mut v = Interpolant::from_fn([wealth.clone()], |[w]| w.ln())?;

    // next-period wealth is share * w: sorted in share, so one monotonic pass per node fills the cache
    let mut preps = Vec::with_capacity(n);
    let mut continuation = vec![0.0; shares.len()];
    for &w in &wealth
    {
        let next: Vec<f64> = shares.iter().map(|s| s * w).collect();
        let mut prep = v.prepare(&[], next.len())?;
        v.interp_vec_mon(&mut prep, &next, &mut continuation)?;
        preps.push(prep);
    }

    for iteration in 0..500
    {
        let mut updated = vec![0.0; n];
        for (i, &w) in wealth.iter().enumerate()
        {
            // only the values changed since the last sweep: replay the cached brackets
            v.interp_vec_mon_rep(&preps[i], &mut continuation)?;
            updated[i] = shares
                .iter()
                .zip(&continuation)
                .map(|(s, cont)| ((1.0 - s) * w).ln() + beta * cont)
                .fold(f64::NEG_INFINITY, f64::max);
        }
        let change = updated.iter().zip(v.values()).map(|(a, b)| (a - b).abs()).fold(0.0, f64::max);
        v.set_values(updated)?;
        if change < 1e-8
        {
            println!("converged after {} iterations", iteration + 1);
            break;
        }
    }

    for w in [0.5, 1.0, 5.0, 12.0]
    {
        println!("v({w}) = {:.6}", v.interp([w]));
    }
    Ok(())
}
