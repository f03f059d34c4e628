//! Parallel utilities with feature-gated implementations
//!
//! Grid kernels are written against these helpers so that the same code runs
//! on the rayon pool (feature `rayon`) or sequentially without it.

/// Run `f(row_index, row)` for every `row_len`-sized row of `data` in parallel
#[cfg(feature = "rayon")]
pub fn parallel_rows_mut<T, F>(data: &mut [T], row_len: usize, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    use rayon::prelude::*;
    if row_len == 0 {
        return;
    }
    data.par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(r, row)| f(r, row));
}

/// Sequential row iteration (fallback)
#[cfg(not(feature = "rayon"))]
pub fn parallel_rows_mut<T, F>(data: &mut [T], row_len: usize, f: F)
where
    F: Fn(usize, &mut [T]),
{
    if row_len == 0 {
        return;
    }
    data.chunks_mut(row_len)
        .enumerate()
        .for_each(|(r, row)| f(r, row));
}

/// Parallel sum of `f(i)` for `i` in `0..count`
///
/// The summation order depends on the thread pool, so results are not
/// bit-reproducible across thread counts.
#[cfg(feature = "rayon")]
pub fn parallel_sum<F>(count: usize, f: F) -> f64
where
    F: Fn(usize) -> f64 + Sync + Send,
{
    use rayon::prelude::*;
    (0..count).into_par_iter().map(f).sum()
}

/// Sequential sum (fallback)
#[cfg(not(feature = "rayon"))]
pub fn parallel_sum<F>(count: usize, f: F) -> f64
where
    F: Fn(usize) -> f64,
{
    (0..count).map(f).sum()
}

/// Parallel maximum of `f(i)` for `i` in `0..count` (0 when empty)
#[cfg(feature = "rayon")]
pub fn parallel_max<F>(count: usize, f: F) -> f64
where
    F: Fn(usize) -> f64 + Sync + Send,
{
    use rayon::prelude::*;
    (0..count).into_par_iter().map(f).reduce(|| 0.0, f64::max)
}

/// Sequential maximum (fallback)
#[cfg(not(feature = "rayon"))]
pub fn parallel_max<F>(count: usize, f: F) -> f64
where
    F: Fn(usize) -> f64,
{
    (0..count).map(f).fold(0.0, f64::max)
}
