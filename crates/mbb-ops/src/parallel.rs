//! Row- and task-level parallelism using Rayon.
//!
//! With the `parallel` feature (default) output rows of a separable pass are
//! filled with `par_chunks_mut`, and independent pyramids are built with
//! `rayon::join`. Without it the same closures run sequentially. Each output
//! sample is computed by the same arithmetic in the same order either way, so
//! results are bit-identical.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Calls `f(y, row)` for every `row_len`-sized chunk of `dst`.
pub(crate) fn for_each_row<F>(dst: &mut [f32], row_len: usize, f: F)
where
    F: Fn(usize, &mut [f32]) + Send + Sync,
{
    #[cfg(feature = "parallel")]
    dst.par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| f(y, row));

    #[cfg(not(feature = "parallel"))]
    dst.chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| f(y, row));
}

/// Runs two independent closures, potentially in parallel.
pub(crate) fn join<A, B, RA, RB>(a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    #[cfg(feature = "parallel")]
    {
        rayon::join(a, b)
    }

    #[cfg(not(feature = "parallel"))]
    {
        (a(), b())
    }
}
