//! Execution backends for the batched distance engine.
//!
//! A backend decides how the rows of an output matrix are scheduled. The
//! choice is made at compile time through the engine's type parameter;
//! [`DefaultBackend`] follows the `parallel` cargo feature.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Schedules the rows of a row-major output buffer.
pub trait Backend: Send + Sync {
    /// Short name used in logs
    const NAME: &'static str;

    /// Call `fill(row_index, row)` once for every `cols`-wide row of `out`.
    ///
    /// `cols` must be non-zero and divide `out.len()`.
    fn fill_rows<F>(&self, out: &mut [f64], cols: usize, fill: F)
    where
        F: Fn(usize, &mut [f64]) + Send + Sync;
}

/// Rows are filled one after the other on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sequential;

impl Backend for Sequential {
    const NAME: &'static str = "sequential";

    fn fill_rows<F>(&self, out: &mut [f64], cols: usize, fill: F)
    where
        F: Fn(usize, &mut [f64]) + Send + Sync,
    {
        for (i, row) in out.chunks_mut(cols).enumerate() {
            fill(i, row);
        }
    }
}

/// Rows are distributed over the rayon thread pool.
#[cfg(feature = "parallel")]
#[derive(Debug, Clone, Copy, Default)]
pub struct Parallel;

#[cfg(feature = "parallel")]
impl Backend for Parallel {
    const NAME: &'static str = "parallel";

    fn fill_rows<F>(&self, out: &mut [f64], cols: usize, fill: F)
    where
        F: Fn(usize, &mut [f64]) + Send + Sync,
    {
        out.par_chunks_mut(cols)
            .enumerate()
            .for_each(|(i, row)| fill(i, row));
    }
}

#[cfg(feature = "parallel")]
pub type DefaultBackend = Parallel;

#[cfg(not(feature = "parallel"))]
pub type DefaultBackend = Sequential;
