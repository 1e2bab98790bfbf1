use rayon::prelude::*;

/// Controls how row-wise operations are executed.
///
/// Every output row of a morphological transform depends only on the read-only source image, so
/// rows can be written in any order. Both strategies produce identical results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Run sequentially on the current thread.
    #[default]
    Serial,

    /// Use the global Rayon thread pool to process output rows in parallel.
    ///
    /// Useful for large images; small images are usually faster with
    /// [`ExecutionStrategy::Serial`].
    ParallelRows,
}

/// Apply `f` to every row of a flat, row-major buffer.
///
/// # Arguments
///
/// * `dst` - The buffer to write, holding a whole number of rows.
/// * `row_len` - The number of elements in a row (width * channels).
/// * `strategy` - How to schedule the rows.
/// * `f` - Called with the row index and the mutable row slice.
pub fn for_each_row<T: Send>(
    dst: &mut [T],
    row_len: usize,
    strategy: ExecutionStrategy,
    f: impl Fn(usize, &mut [T]) + Send + Sync,
) {
    if row_len == 0 {
        return;
    }

    match strategy {
        ExecutionStrategy::Serial => dst
            .chunks_exact_mut(row_len)
            .enumerate()
            .for_each(|(row, chunk)| f(row, chunk)),
        ExecutionStrategy::ParallelRows => dst
            .par_chunks_exact_mut(row_len)
            .enumerate()
            .for_each(|(row, chunk)| f(row, chunk)),
    }
}
