use rayon::prelude::*;

use planefix_image::Image;

/// Controls how per-row image operations are executed.
///
/// Every strategy produces the same output; they only differ in scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Run sequentially on the current thread.
    #[default]
    Serial,

    /// Use the global Rayon thread pool to process rows in parallel.
    ///
    /// Each row is written by exactly one task.
    ParallelRows,
}

/// Apply a function to every row of an image.
///
/// The closure receives the row index and the interleaved channel data of
/// that row. Nothing is done for an empty image.
pub fn for_each_row<T, const C: usize>(
    dst: &mut Image<T, C>,
    strategy: ExecutionStrategy,
    f: impl Fn(usize, &mut [T]) + Send + Sync,
) where
    T: Send,
{
    let row_len = dst.cols() * C;
    if row_len == 0 || dst.rows() == 0 {
        return;
    }

    let data = dst.as_slice_mut();
    match strategy {
        ExecutionStrategy::Serial => data
            .chunks_exact_mut(row_len)
            .enumerate()
            .for_each(|(y, row)| f(y, row)),
        ExecutionStrategy::ParallelRows => data
            .par_chunks_exact_mut(row_len)
            .enumerate()
            .for_each(|(y, row)| f(y, row)),
    }
}

/// Apply a function to every pixel of an image, together with its coordinates.
///
/// The closure receives `(x, y)` and the channels of that pixel.
pub fn for_each_pixel<T, const C: usize>(
    dst: &mut Image<T, C>,
    strategy: ExecutionStrategy,
    f: impl Fn(usize, usize, &mut [T]) + Send + Sync,
) where
    T: Send,
{
    for_each_row(dst, strategy, |y, row| {
        row.chunks_exact_mut(C)
            .enumerate()
            .for_each(|(x, pixel)| f(x, y, pixel));
    });
}
