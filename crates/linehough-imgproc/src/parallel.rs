use rayon::prelude::*;
use thiserror::Error;

/// Errors raised while scheduling row-parallel work.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// Rayon could not build the local pool.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// A local pool was requested with zero threads.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),

    /// The buffer was split with a zero row length.
    #[error("row stride must be > 0, got {0}")]
    InvalidRowStride(usize),
}

/// Scheduling of the row-parallel accumulation passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecutionStrategy {
    /// Use the global Rayon thread pool to process rows in parallel.
    ///
    /// Each row is owned by exactly one worker, so no synchronization is needed on writes.
    #[default]
    ParallelRows,

    /// Process the rows one after another on the caller's thread.
    ///
    /// Small masks with few angle buckets usually run faster this way.
    Serial,

    /// Build a dedicated pool of `n` workers for this call only.
    ///
    /// The pool is rebuilt on every invocation, keep it for benchmarks and tests.
    Fixed(usize),
}

/// Apply a function to every row of a row-major buffer with the given strategy.
///
/// The closure receives the row index and a mutable view of the row.
///
/// # Arguments
///
/// * `data` - The row-major buffer.
/// * `stride` - The number of elements per row.
/// * `strategy` - How the rows are scheduled.
/// * `f` - The operation to perform on each row.
///
/// # Errors
///
/// Returns an error if the stride is zero or a local thread pool cannot be built.
pub fn par_iter_rows_indexed_mut<T, F>(
    data: &mut [T],
    stride: usize,
    strategy: ExecutionStrategy,
    f: F,
) -> Result<(), ParallelError>
where
    T: Send,
    F: Fn(usize, &mut [T]) + Send + Sync,
{
    if stride == 0 {
        return Err(ParallelError::InvalidRowStride(stride));
    }

    match strategy {
        ExecutionStrategy::Serial => {
            data.chunks_mut(stride)
                .enumerate()
                .for_each(|(row, chunk)| f(row, chunk));
        }
        ExecutionStrategy::ParallelRows => {
            data.par_chunks_mut(stride)
                .enumerate()
                .for_each(|(row, chunk)| f(row, chunk));
        }
        ExecutionStrategy::Fixed(n) => {
            if n == 0 {
                return Err(ParallelError::InvalidThreadCount(n));
            }
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| ParallelError::BuildError(e.to_string()))?;

            pool.install(|| {
                data.par_chunks_mut(stride)
                    .enumerate()
                    .for_each(|(row, chunk)| f(row, chunk));
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_with_row_index(strategy: ExecutionStrategy) -> Result<Vec<usize>, ParallelError> {
        let mut data = vec![0usize; 6];
        par_iter_rows_indexed_mut(&mut data, 2, strategy, |row, chunk| {
            chunk.iter_mut().for_each(|v| *v = row * 10);
        })?;
        Ok(data)
    }

    #[test]
    fn test_rows_serial() -> Result<(), ParallelError> {
        let data = fill_with_row_index(ExecutionStrategy::Serial)?;
        assert_eq!(data, vec![0, 0, 10, 10, 20, 20]);
        Ok(())
    }

    #[test]
    fn test_rows_parallel() -> Result<(), ParallelError> {
        let data = fill_with_row_index(ExecutionStrategy::ParallelRows)?;
        assert_eq!(data, vec![0, 0, 10, 10, 20, 20]);
        Ok(())
    }

    #[test]
    fn test_rows_fixed_success() -> Result<(), ParallelError> {
        let data = fill_with_row_index(ExecutionStrategy::Fixed(2))?;
        assert_eq!(data, vec![0, 0, 10, 10, 20, 20]);
        Ok(())
    }

    #[test]
    fn test_rows_fixed_error() {
        let res = fill_with_row_index(ExecutionStrategy::Fixed(0));
        assert_eq!(res, Err(ParallelError::InvalidThreadCount(0)));
    }

    #[test]
    fn test_rows_invalid_stride() {
        let mut data = vec![1u32; 4];
        let res = par_iter_rows_indexed_mut(&mut data, 0, ExecutionStrategy::Serial, |_, _| {});
        assert_eq!(res, Err(ParallelError::InvalidRowStride(0)));
    }
}
