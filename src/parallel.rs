//! Parallel batch execution
//!
//! Splits the output buffer into fixed-size chunks with rayon and runs the
//! dispatcher's range kernel on each chunk. Chunks are disjoint `&mut`
//! slices, so workers never share an output slot.

use crate::batch::{CullingJob, NametagJob};
use crate::error::{KernelError, KernelResult};
use crate::kernels::Dispatcher;
use crate::types::{DistanceCullingResult, NametagResult};
use rayon::prelude::*;

/// Entities per worker chunk, same granularity as the host job scheduler
pub const DEFAULT_BATCH_SIZE: usize = 128;

fn check_batch(batch_size: usize, expected: usize, actual: usize) -> KernelResult<()> {
    if batch_size == 0 {
        return Err(KernelError::InvalidBatchSize);
    }
    if expected != actual {
        return Err(KernelError::LengthMismatch {
            what: "results",
            expected,
            actual,
        });
    }
    Ok(())
}

/// Cull the whole batch across the rayon pool
///
/// # Errors
/// - [`KernelError::InvalidBatchSize`] if `batch_size == 0`
/// - [`KernelError::LengthMismatch`] if `results.len() != job.len()`
pub fn cull_parallel(
    dispatcher: &Dispatcher,
    job: &CullingJob<'_>,
    results: &mut [DistanceCullingResult],
    batch_size: usize,
) -> KernelResult<()> {
    check_batch(batch_size, job.len(), results.len())?;

    results
        .par_chunks_mut(batch_size)
        .enumerate()
        .try_for_each(|(chunk, out)| dispatcher.execute_culling_range(job, chunk * batch_size, out))
}

/// Project every nametag in the batch across the rayon pool
///
/// # Errors
/// - [`KernelError::InvalidBatchSize`] if `batch_size == 0`
/// - [`KernelError::LengthMismatch`] if `results.len() != job.len()`
pub fn project_nametags_parallel(
    dispatcher: &Dispatcher,
    job: &NametagJob<'_>,
    results: &mut [NametagResult],
    batch_size: usize,
) -> KernelResult<()> {
    check_batch(batch_size, job.len(), results.len())?;

    results
        .par_chunks_mut(batch_size)
        .enumerate()
        .try_for_each(|(chunk, out)| dispatcher.execute_nametags_range(job, chunk * batch_size, out))
}

/// Cull into a freshly allocated buffer
///
/// # Errors
/// Propagates [`cull_parallel`] errors
pub fn cull_batch_parallel(
    dispatcher: &Dispatcher,
    job: &CullingJob<'_>,
) -> KernelResult<Vec<DistanceCullingResult>> {
    let mut results = vec![DistanceCullingResult::default(); job.len()];
    cull_parallel(dispatcher, job, &mut results, DEFAULT_BATCH_SIZE)?;
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::NametagParams;
    use crate::types::Float3;
    use glam::Vec3;

    #[test]
    fn test_parallel_matches_sequential() {
        let n = 1000;
        let x: Vec<f32> = (0..n).map(|i| (i as f32 * 0.37).sin() * 200.0).collect();
        let y: Vec<f32> = (0..n).map(|i| (i as f32 * 0.11).cos() * 20.0).collect();
        let z: Vec<f32> = (0..n).map(|i| i as f32 * 0.25 - 100.0).collect();
        let job = CullingJob::new(Vec3::new(5.0, 1.0, -3.0), 150.0 * 150.0, &x, &y, &z).unwrap();
        let d = Dispatcher::new();

        let mut sequential = vec![DistanceCullingResult::default(); n];
        d.execute_culling(&job, &mut sequential, 0..n).unwrap();

        for batch in [1, 7, 128, 5000] {
            let mut parallel = vec![DistanceCullingResult::default(); n];
            cull_parallel(&d, &job, &mut parallel, batch).unwrap();
            assert_eq!(parallel, sequential, "batch size {batch}");
        }

        assert_eq!(cull_batch_parallel(&d, &job).unwrap(), sequential);
    }

    #[test]
    fn test_nametags_parallel_matches_sequential() {
        let positions: Vec<Float3> = (0..300)
            .map(|i| Float3::new((i % 17) as f32 - 8.0, 0.0, (i % 23) as f32 + 1.0))
            .collect();
        let params = NametagParams {
            camera_forward: Vec3::Z,
            ..Default::default()
        };
        let job = NametagJob::new(params, &positions).unwrap();
        let d = Dispatcher::new();

        let mut sequential = vec![NametagResult::default(); positions.len()];
        d.execute_nametags(&job, &mut sequential, 0..positions.len()).unwrap();

        let mut parallel = vec![NametagResult::default(); positions.len()];
        project_nametags_parallel(&d, &job, &mut parallel, DEFAULT_BATCH_SIZE).unwrap();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_rejects_zero_batch_and_bad_length() {
        let x = [0.0f32; 4];
        let job = CullingJob::new(Vec3::ZERO, 1.0, &x, &x, &x).unwrap();
        let d = Dispatcher::generic();

        let mut results = vec![DistanceCullingResult::default(); 4];
        assert_eq!(
            cull_parallel(&d, &job, &mut results, 0),
            Err(KernelError::InvalidBatchSize)
        );

        let mut short = vec![DistanceCullingResult::default(); 3];
        assert!(matches!(
            cull_parallel(&d, &job, &mut short, 2),
            Err(KernelError::LengthMismatch { .. })
        ));
    }
}
