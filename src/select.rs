//! Nearest-N selection over culling results
//!
//! After culling, the host keeps only the closest skeletons up to its
//! visible cap. Culled entries never make the cut.

use crate::types::DistanceCullingResult;

/// Indices of the `max_visible` nearest unculled entities, nearest first
///
/// Ties in distance are broken by the lower entity index, so the output is
/// deterministic for a given input.
pub fn nearest_visible(results: &[DistanceCullingResult], max_visible: usize) -> Vec<usize> {
    let mut kept: Vec<DistanceCullingResult> =
        results.iter().filter(|r| !r.is_culled()).copied().collect();

    if kept.len() > max_visible {
        kept.select_nth_unstable_by(max_visible, |a, b| a.cmp_distance(b));
        kept.truncate(max_visible);
    }
    kept.sort_unstable_by(|a, b| a.cmp_distance(b));

    kept.into_iter().map(|r| r.index as usize).collect()
}
