use std::f32::consts::PI;

use linehough_image::EdgeMask;

use super::accumulator::{Accumulator, HoughSpace};
use super::error::HoughError;
use super::extract::extract_runs;
use super::index::CellIndex;
use super::params::HoughLinesParams;
use super::refine::refine_cell;
use super::types::LineSegment;
use crate::parallel::ExecutionStrategy;

/// Find line segments by accumulating every edge pixel before extracting.
///
/// Cells reaching `params.threshold` are visited in descending vote order (ties by cell index).
/// Each visited cell is moved to the best fitting cell nearby before its runs are extracted.
/// The pixels of an emitted segment withdraw their votes from every cell, and a cell left with
/// fewer than `params.threshold` votes is skipped, so a pixel is never reported twice.
/// `params.random_seed` is ignored, the result is fully deterministic.
///
/// # Arguments
///
/// * `src` - The binary edge mask.
/// * `params` - The detection parameters.
/// * `strategy` - How the per-angle indexing is scheduled across threads.
///
/// # Errors
///
/// Returns [`HoughError::InvalidParameter`] when the parameters are out of range, the mask
/// has zero area or holds too many edge pixels to index, and [`HoughError::Parallel`] when the
/// thread pool cannot be built.
pub fn hough_lines_segments_exhaustive(
    src: &EdgeMask,
    params: &HoughLinesParams,
    strategy: ExecutionStrategy,
) -> Result<Vec<LineSegment>, HoughError> {
    params.validate(src)?;

    let pixels = src.edge_pixels().collect::<Vec<_>>();
    if pixels.is_empty() {
        return Ok(Vec::new());
    }

    let space = HoughSpace::new(src.size(), params.rho, params.theta, 0.0, PI)?;
    let index = CellIndex::new(&space, &pixels, strategy)?;
    let mut acc = Accumulator::from_index(&space, &index);

    let mut cells = acc.cells_above(params.threshold);
    cells.sort_by(|a, b| b.2.cmp(&a.2).then((a.0, a.1).cmp(&(b.0, b.1))));

    log::debug!(
        "exhaustive hough: {} edge pixels, {} candidate cells",
        pixels.len(),
        cells.len()
    );

    let mut consumed = vec![false; pixels.len()];
    let mut segments = Vec::new();

    for (k, j, _) in cells {
        // votes of consumed pixels are withdrawn, this is the number of unused members
        if acc.get(k, j) < params.threshold {
            continue;
        }
        let Some(anchor) = index
            .members(k, j)
            .iter()
            .map(|&i| i as usize)
            .find(|&i| !consumed[i])
        else {
            continue;
        };

        let (k, j) = refine_cell(&space, &index, &pixels, (k, j), pixels[anchor], |i| {
            !consumed[i]
        });
        let candidates = index
            .members(k, j)
            .iter()
            .map(|&i| i as usize)
            .filter(|&i| !consumed[i])
            .map(|i| (i, pixels[i]));
        let runs = extract_runs(
            &space,
            k,
            j,
            candidates,
            params.min_line_length,
            params.max_line_gap,
        );

        for run in runs {
            for &member in &run.members {
                consumed[member] = true;
                for kk in 0..space.num_angles() {
                    acc.decrement(kk, space.rho_index(kk, pixels[member]));
                }
            }
            log::trace!(
                "segment {:?} -> {:?} from cell ({}, {})",
                run.segment.p0,
                run.segment.p1,
                k,
                j
            );
            segments.push(run.segment);

            if params.max_lines.is_some_and(|max| segments.len() >= max) {
                return Ok(segments);
            }
        }
    }

    log::debug!("exhaustive hough: {} segments", segments.len());

    Ok(segments)
}
