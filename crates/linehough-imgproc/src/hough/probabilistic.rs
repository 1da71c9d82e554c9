use std::f32::consts::PI;

use linehough_image::EdgeMask;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::accumulator::{Accumulator, HoughSpace};
use super::error::HoughError;
use super::extract::extract_runs;
use super::index::CellIndex;
use super::params::HoughLinesParams;
use super::refine::refine_cell;
use super::types::LineSegment;
use crate::parallel::ExecutionStrategy;

/// Voting state of an edge pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PixelState {
    /// Not sampled yet.
    Pending,
    /// Sampled, its votes are in the accumulator.
    Voted,
    /// Part of an emitted segment, no longer votes.
    Consumed,
}

/// Find line segments in a binary edge mask with the progressive probabilistic Hough transform.
///
/// The sampling order is drawn from a [`StdRng`] seeded with `params.random_seed`, or from the
/// OS entropy source when no seed is given. Use [`hough_lines_segments_with_rng`] to inject
/// another random source.
///
/// # Arguments
///
/// * `src` - The binary edge mask.
/// * `params` - The detection parameters.
///
/// # Returns
///
/// The detected segments in detection order. An empty vector means no line was found.
///
/// # Errors
///
/// Returns [`HoughError::InvalidParameter`] when the parameters are out of range or the mask
/// has zero area.
///
/// # Examples
///
/// ```
/// use linehough_image::{EdgeMask, ImageSize};
/// use linehough_imgproc::draw::draw_line;
/// use linehough_imgproc::hough::{hough_lines_segments, HoughLinesParams, LineSegment};
///
/// let mut mask = EdgeMask::from_size_val(ImageSize { width: 20, height: 20 }, false);
/// draw_line(&mut mask, [0, 0], [19, 19]);
///
/// let params = HoughLinesParams {
///     threshold: 10,
///     min_line_length: 15,
///     max_line_gap: 0,
///     random_seed: Some(42),
///     ..Default::default()
/// };
///
/// let segments = hough_lines_segments(&mask, &params).unwrap();
/// assert_eq!(segments, vec![LineSegment::new([0, 0], [19, 19])]);
/// ```
pub fn hough_lines_segments(
    src: &EdgeMask,
    params: &HoughLinesParams,
) -> Result<Vec<LineSegment>, HoughError> {
    let mut rng = match params.random_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    hough_lines_segments_with_rng(src, params, &mut rng)
}

/// Find line segments with the progressive probabilistic Hough transform using the given
/// random source for the sampling order.
///
/// Edge pixels are visited in a random order. Each visited pixel votes in every angle bucket.
/// When its strongest cell reaches `params.threshold`, the cell is moved to the best fitting cell
/// nearby and the pixels voting for it are split into runs separated by more than `params.max_line_gap` missing pixels. Runs covering at
/// least `params.min_line_length` pixels are emitted and their pixels stop voting, withdrawing
/// the votes already cast.
///
/// The result only depends on the inputs and the sequence produced by `rng`.
///
/// # Errors
///
/// Returns [`HoughError::InvalidParameter`] when the parameters are out of range, the mask
/// has zero area or holds too many edge pixels to index.
pub fn hough_lines_segments_with_rng<R>(
    src: &EdgeMask,
    params: &HoughLinesParams,
    rng: &mut R,
) -> Result<Vec<LineSegment>, HoughError>
where
    R: Rng + ?Sized,
{
    params.validate(src)?;

    let pixels = src.edge_pixels().collect::<Vec<_>>();
    if pixels.is_empty() {
        return Ok(Vec::new());
    }

    let space = HoughSpace::new(src.size(), params.rho, params.theta, 0.0, PI)?;
    let index = CellIndex::new(&space, &pixels, ExecutionStrategy::Serial)?;
    let mut acc = Accumulator::new(&space);

    log::debug!(
        "probabilistic hough: {} edge pixels, accumulator {}x{}",
        pixels.len(),
        space.num_angles(),
        space.num_rhos()
    );

    let mut order = (0..pixels.len()).collect::<Vec<_>>();
    order.shuffle(rng);

    let mut states = vec![PixelState::Pending; pixels.len()];
    let mut segments = Vec::new();
    let mut extractions = 0usize;

    for id in order {
        if states[id] != PixelState::Pending {
            continue;
        }

        let pixel = pixels[id];
        states[id] = PixelState::Voted;

        // strongest cell among the ones this pixel voted for, first angle wins ties
        let mut best: Option<(usize, usize, u32)> = None;
        for k in 0..space.num_angles() {
            let j = space.rho_index(k, pixel);
            let votes = acc.increment(k, j);
            if best.map_or(true, |(_, _, v)| votes > v) {
                best = Some((k, j, votes));
            }
        }

        let Some((k, j, votes)) = best else {
            continue;
        };
        if votes < params.threshold {
            continue;
        }

        extractions += 1;
        let (k, j) = refine_cell(&space, &index, &pixels, (k, j), pixel, |i| {
            states[i] != PixelState::Consumed
        });
        let candidates = index
            .members(k, j)
            .iter()
            .map(|&i| i as usize)
            .filter(|&i| states[i] != PixelState::Consumed)
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
                if states[member] == PixelState::Voted {
                    for kk in 0..space.num_angles() {
                        acc.decrement(kk, space.rho_index(kk, pixels[member]));
                    }
                }
                states[member] = PixelState::Consumed;
            }

            log::trace!(
                "segment {:?} -> {:?} from cell ({}, {}) with {} pixels",
                run.segment.p0,
                run.segment.p1,
                k,
                j,
                run.members.len()
            );
            segments.push(run.segment);

            if params.max_lines.is_some_and(|max| segments.len() >= max) {
                log::debug!("probabilistic hough: reached max_lines after {extractions} candidates");
                return Ok(segments);
            }
        }
    }

    log::debug!(
        "probabilistic hough: {} segments from {} candidates",
        segments.len(),
        extractions
    );

    Ok(segments)
}
