use linehough_image::EdgeMask;

use super::accumulator::{accumulate, Accumulator, HoughSpace};
use super::error::HoughError;
use super::params::HoughLinesStandardParams;
use super::types::HoughLine;
use crate::parallel::ExecutionStrategy;

/// Find infinite lines in a binary edge mask with the standard Hough transform.
///
/// Every edge pixel votes in every angle bucket of `[min_theta, max_theta)`. A cell is kept when
/// it has at least `params.threshold` votes and no cell within `params.nms_radius` buckets has
/// more votes; equal neighbours are resolved in favour of the lower cell index.
///
/// # Arguments
///
/// * `src` - The binary edge mask.
/// * `params` - The detection parameters.
/// * `strategy` - How the accumulation is scheduled across threads.
///
/// # Returns
///
/// The lines sorted by votes, strongest first.
///
/// # Errors
///
/// Returns [`HoughError::InvalidParameter`] when the parameters are out of range or the mask
/// has zero area, and [`HoughError::Parallel`] when the thread pool cannot be built.
///
/// # Examples
///
/// ```
/// use linehough_image::{EdgeMask, ImageSize};
/// use linehough_imgproc::draw::draw_line;
/// use linehough_imgproc::hough::{hough_lines, HoughLinesStandardParams};
/// use linehough_imgproc::parallel::ExecutionStrategy;
///
/// let mut mask = EdgeMask::from_size_val(ImageSize { width: 100, height: 100 }, false);
/// draw_line(&mut mask, [0, 40], [99, 40]);
///
/// let params = HoughLinesStandardParams {
///     threshold: 80,
///     ..Default::default()
/// };
///
/// let lines = hough_lines(&mask, &params, ExecutionStrategy::Serial).unwrap();
/// assert_eq!(lines[0].votes, 100);
/// assert_eq!(lines[0].rho, 40.0);
/// ```
pub fn hough_lines(
    src: &EdgeMask,
    params: &HoughLinesStandardParams,
    strategy: ExecutionStrategy,
) -> Result<Vec<HoughLine>, HoughError> {
    params.validate(src)?;

    let pixels = src.edge_pixels().collect::<Vec<_>>();
    if pixels.is_empty() {
        return Ok(Vec::new());
    }

    let space = HoughSpace::new(
        src.size(),
        params.rho,
        params.theta,
        params.min_theta,
        params.max_theta,
    )?;
    let acc = accumulate(&space, &pixels, strategy)?;

    let mut peaks = acc
        .cells_above(params.threshold)
        .into_iter()
        .filter(|&(k, j, votes)| is_local_maximum(&acc, &space, k, j, votes, params.nms_radius))
        .collect::<Vec<_>>();
    peaks.sort_by(|a, b| b.2.cmp(&a.2).then((a.0, a.1).cmp(&(b.0, b.1))));

    if let Some(max_lines) = params.max_lines {
        peaks.truncate(max_lines);
    }

    log::debug!(
        "standard hough: {} edge pixels, {} lines",
        pixels.len(),
        peaks.len()
    );

    Ok(peaks
        .into_iter()
        .map(|(k, j, votes)| HoughLine {
            rho: space.rho_value(j),
            theta: space.angle(k),
            votes,
        })
        .collect())
}

fn is_local_maximum(
    acc: &Accumulator,
    space: &HoughSpace,
    k: usize,
    j: usize,
    votes: u32,
    radius: usize,
) -> bool {
    let k_range = k.saturating_sub(radius)..=(k + radius).min(space.num_angles() - 1);
    for kk in k_range {
        let j_range = j.saturating_sub(radius)..=(j + radius).min(space.num_rhos() - 1);
        for jj in j_range {
            if (kk, jj) == (k, j) {
                continue;
            }
            let other = acc.get(kk, jj);
            if other > votes || (other == votes && (kk, jj) < (k, j)) {
                return false;
            }
        }
    }
    true
}
