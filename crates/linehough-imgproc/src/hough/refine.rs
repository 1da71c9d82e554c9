use std::cmp::Ordering;
use std::f32::consts::PI;

use super::accumulator::HoughSpace;
use super::index::CellIndex;

/// Half width of the angular neighbourhood searched around a candidate, five degrees.
const SEARCH_HALF_ANGLE: f32 = PI / 36.0;

#[derive(Debug, Clone, Copy)]
struct CellFit {
    k: usize,
    j: usize,
    members: usize,
    residual: f32,
}

impl CellFit {
    /// More members first, then a tighter fit, then the lower cell index.
    fn rank(&self, other: &Self) -> Ordering {
        other
            .members
            .cmp(&self.members)
            .then(self.residual.total_cmp(&other.residual))
            .then((self.k, self.j).cmp(&(other.k, other.j)))
    }
}

fn fit<F>(
    space: &HoughSpace,
    index: &CellIndex,
    pixels: &[[usize; 2]],
    k: usize,
    j: usize,
    is_active: &F,
) -> CellFit
where
    F: Fn(usize) -> bool,
{
    let (cos, sin) = space.trig(k);
    let rho = space.rho_value(j);

    let mut members = 0;
    let mut residual = 0.0f32;
    for id in index.members(k, j).iter().map(|&id| id as usize) {
        if !is_active(id) {
            continue;
        }
        let [x, y] = pixels[id];
        members += 1;
        residual += (x as f32 * cos + y as f32 * sin - rho).abs();
    }

    CellFit {
        k,
        j,
        members,
        residual,
    }
}

/// Move a candidate cell to the cell of its neighbourhood that fits the active pixels best.
///
/// A collinear run of pixels votes for every cell whose band contains it, so several nearby
/// cells can collect the same number of pixels, some of them mixing two parallel lines. The
/// neighbourhood holds the cells within five degrees of the candidate angle whose distance
/// bucket is at most one away from the bucket of `anchor`. Cells are ranked by active members,
/// then by the summed distance of those members to the cell line, then by index. The search
/// recentres on the winner until it stops moving.
///
/// `anchor` must vote for the candidate cell, so the winner never has fewer active members
/// than the candidate.
pub(crate) fn refine_cell<F>(
    space: &HoughSpace,
    index: &CellIndex,
    pixels: &[[usize; 2]],
    (k, j): (usize, usize),
    anchor: [usize; 2],
    is_active: F,
) -> (usize, usize)
where
    F: Fn(usize) -> bool,
{
    let half_width = ((SEARCH_HALF_ANGLE / space.angle_step()).ceil() as usize).max(1);
    let last_angle = space.num_angles() - 1;
    let last_rho = space.num_rhos() - 1;

    let mut best = fit(space, index, pixels, k, j, &is_active);
    loop {
        let mut next = best;
        for kk in best.k.saturating_sub(half_width)..=(best.k + half_width).min(last_angle) {
            let center = space.rho_index(kk, anchor);
            for jj in center.saturating_sub(1)..=(center + 1).min(last_rho) {
                // the active members are a subset of all the members
                if (index.count(kk, jj) as usize) < next.members {
                    continue;
                }
                let candidate = fit(space, index, pixels, kk, jj, &is_active);
                if candidate.rank(&next) == Ordering::Less {
                    next = candidate;
                }
            }
        }

        if (next.k, next.j) == (best.k, best.j) {
            return (best.k, best.j);
        }
        best = next;
    }
}
