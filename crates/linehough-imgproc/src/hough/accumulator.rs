use linehough_image::ImageSize;

use super::error::HoughError;
use super::index::CellIndex;
use crate::parallel::{self, ExecutionStrategy};

/// Upper bound on the number of accumulator cells allocated for a single invocation.
const MAX_ACCUMULATOR_CELLS: f64 = (1u64 << 28) as f64;

/// Fraction of an angle bucket ignored when counting buckets, absorbs `f32` rounding of `theta`.
const ANGLE_BUCKET_SLACK: f64 = 1e-4;

/// Discretization of Hough space for a given image size.
///
/// Angle buckets are `min_theta + k * theta` for every `k` with `k * theta < max_theta - min_theta`.
/// Distance buckets are centered on multiples of `rho`, `rho_j = (j - offset) * rho`, and cover
/// `[-diagonal, diagonal]`.
#[derive(Debug, Clone)]
pub(crate) struct HoughSpace {
    rho: f32,
    theta: f32,
    rho_offset: usize,
    num_rhos: usize,
    angles: Vec<f32>,
    cos_table: Vec<f32>,
    sin_table: Vec<f32>,
}

impl HoughSpace {
    pub fn new(
        size: ImageSize,
        rho: f32,
        theta: f32,
        min_theta: f32,
        max_theta: f32,
    ) -> Result<Self, HoughError> {
        // sized in f64 so tiny resolutions are rejected before any integer conversion
        let angle_ratio = (max_theta as f64 - min_theta as f64) / theta as f64;
        let num_angles = (angle_ratio - ANGLE_BUCKET_SLACK).ceil().max(1.0);
        let rho_offset = (size.diagonal() as f64 / rho as f64).ceil();
        let num_rhos = 2.0 * rho_offset + 1.0;

        let num_cells = num_angles * num_rhos;
        if num_cells > MAX_ACCUMULATOR_CELLS {
            return Err(HoughError::InvalidParameter(
                "rho",
                format!(
                    "accumulator of {num_angles}x{num_rhos} cells is too large, \
                     increase the rho or theta resolution"
                ),
            ));
        }

        let num_angles = num_angles as usize;
        let rho_offset = rho_offset as usize;
        let num_rhos = num_rhos as usize;

        let angles = (0..num_angles)
            .map(|k| min_theta + k as f32 * theta)
            .collect::<Vec<_>>();
        let cos_table = angles.iter().map(|a| a.cos()).collect();
        let sin_table = angles.iter().map(|a| a.sin()).collect();

        Ok(Self {
            rho,
            theta,
            rho_offset,
            num_rhos,
            angles,
            cos_table,
            sin_table,
        })
    }

    #[inline]
    pub fn num_angles(&self) -> usize {
        self.angles.len()
    }

    #[inline]
    pub fn num_rhos(&self) -> usize {
        self.num_rhos
    }

    /// Angular width of one bucket.
    #[inline]
    pub fn angle_step(&self) -> f32 {
        self.theta
    }

    #[inline]
    pub fn angle(&self, k: usize) -> f32 {
        self.angles[k]
    }

    /// `(cos, sin)` of the angle bucket `k`.
    #[inline]
    pub fn trig(&self, k: usize) -> (f32, f32) {
        (self.cos_table[k], self.sin_table[k])
    }

    /// Center distance of the bucket `j`.
    #[inline]
    pub fn rho_value(&self, j: usize) -> f32 {
        (j as f32 - self.rho_offset as f32) * self.rho
    }

    /// Distance bucket the pixel `[x, y]` votes for in angle bucket `k`.
    #[inline]
    pub fn rho_index(&self, k: usize, pixel: [usize; 2]) -> usize {
        let (cos, sin) = self.trig(k);
        let r = pixel[0] as f32 * cos + pixel[1] as f32 * sin;
        let idx = (r / self.rho).round() as i64 + self.rho_offset as i64;
        idx.clamp(0, self.num_rhos as i64 - 1) as usize
    }
}

/// Vote counts over a [`HoughSpace`], stored angle-major.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Accumulator {
    votes: Vec<u32>,
    num_rhos: usize,
}

impl Accumulator {
    pub fn new(space: &HoughSpace) -> Self {
        Self {
            votes: vec![0; space.num_angles() * space.num_rhos()],
            num_rhos: space.num_rhos(),
        }
    }

    /// Full vote counts read back from a [`CellIndex`].
    pub fn from_index(space: &HoughSpace, index: &CellIndex) -> Self {
        let votes = (0..space.num_angles())
            .flat_map(|k| (0..space.num_rhos()).map(move |j| index.count(k, j)))
            .collect();
        Self {
            votes,
            num_rhos: space.num_rhos(),
        }
    }

    #[inline]
    pub fn get(&self, k: usize, j: usize) -> u32 {
        self.votes[k * self.num_rhos + j]
    }

    /// Add one vote to the cell and return its new count.
    #[inline]
    pub fn increment(&mut self, k: usize, j: usize) -> u32 {
        let cell = &mut self.votes[k * self.num_rhos + j];
        *cell = cell.saturating_add(1);
        *cell
    }

    #[inline]
    pub fn decrement(&mut self, k: usize, j: usize) {
        let cell = &mut self.votes[k * self.num_rhos + j];
        *cell = cell.saturating_sub(1);
    }

    /// Cells with at least `threshold` votes as `(k, j, votes)`, in index order.
    pub fn cells_above(&self, threshold: u32) -> Vec<(usize, usize, u32)> {
        self.votes
            .iter()
            .enumerate()
            .filter(|(_, &v)| v >= threshold)
            .map(|(idx, &v)| (idx / self.num_rhos, idx % self.num_rhos, v))
            .collect()
    }
}

/// Vote every pixel in every angle bucket.
///
/// Each worker owns whole angle rows of the accumulator, so the rows are filled without any
/// synchronization.
pub(crate) fn accumulate(
    space: &HoughSpace,
    pixels: &[[usize; 2]],
    strategy: ExecutionStrategy,
) -> Result<Accumulator, HoughError> {
    let mut acc = Accumulator::new(space);
    parallel::par_iter_rows_indexed_mut(&mut acc.votes, space.num_rhos(), strategy, |k, row| {
        for &pixel in pixels {
            let j = space.rho_index(k, pixel);
            row[j] += 1;
        }
    })?;
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use approx::assert_relative_eq;

    use super::*;

    fn space(width: usize, height: usize) -> Result<HoughSpace, HoughError> {
        HoughSpace::new(ImageSize { width, height }, 1.0, PI / 180.0, 0.0, PI)
    }

    #[test]
    fn space_dimensions() -> Result<(), HoughError> {
        let space = space(3, 4)?;
        assert_eq!(space.num_angles(), 180);
        // diagonal of 5 pixels on each side of zero
        assert_eq!(space.num_rhos(), 11);
        assert_relative_eq!(space.rho_value(5), 0.0);
        assert_relative_eq!(space.rho_value(10), 5.0);
        assert_relative_eq!(space.angle(90), PI / 2.0, epsilon = 1e-6);
        Ok(())
    }

    #[test]
    fn rho_index_of_known_pixels() -> Result<(), HoughError> {
        let space = space(20, 20)?;
        // theta = 0 measures x, theta = 90 degrees measures y
        assert_relative_eq!(space.rho_value(space.rho_index(0, [7, 3])), 7.0);
        assert_relative_eq!(space.rho_value(space.rho_index(90, [7, 3])), 3.0);
        // the anti-diagonal normal puts the main diagonal at distance zero
        assert_relative_eq!(space.rho_value(space.rho_index(135, [12, 12])), 0.0);
        Ok(())
    }

    #[test]
    fn space_too_large() {
        let res = HoughSpace::new(
            ImageSize {
                width: 4000,
                height: 4000,
            },
            1e-4,
            PI / 180.0,
            0.0,
            PI,
        );
        assert!(matches!(res, Err(HoughError::InvalidParameter("rho", _))));
    }

    #[test]
    fn tiny_rho_is_rejected() {
        let res = HoughSpace::new(
            ImageSize {
                width: 20,
                height: 20,
            },
            1e-20,
            PI / 180.0,
            0.0,
            PI,
        );
        assert!(matches!(res, Err(HoughError::InvalidParameter("rho", _))));
    }

    #[test]
    fn angle_buckets_cover_the_range() -> Result<(), HoughError> {
        let size = ImageSize {
            width: 10,
            height: 10,
        };
        // 0.7 does not divide PI, the last bucket starts at 2.8
        let space = HoughSpace::new(size, 1.0, 0.7, 0.0, PI)?;
        assert_eq!(space.num_angles(), 5);
        assert_relative_eq!(space.angle(4), 2.8, epsilon = 1e-6);

        let space = HoughSpace::new(size, 1.0, PI / 90.0, 0.0, PI)?;
        assert_eq!(space.num_angles(), 90);

        let space = HoughSpace::new(size, 1.0, 4.0, 0.0, PI)?;
        assert_eq!(space.num_angles(), 1);
        Ok(())
    }

    #[test]
    fn accumulate_serial_matches_parallel() -> Result<(), HoughError> {
        let space = space(32, 24)?;
        let pixels = (0..24).map(|i| [i, (i * 7) % 24]).collect::<Vec<_>>();
        let serial = accumulate(&space, &pixels, ExecutionStrategy::Serial)?;
        let parallel = accumulate(&space, &pixels, ExecutionStrategy::ParallelRows)?;
        let fixed = accumulate(&space, &pixels, ExecutionStrategy::Fixed(3))?;
        assert_eq!(serial, parallel);
        assert_eq!(serial, fixed);
        let total: u64 = serial.votes.iter().map(|&v| v as u64).sum();
        assert_eq!(total, (pixels.len() * space.num_angles()) as u64);
        Ok(())
    }

    #[test]
    fn accumulate_horizontal_line_peak() -> Result<(), HoughError> {
        let space = space(50, 50)?;
        let pixels = (0..50).map(|x| [x, 12]).collect::<Vec<_>>();
        let acc = accumulate(&space, &pixels, ExecutionStrategy::Serial)?;
        let j = space.rho_index(90, [0, 12]);
        assert_eq!(acc.get(90, j), 50);
        let cells = acc.cells_above(50);
        assert!(cells.contains(&(90, j, 50)));
        Ok(())
    }

    #[test]
    fn counts_from_index_match_accumulation() -> Result<(), HoughError> {
        let space = space(24, 24)?;
        let pixels = (0..24).map(|i| [i, (i * 5) % 24]).collect::<Vec<_>>();
        let index = CellIndex::new(&space, &pixels, ExecutionStrategy::Serial)?;
        let acc = accumulate(&space, &pixels, ExecutionStrategy::ParallelRows)?;
        assert_eq!(Accumulator::from_index(&space, &index), acc);
        Ok(())
    }

    #[test]
    fn increment_and_decrement() -> Result<(), HoughError> {
        let space = space(4, 4)?;
        let mut acc = Accumulator::new(&space);
        assert_eq!(acc.increment(3, 2), 1);
        assert_eq!(acc.increment(3, 2), 2);
        acc.decrement(3, 2);
        assert_eq!(acc.get(3, 2), 1);
        acc.decrement(3, 2);
        acc.decrement(3, 2);
        assert_eq!(acc.get(3, 2), 0);
        Ok(())
    }
}
