use super::accumulator::HoughSpace;
use super::error::HoughError;
use crate::parallel::{self, ExecutionStrategy};

/// Upper bound on the number of entries stored by a single [`CellIndex`].
const MAX_INDEX_ENTRIES: f64 = (1u64 << 28) as f64;

/// Edge pixel ids grouped by accumulator cell.
///
/// Row `k` stores `num_rhos + 1` offsets followed by the id of every edge pixel, sorted by the
/// distance bucket the pixel votes for in angle bucket `k`. Ids inside a cell are ascending.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CellIndex {
    data: Vec<u32>,
    stride: usize,
    num_rhos: usize,
}

impl CellIndex {
    /// Sort the pixels of every angle row into their cells.
    ///
    /// Angle rows are independent and are filled with the given strategy.
    pub fn new(
        space: &HoughSpace,
        pixels: &[[usize; 2]],
        strategy: ExecutionStrategy,
    ) -> Result<Self, HoughError> {
        let num_rhos = space.num_rhos();
        let stride = num_rhos + 1 + pixels.len();

        let entries = space.num_angles() as f64 * stride as f64;
        if entries > MAX_INDEX_ENTRIES {
            return Err(HoughError::InvalidParameter(
                "mask",
                format!(
                    "{} edge pixels over {} angle buckets exceed the cell index capacity",
                    pixels.len(),
                    space.num_angles()
                ),
            ));
        }

        let mut data = vec![0u32; space.num_angles() * stride];
        parallel::par_iter_rows_indexed_mut(&mut data, stride, strategy, |k, row| {
            let (offsets, ids) = row.split_at_mut(num_rhos + 1);
            let buckets = pixels
                .iter()
                .map(|&pixel| space.rho_index(k, pixel))
                .collect::<Vec<_>>();

            for &j in &buckets {
                offsets[j + 1] += 1;
            }
            for j in 0..num_rhos {
                offsets[j + 1] += offsets[j];
            }

            let mut cursor = offsets[..num_rhos].to_vec();
            for (id, &j) in buckets.iter().enumerate() {
                ids[cursor[j] as usize] = id as u32;
                cursor[j] += 1;
            }
        })?;

        Ok(Self {
            data,
            stride,
            num_rhos,
        })
    }

    #[inline]
    fn row(&self, k: usize) -> (&[u32], &[u32]) {
        self.data[k * self.stride..(k + 1) * self.stride].split_at(self.num_rhos + 1)
    }

    /// Ids of the pixels voting for the cell `(k, j)`.
    #[inline]
    pub fn members(&self, k: usize, j: usize) -> &[u32] {
        let (offsets, ids) = self.row(k);
        &ids[offsets[j] as usize..offsets[j + 1] as usize]
    }

    /// Number of pixels voting for the cell `(k, j)`.
    #[inline]
    pub fn count(&self, k: usize, j: usize) -> u32 {
        let (offsets, _) = self.row(k);
        offsets[j + 1] - offsets[j]
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use linehough_image::ImageSize;

    use super::*;
    use crate::hough::accumulator::accumulate;

    fn space(width: usize, height: usize) -> Result<HoughSpace, HoughError> {
        HoughSpace::new(ImageSize { width, height }, 1.0, PI / 180.0, 0.0, PI)
    }

    #[test]
    fn members_follow_the_votes() -> Result<(), HoughError> {
        let space = space(30, 20)?;
        let pixels = (0..40).map(|i| [(i * 7) % 30, (i * 3) % 20]).collect::<Vec<_>>();
        let index = CellIndex::new(&space, &pixels, ExecutionStrategy::Serial)?;
        let acc = accumulate(&space, &pixels, ExecutionStrategy::Serial)?;

        for k in [0, 45, 90, 179] {
            for j in 0..space.num_rhos() {
                let members = index.members(k, j);
                assert_eq!(members.len() as u32, acc.get(k, j));
                assert_eq!(index.count(k, j), acc.get(k, j));
                assert!(members.windows(2).all(|w| w[0] < w[1]));
                assert!(members
                    .iter()
                    .all(|&id| space.rho_index(k, pixels[id as usize]) == j));
            }
        }
        Ok(())
    }

    #[test]
    fn strategies_build_the_same_index() -> Result<(), HoughError> {
        let space = space(16, 16)?;
        let pixels = (0..16).map(|i| [i, 15 - i]).collect::<Vec<_>>();
        let serial = CellIndex::new(&space, &pixels, ExecutionStrategy::Serial)?;
        let parallel = CellIndex::new(&space, &pixels, ExecutionStrategy::ParallelRows)?;
        let fixed = CellIndex::new(&space, &pixels, ExecutionStrategy::Fixed(2))?;
        assert_eq!(serial, parallel);
        assert_eq!(serial, fixed);
        Ok(())
    }

    #[test]
    fn horizontal_row_is_one_cell() -> Result<(), HoughError> {
        let space = space(20, 20)?;
        let pixels = (0..20).map(|x| [x, 6]).collect::<Vec<_>>();
        let index = CellIndex::new(&space, &pixels, ExecutionStrategy::Serial)?;
        let j = space.rho_index(90, [0, 6]);
        assert_eq!(index.members(90, j), (0..20).collect::<Vec<u32>>().as_slice());
        Ok(())
    }
}
