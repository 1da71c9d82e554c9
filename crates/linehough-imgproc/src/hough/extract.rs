use super::accumulator::HoughSpace;
use super::types::LineSegment;

/// A run of edge pixels along a candidate line, long enough to be emitted.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Run {
    pub segment: LineSegment,
    /// Ids of the pixels forming the run.
    pub members: Vec<usize>,
}

/// Split the pixels lying on the candidate cell `(k, j)` into runs.
///
/// A pixel belongs to the candidate line when it votes for the cell itself, its distance to the
/// cell line is below half a distance bucket. Members are ordered by their projection on the line direction and split where
/// more than `max_line_gap` pixels are missing along the dominant axis of the direction. Runs
/// covering fewer than `min_line_length` pixels are dropped.
pub(crate) fn extract_runs<I>(
    space: &HoughSpace,
    k: usize,
    j: usize,
    candidates: I,
    min_line_length: u32,
    max_line_gap: u32,
) -> Vec<Run>
where
    I: IntoIterator<Item = (usize, [usize; 2])>,
{
    let (cos, sin) = space.trig(k);

    // (position along the line, pixel id, pixel)
    let mut members = candidates
        .into_iter()
        .filter(|&(_, pixel)| space.rho_index(k, pixel) == j)
        .map(|(id, pixel)| {
            let (x, y) = (pixel[0] as f32, pixel[1] as f32);
            (y * cos - x * sin, id, pixel)
        })
        .collect::<Vec<_>>();

    members.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

    // one pixel step along the dominant axis advances the projection by 1 / step
    let step = cos.abs().max(sin.abs());

    let mut runs = Vec::new();
    let mut start = 0;
    for i in 1..=members.len() {
        let split = i == members.len() || {
            let steps = ((members[i].0 - members[i - 1].0) * step).round() as i64;
            steps - 1 > max_line_gap as i64
        };
        if split {
            if let Some(run) = make_run(&members[start..i], min_line_length) {
                runs.push(run);
            }
            start = i;
        }
    }

    runs
}

fn make_run(members: &[(f32, usize, [usize; 2])], min_line_length: u32) -> Option<Run> {
    let (_, _, first) = members.first()?;
    let (_, _, last) = members.last()?;
    let segment = LineSegment::new(
        [first[0] as i32, first[1] as i32],
        [last[0] as i32, last[1] as i32],
    );
    if segment.pixel_span() < min_line_length {
        return None;
    }
    Some(Run {
        segment,
        members: members.iter().map(|&(_, id, _)| id).collect(),
    })
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use linehough_image::ImageSize;

    use super::*;
    use crate::hough::error::HoughError;

    fn space() -> Result<HoughSpace, HoughError> {
        HoughSpace::new(
            ImageSize {
                width: 40,
                height: 40,
            },
            1.0,
            PI / 180.0,
            0.0,
            PI,
        )
    }

    fn enumerate(pixels: &[[usize; 2]]) -> impl Iterator<Item = (usize, [usize; 2])> + '_ {
        pixels.iter().copied().enumerate()
    }

    #[test]
    fn single_run_on_horizontal_line() -> Result<(), HoughError> {
        let space = space()?;
        let pixels = (3..=30).map(|x| [x, 7]).collect::<Vec<_>>();
        let j = space.rho_index(90, [0, 7]);
        let runs = extract_runs(&space, 90, j, enumerate(&pixels), 10, 0);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].segment, LineSegment::new([3, 7], [30, 7]));
        assert_eq!(runs[0].members.len(), pixels.len());
        Ok(())
    }

    #[test]
    fn gap_splits_and_merges() -> Result<(), HoughError> {
        let space = space()?;
        // 4 missing pixels between x = 9 and x = 14
        let pixels = (0..=9)
            .chain(14..=23)
            .map(|x| [x, 5])
            .collect::<Vec<_>>();
        let j = space.rho_index(90, [0, 5]);

        let merged = extract_runs(&space, 90, j, enumerate(&pixels), 8, 4);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].segment, LineSegment::new([0, 5], [23, 5]));

        let mut split = extract_runs(&space, 90, j, enumerate(&pixels), 8, 3)
            .into_iter()
            .map(|run| run.segment)
            .collect::<Vec<_>>();
        split.sort_by_key(|s| s.p0);
        assert_eq!(
            split,
            vec![
                LineSegment::new([0, 5], [9, 5]),
                LineSegment::new([14, 5], [23, 5])
            ]
        );
        Ok(())
    }

    #[test]
    fn neighbouring_row_is_not_a_member() -> Result<(), HoughError> {
        let space = space()?;
        let mut pixels = (0..=30).map(|x| [x, 10]).collect::<Vec<_>>();
        pixels.extend((0..=30).map(|x| [x, 11]));
        let j = space.rho_index(90, [0, 10]);
        let runs = extract_runs(&space, 90, j, enumerate(&pixels), 20, 2);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].segment, LineSegment::new([0, 10], [30, 10]));
        let mut members = runs[0].members.clone();
        members.sort_unstable();
        assert_eq!(members, (0..=30).collect::<Vec<_>>());
        Ok(())
    }

    #[test]
    fn diagonal_steps_are_not_gaps() -> Result<(), HoughError> {
        let space = space()?;
        let pixels = (0..20).map(|i| [i, i]).collect::<Vec<_>>();
        let j = space.rho_index(135, [0, 0]);
        let runs = extract_runs(&space, 135, j, enumerate(&pixels), 15, 0);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].segment, LineSegment::new([0, 0], [19, 19]));
        Ok(())
    }

    #[test]
    fn short_runs_and_off_line_pixels_are_dropped() -> Result<(), HoughError> {
        let space = space()?;
        let mut pixels = (0..5).map(|x| [x, 10]).collect::<Vec<_>>();
        pixels.extend((20..35).map(|x| [x, 10]));
        pixels.push([25, 20]);
        let j = space.rho_index(90, [0, 10]);
        let runs = extract_runs(&space, 90, j, enumerate(&pixels), 10, 2);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].segment, LineSegment::new([20, 10], [34, 10]));
        let mut members = runs[0].members.clone();
        members.sort_unstable();
        assert_eq!(members, (5..20).collect::<Vec<_>>());
        Ok(())
    }
}
