use linehough_image::EdgeMask;

use crate::hough::LineSegment;

/// Helper function to mark a pixel as edge, ignoring pixels outside the mask.
#[inline]
fn set_edge(mask: &mut EdgeMask, x: i64, y: i64) {
    if mask.size().contains(x, y) {
        let index = y as usize * mask.cols() + x as usize;
        mask.as_slice_mut()[index] = true;
    }
}

/// Rasterizes a line into an edge mask inplace using Bresenham's line algorithm.
///
/// Pixels falling outside the mask are skipped.
///
/// # Arguments
///
/// * `mask` - The mask to draw on.
/// * `p0` - The start point of the line as `[x, y]`.
/// * `p1` - The end point of the line as `[x, y]`.
///
/// # Examples
///
/// ```
/// use linehough_image::{EdgeMask, ImageSize};
/// use linehough_imgproc::draw::draw_line;
///
/// let mut mask = EdgeMask::from_size_val(ImageSize { width: 5, height: 5 }, false);
/// draw_line(&mut mask, [0, 0], [4, 4]);
///
/// assert_eq!(mask.count_edges(), 5);
/// assert!(mask.is_edge(2, 2));
/// ```
pub fn draw_line(mask: &mut EdgeMask, p0: [i64; 2], p1: [i64; 2]) {
    let [mut x0, mut y0] = p0;
    let [x1, y1] = p1;

    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };

    let mut err = dx - dy;

    loop {
        set_edge(mask, x0, y0);

        if x0 == x1 && y0 == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x0 += sx;
        }
        if e2 < dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Rasterizes a detected segment into an edge mask.
pub fn draw_segment(mask: &mut EdgeMask, segment: &LineSegment) {
    draw_line(
        mask,
        [segment.p0[0] as i64, segment.p0[1] as i64],
        [segment.p1[0] as i64, segment.p1[1] as i64],
    );
}
