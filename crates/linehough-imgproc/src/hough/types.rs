/// An infinite line in Hough space.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HoughLine {
    /// Signed distance from the origin to the line in pixels.
    pub rho: f32,
    /// Angle of the line normal in radians, `0` for vertical lines and `PI / 2` for horizontal.
    pub theta: f32,
    /// Number of edge pixels voting for the line.
    pub votes: u32,
}

impl HoughLine {
    /// Unit direction vector `[dx, dy]` along the line.
    pub fn direction(&self) -> [f32; 2] {
        [-self.theta.sin(), self.theta.cos()]
    }

    /// Perpendicular distance from the point `[x, y]` to the line.
    pub fn distance_to(&self, point: [f32; 2]) -> f32 {
        (point[0] * self.theta.cos() + point[1] * self.theta.sin() - self.rho).abs()
    }
}

/// A line segment with integer pixel endpoints.
///
/// The endpoints are stored so that `p0` is lexicographically smaller than `p1` in `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineSegment {
    /// First endpoint as `[x, y]`.
    pub p0: [i32; 2],
    /// Second endpoint as `[x, y]`.
    pub p1: [i32; 2],
}

impl LineSegment {
    /// Create a new segment, ordering the endpoints.
    ///
    /// # Examples
    ///
    /// ```
    /// use linehough_imgproc::hough::LineSegment;
    ///
    /// let segment = LineSegment::new([9, 3], [1, 3]);
    ///
    /// assert_eq!(segment.p0, [1, 3]);
    /// assert_eq!(segment.p1, [9, 3]);
    /// assert_eq!(segment.pixel_span(), 9);
    /// ```
    pub fn new(a: [i32; 2], b: [i32; 2]) -> Self {
        if (b[0], b[1]) < (a[0], a[1]) {
            Self { p0: b, p1: a }
        } else {
            Self { p0: a, p1: b }
        }
    }

    /// Horizontal extent `x1 - x0`.
    pub fn dx(&self) -> i32 {
        self.p1[0] - self.p0[0]
    }

    /// Vertical extent `y1 - y0`.
    pub fn dy(&self) -> i32 {
        self.p1[1] - self.p0[1]
    }

    /// Euclidean distance between the endpoints.
    pub fn length(&self) -> f32 {
        let (dx, dy) = (self.dx() as f32, self.dy() as f32);
        (dx * dx + dy * dy).sqrt()
    }

    /// Number of pixels covered by the rasterized segment.
    pub fn pixel_span(&self) -> u32 {
        self.dx().unsigned_abs().max(self.dy().unsigned_abs()) + 1
    }
}
