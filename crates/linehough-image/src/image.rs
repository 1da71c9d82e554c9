/// Dimensions of an edge mask, in pixels.
///
/// The Hough space derived from a mask spans the diagonal of this size.
///
/// # Examples
///
/// ```
/// use linehough_image::ImageSize;
///
/// let size = ImageSize { width: 30, height: 40 };
///
/// assert_eq!(size.area(), 1200);
/// assert_eq!(size.diagonal(), 50.0);
/// assert!(size.contains(29, 39));
/// assert!(!size.contains(30, 0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageSize {
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
}

impl ImageSize {
    /// Number of pixels covered by the image.
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Length of the image diagonal in pixels.
    pub fn diagonal(&self) -> f32 {
        ((self.width * self.width + self.height * self.height) as f32).sqrt()
    }

    /// Whether the pixel coordinate lies inside the image.
    #[inline]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ImageSize;

    #[test]
    fn image_size_from_array() {
        let size: ImageSize = [4, 3].into();
        assert_eq!(size.width, 4);
        assert_eq!(size.height, 3);
        assert_eq!(size.area(), 12);
        assert_eq!(size.diagonal(), 5.0);
    }

    #[test]
    fn image_size_contains() {
        let size = ImageSize {
            width: 2,
            height: 3,
        };
        assert!(size.contains(0, 0));
        assert!(size.contains(1, 2));
        assert!(!size.contains(2, 0));
        assert!(!size.contains(0, 3));
        assert!(!size.contains(-1, 1));
    }

    #[test]
    fn image_size_display() {
        let size = ImageSize {
            width: 7,
            height: 9,
        };
        assert_eq!(size.to_string(), "7x9");
    }
}
