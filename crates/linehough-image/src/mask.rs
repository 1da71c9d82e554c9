use crate::error::ImageError;
use crate::image::ImageSize;

/// A binary edge mask.
///
/// The mask is stored row-major with one boolean per pixel, where `true` marks an edge pixel.
/// It is typically produced by an upstream edge detector (e.g. Canny followed by a region of
/// interest mask) and consumed read-only by the line detectors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeMask {
    size: ImageSize,
    data: Vec<bool>,
}

impl EdgeMask {
    /// Create a new edge mask from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the mask in pixels.
    /// * `data` - The row-major pixel data, `true` for edge pixels.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the mask size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use linehough_image::{EdgeMask, ImageSize};
    ///
    /// let mask = EdgeMask::new(
    ///     ImageSize {
    ///         width: 2,
    ///         height: 2,
    ///     },
    ///     vec![true, false, false, true],
    /// )
    /// .unwrap();
    ///
    /// assert!(mask.is_edge(1, 1));
    /// assert_eq!(mask.count_edges(), 2);
    /// ```
    pub fn new(size: ImageSize, data: Vec<bool>) -> Result<Self, ImageError> {
        if data.len() != size.area() {
            return Err(ImageError::InvalidDataLength(data.len(), size.area()));
        }
        Ok(Self { size, data })
    }

    /// Create a new edge mask with every pixel set to `val`.
    pub fn from_size_val(size: ImageSize, val: bool) -> Self {
        Self {
            size,
            data: vec![val; size.area()],
        }
    }

    /// Create an edge mask from a single channel 8-bit image.
    ///
    /// Pixels strictly greater than `threshold` are marked as edges, matching the output of a
    /// binary threshold or a Canny detector where edges are stored as 255.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The row-major grayscale data.
    /// * `threshold` - Values above this are edges.
    ///
    /// # Examples
    ///
    /// ```
    /// use linehough_image::{EdgeMask, ImageSize};
    ///
    /// let size = ImageSize { width: 3, height: 1 };
    /// let mask = EdgeMask::from_gray_u8(size, &[0, 255, 10], 0).unwrap();
    ///
    /// assert_eq!(mask.as_slice(), &[false, true, true]);
    /// ```
    pub fn from_gray_u8(size: ImageSize, data: &[u8], threshold: u8) -> Result<Self, ImageError> {
        if data.len() != size.area() {
            return Err(ImageError::InvalidDataLength(data.len(), size.area()));
        }
        Ok(Self {
            size,
            data: data.iter().map(|&v| v > threshold).collect(),
        })
    }

    /// Create an edge mask with the given pixel coordinates marked as edges.
    ///
    /// # Errors
    ///
    /// If any point lies outside the mask, an error is returned.
    pub fn from_points(size: ImageSize, points: &[[usize; 2]]) -> Result<Self, ImageError> {
        let mut mask = Self::from_size_val(size, false);
        for &[x, y] in points {
            mask.set(x, y, true)?;
        }
        Ok(mask)
    }

    /// The size of the mask in pixels.
    #[inline]
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// The width of the mask in pixels.
    #[inline]
    pub fn cols(&self) -> usize {
        self.size.width
    }

    /// The height of the mask in pixels.
    #[inline]
    pub fn rows(&self) -> usize {
        self.size.height
    }

    /// Whether the mask covers no pixels at all.
    pub fn is_empty(&self) -> bool {
        self.size.area() == 0
    }

    /// The row-major pixel data.
    pub fn as_slice(&self) -> &[bool] {
        &self.data
    }

    /// The row-major pixel data, mutable.
    pub fn as_slice_mut(&mut self) -> &mut [bool] {
        &mut self.data
    }

    /// Whether the pixel at `(x, y)` is an edge. Out of bounds pixels are not edges.
    #[inline]
    pub fn is_edge(&self, x: usize, y: usize) -> bool {
        x < self.size.width && y < self.size.height && self.data[y * self.size.width + x]
    }

    /// Set the value of the pixel at `(x, y)`.
    ///
    /// # Errors
    ///
    /// If the pixel lies outside the mask, an error is returned.
    pub fn set(&mut self, x: usize, y: usize, val: bool) -> Result<(), ImageError> {
        if x >= self.size.width || y >= self.size.height {
            return Err(ImageError::PixelOutOfBounds(
                x,
                y,
                self.size.width,
                self.size.height,
            ));
        }
        self.data[y * self.size.width + x] = val;
        Ok(())
    }

    /// Number of edge pixels in the mask.
    pub fn count_edges(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    /// Iterate over the `[x, y]` coordinates of the edge pixels in row-major order.
    pub fn edge_pixels(&self) -> impl Iterator<Item = [usize; 2]> + '_ {
        let width = self.size.width.max(1);
        self.data
            .iter()
            .enumerate()
            .filter(|(_, &v)| v)
            .map(move |(idx, _)| [idx % width, idx / width])
    }
}
