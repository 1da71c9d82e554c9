//! Hough transform line detection on binary edge masks.
//!
//! ```
//! use linehough::image::{EdgeMask, ImageSize};
//! use linehough::imgproc::draw::draw_line;
//! use linehough::imgproc::hough::{hough_lines_segments, HoughLinesParams};
//!
//! let mut mask = EdgeMask::from_size_val(ImageSize { width: 64, height: 64 }, false);
//! draw_line(&mut mask, [4, 60], [60, 4]);
//!
//! let params = HoughLinesParams {
//!     threshold: 20,
//!     min_line_length: 30,
//!     max_line_gap: 2,
//!     random_seed: Some(0),
//!     ..Default::default()
//! };
//! let segments = hough_lines_segments(&mask, &params).unwrap();
//! assert_eq!(segments.len(), 1);
//! ```

#[doc(inline)]
pub use linehough_image as image;

#[doc(inline)]
pub use linehough_imgproc as imgproc;
