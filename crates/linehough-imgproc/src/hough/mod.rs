//! Line detection in binary edge masks with the Hough transform.
//!
//! Three detectors share the same Hough space discretization:
//!
//! * [`hough_lines_segments`] is the progressive probabilistic transform. Edge pixels vote in a
//!   random order and a line is extracted as soon as one accumulator cell reaches the vote
//!   threshold. The pixels of the extracted segments stop voting, so the same physical line is
//!   not reported twice.
//! * [`hough_lines_segments_exhaustive`] accumulates every edge pixel first and then extracts
//!   segments from the cells in descending vote order.
//! * [`hough_lines`] is the standard transform returning infinite lines in `(rho, theta)` form.
//!
//! Lines are parameterized as `rho = x * cos(theta) + y * sin(theta)` with `theta` in `[0, PI)`.

mod accumulator;
mod error;
mod exhaustive;
mod extract;
mod index;
mod params;
mod probabilistic;
mod refine;
mod standard;
mod types;

pub use error::HoughError;
pub use exhaustive::hough_lines_segments_exhaustive;
pub use params::{HoughLinesParams, HoughLinesStandardParams};
pub use probabilistic::{hough_lines_segments, hough_lines_segments_with_rng};
pub use standard::hough_lines;
pub use types::{HoughLine, LineSegment};
