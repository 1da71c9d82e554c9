#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// utilities to rasterize line segments into edge masks.
pub mod draw;

/// hough transform line detection module.
pub mod hough;

/// module containing parallization utilities.
pub mod parallel;
