#![deny(missing_docs)]
//! Image types for representing binary edge masks.

/// image size representation.
pub mod image;

/// binary edge mask representation.
pub mod mask;

/// Error types for the image module.
pub mod error;

pub use crate::error::ImageError;
pub use crate::image::ImageSize;
pub use crate::mask::EdgeMask;
