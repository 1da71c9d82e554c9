use std::f32::consts::PI;

use linehough_image::EdgeMask;

use super::error::HoughError;

/// Parameters for the segment detectors.
///
/// The defaults match the values commonly used to find lane markings on a Canny edge map.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HoughLinesParams {
    /// Distance resolution of the accumulator in pixels.
    pub rho: f32,
    /// Angle resolution of the accumulator in radians.
    pub theta: f32,
    /// Minimum number of votes for an accumulator cell to become a line candidate.
    pub threshold: u32,
    /// Minimum number of pixels covered by an emitted segment.
    pub min_line_length: u32,
    /// Maximum number of missing pixels between two runs merged into one segment.
    pub max_line_gap: u32,
    /// Stop after this many segments when set.
    pub max_lines: Option<usize>,
    /// Seed for the pixel sampling order. `None` draws a seed from the OS.
    pub random_seed: Option<u64>,
}

impl Default for HoughLinesParams {
    fn default() -> Self {
        Self {
            rho: 1.0,
            theta: PI / 180.0,
            threshold: 15,
            min_line_length: 40,
            max_line_gap: 20,
            max_lines: None,
            random_seed: None,
        }
    }
}

impl HoughLinesParams {
    /// Check the parameters against the mask they will run on.
    ///
    /// # Errors
    ///
    /// Returns [`HoughError::InvalidParameter`] for non-positive resolutions, a zero threshold
    /// or a mask without any pixel.
    pub fn validate(&self, mask: &EdgeMask) -> Result<(), HoughError> {
        validate_resolution(self.rho, self.theta)?;
        validate_threshold(self.threshold)?;
        validate_mask(mask)
    }
}

/// Parameters for the standard Hough transform.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HoughLinesStandardParams {
    /// Distance resolution of the accumulator in pixels.
    pub rho: f32,
    /// Angle resolution of the accumulator in radians.
    pub theta: f32,
    /// Minimum number of votes for a line.
    pub threshold: u32,
    /// Smallest angle considered, in radians.
    pub min_theta: f32,
    /// Upper bound (exclusive) of the angles considered, in radians.
    pub max_theta: f32,
    /// Half size, in accumulator cells, of the window a line must be the maximum of.
    /// `0` disables the suppression.
    pub nms_radius: usize,
    /// Keep only the strongest lines when set.
    pub max_lines: Option<usize>,
}

impl Default for HoughLinesStandardParams {
    fn default() -> Self {
        Self {
            rho: 1.0,
            theta: PI / 180.0,
            threshold: 100,
            min_theta: 0.0,
            max_theta: PI,
            nms_radius: 1,
            max_lines: None,
        }
    }
}

impl HoughLinesStandardParams {
    /// Check the parameters against the mask they will run on.
    ///
    /// # Errors
    ///
    /// Returns [`HoughError::InvalidParameter`] for non-positive resolutions, a zero threshold,
    /// an empty angle range or a mask without any pixel.
    pub fn validate(&self, mask: &EdgeMask) -> Result<(), HoughError> {
        validate_resolution(self.rho, self.theta)?;
        validate_threshold(self.threshold)?;
        if !(self.min_theta >= 0.0 && self.min_theta < self.max_theta && self.max_theta <= PI) {
            return Err(HoughError::InvalidParameter(
                "min_theta",
                format!(
                    "angle range [{}, {}) must be non-empty and within [0, PI]",
                    self.min_theta, self.max_theta
                ),
            ));
        }
        validate_mask(mask)
    }
}

fn validate_resolution(rho: f32, theta: f32) -> Result<(), HoughError> {
    if !(rho.is_finite() && rho > 0.0) {
        return Err(HoughError::InvalidParameter(
            "rho",
            format!("must be a positive number, got {rho}"),
        ));
    }
    if !(theta.is_finite() && theta > 0.0) {
        return Err(HoughError::InvalidParameter(
            "theta",
            format!("must be a positive number, got {theta}"),
        ));
    }
    Ok(())
}

fn validate_threshold(threshold: u32) -> Result<(), HoughError> {
    if threshold < 1 {
        return Err(HoughError::InvalidParameter(
            "threshold",
            "must be at least 1".to_string(),
        ));
    }
    Ok(())
}

fn validate_mask(mask: &EdgeMask) -> Result<(), HoughError> {
    if mask.is_empty() {
        return Err(HoughError::InvalidParameter(
            "mask",
            format!("must have a non-zero area, got {}", mask.size()),
        ));
    }
    Ok(())
}
