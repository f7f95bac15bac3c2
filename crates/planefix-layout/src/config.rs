use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

/// Configuration of a justified row layout run.
///
/// Missing fields take their default value when deserializing.
///
/// # Example
///
/// ```
/// use planefix_layout::LayoutConfig;
///
/// let config = LayoutConfig {
///     canvas_size: 400,
///     gap: 4.0,
///     target_row_height_ratio: 0.5,
/// };
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.target_row_height(), 200.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Width of the canvas in pixels.
    pub canvas_size: u32,
    /// Space between images and around the canvas border, in pixels.
    pub gap: f64,
    /// Target row height as a fraction of `canvas_size`, in (0, 1].
    pub target_row_height_ratio: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canvas_size: 4096,
            gap: 0.0,
            target_row_height_ratio: 0.25,
        }
    }
}

impl LayoutConfig {
    /// The nominal row height, `canvas_size * target_row_height_ratio`.
    pub fn target_row_height(&self) -> f64 {
        f64::from(self.canvas_size) * self.target_row_height_ratio
    }

    /// Check that the configuration can drive a layout run.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidConfig`] for a zero canvas size, a ratio
    /// outside (0, 1], or a negative or non-finite gap.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.canvas_size == 0 {
            return Err(LayoutError::InvalidConfig(
                "canvas_size must be positive".to_string(),
            ));
        }

        let ratio = self.target_row_height_ratio;
        if !ratio.is_finite() || ratio <= 0.0 || ratio > 1.0 {
            return Err(LayoutError::InvalidConfig(format!(
                "target_row_height_ratio must be in (0, 1], got {ratio}"
            )));
        }

        if !self.gap.is_finite() || self.gap < 0.0 {
            return Err(LayoutError::InvalidConfig(format!(
                "gap must be a non-negative number, got {}",
                self.gap
            )));
        }

        Ok(())
    }
}
