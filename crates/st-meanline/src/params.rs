use serde::{Deserialize, Serialize};
use st_core::Error;

/// Resolution-dependent trace parameters.
///
/// `scale` is 1 for a full-size scan, 0.25 for a quarter-size one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraceParams {
    pub scale: f32,
}

impl Default for TraceParams {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl TraceParams {
    /// Half-width of the angle band searched around the ROI top edge.
    pub const ANGLE_PADDING_DEG: f32 = 2.0;
    pub const MIN_SEPARATION_ANGLE_DEG: f32 = 5.0;

    pub fn new(scale: f32) -> Result<Self, Error> {
        let params = Self { scale };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(Error::InvalidParameter {
                name: "scale",
                reason: format!("must be finite and > 0, got {}", self.scale),
            });
        }
        Ok(())
    }

    /// Expected distance between neighbouring traces, `round(150 * scale)`.
    pub fn trace_spacing(&self) -> usize {
        (150.0 * f64::from(self.scale)).round() as usize
    }

    /// Inset applied to every ROI side.
    pub fn padding(&self) -> f64 {
        self.trace_spacing() as f64 / 2.0
    }

    /// Components below this many pixels are artifacts, `round(500 * scale^2)`.
    pub fn small_object_size(&self) -> usize {
        let s = f64::from(self.scale);
        (500.0 * s * s).round() as usize
    }

    pub fn min_separation_distance(&self) -> usize {
        (2.0 * self.trace_spacing() as f64 / 3.0).floor() as usize
    }
}
