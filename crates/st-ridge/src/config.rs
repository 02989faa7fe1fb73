use serde::Deserialize;
use st_core::Error;

/// Tunable parameters of the ridge detector.
///
/// `min_sigma`, `max_sigma` and `sigma_ratio` bound the expected trace
/// half-width in pixels. They are absolute and do not follow the image
/// resolution.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RidgeConfig {
    pub min_sigma: f32,
    pub max_sigma: f32,
    pub sigma_ratio: f32,
    /// Minimum 8-connected size that keeps a weak vertical ridge.
    pub min_ridge_length: usize,
    /// Floor on the raw cube value at a maximum.
    pub low_threshold: f32,
    /// Strength a ridge pixel needs to count as prominent.
    pub high_threshold: f32,
    /// Laplacian and negative-cube cutoff for convex pixels.
    pub convex_threshold: f32,
    pub convex_sigma: f32,
}

impl Default for RidgeConfig {
    fn default() -> Self {
        Self {
            min_sigma: 0.7071,
            max_sigma: 30.0,
            sigma_ratio: 1.9,
            min_ridge_length: 15,
            low_threshold: 0.002,
            high_threshold: 0.006,
            convex_threshold: 0.00015,
            convex_sigma: 2.0,
        }
    }
}

impl RidgeConfig {
    /// Parses a JSON object; missing fields keep their defaults.
    pub fn from_json(text: &str) -> Result<Self, Error> {
        let cfg: Self = serde_json::from_str(text).map_err(|e| Error::InvalidParameter {
            name: "ridge config",
            reason: e.to_string(),
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if !self.min_sigma.is_finite() || self.min_sigma <= 0.0 {
            return Err(invalid("min_sigma", format!("must be finite and > 0, got {}", self.min_sigma)));
        }
        if !self.max_sigma.is_finite() || self.max_sigma < self.min_sigma {
            return Err(invalid(
                "max_sigma",
                format!("must be finite and >= min_sigma ({}), got {}", self.min_sigma, self.max_sigma),
            ));
        }
        if !self.sigma_ratio.is_finite() || self.sigma_ratio <= 1.0 {
            return Err(invalid("sigma_ratio", format!("must be finite and > 1, got {}", self.sigma_ratio)));
        }
        if !self.convex_sigma.is_finite() || self.convex_sigma <= 0.0 {
            return Err(invalid("convex_sigma", format!("must be finite and > 0, got {}", self.convex_sigma)));
        }
        for (name, value) in [
            ("low_threshold", self.low_threshold),
            ("high_threshold", self.high_threshold),
            ("convex_threshold", self.convex_threshold),
        ] {
            if !value.is_finite() {
                return Err(invalid(name, format!("must be finite, got {value}")));
            }
        }
        Ok(())
    }

    /// Number of difference-of-Gaussians layers:
    /// `floor(log_ratio(max_sigma / min_sigma)) + 1`.
    pub fn num_scales(&self) -> usize {
        let steps = (f64::from(self.max_sigma) / f64::from(self.min_sigma)).ln()
            / f64::from(self.sigma_ratio).ln();
        steps.floor() as usize + 1
    }

    pub fn sigma_for_index(&self, index: usize) -> f32 {
        (f64::from(self.min_sigma) * f64::from(self.sigma_ratio).powi(index as i32)) as f32
    }

    /// Geometric scale list with `num_scales() + 1` entries.
    pub fn sigma_list(&self) -> Result<Vec<f32>, Error> {
        self.validate()?;
        Ok((0..=self.num_scales()).map(|i| self.sigma_for_index(i)).collect())
    }
}

fn invalid(name: &'static str, reason: String) -> Error {
    Error::InvalidParameter { name, reason }
}
