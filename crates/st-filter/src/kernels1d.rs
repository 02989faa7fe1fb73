/// Sampled 1D Gaussian and its second derivative.
///
/// Conventions:
/// - `radius = floor(4*sigma + 0.5)`.
/// - `g` is normalized such that `sum(g) ~= 1`.
/// - `d2g[i] = (x^2/sigma^4 - 1/sigma^2) * g[i]` (using normalized `g`).
#[derive(Debug, Clone)]
pub struct GaussianKernel1D {
    pub sigma: f32,
    pub radius: usize,
    pub g: Vec<f32>,
    pub d2g: Vec<f32>,
}

impl GaussianKernel1D {
    pub fn new(sigma: f32) -> Self {
        assert!(
            sigma.is_finite() && sigma > 0.0,
            "sigma must be > 0 and finite"
        );

        let radius = (4.0 * f64::from(sigma) + 0.5) as usize;
        let len = 2 * radius + 1;

        let sigma2 = f64::from(sigma) * f64::from(sigma);
        let mut phi = vec![0.0f64; len];
        for (i, p) in phi.iter_mut().enumerate() {
            let x = i as f64 - radius as f64;
            *p = (-0.5 * x * x / sigma2).exp();
        }
        let sum: f64 = phi.iter().sum();
        for p in &mut phi {
            *p /= sum;
        }

        let g = phi.iter().map(|&p| p as f32).collect();
        let d2g = phi
            .iter()
            .enumerate()
            .map(|(i, &p)| {
                let x = i as f64 - radius as f64;
                ((x * x / (sigma2 * sigma2) - 1.0 / sigma2) * p) as f32
            })
            .collect();

        Self {
            sigma,
            radius,
            g,
            d2g,
        }
    }
}
